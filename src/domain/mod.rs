// Copyright (c) 2025 - Cowboy AI, Inc.
//! Reservation Domain Models
//!
//! Core domain concepts for lab-room booking.
//!
//! # Value Objects
//!
//! - [`TimeSlot`] - whole-hour start time (`HH:00`)
//! - [`ReservationId`] - opaque, time-ordered identifier
//! - [`ReservationStatus`] - `pending | approved | rejected`
//!
//! # Entities
//!
//! - [`Reservation`] - a stored booking
//! - [`ReservationRequest`] - a booking candidate before acceptance
//! - [`LabRoom`] - static room catalog entry

pub mod email;
pub mod lab_room;
pub mod reservation;
pub mod time_slot;

pub use email::is_valid_email;
pub use lab_room::{find_room, LabRoom, RoomType, LAB_ROOMS};
pub use reservation::{
    Reservation, ReservationId, ReservationPatch, ReservationRequest, ReservationStatus,
};
pub use time_slot::{TimeSlot, TimeSlotError};
