// Copyright (c) 2025 - Cowboy AI, Inc.
//! Lab-room reservations
//!
//! Students request hourly bookings of computer laboratories; administrators
//! approve or reject them. The crate provides the availability engine, the
//! booking-rule validator, the review state machine, email notifications,
//! and store abstractions, tied together by the service layer.

pub mod auth;
pub mod availability;
pub mod config;
pub mod domain;
pub mod errors;
pub mod notification;
pub mod service;
pub mod state_machine;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use availability::{check_availability, day_availability, DayAvailability, HourAvailability};
pub use config::{BookingPolicy, NotificationConfig, ServiceConfig};
pub use domain::{
    LabRoom, Reservation, ReservationId, ReservationRequest, ReservationStatus, RoomType, TimeSlot,
    LAB_ROOMS,
};
pub use errors::{ReservationError, ReservationResult};
pub use service::{
    ReservationService, ServiceError, ServiceResult, StoreBackedReservationService,
    SubmitReservationCommand,
};
pub use store::{InMemoryStore, JsonFileStore};
pub use validation::{validate_reservation, RuleViolation, ValidationReport};
