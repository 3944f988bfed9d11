// Copyright (c) 2025 - Cowboy AI, Inc.
//! Service Layer for Lab Reservations
//!
//! Orchestrates the pure availability engine, validator and review state
//! machine with the store, the admin session and email delivery.
//!
//! # Architecture
//!
//! ```text
//! Student / Administrator
//!     ↓
//! Service Layer (this module)
//!     ↓
//! Validator / Availability Engine / Review FSM (pure)
//!     ↓
//! ReservationStore + SessionStore + EmailLog
//!     ↓
//! EmailTransport
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use lab_reservations::service::{ReservationService, StoreBackedReservationService};
//!
//! let store = Arc::new(InMemoryStore::new());
//! let service = StoreBackedReservationService::simulated(store, ServiceConfig::default());
//!
//! let reservation = service.submit(SubmitReservationCommand::now(request)).await?;
//! service.login("admin123").await?;
//! let outcome = service.approve(reservation.id).await?;
//! ```

pub mod reservation;

pub use reservation::{
    ReservationService, ReviewOutcome, ServiceError, ServiceResult, StoreBackedReservationService,
    SubmitReservationCommand, WeeklyStats,
};
