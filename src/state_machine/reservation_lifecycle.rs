// Copyright (c) 2025 - Cowboy AI, Inc.
//! Reservation Review State Machine
//!
//! # States
//!
//! - Pending: submitted, awaiting review
//! - Approved: accepted (terminal)
//! - Rejected: declined (terminal)
//!
//! # Inputs
//!
//! - Approve: Pending → Approved
//! - Reject: Pending → Rejected
//!
//! Repeating the decision that produced a terminal state is accepted as a
//! no-op and reported through [`TransitionOutput::warnings`]. Reversing a
//! decision is an invalid transition.

use std::fmt;

use super::{StateMachine, TransitionError, TransitionResult};
use crate::domain::ReservationStatus;

/// Administrator decision (FSM input)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Reject,
}

impl ReviewDecision {
    /// Status this decision leads to
    pub fn target(&self) -> ReservationStatus {
        match self {
            ReviewDecision::Approve => ReservationStatus::Approved,
            ReviewDecision::Reject => ReservationStatus::Rejected,
        }
    }
}

impl fmt::Display for ReviewDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewDecision::Approve => write!(f, "approve"),
            ReviewDecision::Reject => write!(f, "reject"),
        }
    }
}

/// Transition output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionOutput {
    /// Warnings generated during transition
    pub warnings: Vec<String>,
}

impl TransitionOutput {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn with_warning(warning: impl Into<String>) -> Self {
        Self {
            warnings: vec![warning.into()],
        }
    }

    /// Whether the transition left the state unchanged
    pub fn is_repeat(&self) -> bool {
        !self.warnings.is_empty()
    }
}

impl StateMachine for ReservationStatus {
    type Input = ReviewDecision;
    type Output = TransitionOutput;

    fn transition(&self, input: &Self::Input) -> TransitionResult<(Self, Self::Output)> {
        use ReservationStatus::*;
        use ReviewDecision::*;

        match (self, input) {
            (Pending, Approve) => Ok((Approved, TransitionOutput::ok())),
            (Pending, Reject) => Ok((Rejected, TransitionOutput::ok())),

            (Approved, Approve) => Ok((
                Approved,
                TransitionOutput::with_warning("Reservation was already approved"),
            )),
            (Rejected, Reject) => Ok((
                Rejected,
                TransitionOutput::with_warning("Reservation was already rejected"),
            )),

            (Approved, Reject) | (Rejected, Approve) => Err(TransitionError::InvalidTransition {
                from: self.to_string(),
                to: input.target().to_string(),
            }),
        }
    }

    fn valid_inputs(&self) -> Vec<Self::Input> {
        use ReservationStatus::*;
        use ReviewDecision::*;

        match self {
            Pending => vec![Approve, Reject],
            Approved => vec![Approve],
            Rejected => vec![Reject],
        }
    }
}
