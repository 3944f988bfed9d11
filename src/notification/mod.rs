// Copyright (c) 2025 - Cowboy AI, Inc.
//! Review Notifications
//!
//! Students are told about review decisions by email. Delivery is behind the
//! [`EmailTransport`] trait; the bundled [`SimulatedTransport`] only waits,
//! logs, and appends the message to an [`EmailLog`](crate::store::EmailLog).
//!
//! ```text
//! approve/reject → template → EmailTransport::send → EmailLog
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ReservationResult;

pub mod simulated;
pub mod templates;

pub use simulated::SimulatedTransport;
pub use templates::{approval_email, format_long_date, rejection_email};

/// A rendered email ready for delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailTemplate {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// An email the transport reported as sent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentEmail {
    pub id: Uuid,
    pub sent_at: DateTime<Utc>,
    #[serde(flatten)]
    pub template: EmailTemplate,
}

impl SentEmail {
    pub fn new(template: EmailTemplate, sent_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            sent_at,
            template,
        }
    }

    pub fn kind(&self) -> EmailKind {
        EmailKind::from_subject(&self.template.subject)
    }
}

/// What a sent email was about, derived from its subject line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailKind {
    Approval,
    Rejection,
    Other,
}

impl EmailKind {
    /// Classify by subject; "No Aprobada" also contains "Aprobada" so it is
    /// checked first
    pub fn from_subject(subject: &str) -> Self {
        if subject.contains("No Aprobada") {
            EmailKind::Rejection
        } else if subject.contains("Aprobada") {
            EmailKind::Approval
        } else {
            EmailKind::Other
        }
    }

    /// Badge text
    pub fn label(&self) -> &'static str {
        match self {
            EmailKind::Approval => "Aprobación",
            EmailKind::Rejection => "Rechazo",
            EmailKind::Other => "Otro",
        }
    }
}

/// Email delivery collaborator
#[async_trait]
pub trait EmailTransport: Send + Sync {
    /// Deliver `template`; `Ok` means the transport accepted it
    async fn send(&self, template: EmailTemplate) -> ReservationResult<()>;
}

/// Whether a review's notification went out
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum NotificationStatus {
    Sent,
    Failed(String),
}

impl NotificationStatus {
    pub fn is_sent(&self) -> bool {
        matches!(self, NotificationStatus::Sent)
    }

    /// Status line shown to the administrator
    pub fn message(&self) -> &'static str {
        match self {
            NotificationStatus::Sent => "✅ Correo enviado exitosamente",
            NotificationStatus::Failed(_) => "❌ Error al enviar correo",
        }
    }
}
