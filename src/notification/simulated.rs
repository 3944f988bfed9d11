// Copyright (c) 2025 - Cowboy AI, Inc.
//! Simulated email transport
//!
//! Models a delivery API: waits once for the configured latency, logs the
//! message, and appends it to the sent-email log. Nothing leaves the process.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::{EmailTemplate, EmailTransport, SentEmail};
use crate::config::NotificationConfig;
use crate::errors::ReservationResult;
use crate::store::EmailLog;

/// Transport that records instead of delivering
pub struct SimulatedTransport<L: EmailLog> {
    log: Arc<L>,
    delay: Duration,
}

impl<L: EmailLog> SimulatedTransport<L> {
    pub fn new(log: Arc<L>, config: &NotificationConfig) -> Self {
        Self {
            log,
            delay: config.send_delay(),
        }
    }
}

#[async_trait]
impl<L: EmailLog> EmailTransport for SimulatedTransport<L> {
    async fn send(&self, template: EmailTemplate) -> ReservationResult<()> {
        info!(to = %template.to, subject = %template.subject, "email would be sent");

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.log.record(SentEmail::new(template, Utc::now())).await
    }
}
