// Copyright (c) 2025 - Cowboy AI, Inc.
//! Lab Reservations CLI
//!
//! Command-line front end over a JSON file store. Every invocation shares
//! state through that file, including the administrator session.
//!
//! Run with: cargo run --bin lab-reservations -- <command>
//!
//! Environment:
//! - `LAB_CONFIG`: JSON configuration file
//! - `LAB_ADMIN_PASSWORD`: shared administrator password
//! - `LAB_EMAIL_DELAY_MS`: simulated email latency
//! - `RUST_LOG`: log filter

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use lab_reservations::domain::{
    LabRoom, ReservationId, ReservationRequest, ReservationStatus, TimeSlot, LAB_ROOMS,
};
use lab_reservations::notification::NotificationStatus;
use lab_reservations::service::{
    ReservationService, ServiceError, StoreBackedReservationService, SubmitReservationCommand,
};
use lab_reservations::{JsonFileStore, ServiceConfig};

/// Lab-room reservation requests and reviews
#[derive(Debug, Parser)]
#[command(name = "lab-reservations", version, about)]
struct Cli {
    /// JSON store file
    #[arg(long, global = true, default_value = "lab-reservations.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List laboratory rooms
    Rooms,

    /// List start times usable for a booking length
    Slots {
        /// Booking length in hours
        #[arg(short, long, default_value_t = 1)]
        duration: u32,
    },

    /// Show seats left for a room and date
    Availability {
        #[arg(long)]
        room: String,
        /// Date as YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
        /// Start time as HH:00; without it the whole day is shown
        #[arg(long)]
        start: Option<TimeSlot>,
        #[arg(short, long, default_value_t = 1)]
        duration: u32,
    },

    /// Request a reservation
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        room: String,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        start: TimeSlot,
        #[arg(short, long, default_value_t = 1)]
        duration: u32,
    },

    /// List reservations
    List {
        /// Only reservations made with this email
        #[arg(long)]
        email: Option<String>,
        /// pending, approved or rejected
        #[arg(long)]
        status: Option<ReservationStatus>,
    },

    /// Start an administrator session
    Login {
        #[arg(long)]
        password: String,
    },

    /// End the administrator session
    Logout,

    /// Approve a pending reservation and notify the student
    Approve { id: ReservationId },

    /// Reject a pending reservation and notify the student
    Reject { id: ReservationId },

    /// Show the sent-email log
    Emails,

    /// Weekly reservation counts
    Stats {
        /// Any date in the week, defaults to today
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to render output")?
    );
    Ok(())
}

fn print_rooms(rooms: &[LabRoom]) {
    for room in rooms {
        println!(
            "{:<8} {:<12} {:<8} {} seats",
            room.id,
            room.name,
            room.room_type.to_string(),
            room.capacity
        );
    }
}

fn print_notification(status: &NotificationStatus) {
    match status {
        NotificationStatus::Sent => println!("{}", status.message()),
        NotificationStatus::Failed(reason) => println!("{} ({reason})", status.message()),
    }
}

async fn run<S>(cli: Cli, service: S) -> Result<()>
where
    S: ReservationService,
{
    match cli.command {
        Command::Rooms => print_rooms(&LAB_ROOMS),

        Command::Slots { duration } => {
            let slots: Vec<String> = service
                .available_start_slots(duration)
                .iter()
                .map(ToString::to_string)
                .collect();
            println!("{}", slots.join(" "));
        }

        Command::Availability {
            room,
            date,
            start: Some(start),
            duration,
        } => {
            let available = service
                .check_availability(&room, date, start, duration)
                .await?;
            println!("{room} {date} {start} x{duration}h: {available} seats available");
        }

        Command::Availability {
            room,
            date,
            start: None,
            ..
        } => {
            let day = service.day_availability(&room, date).await?;
            for (slot, hour) in &day {
                println!("{slot}  {:>2}/{}", hour.available, hour.total);
            }
        }

        Command::Submit {
            name,
            last_name,
            email,
            room,
            date,
            start,
            duration,
        } => {
            let request = ReservationRequest {
                student_name: name,
                student_last_name: last_name,
                student_email: email,
                lab_room: room,
                date,
                start_time: start,
                duration,
            };
            match service.submit(SubmitReservationCommand::now(request)).await {
                Ok(reservation) => {
                    println!("Reserva enviada: {}", reservation.id);
                    println!("Estado: {}", reservation.status.label());
                }
                Err(ServiceError::Rejected(report)) => {
                    for message in report.messages() {
                        eprintln!("- {message}");
                    }
                    anyhow::bail!("reservation request rejected");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Command::List { email, status } => {
            let reservations = match (email, status) {
                (Some(email), status) => service
                    .reservations_for_email(&email)
                    .await?
                    .into_iter()
                    .filter(|r| status.map_or(true, |s| r.status == s))
                    .collect(),
                (None, Some(status)) => service.reservations_with_status(status).await?,
                (None, None) => service.reservations().await?,
            };
            print_json(&reservations)?;
        }

        Command::Login { password } => {
            service
                .login(&password)
                .await
                .context("Contraseña incorrecta")?;
            println!("Sesión de administrador iniciada");
        }

        Command::Logout => {
            service.logout().await?;
            println!("Sesión cerrada");
        }

        Command::Approve { id } => {
            let outcome = service.approve(id).await?;
            for warning in &outcome.warnings {
                println!("warning: {warning}");
            }
            println!("{} → {}", outcome.reservation.id, outcome.reservation.status.label());
            print_notification(&outcome.notification);
        }

        Command::Reject { id } => {
            let outcome = service.reject(id).await?;
            for warning in &outcome.warnings {
                println!("warning: {warning}");
            }
            println!("{} → {}", outcome.reservation.id, outcome.reservation.status.label());
            print_notification(&outcome.notification);
        }

        Command::Emails => {
            for email in service.sent_emails().await? {
                println!(
                    "[{}] {} → {} ({})",
                    email.sent_at.format("%Y-%m-%d %H:%M"),
                    email.kind().label(),
                    email.template.to,
                    email.template.subject
                );
            }
        }

        Command::Stats { today } => {
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            print_json(&service.weekly_stats(today).await?)?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = ServiceConfig::from_env().context("Failed to load configuration")?;
    let store = Arc::new(JsonFileStore::new(cli.store.clone()));
    info!(store = %store.path().display(), "using reservation store");

    let service = StoreBackedReservationService::simulated(store, config);

    run(cli, service).await
}
