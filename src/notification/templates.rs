// Copyright (c) 2025 - Cowboy AI, Inc.
//! Approval and rejection email templates

use chrono::{Datelike, NaiveDate};

use super::EmailTemplate;
use crate::domain::{find_room, Reservation};

const WEEKDAYS: [&str; 7] = [
    "lunes",
    "martes",
    "miércoles",
    "jueves",
    "viernes",
    "sábado",
    "domingo",
];

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Long Spanish date, e.g. `martes, 10 de junio de 2025`
pub fn format_long_date(date: NaiveDate) -> String {
    let weekday = WEEKDAYS[date.weekday().num_days_from_monday() as usize];
    let month = MONTHS[date.month0() as usize];
    format!("{weekday}, {} de {month} de {}", date.day(), date.year())
}

fn hours_label(duration: u32) -> &'static str {
    if duration == 1 {
        "hora"
    } else {
        "horas"
    }
}

fn room_name(reservation: &Reservation) -> &'static str {
    find_room(&reservation.lab_room)
        .map(|room| room.name)
        .unwrap_or_default()
}

const STYLE: &str = r#"
    body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; }
    .container { max-width: 600px; margin: 0 auto; padding: 20px; }
    .header { background: #596079; color: white; padding: 20px; text-align: center; border-radius: 8px 8px 0 0; }
    .content { background: #f9f9f9; padding: 30px; border-radius: 0 0 8px 8px; }
    .reservation-details { background: white; padding: 20px; border-radius: 8px; margin: 20px 0; }
    .detail-row { display: flex; justify-content: space-between; margin: 10px 0; padding: 8px 0; border-bottom: 1px solid #eee; }
    .detail-label { font-weight: bold; color: #596079; }
    .success { color: #22c55e; font-weight: bold; }
    .rejected { color: #ef4444; font-weight: bold; }
    .footer { text-align: center; margin-top: 30px; color: #666; font-size: 14px; }
"#;

fn detail_row(label: &str, value: &str) -> String {
    format!(
        r#"<div class="detail-row"><span class="detail-label">{label}:</span><span>{value}</span></div>"#
    )
}

fn html_list(items: &[&str]) -> String {
    let items: String = items.iter().map(|item| format!("<li>{item}</li>")).collect();
    format!("<ul>{items}</ul>")
}

fn html_document(content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <style>{STYLE}</style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1>CIBERTEC</h1>
      <p>Sistema de Reservas</p>
    </div>
    <div class="content">
      {content}
      <div class="footer">
        <p>CIBERTEC - Instituto de Educación Superior<br>
        Sistema de Reservas de Laboratorios</p>
      </div>
    </div>
  </div>
</body>
</html>"#
    )
}

/// Email telling the student their reservation was approved
pub fn approval_email(reservation: &Reservation) -> EmailTemplate {
    let room = room_name(reservation);
    let date = format_long_date(reservation.date);
    let schedule = format!("{} - {}:00", reservation.start_time, reservation.end_hour());
    let duration = format!("{} {}", reservation.duration, hours_label(reservation.duration));
    let full_name = reservation.student_full_name();

    let content = format!(
        r#"<h2 class="success">¡Tu reserva ha sido aprobada!</h2>
      <p>Hola {full_name},</p>
      <p>Nos complace informarte que tu solicitud de reserva ha sido <strong>aprobada</strong>.</p>
      <div class="reservation-details">
        <h3>Detalles de tu reserva:</h3>
        {}{}{}{}
      </div>
      <h3>Instrucciones importantes:</h3>
      {}
      <p>Si tienes alguna consulta, no dudes en contactarnos.</p>"#,
        detail_row("Laboratorio", room),
        detail_row("Fecha", &date),
        detail_row("Horario", &schedule),
        detail_row("Duración", &duration),
        html_list(&[
            "Llega puntualmente a la hora reservada",
            "Presenta tu DNI o carnet de estudiante",
            "Respeta el tiempo asignado",
            "Mantén el laboratorio limpio y ordenado",
        ]),
    );

    let text = format!(
        "CIBERTEC - Reserva Aprobada

Hola {full_name},

¡Tu reserva ha sido aprobada!

Detalles:
- Laboratorio: {room}
- Fecha: {date}
- Horario: {schedule}
- Duración: {duration}

Instrucciones:
- Llega puntualmente
- Presenta tu DNI o carnet
- Respeta el tiempo asignado
- Mantén el laboratorio limpio

CIBERTEC - Sistema de Reservas
"
    );

    EmailTemplate {
        to: reservation.student_email.clone(),
        subject: "✅ Reserva Aprobada - CIBERTEC".to_string(),
        html: html_document(&content),
        text,
    }
}

/// Email telling the student their reservation was not approved
pub fn rejection_email(reservation: &Reservation) -> EmailTemplate {
    let room = room_name(reservation);
    let date = format_long_date(reservation.date);
    let start = reservation.start_time.to_string();
    let full_name = reservation.student_full_name();

    let content = format!(
        r#"<h2 class="rejected">Reserva no aprobada</h2>
      <p>Hola {full_name},</p>
      <p>Lamentamos informarte que tu solicitud de reserva no pudo ser aprobada en esta ocasión.</p>
      <div class="reservation-details">
        <h3>Detalles de la solicitud:</h3>
        {}{}{}
      </div>
      <h3>Posibles motivos:</h3>
      {}
      <p>Te invitamos a realizar una nueva solicitud con un horario diferente.</p>"#,
        detail_row("Laboratorio", room),
        detail_row("Fecha", &date),
        detail_row("Horario", &start),
        html_list(&[
            "El laboratorio ya está ocupado en ese horario",
            "Mantenimiento programado",
            "Capacidad máxima alcanzada",
            "Horario no disponible",
        ]),
    );

    let text = format!(
        "CIBERTEC - Reserva No Aprobada

Hola {full_name},

Tu solicitud de reserva no pudo ser aprobada.

Detalles de la solicitud:
- Laboratorio: {room}
- Fecha: {date}
- Horario: {start}

Posibles motivos:
- Laboratorio ocupado
- Mantenimiento programado
- Capacidad máxima alcanzada
- Horario no disponible

Te invitamos a realizar una nueva solicitud.

CIBERTEC - Sistema de Reservas
"
    );

    EmailTemplate {
        to: reservation.student_email.clone(),
        subject: "❌ Reserva No Aprobada - CIBERTEC".to_string(),
        html: html_document(&content),
        text,
    }
}
