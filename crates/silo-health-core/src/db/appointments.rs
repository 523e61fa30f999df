//! Appointment catalog database operations.

use rusqlite::{params, Row};

use super::{Database, DbError, DbResult};
use crate::models::{Appointment, AppointmentStatus, AppointmentType};

impl Database {
    /// Insert or update an appointment.
    pub fn upsert_appointment(&self, appointment: &Appointment) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO appointments (
                id, doctor_name, specialty, date, time, location,
                appointment_type, status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(id) DO UPDATE SET
                doctor_name = excluded.doctor_name,
                specialty = excluded.specialty,
                date = excluded.date,
                time = excluded.time,
                location = excluded.location,
                appointment_type = excluded.appointment_type,
                status = excluded.status
            "#,
            params![
                appointment.id,
                appointment.doctor_name,
                appointment.specialty,
                appointment.date,
                appointment.time,
                appointment.location,
                type_to_string(appointment.appointment_type),
                status_to_string(appointment.status),
            ],
        )?;
        Ok(())
    }

    /// List all appointments in catalog order.
    pub fn list_appointments(&self) -> DbResult<Vec<Appointment>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, doctor_name, specialty, date, time, location,
                   appointment_type, status
            FROM appointments
            ORDER BY rowid
            "#,
        )?;

        let rows = stmt.query_map([], read_row)?;

        let mut appointments = Vec::new();
        for row in rows {
            appointments.push(row?.try_into()?);
        }
        Ok(appointments)
    }
}

struct AppointmentRow {
    id: String,
    doctor_name: String,
    specialty: String,
    date: String,
    time: String,
    location: String,
    appointment_type: String,
    status: String,
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<AppointmentRow> {
    Ok(AppointmentRow {
        id: row.get(0)?,
        doctor_name: row.get(1)?,
        specialty: row.get(2)?,
        date: row.get(3)?,
        time: row.get(4)?,
        location: row.get(5)?,
        appointment_type: row.get(6)?,
        status: row.get(7)?,
    })
}

impl TryFrom<AppointmentRow> for Appointment {
    type Error = DbError;

    fn try_from(row: AppointmentRow) -> Result<Self, Self::Error> {
        Ok(Appointment {
            id: row.id,
            doctor_name: row.doctor_name,
            specialty: row.specialty,
            date: row.date,
            time: row.time,
            location: row.location,
            appointment_type: string_to_type(&row.appointment_type)?,
            status: string_to_status(&row.status)?,
        })
    }
}

fn type_to_string(t: AppointmentType) -> &'static str {
    match t {
        AppointmentType::Upcoming => "upcoming",
        AppointmentType::Past => "past",
    }
}

fn string_to_type(s: &str) -> Result<AppointmentType, DbError> {
    match s {
        "upcoming" => Ok(AppointmentType::Upcoming),
        "past" => Ok(AppointmentType::Past),
        _ => Err(DbError::Constraint(format!("Unknown appointment type: {}", s))),
    }
}

fn status_to_string(status: AppointmentStatus) -> &'static str {
    match status {
        AppointmentStatus::Confirmed => "confirmed",
        AppointmentStatus::Pending => "pending",
        AppointmentStatus::Completed => "completed",
        AppointmentStatus::Cancelled => "cancelled",
    }
}

fn string_to_status(s: &str) -> Result<AppointmentStatus, DbError> {
    match s {
        "confirmed" => Ok(AppointmentStatus::Confirmed),
        "pending" => Ok(AppointmentStatus::Pending),
        "completed" => Ok(AppointmentStatus::Completed),
        "cancelled" => Ok(AppointmentStatus::Cancelled),
        _ => Err(DbError::Constraint(format!("Unknown appointment status: {}", s))),
    }
}
