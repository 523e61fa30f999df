//! Appointment models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether an appointment is still ahead or already happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentType {
    Upcoming,
    Past,
}

/// Booking status of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Confirmed,
    Pending,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// Capitalized label for the status badge.
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
        }
    }
}

/// A scheduled or past visit. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Unique identifier
    pub id: String,
    /// Doctor's display name (e.g., "Dr. Sarah Johnson")
    pub doctor_name: String,
    /// Medical specialty
    pub specialty: String,
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    /// Time as displayed (e.g., "10:30 AM")
    pub time: String,
    /// Clinic or facility
    pub location: String,
    /// Upcoming or past
    #[serde(rename = "type")]
    pub appointment_type: AppointmentType,
    /// Booking status
    pub status: AppointmentStatus,
}

impl Appointment {
    /// Create a new appointment with required fields.
    pub fn new(doctor_name: String, specialty: String, appointment_type: AppointmentType) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            doctor_name,
            specialty,
            date: String::new(),
            time: String::new(),
            location: String::new(),
            appointment_type,
            status: AppointmentStatus::Pending,
        }
    }

    /// Parse the ISO date, if well formed.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    pub fn is_upcoming(&self) -> bool {
        self.appointment_type == AppointmentType::Upcoming
    }
}
