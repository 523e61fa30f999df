//! Built-in sample data for the dashboard and appointments views.

use crate::models::{
    Appointment, AppointmentStatus, AppointmentType, Record, RecordHistoryEvent, RecordId,
    RecordType,
};

fn sample_history() -> Vec<RecordHistoryEvent> {
    vec![
        RecordHistoryEvent::new("Created", "2024-03-15 09:30 AM"),
        RecordHistoryEvent::new("Shared with Dr. Smith", "2024-03-16 02:15 PM"),
    ]
}

fn record(
    id: &str,
    title: &str,
    record_type: RecordType,
    provider: &str,
    date: &str,
    department: &str,
    doctor: &str,
) -> Record {
    Record {
        id: RecordId::from(id),
        title: title.to_string(),
        record_type,
        date: date.to_string(),
        provider: provider.to_string(),
        department: department.to_string(),
        doctor: doctor.to_string(),
        content: None,
        url: None,
        page_count: 1,
        history: sample_history(),
    }
}

/// Recent records shown on the dashboard.
pub fn sample_records() -> Vec<Record> {
    vec![
        record(
            "1",
            "Blood Test Results",
            RecordType::Lab,
            "Central Lab",
            "Today",
            "Laboratory",
            "Dr. Smith",
        ),
        record(
            "2",
            "X-Ray Report",
            RecordType::Image,
            "City Hospital",
            "Yesterday",
            "Radiology",
            "Dr. Johnson",
        ),
        record(
            "3",
            "Consultation Notes",
            RecordType::Report,
            "Medical Center",
            "2 days ago",
            "Internal Medicine",
            "Dr. Brown",
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn appointment(
    id: &str,
    doctor_name: &str,
    specialty: &str,
    date: &str,
    time: &str,
    location: &str,
    appointment_type: AppointmentType,
    status: AppointmentStatus,
) -> Appointment {
    Appointment {
        id: id.to_string(),
        doctor_name: doctor_name.to_string(),
        specialty: specialty.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        location: location.to_string(),
        appointment_type,
        status,
    }
}

/// Appointments shown in the appointments view.
pub fn sample_appointments() -> Vec<Appointment> {
    vec![
        appointment(
            "1",
            "Dr. Sarah Johnson",
            "Family Medicine",
            "2024-03-20",
            "10:30 AM",
            "Central Medical Clinic",
            AppointmentType::Upcoming,
            AppointmentStatus::Confirmed,
        ),
        appointment(
            "2",
            "Dr. Michael Chen",
            "Cardiology",
            "2024-03-25",
            "2:15 PM",
            "Heart Care Center",
            AppointmentType::Upcoming,
            AppointmentStatus::Pending,
        ),
        appointment(
            "3",
            "Dr. Emily White",
            "Dermatology",
            "2024-03-15",
            "3:45 PM",
            "Skin Health Clinic",
            AppointmentType::Past,
            AppointmentStatus::Completed,
        ),
    ]
}
