//! Per-list category selectors and searchable fields.

use crate::models::{Appointment, AppointmentType, Record, RecordType};

use super::Filterable;

/// Tabs of the appointments list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppointmentCategory {
    #[default]
    Upcoming,
    Past,
    All,
}

impl AppointmentCategory {
    /// Tab order as shown.
    pub const ALL: [AppointmentCategory; 3] = [
        AppointmentCategory::Upcoming,
        AppointmentCategory::Past,
        AppointmentCategory::All,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AppointmentCategory::Upcoming => "Upcoming",
            AppointmentCategory::Past => "Past",
            AppointmentCategory::All => "All",
        }
    }
}

impl Filterable for Appointment {
    type Category = AppointmentCategory;

    fn matches_category(&self, category: &AppointmentCategory) -> bool {
        match category {
            AppointmentCategory::All => true,
            AppointmentCategory::Upcoming => self.appointment_type == AppointmentType::Upcoming,
            AppointmentCategory::Past => self.appointment_type == AppointmentType::Past,
        }
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![
            self.doctor_name.as_str(),
            self.specialty.as_str(),
            self.location.as_str(),
        ]
    }
}

/// Selector for the records list. Open-ended: any type or department.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RecordCategory {
    #[default]
    All,
    Type(RecordType),
    Department(String),
}

impl Filterable for Record {
    type Category = RecordCategory;

    // The records list has no search box.
    const SEARCHABLE: bool = false;

    fn matches_category(&self, category: &RecordCategory) -> bool {
        match category {
            RecordCategory::All => true,
            RecordCategory::Type(t) => &self.record_type == t,
            RecordCategory::Department(d) => self.department.eq_ignore_ascii_case(d),
        }
    }

    fn searchable_fields(&self) -> Vec<&str> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appointment_category_labels() {
        let labels: Vec<_> = AppointmentCategory::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["Upcoming", "Past", "All"]);
    }

    #[test]
    fn test_department_match_ignores_case() {
        let mut record = Record::new("X-Ray Report".into(), RecordType::Image);
        record.department = "Radiology".into();
        assert!(record.matches_category(&RecordCategory::Department("radiology".into())));
        assert!(!record.matches_category(&RecordCategory::Department("Laboratory".into())));
    }

    #[test]
    fn test_record_never_matches_text() {
        let record = Record::new("Blood Test Results".into(), RecordType::Lab);
        assert!(record.matches_query(""));
        assert!(!record.matches_query("blood"));
    }
}
