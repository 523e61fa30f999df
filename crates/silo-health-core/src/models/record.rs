//! Medical record models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, stable record identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh local identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Kind of document a record holds.
///
/// Types this build does not know about are kept as [`RecordType::Other`]
/// and are rendered like text reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordType {
    Pdf,
    Image,
    Report,
    Lab,
    Other(String),
}

impl RecordType {
    pub fn as_str(&self) -> &str {
        match self {
            RecordType::Pdf => "pdf",
            RecordType::Image => "image",
            RecordType::Report => "report",
            RecordType::Lab => "lab",
            RecordType::Other(s) => s,
        }
    }

    /// Whether the viewer offers page navigation for this type.
    pub fn is_paginated(&self) -> bool {
        matches!(self, RecordType::Pdf)
    }
}

impl From<String> for RecordType {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "pdf" => RecordType::Pdf,
            "image" => RecordType::Image,
            "report" => RecordType::Report,
            "lab" => RecordType::Lab,
            _ => RecordType::Other(s),
        }
    }
}

impl From<&str> for RecordType {
    fn from(s: &str) -> Self {
        RecordType::from(s.to_string())
    }
}

impl From<RecordType> for String {
    fn from(t: RecordType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entry in a record's audit history (shown on the viewer's info tab).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordHistoryEvent {
    /// What happened (e.g., "Created", "Shared with Dr. Smith")
    pub action: String,
    /// When it happened, as displayed
    pub at: String,
}

impl RecordHistoryEvent {
    pub fn new(action: impl Into<String>, at: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            at: at.into(),
        }
    }
}

fn default_page_count() -> u32 {
    1
}

/// A medical record in the patient's catalog. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Unique identifier
    pub id: RecordId,
    /// Display title
    pub title: String,
    /// Document kind
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Date as displayed (e.g., "Today", "2024-03-15")
    pub date: String,
    /// Issuing provider or facility
    pub provider: String,
    /// Department within the provider
    pub department: String,
    /// Responsible doctor
    pub doctor: String,
    /// Inline text content (reports, lab results)
    #[serde(default)]
    pub content: Option<String>,
    /// External resource reference
    #[serde(default)]
    pub url: Option<String>,
    /// Number of pages (pdf only)
    #[serde(default = "default_page_count")]
    pub page_count: u32,
    /// Audit history
    #[serde(default)]
    pub history: Vec<RecordHistoryEvent>,
}

impl Record {
    /// Create a new record with required fields.
    pub fn new(title: String, record_type: RecordType) -> Self {
        Self {
            id: RecordId::generate(),
            title,
            record_type,
            date: String::new(),
            provider: String::new(),
            department: String::new(),
            doctor: String::new(),
            content: None,
            url: None,
            page_count: 1,
            history: Vec::new(),
        }
    }

    pub fn is_paginated(&self) -> bool {
        self.record_type.is_paginated()
    }

    /// Pages the viewer can navigate; always at least 1.
    pub fn total_pages(&self) -> u32 {
        if self.is_paginated() {
            self.page_count.max(1)
        } else {
            1
        }
    }

    /// Uppercase type label for the details panel.
    pub fn type_label(&self) -> String {
        self.record_type.as_str().to_uppercase()
    }

    /// Doctor name with a "Dr." prefix, unless it already has one.
    pub fn doctor_display(&self) -> String {
        if self.doctor.starts_with("Dr.") || self.doctor.starts_with("Dr ") {
            self.doctor.clone()
        } else {
            format!("Dr. {}", self.doctor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record() {
        let record = Record::new("X-Ray Report".into(), RecordType::Image);
        assert_eq!(record.title, "X-Ray Report");
        assert_eq!(record.id.as_str().len(), 36); // UUID format
        assert_eq!(record.total_pages(), 1);
    }

    #[test]
    fn test_unknown_type_is_preserved() {
        let t = RecordType::from("dicom");
        assert_eq!(t, RecordType::Other("dicom".into()));
        assert_eq!(t.as_str(), "dicom");
        assert!(!t.is_paginated());
    }

    #[test]
    fn test_type_parsing_is_case_insensitive() {
        assert_eq!(RecordType::from("PDF"), RecordType::Pdf);
        assert_eq!(RecordType::from("Lab"), RecordType::Lab);
    }

    #[test]
    fn test_total_pages_only_for_pdf() {
        let mut pdf = Record::new("Discharge".into(), RecordType::Pdf);
        pdf.page_count = 4;
        assert_eq!(pdf.total_pages(), 4);

        let mut image = Record::new("Scan".into(), RecordType::Image);
        image.page_count = 4;
        assert_eq!(image.total_pages(), 1);

        pdf.page_count = 0;
        assert_eq!(pdf.total_pages(), 1);
    }

    #[test]
    fn test_doctor_display() {
        let mut record = Record::new("Notes".into(), RecordType::Report);
        record.doctor = "Brown".into();
        assert_eq!(record.doctor_display(), "Dr. Brown");

        record.doctor = "Dr. Smith".into();
        assert_eq!(record.doctor_display(), "Dr. Smith");
    }

    #[test]
    fn test_json_uses_type_key() {
        let json = r#"{
            "id": "1",
            "title": "Blood Test Results",
            "type": "lab",
            "date": "Today",
            "provider": "Central Lab",
            "department": "Laboratory",
            "doctor": "Dr. Smith"
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.record_type, RecordType::Lab);
        assert_eq!(record.page_count, 1);
        assert!(record.content.is_none());
        assert_eq!(record.type_label(), "LAB");
    }
}
