//! What the viewer draws for each record type.

use crate::models::{Record, RecordType};

use super::Rotation;

/// Placeholder text for records with nothing to show.
pub const NO_CONTENT: &str = "No content available";

/// Placeholder for formats the viewer cannot render.
pub const PDF_UNAVAILABLE: &str = "PDF Viewer Not Available";

/// Rendering descriptor handed to the host UI.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordContent {
    /// Draw the resource with a scale/rotate transform (images).
    Transformed {
        url: Option<String>,
        scale: f64,
        rotation_degrees: u16,
    },
    /// Show an unsupported-format placeholder (pdf).
    Unsupported { message: &'static str },
    /// Show inline text (reports, labs, and any type not listed above).
    Text(String),
}

impl RecordContent {
    pub fn for_record(record: &Record, zoom_percent: u32, rotation: Rotation) -> Self {
        match record.record_type {
            RecordType::Image => RecordContent::Transformed {
                url: record.url.clone(),
                scale: f64::from(zoom_percent) / 100.0,
                rotation_degrees: rotation.degrees(),
            },
            RecordType::Pdf => RecordContent::Unsupported {
                message: PDF_UNAVAILABLE,
            },
            RecordType::Report | RecordType::Lab | RecordType::Other(_) => {
                let text = record
                    .content
                    .as_deref()
                    .filter(|c| !c.is_empty())
                    .unwrap_or(NO_CONTENT);
                RecordContent::Text(text.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_is_transformed() {
        let record = Record::new("X-Ray Report".into(), RecordType::Image);
        let content = RecordContent::for_record(&record, 150, Rotation::Deg90);
        assert_eq!(
            content,
            RecordContent::Transformed {
                url: None,
                scale: 1.5,
                rotation_degrees: 90,
            }
        );
    }

    #[test]
    fn test_pdf_is_placeholder() {
        let record = Record::new("Discharge".into(), RecordType::Pdf);
        assert_eq!(
            RecordContent::for_record(&record, 100, Rotation::Deg0),
            RecordContent::Unsupported {
                message: PDF_UNAVAILABLE
            }
        );
    }

    #[test]
    fn test_lab_shows_inline_text() {
        let mut record = Record::new("Blood Test Results".into(), RecordType::Lab);
        record.content = Some("Hemoglobin 14.2 g/dL".into());
        assert_eq!(
            RecordContent::for_record(&record, 100, Rotation::Deg0),
            RecordContent::Text("Hemoglobin 14.2 g/dL".into())
        );
    }

    #[test]
    fn test_missing_content_falls_back() {
        let record = Record::new("Consultation Notes".into(), RecordType::Report);
        assert_eq!(
            RecordContent::for_record(&record, 100, Rotation::Deg0),
            RecordContent::Text(NO_CONTENT.into())
        );
    }

    #[test]
    fn test_unknown_type_renders_as_text() {
        let mut record = Record::new("Genome Panel".into(), RecordType::from("genomics"));
        record.content = Some("BRCA1: negative".into());
        assert_eq!(
            RecordContent::for_record(&record, 100, Rotation::Deg0),
            RecordContent::Text("BRCA1: negative".into())
        );
    }
}
