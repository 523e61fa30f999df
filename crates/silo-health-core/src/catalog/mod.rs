//! Read-only catalogs of records and appointments.
//!
//! The dashboard and appointments views never mutate their catalogs; they are
//! loaded once and filtered on every render. Two providers exist: the built-in
//! [`StaticCatalog`] and the on-device [`Database`].

mod sample;

pub use sample::{sample_appointments, sample_records};

use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::db::{Database, DbError};
use crate::models::{Appointment, Record, RecordId};

/// Catalog errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Database error: {0}")]
    Db(#[from] DbError),

    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Source of medical records.
pub trait RecordCatalog {
    fn list(&self) -> CatalogResult<Vec<Arc<Record>>>;

    /// Look up a single record by ID.
    fn find(&self, id: &RecordId) -> CatalogResult<Option<Arc<Record>>> {
        Ok(self.list()?.into_iter().find(|r| &r.id == id))
    }
}

/// Source of appointments.
pub trait AppointmentCatalog {
    fn list(&self) -> CatalogResult<Vec<Appointment>>;
}

/// Catalog held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    records: Vec<Arc<Record>>,
    appointments: Vec<Appointment>,
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    records: Vec<Record>,
    #[serde(default)]
    appointments: Vec<Appointment>,
}

impl StaticCatalog {
    pub fn new(records: Vec<Record>, appointments: Vec<Appointment>) -> Self {
        Self {
            records: records.into_iter().map(Arc::new).collect(),
            appointments,
        }
    }

    /// The sample data shipped with the app.
    pub fn sample() -> Self {
        Self::new(sample_records(), sample_appointments())
    }

    /// Load from a JSON document of the form
    /// `{"records": [...], "appointments": [...]}`.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Ok(Self::new(file.records, file.appointments))
    }

    /// Copy every entry into the database, keeping catalog order.
    pub fn store_in(&self, db: &Database) -> CatalogResult<()> {
        for record in &self.records {
            db.upsert_record(record)?;
        }
        for appointment in &self.appointments {
            db.upsert_appointment(appointment)?;
        }
        Ok(())
    }

    pub fn records(&self) -> &[Arc<Record>] {
        &self.records
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }
}

impl RecordCatalog for StaticCatalog {
    fn list(&self) -> CatalogResult<Vec<Arc<Record>>> {
        Ok(self.records.clone())
    }

    fn find(&self, id: &RecordId) -> CatalogResult<Option<Arc<Record>>> {
        Ok(self.records.iter().find(|r| &r.id == id).cloned())
    }
}

impl AppointmentCatalog for StaticCatalog {
    fn list(&self) -> CatalogResult<Vec<Appointment>> {
        Ok(self.appointments.clone())
    }
}

impl RecordCatalog for Database {
    fn list(&self) -> CatalogResult<Vec<Arc<Record>>> {
        Ok(self.list_records()?.into_iter().map(Arc::new).collect())
    }

    fn find(&self, id: &RecordId) -> CatalogResult<Option<Arc<Record>>> {
        Ok(self.get_record(id)?.map(Arc::new))
    }
}

impl AppointmentCatalog for Database {
    fn list(&self) -> CatalogResult<Vec<Appointment>> {
        Ok(self.list_appointments()?)
    }
}

/// Records sharing a department or doctor with `record`, in catalog order.
pub fn related_records<'a>(record: &Record, catalog: &'a [Arc<Record>]) -> Vec<&'a Arc<Record>> {
    catalog
        .iter()
        .filter(|other| other.id != record.id)
        .filter(|other| {
            (!record.department.is_empty() && other.department == record.department)
                || (!record.doctor.is_empty() && other.doctor == record.doctor)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordType;

    #[test]
    fn test_sample_catalog() {
        let catalog = StaticCatalog::sample();
        assert_eq!(RecordCatalog::list(&catalog).unwrap().len(), 3);
        assert_eq!(AppointmentCatalog::list(&catalog).unwrap().len(), 3);
    }

    #[test]
    fn test_find_by_id() {
        let catalog = StaticCatalog::sample();
        let found = catalog.find(&RecordId::from("2")).unwrap().unwrap();
        assert_eq!(found.title, "X-Ray Report");
        assert!(catalog.find(&RecordId::from("99")).unwrap().is_none());
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "records": [
                {"id": "a", "title": "Discharge Summary", "type": "pdf", "date": "2024-01-02",
                 "provider": "City Hospital", "department": "Cardiology", "doctor": "Dr. Lee",
                 "pageCount": 3}
            ]
        }"#;
        let catalog = StaticCatalog::from_json(json).unwrap();
        assert_eq!(catalog.records().len(), 1);
        assert_eq!(catalog.records()[0].record_type, RecordType::Pdf);
        assert_eq!(catalog.records()[0].total_pages(), 3);
        assert!(catalog.appointments().is_empty());
    }

    #[test]
    fn test_from_json_invalid() {
        let result = StaticCatalog::from_json("{ not json");
        assert!(matches!(result, Err(CatalogError::Json(_))));
    }

    #[test]
    fn test_database_catalog_matches_static() {
        let db = Database::open_in_memory().unwrap();
        let catalog = StaticCatalog::sample();
        catalog.store_in(&db).unwrap();

        let from_db = RecordCatalog::list(&db).unwrap();
        let from_static = RecordCatalog::list(&catalog).unwrap();
        assert_eq!(from_db, from_static);

        assert_eq!(
            AppointmentCatalog::list(&db).unwrap(),
            catalog.appointments().to_vec()
        );
    }

    #[test]
    fn test_related_records() {
        let mut a = Record::new("Echo".into(), RecordType::Image);
        a.department = "Cardiology".into();
        a.doctor = "Dr. Lee".into();
        let mut b = Record::new("ECG".into(), RecordType::Report);
        b.department = "Cardiology".into();
        let mut c = Record::new("Follow-up".into(), RecordType::Report);
        c.doctor = "Dr. Lee".into();
        let d = Record::new("Unrelated".into(), RecordType::Lab);

        let catalog: Vec<Arc<Record>> = vec![a, b, c, d].into_iter().map(Arc::new).collect();
        let related: Vec<&str> = related_records(&catalog[0], &catalog)
            .into_iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(related, vec!["ECG", "Follow-up"]);
    }
}
