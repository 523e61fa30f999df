//! Record catalog database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::{Record, RecordId, RecordType};

const RECORD_COLUMNS: &str = r#"
    id, title, record_type, date, provider, department, doctor,
    content, url, page_count, history
"#;

impl Database {
    /// Insert or update a record. Updates keep the record's catalog position.
    pub fn upsert_record(&self, record: &Record) -> DbResult<()> {
        let history_json = serde_json::to_string(&record.history)?;

        self.conn.execute(
            r#"
            INSERT INTO records (
                id, title, record_type, date, provider, department, doctor,
                content, url, page_count, history
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                record_type = excluded.record_type,
                date = excluded.date,
                provider = excluded.provider,
                department = excluded.department,
                doctor = excluded.doctor,
                content = excluded.content,
                url = excluded.url,
                page_count = excluded.page_count,
                history = excluded.history
            "#,
            params![
                record.id.as_str(),
                record.title,
                record.record_type.as_str(),
                record.date,
                record.provider,
                record.department,
                record.doctor,
                record.content,
                record.url,
                record.page_count.max(1),
                history_json,
            ],
        )?;
        Ok(())
    }

    /// Get a record by ID.
    pub fn get_record(&self, id: &RecordId) -> DbResult<Option<Record>> {
        let sql = format!("SELECT {} FROM records WHERE id = ?", RECORD_COLUMNS);
        self.conn
            .query_row(&sql, [id.as_str()], read_row)
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// List all records in catalog order.
    pub fn list_records(&self) -> DbResult<Vec<Record>> {
        let sql = format!("SELECT {} FROM records ORDER BY rowid", RECORD_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], read_row)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?.try_into()?);
        }
        Ok(records)
    }

    /// Delete a record.
    pub fn delete_record(&self, id: &RecordId) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM records WHERE id = ?", [id.as_str()])?;
        Ok(rows_affected > 0)
    }
}

/// Raw row, before JSON columns are decoded.
struct RecordRow {
    id: String,
    title: String,
    record_type: String,
    date: String,
    provider: String,
    department: String,
    doctor: String,
    content: Option<String>,
    url: Option<String>,
    page_count: u32,
    history: String,
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<RecordRow> {
    Ok(RecordRow {
        id: row.get(0)?,
        title: row.get(1)?,
        record_type: row.get(2)?,
        date: row.get(3)?,
        provider: row.get(4)?,
        department: row.get(5)?,
        doctor: row.get(6)?,
        content: row.get(7)?,
        url: row.get(8)?,
        page_count: row.get(9)?,
        history: row.get(10)?,
    })
}

impl TryFrom<RecordRow> for Record {
    type Error = DbError;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        Ok(Record {
            id: RecordId::new(row.id),
            title: row.title,
            record_type: RecordType::from(row.record_type),
            date: row.date,
            provider: row.provider,
            department: row.department,
            doctor: row.doctor,
            content: row.content,
            url: row.url,
            page_count: row.page_count,
            history: serde_json::from_str(&row.history)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordHistoryEvent;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_upsert_and_get() {
        let db = setup_db();

        let mut record = Record::new("Blood Test Results".into(), RecordType::Lab);
        record.provider = "Central Lab".into();
        record.content = Some("Hemoglobin 14.2 g/dL".into());
        record.history = vec![RecordHistoryEvent::new("Created", "2024-03-15 09:30 AM")];

        db.upsert_record(&record).unwrap();

        let retrieved = db.get_record(&record.id).unwrap().unwrap();
        assert_eq!(retrieved, record);
    }

    #[test]
    fn test_unknown_type_roundtrips() {
        let db = setup_db();

        let record = Record::new("MRI Series".into(), RecordType::from("dicom"));
        db.upsert_record(&record).unwrap();

        let retrieved = db.get_record(&record.id).unwrap().unwrap();
        assert_eq!(retrieved.record_type, RecordType::Other("dicom".into()));
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let db = setup_db();

        let first = Record::new("Zeta".into(), RecordType::Report);
        let second = Record::new("Alpha".into(), RecordType::Image);
        db.upsert_record(&first).unwrap();
        db.upsert_record(&second).unwrap();

        // Updating the first record must not move it.
        let mut updated = first.clone();
        updated.title = "Zeta (amended)".into();
        db.upsert_record(&updated).unwrap();

        let titles: Vec<_> = db
            .list_records()
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["Zeta (amended)", "Alpha"]);
    }

    #[test]
    fn test_get_missing() {
        let db = setup_db();
        assert!(db.get_record(&RecordId::from("nope")).unwrap().is_none());
    }

    #[test]
    fn test_delete_record() {
        let db = setup_db();
        let record = Record::new("X-Ray Report".into(), RecordType::Image);
        db.upsert_record(&record).unwrap();

        assert!(db.delete_record(&record.id).unwrap());
        assert!(db.list_records().unwrap().is_empty());
    }
}
