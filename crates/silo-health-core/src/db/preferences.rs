//! Preference (key/value) database operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbResult};
use crate::store::{KeyValueStore, StoreResult};

impl Database {
    /// Get a preference value.
    pub fn get_preference(&self, key: &str) -> DbResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?",
                [key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Insert or replace a preference value.
    pub fn set_preference(&self, key: &str, value: &str) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO preferences (key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = datetime('now')
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove a preference.
    pub fn delete_preference(&self, key: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM preferences WHERE key = ?", [key])?;
        Ok(rows_affected > 0)
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.get_preference(key)?)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        Ok(self.set_preference(key, value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ONBOARDED_KEY, ONBOARDED_VALUE};

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_missing_preference() {
        let db = setup_db();
        assert_eq!(db.get_preference(ONBOARDED_KEY).unwrap(), None);
    }

    #[test]
    fn test_set_and_get() {
        let db = setup_db();
        db.set_preference(ONBOARDED_KEY, ONBOARDED_VALUE).unwrap();
        assert_eq!(
            db.get_preference(ONBOARDED_KEY).unwrap(),
            Some("true".into())
        );
    }

    #[test]
    fn test_set_overwrites() {
        let db = setup_db();
        db.set_preference("theme", "light").unwrap();
        db.set_preference("theme", "dark").unwrap();
        assert_eq!(db.get_preference("theme").unwrap(), Some("dark".into()));
    }

    #[test]
    fn test_delete_preference() {
        let db = setup_db();
        db.set_preference(ONBOARDED_KEY, ONBOARDED_VALUE).unwrap();
        assert!(db.delete_preference(ONBOARDED_KEY).unwrap());
        assert!(!db.delete_preference(ONBOARDED_KEY).unwrap());
        assert_eq!(db.get_preference(ONBOARDED_KEY).unwrap(), None);
    }

    #[test]
    fn test_flag_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("silo.db");

        {
            let db = Database::open(&path).unwrap();
            KeyValueStore::set(&db, ONBOARDED_KEY, ONBOARDED_VALUE).unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert_eq!(
            KeyValueStore::get(&db, ONBOARDED_KEY).unwrap(),
            Some("true".into())
        );
    }
}
