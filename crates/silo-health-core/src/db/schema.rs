//! SQLite schema definition.

/// Complete database schema for silo-health.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Preferences (key/value, survives restarts)
-- ============================================================================

CREATE TABLE IF NOT EXISTS preferences (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- ============================================================================
-- Records Catalog (read-only once loaded; rowid keeps catalog order)
-- ============================================================================

CREATE TABLE IF NOT EXISTS records (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    record_type TEXT NOT NULL,                    -- pdf, image, report, lab, or unknown
    date TEXT NOT NULL DEFAULT '',
    provider TEXT NOT NULL DEFAULT '',
    department TEXT NOT NULL DEFAULT '',
    doctor TEXT NOT NULL DEFAULT '',
    content TEXT,
    url TEXT,
    page_count INTEGER NOT NULL DEFAULT 1 CHECK (page_count >= 1),
    history TEXT NOT NULL DEFAULT '[]',           -- JSON array of {action, at}
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_records_type ON records(record_type);
CREATE INDEX IF NOT EXISTS idx_records_department ON records(department);

-- ============================================================================
-- Appointments Catalog
-- ============================================================================

CREATE TABLE IF NOT EXISTS appointments (
    id TEXT PRIMARY KEY,
    doctor_name TEXT NOT NULL,
    specialty TEXT NOT NULL DEFAULT '',
    date TEXT NOT NULL DEFAULT '',
    time TEXT NOT NULL DEFAULT '',
    location TEXT NOT NULL DEFAULT '',
    appointment_type TEXT NOT NULL CHECK (appointment_type IN ('upcoming', 'past')),
    status TEXT NOT NULL CHECK (status IN ('confirmed', 'pending', 'completed', 'cancelled')),
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_appointments_type ON appointments(appointment_type);
"#;
