//! Silo Health Core Library
//!
//! State model for a personal health-records viewer: first-run onboarding,
//! the records dashboard, the appointments list and the record viewer.
//!
//! # Architecture
//!
//! ```text
//!                      ┌──────────────────────┐
//!                      │  SessionController   │◄──── KeyValueStore ("isOnboarded")
//!                      └──────────┬───────────┘
//!                                 │
//!            ┌────────────────────┼─────────────────────┐
//!            ▼                    ▼                     ▼
//!        Loading          Onboarding(wizard)     Active { viewer? }
//!                                 │                     │
//!                      WizardEvent::Completed    ViewerSession ──► RecordActionHandler
//!                                                       │              (host)
//!                                                ViewerEvent::Closed
//!
//!   RecordCatalog / AppointmentCatalog ──► ListFilter ──► FilteredView
//! ```
//!
//! Child components never reach into their owner: the wizard and the viewer
//! return events, and the session controller decides what happens next.
//!
//! # Modules
//!
//! - [`session`]: Top-level mode machine (loading, onboarding, active)
//! - [`onboarding`]: Five-step forward-only wizard
//! - [`viewer`]: Per-record zoom, rotation, page and tab state
//! - [`filter`]: Category + text filtering for the list views
//! - [`catalog`]: Read-only record and appointment sources
//! - [`store`]: Key/value persistence for the onboarding flag
//! - [`db`]: SQLite storage for preferences, records and appointments
//! - [`models`]: Domain types (Record, Appointment)

pub mod catalog;
pub mod db;
pub mod filter;
pub mod models;
pub mod onboarding;
pub mod session;
pub mod store;
pub mod viewer;

// Re-export commonly used types
pub use catalog::{AppointmentCatalog, RecordCatalog, StaticCatalog};
pub use db::Database;
pub use filter::{AppointmentCategory, FilteredView, ListFilter, RecordCategory};
pub use models::{Appointment, AppointmentStatus, AppointmentType, Record, RecordId, RecordType};
pub use onboarding::{OnboardingStep, OnboardingWizard, WizardEvent};
pub use session::{ModeKind, SessionController, SessionError, SessionMode};
pub use store::{KeyValueStore, MemoryStore};
pub use viewer::{RecordAction, RecordActionHandler, RecordContent, Rotation, ViewerEvent, ViewerSession, ViewerTab};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum SiloHealthError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<db::DbError> for SiloHealthError {
    fn from(e: db::DbError) -> Self {
        SiloHealthError::DatabaseError(e.to_string())
    }
}

impl From<store::StoreError> for SiloHealthError {
    fn from(e: store::StoreError) -> Self {
        SiloHealthError::StorageError(e.to_string())
    }
}

impl From<catalog::CatalogError> for SiloHealthError {
    fn from(e: catalog::CatalogError) -> Self {
        match e {
            catalog::CatalogError::Db(e) => e.into(),
            catalog::CatalogError::Json(e) => SiloHealthError::SerializationError(e.to_string()),
        }
    }
}

impl From<SessionError> for SiloHealthError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::RecordNotFound(id) => SiloHealthError::NotFound(id),
            other => SiloHealthError::InvalidState(other.to_string()),
        }
    }
}

impl From<filter::FilterError> for SiloHealthError {
    fn from(e: filter::FilterError) -> Self {
        SiloHealthError::InvalidInput(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for SiloHealthError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        SiloHealthError::StorageError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create the on-device store at the given path.
#[uniffi::export]
pub fn open_session(path: String) -> Result<Arc<SiloHealthCore>, SiloHealthError> {
    SiloHealthCore::with_database(Database::open(&path)?)
}

/// Open a session backed by an in-memory database (for testing).
#[uniffi::export]
pub fn open_session_in_memory() -> Result<Arc<SiloHealthCore>, SiloHealthError> {
    SiloHealthCore::with_database(Database::open_in_memory()?)
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe session wrapper for FFI.
///
/// The session is created in `Loading`; hosts call [`SiloHealthCore::initialize`]
/// once their UI is ready.
#[derive(uniffi::Object)]
pub struct SiloHealthCore {
    session: Mutex<SessionController<Database>>,
}

impl SiloHealthCore {
    /// Wrap `db`, seeding the sample catalog into an empty database.
    pub fn with_database(db: Database) -> Result<Arc<Self>, SiloHealthError> {
        if db.list_records()?.is_empty() && db.list_appointments()?.is_empty() {
            tracing::info!("core: seeding sample catalog");
            StaticCatalog::sample().store_in(&db)?;
        }
        Ok(Arc::new(Self {
            session: Mutex::new(SessionController::new(db)),
        }))
    }

    fn viewer_state_of(
        viewer: &ViewerSession,
        db: &Database,
    ) -> Result<FfiViewerState, SiloHealthError> {
        let catalog = RecordCatalog::list(db)?;
        let related = catalog::related_records(viewer.record(), &catalog)
            .into_iter()
            .map(|r| FfiRecord::from(&**r))
            .collect();
        Ok(FfiViewerState::new(viewer, related))
    }

    /// Apply `f` to the open viewer and return the resulting state.
    fn with_viewer<F>(&self, f: F) -> Result<FfiViewerState, SiloHealthError>
    where
        F: FnOnce(&mut ViewerSession) -> Result<(), SessionError>,
    {
        let mut session = self.session.lock()?;
        f(session.viewer_mut()?)?;
        let viewer = session.viewer().ok_or(SessionError::NoOpenRecord)?;
        Self::viewer_state_of(viewer, session.store())
    }
}

#[uniffi::export]
impl SiloHealthCore {
    // =========================================================================
    // Session Operations
    // =========================================================================

    /// Read the onboarding flag and leave `Loading`. Later calls are no-ops.
    pub fn initialize(&self) -> Result<FfiMode, SiloHealthError> {
        let mut session = self.session.lock()?;
        Ok(session.initialize().into())
    }

    /// Current top-level mode.
    pub fn mode(&self) -> Result<FfiMode, SiloHealthError> {
        let session = self.session.lock()?;
        Ok(session.mode().into())
    }

    // =========================================================================
    // Onboarding Operations
    // =========================================================================

    /// Current wizard step, or `None` outside onboarding.
    pub fn onboarding_progress(&self) -> Result<Option<FfiOnboardingProgress>, SiloHealthError> {
        let session = self.session.lock()?;
        Ok(session.wizard().map(FfiOnboardingProgress::from))
    }

    /// Move the wizard forward one step.
    pub fn advance_onboarding(&self) -> Result<FfiOnboardingProgress, SiloHealthError> {
        let mut session = self.session.lock()?;
        session.advance_onboarding()?;
        let wizard = session.wizard().ok_or(SessionError::InvalidTransition {
            action: "read onboarding progress",
            mode: session.mode(),
        })?;
        Ok(wizard.into())
    }

    /// Confirm the final step and enter the dashboard.
    pub fn complete_onboarding(&self) -> Result<FfiMode, SiloHealthError> {
        let mut session = self.session.lock()?;
        session.complete_onboarding()?;
        Ok(session.mode().into())
    }

    // =========================================================================
    // Catalog Operations
    // =========================================================================

    /// Records for the dashboard, optionally narrowed by type or department.
    pub fn filter_records(
        &self,
        category: FfiRecordCategory,
    ) -> Result<Vec<FfiRecord>, SiloHealthError> {
        let session = self.session.lock()?;
        let records = RecordCatalog::list(session.store())?;
        let category: RecordCategory = category.into();
        let view = filter::apply(&records, &category, "");
        Ok(view.iter().map(|r| FfiRecord::from(&**r)).collect())
    }

    /// Every record, in catalog order.
    pub fn recent_records(&self) -> Result<Vec<FfiRecord>, SiloHealthError> {
        self.filter_records(FfiRecordCategory::All)
    }

    /// Appointments for one tab, matching `query` against doctor, specialty
    /// and location.
    pub fn filter_appointments(
        &self,
        category: FfiAppointmentCategory,
        query: String,
    ) -> Result<Vec<FfiAppointment>, SiloHealthError> {
        let session = self.session.lock()?;
        let appointments = AppointmentCatalog::list(session.store())?;

        let mut list_filter = ListFilter::<Appointment>::new(category.into());
        list_filter.set_query(query)?;

        Ok(list_filter
            .apply(&appointments)
            .iter()
            .map(FfiAppointment::from)
            .collect())
    }

    // =========================================================================
    // Viewer Operations
    // =========================================================================

    /// Open a record in a fresh viewer.
    pub fn select_record(&self, record_id: String) -> Result<FfiViewerState, SiloHealthError> {
        let mut session = self.session.lock()?;
        let record = RecordCatalog::find(session.store(), &RecordId::new(record_id.clone()))?
            .ok_or(SessionError::RecordNotFound(record_id))?;
        session.select_record(record)?;
        let viewer = session.viewer().ok_or(SessionError::NoOpenRecord)?;
        Self::viewer_state_of(viewer, session.store())
    }

    /// Close the viewer. Returns the ID of the record that was open.
    pub fn close_viewer(&self) -> Result<Option<String>, SiloHealthError> {
        let mut session = self.session.lock()?;
        Ok(session.close_viewer().map(|event| match event {
            ViewerEvent::Closed { record_id } => record_id.to_string(),
        }))
    }

    /// State of the open viewer, if any.
    pub fn viewer_state(&self) -> Result<Option<FfiViewerState>, SiloHealthError> {
        let session = self.session.lock()?;
        session
            .viewer()
            .map(|viewer| Self::viewer_state_of(viewer, session.store()))
            .transpose()
    }

    pub fn zoom_in(&self) -> Result<FfiViewerState, SiloHealthError> {
        self.with_viewer(|v| {
            v.zoom_in();
            Ok(())
        })
    }

    pub fn zoom_out(&self) -> Result<FfiViewerState, SiloHealthError> {
        self.with_viewer(|v| {
            v.zoom_out();
            Ok(())
        })
    }

    pub fn rotate(&self) -> Result<FfiViewerState, SiloHealthError> {
        self.with_viewer(|v| {
            v.rotate();
            Ok(())
        })
    }

    /// Jump to a page (pdf only); clamped to the document.
    pub fn set_page(&self, page: u32) -> Result<FfiViewerState, SiloHealthError> {
        self.with_viewer(|v| v.set_page(page).map(|_| ()))
    }

    pub fn next_page(&self) -> Result<FfiViewerState, SiloHealthError> {
        self.with_viewer(|v| v.next_page().map(|_| ()))
    }

    pub fn previous_page(&self) -> Result<FfiViewerState, SiloHealthError> {
        self.with_viewer(|v| v.previous_page().map(|_| ()))
    }

    pub fn set_active_tab(&self, tab: FfiViewerTab) -> Result<FfiViewerState, SiloHealthError> {
        self.with_viewer(|v| {
            v.set_active_tab(tab.into());
            Ok(())
        })
    }

    /// Hand the open record to the host for download, share or print.
    ///
    /// The session lock is released before the handler runs, so the handler
    /// may call back into the core.
    pub fn perform_record_action(
        &self,
        action: FfiRecordAction,
        handler: Box<dyn FfiRecordActionHandler>,
    ) -> Result<(), SiloHealthError> {
        let record = {
            let mut session = self.session.lock()?;
            session.viewer_mut()?.shared_record()
        };
        viewer::dispatch(action.into(), &record, &ForeignActionHandler(&*handler));
        Ok(())
    }
}

// =========================================================================
// Callback Interfaces
// =========================================================================

/// Host implementation of the record actions.
#[uniffi::export(callback_interface)]
pub trait FfiRecordActionHandler: Send + Sync {
    fn download(&self, record: FfiRecord);
    fn share(&self, record: FfiRecord);
    fn print(&self, record: FfiRecord);
}

struct ForeignActionHandler<'a>(&'a dyn FfiRecordActionHandler);

impl RecordActionHandler for ForeignActionHandler<'_> {
    fn download(&self, record: &Record) {
        self.0.download(record.into());
    }

    fn share(&self, record: &Record) {
        self.0.share(record.into());
    }

    fn print(&self, record: &Record) {
        self.0.print(record.into());
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe session mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiMode {
    Loading,
    Onboarding,
    Active,
}

impl From<ModeKind> for FfiMode {
    fn from(kind: ModeKind) -> Self {
        match kind {
            ModeKind::Loading => FfiMode::Loading,
            ModeKind::Onboarding => FfiMode::Onboarding,
            ModeKind::Active => FfiMode::Active,
        }
    }
}

/// FFI-safe wizard progress.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiOnboardingProgress {
    pub step_id: String,
    pub step_number: u32,
    pub total_steps: u32,
    pub title: String,
    pub subtitle: String,
    pub action_label: String,
    pub progress_percent: f64,
    pub is_terminal: bool,
}

impl From<&OnboardingWizard> for FfiOnboardingProgress {
    fn from(wizard: &OnboardingWizard) -> Self {
        let step = wizard.current_step();
        Self {
            step_id: step.id().to_string(),
            step_number: step.number() as u32,
            total_steps: OnboardingStep::ALL.len() as u32,
            title: step.title().to_string(),
            subtitle: step.subtitle().to_string(),
            action_label: step.action_label().to_string(),
            progress_percent: wizard.progress_percent(),
            is_terminal: step.is_terminal(),
        }
    }
}

/// FFI-safe record.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiRecord {
    pub id: String,
    pub title: String,
    pub record_type: String,
    pub type_label: String,
    pub date: String,
    pub provider: String,
    pub department: String,
    pub doctor: String,
    pub doctor_display: String,
    pub content: Option<String>,
    pub url: Option<String>,
    pub page_count: u32,
}

impl From<&Record> for FfiRecord {
    fn from(record: &Record) -> Self {
        Self {
            id: record.id.to_string(),
            title: record.title.clone(),
            record_type: record.record_type.to_string(),
            type_label: record.type_label(),
            date: record.date.clone(),
            provider: record.provider.clone(),
            department: record.department.clone(),
            doctor: record.doctor.clone(),
            doctor_display: record.doctor_display(),
            content: record.content.clone(),
            url: record.url.clone(),
            page_count: record.page_count,
        }
    }
}

/// FFI-safe appointment.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiAppointment {
    pub id: String,
    pub doctor_name: String,
    pub specialty: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub is_upcoming: bool,
    pub status: String,
}

impl From<&Appointment> for FfiAppointment {
    fn from(apt: &Appointment) -> Self {
        Self {
            id: apt.id.clone(),
            doctor_name: apt.doctor_name.clone(),
            specialty: apt.specialty.clone(),
            date: apt.date.clone(),
            time: apt.time.clone(),
            location: apt.location.clone(),
            is_upcoming: apt.is_upcoming(),
            status: apt.status.label().to_string(),
        }
    }
}

/// FFI-safe appointments tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiAppointmentCategory {
    Upcoming,
    Past,
    All,
}

impl From<FfiAppointmentCategory> for AppointmentCategory {
    fn from(category: FfiAppointmentCategory) -> Self {
        match category {
            FfiAppointmentCategory::Upcoming => AppointmentCategory::Upcoming,
            FfiAppointmentCategory::Past => AppointmentCategory::Past,
            FfiAppointmentCategory::All => AppointmentCategory::All,
        }
    }
}

/// FFI-safe records selector.
#[derive(Debug, Clone, PartialEq, uniffi::Enum)]
pub enum FfiRecordCategory {
    All,
    Type { record_type: String },
    Department { name: String },
}

impl From<FfiRecordCategory> for RecordCategory {
    fn from(category: FfiRecordCategory) -> Self {
        match category {
            FfiRecordCategory::All => RecordCategory::All,
            FfiRecordCategory::Type { record_type } => RecordCategory::Type(record_type.into()),
            FfiRecordCategory::Department { name } => RecordCategory::Department(name),
        }
    }
}

/// FFI-safe viewer sidebar tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiViewerTab {
    Record,
    Info,
}

impl From<FfiViewerTab> for ViewerTab {
    fn from(tab: FfiViewerTab) -> Self {
        match tab {
            FfiViewerTab::Record => ViewerTab::Record,
            FfiViewerTab::Info => ViewerTab::Info,
        }
    }
}

impl From<ViewerTab> for FfiViewerTab {
    fn from(tab: ViewerTab) -> Self {
        match tab {
            ViewerTab::Record => FfiViewerTab::Record,
            ViewerTab::Info => FfiViewerTab::Info,
        }
    }
}

/// FFI-safe record action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiRecordAction {
    Download,
    Share,
    Print,
}

impl From<FfiRecordAction> for RecordAction {
    fn from(action: FfiRecordAction) -> Self {
        match action {
            FfiRecordAction::Download => RecordAction::Download,
            FfiRecordAction::Share => RecordAction::Share,
            FfiRecordAction::Print => RecordAction::Print,
        }
    }
}

/// FFI-safe rendering descriptor.
#[derive(Debug, Clone, PartialEq, uniffi::Enum)]
pub enum FfiRecordContent {
    Transformed {
        url: Option<String>,
        scale: f64,
        rotation_degrees: u16,
    },
    Unsupported {
        message: String,
    },
    Text {
        text: String,
    },
}

impl From<RecordContent> for FfiRecordContent {
    fn from(content: RecordContent) -> Self {
        match content {
            RecordContent::Transformed {
                url,
                scale,
                rotation_degrees,
            } => FfiRecordContent::Transformed {
                url,
                scale,
                rotation_degrees,
            },
            RecordContent::Unsupported { message } => FfiRecordContent::Unsupported {
                message: message.to_string(),
            },
            RecordContent::Text(text) => FfiRecordContent::Text { text },
        }
    }
}

/// FFI-safe history entry.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiHistoryEvent {
    pub action: String,
    pub at: String,
}

impl From<models::RecordHistoryEvent> for FfiHistoryEvent {
    fn from(event: models::RecordHistoryEvent) -> Self {
        Self {
            action: event.action,
            at: event.at,
        }
    }
}

/// FFI-safe snapshot of the open viewer.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiViewerState {
    pub record: FfiRecord,
    pub zoom_percent: u32,
    pub rotation_degrees: u16,
    pub is_paginated: bool,
    pub current_page: u32,
    pub total_pages: u32,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub active_tab: FfiViewerTab,
    pub content: FfiRecordContent,
    pub history: Vec<FfiHistoryEvent>,
    pub related_records: Vec<FfiRecord>,
}

impl FfiViewerState {
    fn new(viewer: &ViewerSession, related_records: Vec<FfiRecord>) -> Self {
        Self {
            record: viewer.record().into(),
            zoom_percent: viewer.zoom_percent(),
            rotation_degrees: viewer.rotation().degrees(),
            is_paginated: viewer.is_paginated(),
            current_page: viewer.current_page(),
            total_pages: viewer.total_pages(),
            can_go_previous: viewer.can_go_previous(),
            can_go_next: viewer.can_go_next(),
            active_tab: viewer.active_tab().into(),
            content: viewer.content().into(),
            history: viewer.history().into_iter().map(Into::into).collect(),
            related_records,
        }
    }
}
