//! Record viewer session.
//!
//! Holds the transient view parameters for exactly one open record. A session
//! is created when a record is selected and consumed by [`ViewerSession::close`];
//! nothing carries over to the next time the same record is opened.

mod actions;
mod content;

pub use actions::*;
pub use content::*;

use std::sync::Arc;

use crate::models::{Record, RecordHistoryEvent, RecordId};
use crate::session::{SessionError, SessionResult};

pub const ZOOM_MIN: u32 = 25;
pub const ZOOM_MAX: u32 = 200;
pub const ZOOM_STEP: u32 = 25;
pub const DEFAULT_ZOOM: u32 = 100;
pub const ROTATION_STEP: u16 = 90;

/// Clockwise rotation in quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn degrees(&self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Next quarter turn clockwise; wraps at 360.
    pub fn rotated(&self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }
}

/// Sidebar tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewerTab {
    /// Record details and related records
    #[default]
    Record,
    /// Record history
    Info,
}

/// Events the viewer reports to its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerEvent {
    Closed { record_id: RecordId },
}

/// View state for one open record.
#[derive(Debug, Clone)]
pub struct ViewerSession {
    record: Arc<Record>,
    zoom_percent: u32,
    rotation: Rotation,
    current_page: u32,
    active_tab: ViewerTab,
    opened_at: String,
}

impl ViewerSession {
    /// Open a fresh session with default view parameters.
    pub fn open(record: Arc<Record>) -> Self {
        let opened_at = chrono::Local::now().format("%Y-%m-%d %I:%M %p").to_string();
        tracing::info!(record_id = %record.id, record_type = %record.record_type, "viewer: open");
        Self {
            record,
            zoom_percent: DEFAULT_ZOOM,
            rotation: Rotation::Deg0,
            current_page: 1,
            active_tab: ViewerTab::Record,
            opened_at,
        }
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Shared handle to the open record, for use after the session is released.
    pub fn shared_record(&self) -> Arc<Record> {
        Arc::clone(&self.record)
    }

    pub fn record_id(&self) -> &RecordId {
        &self.record.id
    }

    pub fn zoom_percent(&self) -> u32 {
        self.zoom_percent
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.record.total_pages()
    }

    pub fn active_tab(&self) -> ViewerTab {
        self.active_tab
    }

    pub fn zoom_in(&mut self) -> u32 {
        self.zoom_percent = (self.zoom_percent + ZOOM_STEP).min(ZOOM_MAX);
        tracing::debug!(zoom = self.zoom_percent, "viewer: zoom in");
        self.zoom_percent
    }

    pub fn zoom_out(&mut self) -> u32 {
        self.zoom_percent = self.zoom_percent.saturating_sub(ZOOM_STEP).max(ZOOM_MIN);
        tracing::debug!(zoom = self.zoom_percent, "viewer: zoom out");
        self.zoom_percent
    }

    pub fn rotate(&mut self) -> Rotation {
        self.rotation = self.rotation.rotated();
        tracing::debug!(rotation = self.rotation.degrees(), "viewer: rotate");
        self.rotation
    }

    /// Whether page controls are offered for this record.
    pub fn is_paginated(&self) -> bool {
        self.record.is_paginated()
    }

    /// Jump to page `page`, clamped to the document. Only for paginated records.
    pub fn set_page(&mut self, page: u32) -> SessionResult<u32> {
        if !self.is_paginated() {
            return Err(SessionError::NotPaginated {
                record_type: self.record.record_type.to_string(),
            });
        }
        self.current_page = page.clamp(1, self.total_pages());
        tracing::debug!(page = self.current_page, "viewer: set page");
        Ok(self.current_page)
    }

    pub fn next_page(&mut self) -> SessionResult<u32> {
        self.set_page(self.current_page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> SessionResult<u32> {
        self.set_page(self.current_page.saturating_sub(1))
    }

    pub fn can_go_previous(&self) -> bool {
        self.is_paginated() && self.current_page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.is_paginated() && self.current_page < self.total_pages()
    }

    pub fn set_active_tab(&mut self, tab: ViewerTab) {
        self.active_tab = tab;
    }

    /// Rendering descriptor for the current zoom and rotation.
    pub fn content(&self) -> RecordContent {
        RecordContent::for_record(&self.record, self.zoom_percent, self.rotation)
    }

    /// History for the info tab, ending with this viewing.
    pub fn history(&self) -> Vec<RecordHistoryEvent> {
        let mut events = self.record.history.clone();
        events.push(RecordHistoryEvent::new("Viewed by You", self.opened_at.clone()));
        events
    }

    /// Hand the open record to the host for download/share/print.
    pub fn perform(&self, action: RecordAction, handler: &dyn RecordActionHandler) {
        dispatch(action, &self.record, handler);
    }

    /// End the session. Consumes it so no view state can outlive the close.
    pub fn close(self) -> ViewerEvent {
        tracing::info!(record_id = %self.record.id, "viewer: close");
        ViewerEvent::Closed {
            record_id: self.record.id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordType;

    fn open(record_type: RecordType, pages: u32) -> ViewerSession {
        let mut record = Record::new("Test Record".into(), record_type);
        record.page_count = pages;
        ViewerSession::open(Arc::new(record))
    }

    #[test]
    fn test_defaults() {
        let viewer = open(RecordType::Image, 1);
        assert_eq!(viewer.zoom_percent(), 100);
        assert_eq!(viewer.rotation(), Rotation::Deg0);
        assert_eq!(viewer.current_page(), 1);
        assert_eq!(viewer.active_tab(), ViewerTab::Record);
    }

    #[test]
    fn test_zoom_clamps_high() {
        let mut viewer = open(RecordType::Image, 1);
        for _ in 0..3 {
            viewer.zoom_in();
        }
        assert_eq!(viewer.zoom_percent(), 175);
        viewer.zoom_in();
        viewer.zoom_in();
        assert_eq!(viewer.zoom_percent(), 200);
    }

    #[test]
    fn test_zoom_clamps_low() {
        let mut viewer = open(RecordType::Image, 1);
        for _ in 0..10 {
            viewer.zoom_out();
        }
        assert_eq!(viewer.zoom_percent(), 25);
        assert_eq!(viewer.zoom_in(), 50);
    }

    #[test]
    fn test_rotate_cycles() {
        let mut viewer = open(RecordType::Image, 1);
        let degrees: Vec<u16> = (0..4).map(|_| viewer.rotate().degrees()).collect();
        assert_eq!(degrees, vec![90, 180, 270, 0]);
    }

    #[test]
    fn test_set_page_clamps() {
        let mut viewer = open(RecordType::Pdf, 5);
        assert_eq!(viewer.set_page(3).unwrap(), 3);
        assert_eq!(viewer.set_page(0).unwrap(), 1);
        assert_eq!(viewer.set_page(99).unwrap(), 5);
    }

    #[test]
    fn test_set_page_requires_pagination() {
        let mut viewer = open(RecordType::Image, 5);
        let result = viewer.set_page(2);
        assert!(matches!(result, Err(SessionError::NotPaginated { .. })));
        assert_eq!(viewer.current_page(), 1);
    }

    #[test]
    fn test_page_navigation() {
        let mut viewer = open(RecordType::Pdf, 2);
        assert!(!viewer.can_go_previous());
        assert!(viewer.can_go_next());

        assert_eq!(viewer.next_page().unwrap(), 2);
        assert!(!viewer.can_go_next());
        assert_eq!(viewer.next_page().unwrap(), 2);

        assert_eq!(viewer.previous_page().unwrap(), 1);
        assert_eq!(viewer.previous_page().unwrap(), 1);
    }

    #[test]
    fn test_single_page_pdf() {
        let viewer = open(RecordType::Pdf, 1);
        assert!(!viewer.can_go_next());
        assert!(!viewer.can_go_previous());
    }

    #[test]
    fn test_tab_does_not_touch_view() {
        let mut viewer = open(RecordType::Image, 1);
        viewer.zoom_in();
        viewer.rotate();
        viewer.set_active_tab(ViewerTab::Info);
        assert_eq!(viewer.active_tab(), ViewerTab::Info);
        assert_eq!(viewer.zoom_percent(), 125);
        assert_eq!(viewer.rotation(), Rotation::Deg90);
    }

    #[test]
    fn test_content_follows_transform() {
        let mut viewer = open(RecordType::Image, 1);
        viewer.zoom_out();
        viewer.rotate();
        assert!(matches!(
            viewer.content(),
            RecordContent::Transformed { scale, rotation_degrees: 90, .. } if scale == 0.75
        ));
    }

    #[test]
    fn test_history_ends_with_viewing() {
        let viewer = open(RecordType::Report, 1);
        let history = viewer.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].action, "Viewed by You");
    }

    #[test]
    fn test_close_reports_record() {
        let viewer = open(RecordType::Lab, 1);
        let id = viewer.record_id().clone();
        assert_eq!(viewer.close(), ViewerEvent::Closed { record_id: id });
    }
}
