//! User intents on an open record that the host fulfils.

use crate::models::Record;

/// Actions offered in the viewer header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordAction {
    Download,
    Share,
    Print,
}

impl RecordAction {
    pub fn label(&self) -> &'static str {
        match self {
            RecordAction::Download => "Download",
            RecordAction::Share => "Share",
            RecordAction::Print => "Print",
        }
    }
}

/// Host-side implementation of file export, share sheet and print dialog.
///
/// The core only decides which callback runs and with which record.
pub trait RecordActionHandler {
    fn download(&self, record: &Record);

    fn share(&self, record: &Record);

    fn print(&self, record: &Record);
}

/// Route `action` to the matching callback.
pub fn dispatch(action: RecordAction, record: &Record, handler: &dyn RecordActionHandler) {
    tracing::info!(
        action = action.label(),
        record_id = %record.id,
        "viewer: record action"
    );
    match action {
        RecordAction::Download => handler.download(record),
        RecordAction::Share => handler.share(record),
        RecordAction::Print => handler.print(record),
    }
}
