//! Session controller: the root of the state model.
//!
//! ```text
//!   Loading ──initialize()──┬──► Onboarding(wizard) ──complete_onboarding()──┐
//!                           │                                                ▼
//!                           └──────────────────────────────────────────► Active { viewer? }
//!                                                                       select_record / close_viewer
//! ```
//!
//! Both transitions out of `Loading` and out of `Onboarding` are one-way.
//! The record viewer is an overlay inside `Active`, so a viewer can only exist
//! while the session is active, and at most one can exist at a time.
//!
//! The only fallible collaborator is the flag store. Read and write failures
//! are logged and absorbed: a failed read starts onboarding, a failed write
//! still lets the current run continue into the dashboard.

mod error;

pub use error::*;

use std::sync::Arc;

use tracing::{info, warn};

use crate::models::{Record, RecordId};
use crate::onboarding::{OnboardingStep, OnboardingWizard, WizardEvent};
use crate::store::{KeyValueStore, ONBOARDED_KEY, ONBOARDED_VALUE};
use crate::viewer::{ViewerEvent, ViewerSession};

/// Top-level mode, carrying the state that only exists in that mode.
#[derive(Debug)]
pub enum SessionMode {
    Loading,
    Onboarding(OnboardingWizard),
    Active { viewer: Option<ViewerSession> },
}

impl SessionMode {
    pub fn kind(&self) -> ModeKind {
        match self {
            SessionMode::Loading => ModeKind::Loading,
            SessionMode::Onboarding(_) => ModeKind::Onboarding,
            SessionMode::Active { .. } => ModeKind::Active,
        }
    }
}

/// Mode without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    Loading,
    Onboarding,
    Active,
}

/// Owns the session mode and routes component events.
pub struct SessionController<S: KeyValueStore> {
    store: S,
    mode: SessionMode,
}

impl<S: KeyValueStore> SessionController<S> {
    /// Create a controller in `Loading`. Call [`initialize`](Self::initialize) next.
    pub fn new(store: S) -> Self {
        Self {
            store,
            mode: SessionMode::Loading,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn mode(&self) -> ModeKind {
        self.mode.kind()
    }

    pub fn session_mode(&self) -> &SessionMode {
        &self.mode
    }

    /// Leave `Loading` based on the persisted flag. Later calls are no-ops.
    pub fn initialize(&mut self) -> ModeKind {
        if !matches!(self.mode, SessionMode::Loading) {
            return self.mode();
        }

        let onboarded = match self.store.get(ONBOARDED_KEY) {
            Ok(value) => value.as_deref() == Some(ONBOARDED_VALUE),
            Err(e) => {
                warn!(error = %e, "session: could not read onboarding flag, starting onboarding");
                false
            }
        };

        self.mode = if onboarded {
            SessionMode::Active { viewer: None }
        } else {
            SessionMode::Onboarding(OnboardingWizard::new())
        };
        info!(mode = ?self.mode(), "session: initialized");
        self.mode()
    }

    /// The wizard, while onboarding.
    pub fn wizard(&self) -> Option<&OnboardingWizard> {
        match &self.mode {
            SessionMode::Onboarding(wizard) => Some(wizard),
            _ => None,
        }
    }

    fn wizard_mut(&mut self, action: &'static str) -> SessionResult<&mut OnboardingWizard> {
        let mode = self.mode();
        match &mut self.mode {
            SessionMode::Onboarding(wizard) => Ok(wizard),
            _ => Err(SessionError::InvalidTransition { action, mode }),
        }
    }

    /// Move the wizard one step forward.
    pub fn advance_onboarding(&mut self) -> SessionResult<OnboardingStep> {
        Ok(self.wizard_mut("advance onboarding")?.advance())
    }

    /// Confirm the terminal step and enter the dashboard.
    pub fn complete_onboarding(&mut self) -> SessionResult<()> {
        let event = self.wizard_mut("complete onboarding")?.complete()?;
        self.handle_wizard_event(event);
        Ok(())
    }

    fn handle_wizard_event(&mut self, event: WizardEvent) {
        match event {
            WizardEvent::Completed => {
                if let Err(e) = self.store.set(ONBOARDED_KEY, ONBOARDED_VALUE) {
                    warn!(error = %e, "session: could not persist onboarding flag");
                }
                // Dropping the wizard here; step position is never persisted.
                self.mode = SessionMode::Active { viewer: None };
                info!("session: onboarding completed");
            }
        }
    }

    /// Open `record` in a fresh viewer, replacing any open one.
    pub fn select_record(&mut self, record: Arc<Record>) -> SessionResult<&mut ViewerSession> {
        let mode = self.mode();
        match &mut self.mode {
            SessionMode::Active { viewer } => {
                if let Some(previous) = viewer.take() {
                    previous.close();
                }
                Ok(viewer.insert(ViewerSession::open(record)))
            }
            _ => Err(SessionError::InvalidTransition {
                action: "open a record",
                mode,
            }),
        }
    }

    /// Discard the open viewer, if any.
    pub fn close_viewer(&mut self) -> Option<ViewerEvent> {
        match &mut self.mode {
            SessionMode::Active { viewer } => viewer.take().map(ViewerSession::close),
            _ => None,
        }
    }

    pub fn viewer(&self) -> Option<&ViewerSession> {
        match &self.mode {
            SessionMode::Active { viewer } => viewer.as_ref(),
            _ => None,
        }
    }

    pub fn viewer_mut(&mut self) -> SessionResult<&mut ViewerSession> {
        match &mut self.mode {
            SessionMode::Active { viewer: Some(viewer) } => Ok(viewer),
            _ => Err(SessionError::NoOpenRecord),
        }
    }

    pub fn open_record_id(&self) -> Option<&RecordId> {
        self.viewer().map(ViewerSession::record_id)
    }
}
