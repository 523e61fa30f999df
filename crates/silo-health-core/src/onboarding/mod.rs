//! Onboarding wizard.
//!
//! A strictly linear, forward-only walk over five fixed steps:
//!
//! ```text
//! Welcome → PersonalInfo → IdentityVerification → TwoFactor → Complete
//!                                                                │
//!                                                           complete()
//!                                                                │
//!                                                   WizardEvent::Completed
//! ```
//!
//! There is no back navigation and no jump-to-step. Reaching the terminal
//! step does not finish onboarding; the user has to confirm with
//! [`OnboardingWizard::complete`], which hands a [`WizardEvent`] up to the
//! session controller.

mod steps;

pub use steps::*;

use crate::session::{SessionError, SessionResult};

/// Events the wizard reports to its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardEvent {
    Completed,
}

/// Wizard state for one onboarding run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OnboardingWizard {
    step: OnboardingStep,
    completed: bool,
}

impl OnboardingWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_step(&self) -> OnboardingStep {
        self.step
    }

    pub fn current_index(&self) -> usize {
        self.step.index()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_at_terminal_step(&self) -> bool {
        self.step.is_terminal()
    }

    /// Move to the next step. No-op on the terminal step.
    pub fn advance(&mut self) -> OnboardingStep {
        if let Some(next) = self.step.next() {
            tracing::debug!(from = self.step.id(), to = next.id(), "onboarding: advance");
            self.step = next;
        }
        self.step
    }

    /// Finish onboarding. Only allowed from the terminal step, and only once.
    pub fn complete(&mut self) -> SessionResult<WizardEvent> {
        if self.completed {
            return Err(SessionError::AlreadyCompleted);
        }
        if !self.step.is_terminal() {
            return Err(SessionError::WizardIncomplete {
                step: self.step.index(),
                terminal: OnboardingStep::TERMINAL.index(),
            });
        }
        self.completed = true;
        Ok(WizardEvent::Completed)
    }

    /// Progress bar fill, 0.0 to 100.0.
    pub fn progress_percent(&self) -> f64 {
        self.step.index() as f64 / OnboardingStep::TERMINAL.index() as f64 * 100.0
    }

    /// Indicator state for every step, in order.
    pub fn indicators(&self) -> Vec<(OnboardingStep, StepIndicator)> {
        OnboardingStep::ALL
            .iter()
            .map(|&s| (s, StepIndicator::for_step(s, self.step)))
            .collect()
    }
}
