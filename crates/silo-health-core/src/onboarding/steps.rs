//! The fixed onboarding step sequence.

/// One stage of onboarding. Order is the declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum OnboardingStep {
    #[default]
    Welcome,
    PersonalInfo,
    IdentityVerification,
    TwoFactor,
    Complete,
}

impl OnboardingStep {
    /// Every step, in order.
    pub const ALL: [OnboardingStep; 5] = [
        OnboardingStep::Welcome,
        OnboardingStep::PersonalInfo,
        OnboardingStep::IdentityVerification,
        OnboardingStep::TwoFactor,
        OnboardingStep::Complete,
    ];

    pub const TERMINAL: OnboardingStep = OnboardingStep::Complete;

    /// Zero-based position.
    pub fn index(&self) -> usize {
        match self {
            OnboardingStep::Welcome => 0,
            OnboardingStep::PersonalInfo => 1,
            OnboardingStep::IdentityVerification => 2,
            OnboardingStep::TwoFactor => 3,
            OnboardingStep::Complete => 4,
        }
    }

    /// Step number as shown in the indicator (1-based).
    pub fn number(&self) -> usize {
        self.index() + 1
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn is_terminal(&self) -> bool {
        *self == Self::TERMINAL
    }

    pub fn id(&self) -> &'static str {
        match self {
            OnboardingStep::Welcome => "welcome",
            OnboardingStep::PersonalInfo => "personal",
            OnboardingStep::IdentityVerification => "verification",
            OnboardingStep::TwoFactor => "security",
            OnboardingStep::Complete => "complete",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            OnboardingStep::Welcome => "Welcome to Silo",
            OnboardingStep::PersonalInfo => "Personal Information",
            OnboardingStep::IdentityVerification => "Identity Verification",
            OnboardingStep::TwoFactor => "2-Factor Authentication",
            OnboardingStep::Complete => "All Set!",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            OnboardingStep::Welcome => "Your secure health data platform",
            OnboardingStep::PersonalInfo => "Help us verify your identity",
            OnboardingStep::IdentityVerification => "Upload your health card",
            OnboardingStep::TwoFactor => "Secure your account",
            OnboardingStep::Complete => "Your account is ready",
        }
    }

    /// Label of the step's primary button.
    pub fn action_label(&self) -> &'static str {
        match self {
            OnboardingStep::Welcome => "Get Started",
            OnboardingStep::PersonalInfo => "Continue",
            OnboardingStep::IdentityVerification => "Verify Identity",
            OnboardingStep::TwoFactor => "Verify & Continue",
            OnboardingStep::Complete => "Go to Dashboard",
        }
    }
}

/// How a step is drawn in the progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepIndicator {
    Done,
    Current,
    Pending,
}

impl StepIndicator {
    pub fn for_step(step: OnboardingStep, current: OnboardingStep) -> Self {
        match step.cmp(&current) {
            std::cmp::Ordering::Less => StepIndicator::Done,
            std::cmp::Ordering::Equal => StepIndicator::Current,
            std::cmp::Ordering::Greater => StepIndicator::Pending,
        }
    }
}
