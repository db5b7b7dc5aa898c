/// Tri-state outcome shown next to a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Success(String),
    Error(String),
}

impl SubmissionStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self::Success(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Success(m) | Self::Error(m) => Some(m),
        }
    }

    /// Clear back to idle, as happens whenever the user edits the form.
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}
