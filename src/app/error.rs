//! Failures surfaced to the user as notifications

use thiserror::Error;

use super::notify::{Notice, ToastKind};

/// Everything that can go wrong around a user action. None of these are
/// fatal: each one turns into a toast.
#[derive(Debug, Error)]
pub enum InteractionError {
    #[error("Please enter some text to reverse")]
    EmptyInput,

    #[error("Text exceeds {max} characters")]
    TooLong { max: usize },

    #[error("Failed to copy text")]
    Clipboard(#[source] anyhow::Error),

    #[error("An error occurred while reversing text")]
    Engine(String),

    #[error("Could not save theme preference")]
    Preference(#[source] anyhow::Error),
}

impl InteractionError {
    pub fn kind(&self) -> ToastKind {
        match self {
            Self::EmptyInput | Self::TooLong { .. } => ToastKind::Warning,
            Self::Clipboard(_) | Self::Engine(_) | Self::Preference(_) => ToastKind::Error,
        }
    }

    pub fn notice(&self) -> Notice {
        Notice::new(self.kind(), self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(InteractionError::EmptyInput.kind(), ToastKind::Warning);
        assert_eq!(InteractionError::TooLong { max: 500 }.kind(), ToastKind::Warning);
        assert_eq!(
            InteractionError::Clipboard(anyhow::anyhow!("denied")).kind(),
            ToastKind::Error
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            InteractionError::TooLong { max: 500 }.notice().message,
            "Text exceeds 500 characters"
        );
        assert_eq!(
            InteractionError::Engine("panic".into()).to_string(),
            "An error occurred while reversing text"
        );
    }
}
