//! Error types for the design tree model.

use thiserror::Error;

/// Errors raised while turning serialized screens into a [`crate::Project`].
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Screen '{screen}' is not a valid design document: {source}")]
    InvalidDocument {
        screen: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Project has no screens")]
    NoScreens,
}

impl ParseError {
    /// Label of the screen that failed, if the error is tied to one.
    pub fn screen(&self) -> Option<&str> {
        match self {
            Self::InvalidDocument { screen, .. } => Some(screen),
            Self::NoScreens => None,
        }
    }
}
