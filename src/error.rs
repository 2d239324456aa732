use std::error::Error as StdError;

use thiserror::Error;

/// Message used when the collaborator fails without saying why, or succeeds with nothing.
pub const NO_SUBTITLES_MESSAGE: &str = "No subtitles found";

/// Subgrab's crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Subgrab's crate-wide error type.
///
/// Input errors (`EmptyInput`, `Validation`) are raised before the collaborator is contacted.
/// Everything else comes out of a fetch attempt and ends that attempt in
/// [`FetchState::Failed`](crate::session::FetchState::Failed).
///
/// This is intentionally decoupled from `anyhow` so downstream libraries aren't forced to
/// adopt `anyhow` in their own public APIs.
#[derive(Debug, Error)]
pub enum Error {
    /// Nothing was typed at all.
    #[error("Please enter a YouTube link")]
    EmptyInput,

    /// The input is not a recognizable link or identifier.
    #[error("{0}")]
    Validation(String),

    /// The collaborator reported failure, or the transport to it failed.
    #[error("{0}")]
    Collaborator(String),

    /// The collaborator reported success but sent no caption entries.
    #[error("{NO_SUBTITLES_MESSAGE}")]
    EmptyResult,

    /// A caption entry's `start` could not be read as a number of seconds.
    #[error("malformed caption payload: entry {index} has unparsable start '{value}'")]
    MalformedPayload { index: usize, value: String },

    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Other(#[from] Box<dyn StdError + Send + Sync>),
}

impl Error {
    pub(crate) fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether this error was raised from user input rather than from a fetch attempt.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::Validation(_))
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Message(format!("{err:#}"))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Other(Box::new(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(Box::new(err))
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Collaborator(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collaborator_message_is_passed_through_verbatim() {
        let err = Error::Collaborator("This video has no subtitles available.".to_owned());
        assert_eq!(err.to_string(), "This video has no subtitles available.");
    }

    #[test]
    fn empty_result_uses_generic_message() {
        assert_eq!(Error::EmptyResult.to_string(), NO_SUBTITLES_MESSAGE);
    }

    #[test]
    fn input_errors_are_distinguished_from_fetch_errors() {
        assert!(Error::EmptyInput.is_input_error());
        assert!(Error::validation("nope").is_input_error());
        assert!(!Error::EmptyResult.is_input_error());
        assert!(
            !Error::MalformedPayload {
                index: 0,
                value: "x".to_owned()
            }
            .is_input_error()
        );
    }

    #[test]
    fn anyhow_errors_keep_their_context_chain() {
        let err: Error = anyhow::anyhow!("inner").context("outer").into();
        assert_eq!(err.to_string(), "outer: inner");
    }
}
