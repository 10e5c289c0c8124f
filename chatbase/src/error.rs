use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ChatbaseError {
    #[error("chatbase responded with HTTP {status}")]
    Api {
        status: u16,
        payload: serde_json::Value,
    },
    #[error(transparent)]
    Request(#[from] reqwest::Error),
    #[error("could not decode chatbase response body")]
    Decode(#[source] reqwest::Error),
}

impl ChatbaseError {
    /// The provider's reported HTTP status, when it got far enough to answer.
    pub fn status(&self) -> Option<u16> {
        match self {
            ChatbaseError::Api { status, .. } => Some(*status),
            ChatbaseError::Request(err) => err.status().map(|s| s.as_u16()),
            ChatbaseError::Decode(_) => None,
        }
    }

    pub fn payload(&self) -> Option<&serde_json::Value> {
        match self {
            ChatbaseError::Api { payload, .. } => Some(payload),
            _ => None,
        }
    }
}
