//! Error kinds surfaced by the request client and the local stores.

use serde::{Deserialize, Serialize};

/// The two remote operations a prompt can be sent for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestKind {
    Generate,
    Enhance,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Generate => "generate",
            RequestKind::Enhance => "enhance",
        }
    }

    /// Shown when no endpoint supplied a more specific message.
    pub fn generic_message(&self) -> &'static str {
        match self {
            RequestKind::Generate => "An error occurred while generating the diagram",
            RequestKind::Enhance => "Failed to enhance prompt",
        }
    }

    /// Title of the error notification for an exhausted request.
    pub fn failure_title(&self) -> &'static str {
        match self {
            RequestKind::Generate => "Generation Failed",
            RequestKind::Enhance => "Enhancement Failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    #[error("{message}")]
    Validation { message: String },

    #[error("{endpoint} request failed: {message}")]
    Network {
        endpoint: String,
        message: String,
        /// `message` or `error` field from the service's error body
        server_message: Option<String>,
    },

    #[error("{endpoint} sent an unrecognized response: {message}")]
    MalformedResponse { endpoint: String, message: String },

    #[error("Stored value for {key} is unreadable: {message}")]
    Persistence { key: String, message: String },

    #[error("{user_message}")]
    Exhausted {
        user_message: String,
        attempts: Vec<ClientError>,
    },
}

impl ClientError {
    pub fn empty_prompt() -> Self {
        ClientError::Validation {
            message: "Please enter a prompt".to_string(),
        }
    }

    /// Whether the next endpoint in the chain should be tried.
    pub fn triggers_fallback(&self) -> bool {
        matches!(
            self,
            ClientError::Network { .. } | ClientError::MalformedResponse { .. }
        )
    }

    /// Message embedded in the service's error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Network { server_message, .. } => server_message.as_deref(),
            _ => None,
        }
    }

    /// Collapse a failed chain of attempts into one user-facing error.
    ///
    /// The last attempt wins; its server message is preferred over the
    /// generic message for `kind`.
    pub fn exhausted(kind: RequestKind, attempts: Vec<ClientError>) -> Self {
        let user_message = attempts
            .last()
            .and_then(|e| e.server_message())
            .map(str::to_string)
            .unwrap_or_else(|| kind.generic_message().to_string());
        ClientError::Exhausted {
            user_message,
            attempts,
        }
    }

    /// Text suitable for an inline banner or a notification body.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation { message } => message.clone(),
            ClientError::Exhausted { user_message, .. } => user_message.clone(),
            ClientError::Network {
                server_message: Some(m),
                ..
            } => m.clone(),
            other => other.to_string(),
        }
    }
}
