use thiserror::Error;

/// Which user action an error belongs to; selects the fallback message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Login,
    Signup,
    Load,
    Create,
    Overview,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// No response was received.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request failed with status {status}")]
    Http { status: u16, detail: Option<String> },

    /// A 2xx response whose body could not be decoded.
    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("invalid request url: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn user_message(&self, op: Operation) -> String {
        match self {
            ApiError::Http {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => detail.clone(),
            ApiError::Http { status, .. } => match op {
                Operation::Login => "Login failed".into(),
                Operation::Signup => "Sign up failed".into(),
                Operation::Load => format!("Failed: {status}"),
                Operation::Create => "Create failed".into(),
                Operation::Overview => format!("Request failed: {status}"),
            },
            ApiError::Transport(cause) => format!("Network error: {cause}"),
            ApiError::Malformed(_) => "Unexpected response from server".into(),
            ApiError::InvalidUrl(url) => format!("Invalid backend address: {url}"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("client storage unavailable: {0}")]
    Unavailable(String),

    #[error("failed to write '{key}': {message}")]
    Write { key: String, message: String },

    #[error("failed to serialize value: {0}")]
    Serialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_wins_over_fallback() {
        let err = ApiError::Http {
            status: 401,
            detail: Some("Invalid credentials".into()),
        };
        assert_eq!(err.user_message(Operation::Login), "Invalid credentials");
        assert_eq!(err.user_message(Operation::Load), "Invalid credentials");
    }

    #[test]
    fn missing_detail_uses_operation_fallback() {
        let err = ApiError::Http {
            status: 500,
            detail: None,
        };
        assert_eq!(err.user_message(Operation::Login), "Login failed");
        assert_eq!(err.user_message(Operation::Signup), "Sign up failed");
        assert_eq!(err.user_message(Operation::Load), "Failed: 500");
        assert_eq!(err.user_message(Operation::Create), "Create failed");
        assert_eq!(err.user_message(Operation::Overview), "Request failed: 500");
    }

    #[test]
    fn transport_and_malformed_collapse_to_one_string() {
        let err = ApiError::Transport("connection refused".into());
        assert_eq!(
            err.user_message(Operation::Create),
            "Network error: connection refused"
        );
        let err = ApiError::Malformed("expected value".into());
        assert_eq!(
            err.user_message(Operation::Load),
            "Unexpected response from server"
        );
    }
}
