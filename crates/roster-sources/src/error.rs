use thiserror::Error;

/// A source request that failed or returned non-success. Never retried here.
#[derive(Debug, Error)]
pub enum UpstreamFetchError {
    #[error("{source_name} returned HTTP {status}")]
    Status { source_name: &'static str, status: u16 },

    #[error("{source_name} request failed: {error}")]
    Transport {
        source_name: &'static str,
        #[source]
        error: reqwest::Error,
    },

    #[error("{source_name} returned an unreadable body: {error}")]
    Decode {
        source_name: &'static str,
        #[source]
        error: serde_json::Error,
    },
}

impl UpstreamFetchError {
    pub fn source_name(&self) -> &'static str {
        match self {
            UpstreamFetchError::Status { source_name, .. }
            | UpstreamFetchError::Transport { source_name, .. }
            | UpstreamFetchError::Decode { source_name, .. } => source_name,
        }
    }
}

/// A list query the upstream would reject
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvalidQueryError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = UpstreamFetchError::Status {
            source_name: "profiles",
            status: 503,
        };
        assert_eq!(err.to_string(), "profiles returned HTTP 503");
        assert_eq!(err.source_name(), "profiles");
    }

    #[test]
    fn test_decode_display() {
        let error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = UpstreamFetchError::Decode {
            source_name: "conversations",
            error,
        };
        assert!(err
            .to_string()
            .starts_with("conversations returned an unreadable body"));
    }
}
