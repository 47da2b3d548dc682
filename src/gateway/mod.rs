//! Boundary to the remote proposal service.
//!
//! Callers apply their local change first and only then notify the remote
//! side; a gateway error never undoes the local change.

mod http;

use std::fmt;

use async_trait::async_trait;

use crate::models::suggestion::{ApiProjectSuggestion, NewProposalPayload};

pub use http::HttpGateway;

#[derive(Debug)]
pub enum GatewayError {
    /// Request did not finish within the configured timeout.
    Timeout,
    Transport(reqwest::Error),
    Status(u16),
    Decode(serde_json::Error),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Timeout => write!(f, "Proposal service timed out"),
            GatewayError::Transport(e) => write!(f, "Proposal service unreachable: {e}"),
            GatewayError::Status(code) => write!(f, "Proposal service answered HTTP {code}"),
            GatewayError::Decode(e) => write!(f, "Proposal service sent invalid JSON: {e}"),
        }
    }
}

impl std::error::Error for GatewayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GatewayError::Transport(e) => Some(e),
            GatewayError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GatewayError::Timeout
        } else {
            GatewayError::Transport(e)
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(e: serde_json::Error) -> Self {
        GatewayError::Decode(e)
    }
}

#[async_trait]
pub trait ProposalGateway: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<ApiProjectSuggestion>, GatewayError>;

    async fn submit_new(&self, payload: &NewProposalPayload) -> Result<(), GatewayError>;

    async fn approve(&self, id: i64) -> Result<(), GatewayError>;

    async fn reject(&self, id: i64) -> Result<(), GatewayError>;
}
