use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};

use super::{GatewayError, ProposalGateway};
use crate::config::AppConfig;
use crate::models::suggestion::{ApiProjectSuggestion, NewProposalPayload};

/// `reqwest`-backed gateway. Every request shares one client and its timeout.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    proposals_url: String,
    decisions_base_url: String,
}

impl HttpGateway {
    pub fn new(config: &AppConfig) -> Result<Self, GatewayError> {
        Self::with_timeout(
            &config.proposals_url,
            &config.decisions_base_url,
            config.request_timeout,
        )
    }

    pub fn with_timeout(
        proposals_url: &str,
        decisions_base_url: &str,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            proposals_url: proposals_url.to_string(),
            decisions_base_url: decisions_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn decision_url(&self, id: i64, action: &str) -> String {
        format!("{}/api/suggestions/{id}/{action}", self.decisions_base_url)
    }

    async fn post_decision(&self, id: i64, action: &str) -> Result<(), GatewayError> {
        let response = self.client.post(self.decision_url(id, action)).send().await?;
        check_status(response)?;
        Ok(())
    }
}

fn check_status(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(GatewayError::Status(status.as_u16()))
    }
}

#[async_trait]
impl ProposalGateway for HttpGateway {
    async fn fetch_all(&self) -> Result<Vec<ApiProjectSuggestion>, GatewayError> {
        let response = check_status(self.client.get(&self.proposals_url).send().await?)?;
        let body = response.bytes().await?;
        let items: Vec<ApiProjectSuggestion> = serde_json::from_slice(&body)?;
        log::debug!("Fetched {} proposals from {}", items.len(), self.proposals_url);
        Ok(items)
    }

    async fn submit_new(&self, payload: &NewProposalPayload) -> Result<(), GatewayError> {
        // The service expects an array even for a single proposal.
        let response = self
            .client
            .post(&self.proposals_url)
            .json(&[payload])
            .send()
            .await?;
        check_status(response)?;
        Ok(())
    }

    async fn approve(&self, id: i64) -> Result<(), GatewayError> {
        self.post_decision(id, "approve").await
    }

    async fn reject(&self, id: i64) -> Result<(), GatewayError> {
        self.post_decision(id, "reject").await
    }
}
