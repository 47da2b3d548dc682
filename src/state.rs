use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::AppConfig;
use crate::gateway::{GatewayError, ProposalGateway};
use crate::models::suggestion::{
    Decision, Suggestion, SuggestionDraft, SuggestionRow, SuggestionStore, normalize_all,
    submission_payload,
};

/// Shared application state. All store mutations go through here.
///
/// The store lock is only held for the local change and always released
/// before a gateway call is awaited.
pub struct PortalState {
    store: Mutex<SuggestionStore>,
    gateway: Arc<dyn ProposalGateway>,
    pub config: AppConfig,
}

/// Result of notifying the remote service after a local change.
pub type RemoteOutcome = Result<(), GatewayError>;

impl PortalState {
    pub fn new(config: AppConfig, gateway: Arc<dyn ProposalGateway>) -> Self {
        Self {
            store: Mutex::new(SuggestionStore::new()),
            gateway,
            config,
        }
    }

    fn store(&self) -> MutexGuard<'_, SuggestionStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reload every record from the remote service. On failure the current
    /// records stay as they are.
    pub async fn refresh(&self) -> Result<usize, GatewayError> {
        let items = self.gateway.fetch_all().await?;
        let drafts = normalize_all(items);
        let count = self.store().replace_all(drafts);
        log::info!("Loaded {count} suggestions from the proposal service");
        Ok(count)
    }

    /// Add `draft` at the head of the list, then post it to the remote
    /// service. The local record stays even when the post fails.
    pub async fn submit(&self, draft: SuggestionDraft) -> (i64, RemoteOutcome) {
        let payload = submission_payload(&draft);
        let id = self.store().insert_at_head(draft);

        let outcome = self.gateway.submit_new(&payload).await;
        match &outcome {
            Ok(()) => log::info!("Submitted suggestion {id}"),
            Err(e) => log::error!("Failed to submit suggestion {id}: {e}"),
        }
        (id, outcome)
    }

    /// Record a decision locally, then notify the remote service.
    ///
    /// Returns `None` when `id` is not in the store; nothing is changed or
    /// sent in that case.
    pub async fn decide(&self, id: i64, decision: Decision) -> Option<RemoteOutcome> {
        if !self.store().set_decision(id, decision) {
            log::warn!("Ignoring {} for unknown suggestion {id}", decision.label());
            return None;
        }

        let outcome = match decision {
            Decision::Approved => self.gateway.approve(id).await,
            Decision::Rejected => self.gateway.reject(id).await,
            Decision::Undecided => Ok(()),
        };
        if let Err(e) = &outcome {
            log::error!("Failed to send {} for suggestion {id}: {e}", decision.label());
        }
        Some(outcome)
    }

    pub fn rows(&self) -> Vec<SuggestionRow> {
        self.store().rows()
    }

    /// Copy of the current records, in display order.
    pub fn snapshot(&self) -> Vec<Suggestion> {
        self.store().get_all().to_vec()
    }

    pub fn decision(&self, id: i64) -> Decision {
        self.store().decision(id)
    }
}
