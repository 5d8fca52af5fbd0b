//! Source traits consumed by the view adapters

use crate::error::UpstreamFetchError;
use crate::query::CustomerQuery;
use async_trait::async_trait;
use roster_core::{ConversationSummary, ProfileRecord};
use serde::{Deserialize, Serialize};

/// One page of conversation summaries plus the upstream's paging metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryPage {
    pub items: Vec<ConversationSummary>,
    pub total: usize,
    pub page: u32,
    pub limit: u32,
    pub total_pages: Option<u32>,
    pub has_next: Option<bool>,
    pub has_previous: Option<bool>,
    pub total_escalated: Option<usize>,
}

/// Customer-profile registry
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Fetch active profiles, capped at `limit` when given. Order is not relied on.
    async fn list(&self, limit: Option<usize>) -> Result<Vec<ProfileRecord>, UpstreamFetchError>;
}

/// Conversation-thread index
#[async_trait]
pub trait ConversationIndexSource: Send + Sync {
    /// Phone numbers with a conversation, most recent activity first
    async fn list_phone_numbers(&self) -> Result<Vec<String>, UpstreamFetchError>;

    /// Filtered, sorted page of conversation summaries
    async fn list_summaries(
        &self,
        query: &CustomerQuery,
    ) -> Result<SummaryPage, UpstreamFetchError>;
}
