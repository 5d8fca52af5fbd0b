//! Unified "all customers" view

use crate::error::ViewError;
use crate::service::CustomerViews;
use roster_core::{reconcile, ConversationInput, ReconciledCustomer, ReconciliationSummary};
use serde::Serialize;
use tracing::info;

/// Scorecard counts, under the field names the dashboard already reads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedStats {
    pub active: usize,
    pub chat_only: usize,
    pub customer_only: usize,
}

impl From<ReconciliationSummary> for UnifiedStats {
    fn from(summary: ReconciliationSummary) -> Self {
        Self {
            active: summary.active,
            chat_only: summary.chat_only,
            customer_only: summary.customer_only,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UnifiedView {
    pub customers: Vec<ReconciledCustomer>,
    pub total: usize,
    pub stats: UnifiedStats,
}

impl CustomerViews {
    /// Every capped profile and every conversation phone, classified
    pub async fn all_customers(&self) -> Result<UnifiedView, ViewError> {
        let (profiles, phones) = tokio::try_join!(
            self.profiles.list(Some(self.config.unified_profile_cap)),
            self.conversations.list_phone_numbers(),
        )
        .map_err(ViewError::upstream)?;

        let reconciliation = reconcile(&profiles, &ConversationInput::PresenceOnly(phones));
        let summary = reconciliation.summary;

        info!(
            total = summary.total,
            active = summary.active,
            chat_only = summary.chat_only,
            customer_only = summary.customer_only,
            "built unified customer view"
        );

        Ok(UnifiedView {
            customers: reconciliation.records,
            total: summary.total,
            stats: summary.into(),
        })
    }
}
