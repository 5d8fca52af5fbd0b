//! Dashboard "recent activity" preview

use crate::error::ViewError;
use crate::service::CustomerViews;
use chrono::{DateTime, Utc};
use roster_core::{reconcile, ConfigurationError, ConversationInput, ReconciledCustomer};
use roster_sources::CustomerQuery;
use serde::{Deserialize, Serialize};
use tracing::info;

const UNKNOWN_CUSTOMER: &str = "Unknown Customer";
const PLACEHOLDER_MESSAGE: &str = "Recent conversation";
const PLACEHOLDER_AGE: &str = "Recently";
const DEFAULT_MESSAGE_TYPE: &str = "text";

/// One card in the recent-activity block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewCard {
    pub name: String,
    pub phone_number: String,
    pub recent_message: String,
    pub time_ago: String,
    pub message_type: String,
}

impl PreviewCard {
    /// Project a record, filling gaps with placeholder text
    pub fn from_record(record: &ReconciledCustomer, now: DateTime<Utc>) -> Self {
        Self {
            name: record
                .customer_name
                .clone()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_CUSTOMER.to_string()),
            phone_number: record.phone_number.clone(),
            recent_message: record
                .last_message
                .clone()
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| PLACEHOLDER_MESSAGE.to_string()),
            time_ago: record
                .last_message_time
                .map(|at| time_ago(now, at))
                .unwrap_or_else(|| PLACEHOLDER_AGE.to_string()),
            message_type: record
                .last_message_type
                .as_ref()
                .map(|t| t.as_str().to_string())
                .unwrap_or_else(|| DEFAULT_MESSAGE_TYPE.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PreviewView {
    pub records: Vec<ReconciledCustomer>,
    pub cards: Vec<PreviewCard>,
}

/// Coarse relative age: `just now`, `5m ago`, `3h ago`, `2d ago`
pub fn time_ago(now: DateTime<Utc>, at: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(at);
    if elapsed.num_minutes() < 1 {
        // includes timestamps slightly in the future (clock skew)
        "just now".to_string()
    } else if elapsed.num_hours() < 1 {
        format!("{}m ago", elapsed.num_minutes())
    } else if elapsed.num_days() < 1 {
        format!("{}h ago", elapsed.num_hours())
    } else {
        format!("{}d ago", elapsed.num_days())
    }
}

impl CustomerViews {
    /// First `preview_size` records of the reconciled view, most recent first
    pub async fn preview(&self, now: DateTime<Utc>) -> Result<PreviewView, ViewError> {
        let size = self.config.preview_size;
        let limit = u32::try_from(size).map_err(|_| ConfigurationError::Invalid {
            key: "views.preview_size",
            reason: format!("{size} does not fit a request limit"),
        })?;
        let query = CustomerQuery::recent(limit);

        let (profiles, page) = tokio::try_join!(
            self.profiles.list(Some(self.config.list_profile_cap)),
            self.conversations.list_summaries(&query),
        )
        .map_err(ViewError::upstream)?;

        let reconciliation = reconcile(&profiles, &ConversationInput::WithSummaries(page.items));
        let records: Vec<ReconciledCustomer> =
            reconciliation.records.into_iter().take(size).collect();
        let cards = records
            .iter()
            .map(|record| PreviewCard::from_record(record, now))
            .collect();

        info!(cards = records.len(), "built preview");
        Ok(PreviewView { records, cards })
    }
}
