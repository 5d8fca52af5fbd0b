//! Paginated customer table

use crate::error::ViewError;
use crate::service::CustomerViews;
use roster_core::{reconcile, ConversationInput, ReconciledCustomer};
use roster_sources::CustomerQuery;
use serde::Serialize;
use tracing::info;

/// One page of the customer table with the upstream's paging metadata
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPage {
    pub records: Vec<ReconciledCustomer>,
    pub page: u32,
    pub limit: u32,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_next: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_previous: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_escalated: Option<usize>,
}

impl CustomerViews {
    /// Reconciled page of conversation-backed customers.
    ///
    /// Paging, filtering and sorting happen upstream; profile-only customers
    /// fall outside the page and are dropped.
    pub async fn customer_page(&self, query: &CustomerQuery) -> Result<CustomerPage, ViewError> {
        query.validate()?;

        let (profiles, page) = tokio::try_join!(
            self.profiles.list(Some(self.config.list_profile_cap)),
            self.conversations.list_summaries(query),
        )
        .map_err(ViewError::upstream)?;

        let reconciliation = reconcile(&profiles, &ConversationInput::WithSummaries(page.items));
        let records: Vec<ReconciledCustomer> = reconciliation
            .records
            .into_iter()
            .take_while(|record| record.has_chat)
            .collect();

        info!(
            page = page.page,
            records = records.len(),
            total = page.total,
            "built customer page"
        );

        Ok(CustomerPage {
            records,
            page: page.page,
            limit: page.limit,
            total: page.total,
            total_pages: page.total_pages,
            has_next: page.has_next,
            has_previous: page.has_previous,
            total_escalated: page.total_escalated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{summary, StaticConversations, StaticProfiles};
    use roster_core::{ProfileRecord, Status, ViewConfig};
    use roster_sources::{CustomerType, SummaryPage};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_page_keeps_only_conversation_segment() {
        let profiles = Arc::new(StaticProfiles::new(vec![
            ProfileRecord::new("A").with_name("Alice"),
            ProfileRecord::new("Q").with_name("Quiet"),
        ]));
        let conversations = Arc::new(StaticConversations::with_page(
            vec![summary("C", "unknown sender"), summary("A", "hello")],
            42,
        ));
        let views = CustomerViews::new(profiles, conversations, ViewConfig::new());

        let page = views.customer_page(&CustomerQuery::new()).await.unwrap();

        let phones: Vec<&str> = page.records.iter().map(|r| r.phone_number.as_str()).collect();
        assert_eq!(phones, vec!["C", "A"]);
        assert_eq!(page.records[0].status, Status::ChatOnly);
        assert_eq!(page.records[1].status, Status::Active);
        assert_eq!(page.records[1].customer_name.as_deref(), Some("Alice"));
        assert_eq!(page.total, 42);
        assert_eq!(page.page, 1);
    }

    #[tokio::test]
    async fn test_page_forwards_query_and_metadata() {
        let conversations = Arc::new(StaticConversations {
            page: SummaryPage {
                items: vec![summary("A", "hi")],
                total: 11,
                page: 2,
                limit: 5,
                total_pages: Some(3),
                has_next: Some(true),
                has_previous: Some(true),
                total_escalated: Some(2),
            },
            ..StaticConversations::default()
        });
        let views = CustomerViews::new(
            Arc::new(StaticProfiles::default()),
            conversations.clone(),
            ViewConfig::new(),
        );
        let query = CustomerQuery {
            page: 2,
            limit: 5,
            customer_type: Some(CustomerType::B2b),
            escalation_status: Some(true),
            ..CustomerQuery::new()
        };

        let page = views.customer_page(&query).await.unwrap();
        assert_eq!(
            conversations.requested_query.lock().unwrap().as_ref(),
            Some(&query)
        );

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["page"], 2);
        assert_eq!(json["limit"], 5);
        assert_eq!(json["total"], 11);
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["hasNext"], true);
        assert_eq!(json["totalEscalated"], 2);
    }

    #[tokio::test]
    async fn test_invalid_query_fails_before_fetching() {
        let conversations = Arc::new(StaticConversations::default());
        let views = CustomerViews::new(
            Arc::new(StaticProfiles::default()),
            conversations.clone(),
            ViewConfig::new(),
        );
        let query = CustomerQuery {
            min_spend: Some(10),
            max_spend: Some(1),
            ..CustomerQuery::new()
        };

        let err = views.customer_page(&query).await.unwrap_err();
        assert!(matches!(err, ViewError::InvalidQuery(_)));
        assert!(conversations.requested_query.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_page_fails_on_conversation_error() {
        let views = CustomerViews::new(
            Arc::new(StaticProfiles::new(vec![ProfileRecord::new("A")])),
            Arc::new(StaticConversations::failing()),
            ViewConfig::new(),
        );
        let err = views.customer_page(&CustomerQuery::new()).await.unwrap_err();
        assert!(matches!(err, ViewError::Upstream(_)));
    }
}
