//! In-memory sources for adapter tests

use async_trait::async_trait;
use roster_core::{ConversationSummary, ProfileRecord};
use roster_sources::{
    ConversationIndexSource, CustomerQuery, ProfileSource, SummaryPage, UpstreamFetchError,
};
use std::sync::Mutex;

fn unavailable(source_name: &'static str) -> UpstreamFetchError {
    UpstreamFetchError::Status {
        source_name,
        status: 503,
    }
}

#[derive(Default)]
pub struct StaticProfiles {
    pub profiles: Vec<ProfileRecord>,
    pub fail: bool,
    pub requested_limit: Mutex<Option<Option<usize>>>,
}

impl StaticProfiles {
    pub fn new(profiles: Vec<ProfileRecord>) -> Self {
        Self {
            profiles,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl ProfileSource for StaticProfiles {
    async fn list(&self, limit: Option<usize>) -> Result<Vec<ProfileRecord>, UpstreamFetchError> {
        *self.requested_limit.lock().unwrap() = Some(limit);
        if self.fail {
            return Err(unavailable("profiles"));
        }
        let cap = limit.unwrap_or(usize::MAX);
        Ok(self.profiles.iter().take(cap).cloned().collect())
    }
}

#[derive(Default)]
pub struct StaticConversations {
    pub phones: Vec<String>,
    pub page: SummaryPage,
    pub fail: bool,
    pub requested_query: Mutex<Option<CustomerQuery>>,
}

impl StaticConversations {
    pub fn with_phones(phones: &[&str]) -> Self {
        Self {
            phones: phones.iter().map(|p| p.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_page(items: Vec<ConversationSummary>, total: usize) -> Self {
        Self {
            page: SummaryPage {
                items,
                total,
                page: 1,
                limit: 10,
                ..SummaryPage::default()
            },
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl ConversationIndexSource for StaticConversations {
    async fn list_phone_numbers(&self) -> Result<Vec<String>, UpstreamFetchError> {
        if self.fail {
            return Err(unavailable("conversations"));
        }
        Ok(self.phones.clone())
    }

    async fn list_summaries(
        &self,
        query: &CustomerQuery,
    ) -> Result<SummaryPage, UpstreamFetchError> {
        *self.requested_query.lock().unwrap() = Some(query.clone());
        if self.fail {
            return Err(unavailable("conversations"));
        }
        Ok(self.page.clone())
    }
}

pub fn summary(phone: &str, message: &str) -> ConversationSummary {
    let mut summary = ConversationSummary::new(phone);
    summary.last_message = Some(message.to_string());
    summary
}
