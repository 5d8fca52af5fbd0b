//! reqwest-backed sources for the customer/chat service

use crate::error::UpstreamFetchError;
use crate::query::CustomerQuery;
use crate::source::{ConversationIndexSource, ProfileSource, SummaryPage};
use async_trait::async_trait;
use reqwest::Client;
use roster_core::{ConversationSummary, ProfileRecord, SourceConfig};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const PROFILES: &str = "profiles";
const CONVERSATIONS: &str = "conversations";

const CUSTOMERS_PATH: &str = "customers/";
const PHONE_NUMBERS_PATH: &str = "chats/phone-numbers";
const LIST_CHATS_PATH: &str = "chats/list-chats";

/// Authenticated JSON client shared by both sources
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: SourceConfig,
    client: Client,
}

impl ApiClient {
    pub fn new(config: &SourceConfig) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            config: config.clone(),
            client,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        source_name: &'static str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, UpstreamFetchError> {
        let url = self.config.endpoint(path);
        debug!(source = source_name, %url, "fetching");

        let response = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .header("x-api-key", &self.config.api_key)
            .query(query)
            .send()
            .await
            .map_err(|error| UpstreamFetchError::Transport { source_name, error })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamFetchError::Status {
                source_name,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|error| UpstreamFetchError::Transport { source_name, error })?;
        serde_json::from_slice(&body).map_err(|error| UpstreamFetchError::Decode { source_name, error })
    }
}

#[derive(Deserialize)]
struct CustomersEnvelope {
    #[serde(default)]
    customers: Vec<ProfileRecord>,
}

#[derive(Deserialize)]
struct PhoneNumbersEnvelope {
    #[serde(default)]
    phone_numbers: Vec<Option<String>>,
}

#[derive(Deserialize)]
struct ChatListEnvelope {
    #[serde(default)]
    customers: Vec<ConversationSummary>,
    #[serde(default)]
    total: Option<usize>,
    #[serde(default)]
    page: Option<u32>,
    #[serde(default)]
    limit: Option<u32>,
    #[serde(default)]
    total_pages: Option<u32>,
    #[serde(default)]
    has_next: Option<bool>,
    #[serde(default)]
    has_previous: Option<bool>,
    #[serde(default)]
    total_escalated: Option<usize>,
}

/// `GET /customers/`
#[derive(Debug, Clone)]
pub struct HttpProfileSource {
    api: ApiClient,
}

impl HttpProfileSource {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ProfileSource for HttpProfileSource {
    async fn list(&self, limit: Option<usize>) -> Result<Vec<ProfileRecord>, UpstreamFetchError> {
        let query: Vec<(&str, String)> = limit
            .map(|limit| vec![("limit", limit.to_string())])
            .unwrap_or_default();
        let envelope: CustomersEnvelope = self.api.get_json(PROFILES, CUSTOMERS_PATH, &query).await?;
        debug!(count = envelope.customers.len(), "fetched profiles");
        Ok(envelope.customers)
    }
}

/// `GET /chats/phone-numbers` and `GET /chats/list-chats`
#[derive(Debug, Clone)]
pub struct HttpConversationSource {
    api: ApiClient,
}

impl HttpConversationSource {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ConversationIndexSource for HttpConversationSource {
    async fn list_phone_numbers(&self) -> Result<Vec<String>, UpstreamFetchError> {
        let envelope: PhoneNumbersEnvelope =
            self.api.get_json(CONVERSATIONS, PHONE_NUMBERS_PATH, &[]).await?;
        // null entries stay as blanks so reconciliation can report them
        let phones: Vec<String> = envelope
            .phone_numbers
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect();
        debug!(count = phones.len(), "fetched conversation phone numbers");
        Ok(phones)
    }

    async fn list_summaries(
        &self,
        query: &CustomerQuery,
    ) -> Result<SummaryPage, UpstreamFetchError> {
        let envelope: ChatListEnvelope = self
            .api
            .get_json(CONVERSATIONS, LIST_CHATS_PATH, &query.to_query_pairs())
            .await?;
        debug!(count = envelope.customers.len(), total = ?envelope.total, "fetched conversation summaries");

        let total = envelope.total.unwrap_or(envelope.customers.len());
        Ok(SummaryPage {
            items: envelope.customers,
            total,
            page: envelope.page.unwrap_or(query.page),
            limit: envelope.limit.unwrap_or(query.limit),
            total_pages: envelope.total_pages,
            has_next: envelope.has_next,
            has_previous: envelope.has_previous,
            total_escalated: envelope.total_escalated,
        })
    }
}
