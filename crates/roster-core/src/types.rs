//! Core types for customer reconciliation

use crate::error::MalformedInputError;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Read a timestamp the way the chat service writes them.
///
/// RFC 3339 with any offset, or a naive ISO timestamp taken as UTC. Anything
/// else becomes `None` rather than failing the whole response.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let parsed = match &raw {
        Some(serde_json::Value::String(text)) => parse_timestamp(text),
        _ => None,
    };
    if parsed.is_none() && !matches!(raw, None | Some(serde_json::Value::Null)) {
        debug!(value = ?raw, "ignoring unreadable last_message_time");
    }
    Ok(parsed)
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|naive| naive.and_utc())
}

/// A customer row from the profile registry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Join key. Blank means the upstream row is malformed.
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone_number: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    /// B2B / D2C, kept as the upstream string
    #[serde(default)]
    pub customer_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_spend: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub escalation_status: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,

    // Opaque pass-through values
    #[serde(default)]
    pub cart_id: Option<serde_json::Value>,
    #[serde(default)]
    pub customer_quickbook_id: Option<serde_json::Value>,
    #[serde(default)]
    pub order_history: Option<serde_json::Value>,
    #[serde(default)]
    pub socials: Option<serde_json::Value>,
    #[serde(default)]
    pub interest_groups: Option<serde_json::Value>,
}

impl ProfileRecord {
    pub fn new(phone_number: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.customer_name = Some(name.into());
        self
    }
}

/// Who sent the last message of a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSender {
    Customer,
    Agent,
    Representative,
}

/// Kind of the last message of a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Text,
    Image,
    Audio,
    Document,
    Video,
    /// Any type the upstream adds later, preserved verbatim
    #[serde(untagged)]
    Other(String),
}

impl MessageType {
    pub fn as_str(&self) -> &str {
        match self {
            MessageType::Text => "text",
            MessageType::Image => "image",
            MessageType::Audio => "audio",
            MessageType::Document => "document",
            MessageType::Video => "video",
            MessageType::Other(other) => other,
        }
    }
}

/// Latest-message summary of one conversation thread
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone_number: String,
    #[serde(default)]
    pub last_message: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub last_message_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_message_sender: Option<MessageSender>,
    #[serde(default)]
    pub last_message_type: Option<MessageType>,
}

impl ConversationSummary {
    pub fn new(phone_number: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            ..Self::default()
        }
    }
}

/// Conversation side of a reconciliation.
///
/// Presence-only input is enough for classification; summaries are only
/// needed when a view shows message previews.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversationInput {
    PresenceOnly(Vec<String>),
    WithSummaries(Vec<ConversationSummary>),
}

impl ConversationInput {
    /// Phone numbers paired with their summary, in supplied order
    pub fn entries(&self) -> Vec<(&str, Option<&ConversationSummary>)> {
        match self {
            ConversationInput::PresenceOnly(phones) => {
                phones.iter().map(|p| (p.as_str(), None)).collect()
            }
            ConversationInput::WithSummaries(summaries) => summaries
                .iter()
                .map(|s| (s.phone_number.as_str(), Some(s)))
                .collect(),
        }
    }
}

impl Default for ConversationInput {
    fn default() -> Self {
        ConversationInput::PresenceOnly(Vec::new())
    }
}

/// Presence classification of a reconciled customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Profile and conversation both present
    Active,
    /// Conversation without a profile
    ChatOnly,
    /// Profile without a conversation
    CustomerOnly,
}

impl Status {
    pub fn from_presence(has_customer_data: bool, has_chat: bool) -> Self {
        match (has_customer_data, has_chat) {
            (true, true) => Status::Active,
            (false, true) => Status::ChatOnly,
            (_, false) => Status::CustomerOnly,
        }
    }
}

/// One row of the merged view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciledCustomer {
    pub phone_number: String,

    // Profile fields
    pub customer_name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub company_name: Option<String>,
    pub customer_type: Option<String>,
    pub total_spend: Option<f64>,
    pub is_active: Option<bool>,
    pub escalation_status: Option<bool>,
    pub tags: Option<Vec<String>>,
    pub cart_id: Option<serde_json::Value>,
    pub customer_quickbook_id: Option<serde_json::Value>,
    pub order_history: Option<serde_json::Value>,
    pub socials: Option<serde_json::Value>,
    pub interest_groups: Option<serde_json::Value>,

    // Conversation fields
    pub last_message: Option<String>,
    pub last_message_time: Option<DateTime<Utc>>,
    pub last_message_sender: Option<MessageSender>,
    pub last_message_type: Option<MessageType>,

    // Derived
    pub status: Status,
    #[serde(rename = "hasChat")]
    pub has_chat: bool,
    #[serde(rename = "hasCustomerData")]
    pub has_customer_data: bool,
}

impl ReconciledCustomer {
    /// Merge the two sides for one phone number.
    ///
    /// Profile fields are copied first and conversation fields second; the two
    /// field sets are disjoint so a summary can never replace profile data.
    /// Derived fields are written last.
    pub fn merge(
        phone_number: &str,
        profile: Option<&ProfileRecord>,
        summary: Option<&ConversationSummary>,
        has_chat: bool,
    ) -> Self {
        let mut record = Self::bare(phone_number);
        if let Some(profile) = profile {
            record.fill_profile(profile);
        }
        if let Some(summary) = summary {
            record.fill_conversation(summary);
        }
        record.has_chat = has_chat;
        record.has_customer_data = profile.is_some();
        record.status = Status::from_presence(record.has_customer_data, record.has_chat);
        record
    }

    fn bare(phone_number: &str) -> Self {
        Self {
            phone_number: phone_number.to_string(),
            customer_name: None,
            email: None,
            address: None,
            company_name: None,
            customer_type: None,
            total_spend: None,
            is_active: None,
            escalation_status: None,
            tags: None,
            cart_id: None,
            customer_quickbook_id: None,
            order_history: None,
            socials: None,
            interest_groups: None,
            last_message: None,
            last_message_time: None,
            last_message_sender: None,
            last_message_type: None,
            status: Status::CustomerOnly,
            has_chat: false,
            has_customer_data: false,
        }
    }

    fn fill_profile(&mut self, profile: &ProfileRecord) {
        self.customer_name = profile.customer_name.clone();
        self.email = profile.email.clone();
        self.address = profile.address.clone();
        self.company_name = profile.company_name.clone();
        self.customer_type = profile.customer_type.clone();
        self.total_spend = Some(profile.total_spend);
        self.is_active = Some(profile.is_active);
        self.escalation_status = Some(profile.escalation_status);
        self.tags = Some(profile.tags.clone());
        self.cart_id = profile.cart_id.clone();
        self.customer_quickbook_id = profile.customer_quickbook_id.clone();
        self.order_history = profile.order_history.clone();
        self.socials = profile.socials.clone();
        self.interest_groups = profile.interest_groups.clone();
    }

    fn fill_conversation(&mut self, summary: &ConversationSummary) {
        self.last_message = summary.last_message.clone();
        self.last_message_time = summary.last_message_time;
        self.last_message_sender = summary.last_message_sender;
        self.last_message_type = summary.last_message_type.clone();
    }
}

/// Per-status counts over a reconciled view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationSummary {
    pub total: usize,
    pub active: usize,
    pub chat_only: usize,
    pub customer_only: usize,
}

impl ReconciliationSummary {
    pub fn from_records(records: &[ReconciledCustomer]) -> Self {
        let mut summary = Self::default();
        for record in records {
            summary.total += 1;
            match record.status {
                Status::Active => summary.active += 1,
                Status::ChatOnly => summary.chat_only += 1,
                Status::CustomerOnly => summary.customer_only += 1,
            }
        }
        summary
    }
}

/// Result of one `reconcile` call
#[derive(Debug, Clone, Serialize)]
pub struct Reconciliation {
    pub records: Vec<ReconciledCustomer>,
    pub summary: ReconciliationSummary,
    /// Input rows skipped because they had no phone number
    #[serde(skip)]
    pub rejected: Vec<MalformedInputError>,
}
