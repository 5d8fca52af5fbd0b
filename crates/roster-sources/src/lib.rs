//! Upstream profile and conversation sources

mod error;
mod http;
mod query;
mod source;

pub use error::{InvalidQueryError, UpstreamFetchError};
pub use http::{ApiClient, HttpConversationSource, HttpProfileSource};
pub use query::{CustomerQuery, CustomerType, SortField, SortOrder};
pub use source::{ConversationIndexSource, ProfileSource, SummaryPage};
