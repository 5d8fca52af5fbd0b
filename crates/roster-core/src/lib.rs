//! Customer–conversation reconciliation: data model, engine and configuration

mod config;
mod engine;
mod error;
mod paths;
mod types;

pub use config::{RosterConfig, SourceConfig, ViewConfig};
pub use engine::reconcile;
pub use error::{ConfigurationError, MalformedInputError, RecordSide};
pub use paths::ConfigPaths;
pub use types::{
    ConversationInput, ConversationSummary, MessageSender, MessageType, ProfileRecord,
    ReconciledCustomer, Reconciliation, ReconciliationSummary, Status,
};
