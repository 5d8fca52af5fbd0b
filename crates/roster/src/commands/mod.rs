pub mod all;
pub mod customers;
pub mod preview;
pub mod version;

use roster_core::RosterConfig;
use roster_sources::{ApiClient, HttpConversationSource, HttpProfileSource};
use roster_views::{CustomerViews, ViewError, USER_FACING_ERROR};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Load configuration and wire the HTTP sources into the views
pub fn build_views(config_path: Option<&Path>) -> anyhow::Result<CustomerViews> {
    let config = RosterConfig::load(config_path)?;
    let api = ApiClient::new(&config.source);

    let views = CustomerViews::builder()
        .profiles(Arc::new(HttpProfileSource::new(api.clone())))
        .conversations(Arc::new(HttpConversationSource::new(api)))
        .config(config.views)
        .build()?;
    Ok(views)
}

/// JSON body for a view result; failures become the operator-facing error body
pub fn render<T: Serialize>(result: &Result<T, ViewError>) -> serde_json::Result<String> {
    match result {
        Ok(view) => serde_json::to_string_pretty(view),
        Err(err) => serde_json::to_string_pretty(&serde_json::json!({
            "error": err.user_message(),
            "details": err.to_string(),
        })),
    }
}

/// Print a view result and turn failures into a non-zero exit
pub fn emit<T: Serialize>(result: Result<T, ViewError>) -> anyhow::Result<()> {
    println!("{}", render(&result)?);
    result
        .map(|_| ())
        .map_err(|err| anyhow::Error::new(err).context(USER_FACING_ERROR))
}
