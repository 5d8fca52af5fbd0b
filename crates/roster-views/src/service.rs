//! Adapter handle bound to its two sources

use roster_core::{ConfigurationError, ViewConfig};
use roster_sources::{ConversationIndexSource, ProfileSource};
use std::sync::Arc;

/// Entry point for the three customer views.
///
/// Each view fetches both sources concurrently, then reconciles. Nothing is
/// cached between calls.
#[derive(Clone)]
pub struct CustomerViews {
    pub(crate) profiles: Arc<dyn ProfileSource>,
    pub(crate) conversations: Arc<dyn ConversationIndexSource>,
    pub(crate) config: ViewConfig,
}

impl CustomerViews {
    pub(crate) fn new(
        profiles: Arc<dyn ProfileSource>,
        conversations: Arc<dyn ConversationIndexSource>,
        config: ViewConfig,
    ) -> Self {
        Self {
            profiles,
            conversations,
            config,
        }
    }

    pub fn builder() -> CustomerViewsBuilder {
        CustomerViewsBuilder::default()
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }
}

impl std::fmt::Debug for CustomerViews {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomerViews")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder that refuses to produce a handle with a missing source or
/// out-of-range view sizes
#[derive(Default)]
pub struct CustomerViewsBuilder {
    profiles: Option<Arc<dyn ProfileSource>>,
    conversations: Option<Arc<dyn ConversationIndexSource>>,
    config: ViewConfig,
}

impl CustomerViewsBuilder {
    pub fn profiles(mut self, source: Arc<dyn ProfileSource>) -> Self {
        self.profiles = Some(source);
        self
    }

    pub fn conversations(mut self, source: Arc<dyn ConversationIndexSource>) -> Self {
        self.conversations = Some(source);
        self
    }

    pub fn config(mut self, config: ViewConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<CustomerViews, ConfigurationError> {
        self.config.validate()?;
        let profiles = self
            .profiles
            .ok_or(ConfigurationError::MissingSource("profile"))?;
        let conversations = self
            .conversations
            .ok_or(ConfigurationError::MissingSource("conversation"))?;
        Ok(CustomerViews::new(profiles, conversations, self.config))
    }
}
