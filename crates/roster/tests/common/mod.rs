#![allow(dead_code)]

use roster_core::{ConversationInput, ConversationSummary, ProfileRecord, SourceConfig};

pub const API_KEY: &str = "test-key";

pub fn profiles(phones: &[&str]) -> Vec<ProfileRecord> {
    phones
        .iter()
        .map(|phone| ProfileRecord::new(*phone).with_name(format!("Customer {phone}")))
        .collect()
}

pub fn presence(phones: &[&str]) -> ConversationInput {
    ConversationInput::PresenceOnly(phones.iter().map(|p| p.to_string()).collect())
}

pub fn summaries(phones: &[&str]) -> ConversationInput {
    ConversationInput::WithSummaries(
        phones
            .iter()
            .map(|phone| {
                let mut summary = ConversationSummary::new(*phone);
                summary.last_message = Some(format!("hello from {phone}"));
                summary
            })
            .collect(),
    )
}

/// Overlapping phone sets of varying shape, generated without randomness
pub fn overlap_cases() -> Vec<(Vec<String>, Vec<String>)> {
    let mut cases = Vec::new();
    for profile_count in [0usize, 1, 3, 7, 20] {
        for conversation_count in [0usize, 1, 4, 9, 20] {
            for shift in [0usize, 2, 5] {
                let profiles = (0..profile_count).map(|i| format!("92300{:04}", i)).collect();
                let conversations = (0..conversation_count)
                    .map(|i| format!("92300{:04}", (i * 3 + shift) % 25))
                    .collect();
                cases.push((profiles, conversations));
            }
        }
    }
    cases
}

pub fn source_config(base_url: &str) -> SourceConfig {
    SourceConfig {
        base_url: base_url.to_string(),
        api_key: API_KEY.to_string(),
        ..SourceConfig::new()
    }
}
