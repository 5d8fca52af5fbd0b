//! Full outer join of profiles and conversations by phone number

use crate::error::{MalformedInputError, RecordSide};
use crate::types::{
    ConversationInput, ConversationSummary, ProfileRecord, ReconciledCustomer, Reconciliation,
    ReconciliationSummary,
};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Merge a profile registry with a conversation index.
///
/// Output order: every phone with a conversation, in the order the
/// conversations were supplied, followed by profile-only phones in profile
/// order. Each phone appears once. A duplicated profile phone keeps its first
/// position but takes the data of its last occurrence; a duplicated
/// conversation phone keeps only its first occurrence. Rows without a phone
/// number are skipped and reported in `rejected`.
pub fn reconcile(profiles: &[ProfileRecord], conversations: &ConversationInput) -> Reconciliation {
    let mut rejected = Vec::new();

    let profile_index = index_profiles(profiles, &mut rejected);
    let conversation_order = order_conversations(conversations, &mut rejected);

    let mut records = Vec::with_capacity(conversation_order.len() + profile_index.len());
    let mut emitted: HashSet<&str> = HashSet::with_capacity(records.capacity());

    // Conversation segment
    for (phone, summary) in conversation_order {
        let profile = profile_index.get(phone).copied();
        records.push(ReconciledCustomer::merge(phone, profile, summary, true));
        emitted.insert(phone);
    }

    // Profile-only segment
    for profile in profiles {
        let phone = profile.phone_number.as_str();
        if is_blank(phone) || !emitted.insert(phone) {
            continue;
        }
        let latest = profile_index.get(phone).copied().unwrap_or(profile);
        records.push(ReconciledCustomer::merge(phone, Some(latest), None, false));
    }

    let summary = ReconciliationSummary::from_records(&records);
    debug!(
        total = summary.total,
        active = summary.active,
        chat_only = summary.chat_only,
        customer_only = summary.customer_only,
        rejected = rejected.len(),
        "reconciled customers"
    );

    Reconciliation {
        records,
        summary,
        rejected,
    }
}

fn is_blank(phone: &str) -> bool {
    phone.trim().is_empty()
}

fn reject(side: RecordSide, position: usize, rejected: &mut Vec<MalformedInputError>) {
    let err = MalformedInputError { side, position };
    warn!("skipping input: {}", err);
    rejected.push(err);
}

fn index_profiles<'a>(
    profiles: &'a [ProfileRecord],
    rejected: &mut Vec<MalformedInputError>,
) -> HashMap<&'a str, &'a ProfileRecord> {
    let mut index = HashMap::with_capacity(profiles.len());
    for (position, profile) in profiles.iter().enumerate() {
        let phone = profile.phone_number.as_str();
        if is_blank(phone) {
            reject(RecordSide::Profile, position, rejected);
            continue;
        }
        if index.insert(phone, profile).is_some() {
            debug!(phone, "duplicate profile phone, keeping last occurrence");
        }
    }
    index
}

fn order_conversations<'a>(
    conversations: &'a ConversationInput,
    rejected: &mut Vec<MalformedInputError>,
) -> Vec<(&'a str, Option<&'a ConversationSummary>)> {
    let entries = conversations.entries();
    let mut seen = HashSet::with_capacity(entries.len());
    let mut ordered = Vec::with_capacity(entries.len());

    for (position, (phone, summary)) in entries.into_iter().enumerate() {
        if is_blank(phone) {
            reject(RecordSide::Conversation, position, rejected);
            continue;
        }
        if !seen.insert(phone) {
            debug!(phone, "duplicate conversation phone, keeping first occurrence");
            continue;
        }
        ordered.push((phone, summary));
    }
    ordered
}
