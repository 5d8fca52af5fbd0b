//! Filter, sort and paging parameters for conversation summaries

use crate::error::InvalidQueryError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const MAX_LIMIT: u32 = 1000;

/// Commercial classification filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerType {
    #[serde(rename = "B2B")]
    B2b,
    #[serde(rename = "D2C")]
    D2c,
}

impl CustomerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerType::B2b => "B2B",
            CustomerType::D2c => "D2C",
        }
    }
}

impl FromStr for CustomerType {
    type Err = InvalidQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "B2B" => Ok(CustomerType::B2b),
            "D2C" => Ok(CustomerType::D2c),
            _ => Err(InvalidQueryError(format!(
                "unknown customer type {s:?} (expected B2B or D2C)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    UpdatedAt,
    LastMessageTime,
    CustomerName,
    TotalSpend,
    PhoneNumber,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::UpdatedAt => "updated_at",
            SortField::LastMessageTime => "last_message_time",
            SortField::CustomerName => "customer_name",
            SortField::TotalSpend => "total_spend",
            SortField::PhoneNumber => "phone_number",
        }
    }
}

impl FromStr for SortField {
    type Err = InvalidQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "updated_at" => Ok(SortField::UpdatedAt),
            "last_message_time" => Ok(SortField::LastMessageTime),
            "customer_name" => Ok(SortField::CustomerName),
            "total_spend" => Ok(SortField::TotalSpend),
            "phone_number" => Ok(SortField::PhoneNumber),
            _ => Err(InvalidQueryError(format!("unknown sort field {s:?}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = InvalidQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(InvalidQueryError(format!(
                "unknown sort order {s:?} (expected asc or desc)"
            ))),
        }
    }
}

/// Query for a page of conversation summaries.
///
/// Unset filters are not sent; sort fields fall back to the upstream defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerQuery {
    pub search: Option<String>,
    pub tags: Vec<String>,
    pub customer_type: Option<CustomerType>,
    pub escalation_status: Option<bool>,
    pub is_active: Option<bool>,
    pub min_spend: Option<u64>,
    pub max_spend: Option<u64>,
    pub sort_by: Option<SortField>,
    pub sort_order: Option<SortOrder>,
    pub page: u32,
    pub limit: u32,
}

impl CustomerQuery {
    pub fn new() -> Self {
        Self {
            search: None,
            tags: Vec::new(),
            customer_type: None,
            escalation_status: None,
            is_active: None,
            min_spend: None,
            max_spend: None,
            sort_by: None,
            sort_order: None,
            page: 1,
            limit: 10,
        }
    }

    /// First page of the most recently active conversations
    pub fn recent(limit: u32) -> Self {
        Self {
            sort_by: Some(SortField::LastMessageTime),
            sort_order: Some(SortOrder::Desc),
            limit,
            ..Self::new()
        }
    }

    pub fn validate(&self) -> Result<(), InvalidQueryError> {
        if self.page == 0 {
            return Err(InvalidQueryError("page must be at least 1".to_string()));
        }
        if self.limit == 0 || self.limit > MAX_LIMIT {
            return Err(InvalidQueryError(format!(
                "limit must be between 1 and {MAX_LIMIT}, got {}",
                self.limit
            )));
        }
        if let (Some(min), Some(max)) = (self.min_spend, self.max_spend) {
            if min > max {
                return Err(InvalidQueryError(
                    "min_spend cannot be greater than max_spend".to_string(),
                ));
            }
        }
        if let Some(search) = &self.search {
            if search.trim().is_empty() {
                return Err(InvalidQueryError("search must not be blank".to_string()));
            }
        }
        Ok(())
    }

    /// Query-string pairs in the upstream's parameter names
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("limit", self.limit.to_string()),
            ("page", self.page.to_string()),
        ];
        if let Some(search) = &self.search {
            pairs.push(("search", search.trim().to_string()));
        }
        if !self.tags.is_empty() {
            pairs.push(("tags", self.tags.join(",")));
        }
        if let Some(customer_type) = self.customer_type {
            pairs.push(("customer_type", customer_type.as_str().to_string()));
        }
        if let Some(escalated) = self.escalation_status {
            pairs.push(("escalation_status", escalated.to_string()));
        }
        if let Some(active) = self.is_active {
            pairs.push(("is_active", active.to_string()));
        }
        if let Some(min) = self.min_spend {
            pairs.push(("min_spend", min.to_string()));
        }
        if let Some(max) = self.max_spend {
            pairs.push(("max_spend", max.to_string()));
        }
        if let Some(sort_by) = self.sort_by {
            pairs.push(("sort_by", sort_by.as_str().to_string()));
        }
        if let Some(sort_order) = self.sort_order {
            pairs.push(("sort_order", sort_order.as_str().to_string()));
        }
        pairs
    }
}

impl Default for CustomerQuery {
    fn default() -> Self {
        Self::new()
    }
}
