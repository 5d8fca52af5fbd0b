use clap::{Args, Parser, Subcommand};
use roster_sources::{CustomerQuery, CustomerType, SortField, SortOrder};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "roster")]
#[command(version)]
#[command(about = "Reconciled customer and conversation views for the operator dashboard")]
pub struct Cli {
    /// Path to config.json (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recent-activity preview for the dashboard
    Preview,

    /// One page of the customer table
    Customers(CustomerArgs),

    /// Every customer with presence status and scorecard counts
    All,

    /// Print version information
    Version,
}

#[derive(Args, Debug)]
pub struct CustomerArgs {
    /// Match phone number, name, email or company
    #[arg(long)]
    pub search: Option<String>,

    /// Comma-separated tags
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// B2B or D2C
    #[arg(long)]
    pub customer_type: Option<CustomerType>,

    #[arg(long, value_name = "BOOL")]
    pub escalated: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub active: Option<bool>,

    #[arg(long)]
    pub min_spend: Option<u64>,

    #[arg(long)]
    pub max_spend: Option<u64>,

    /// updated_at, last_message_time, customer_name, total_spend or phone_number
    #[arg(long)]
    pub sort_by: Option<SortField>,

    /// asc or desc
    #[arg(long)]
    pub sort_order: Option<SortOrder>,

    #[arg(long, default_value_t = 1)]
    pub page: u32,

    #[arg(long, default_value_t = 10)]
    pub limit: u32,
}

impl CustomerArgs {
    pub fn into_query(self) -> CustomerQuery {
        CustomerQuery {
            search: self.search,
            tags: self.tags,
            customer_type: self.customer_type,
            escalation_status: self.escalated,
            is_active: self.active,
            min_spend: self.min_spend,
            max_spend: self.max_spend,
            sort_by: self.sort_by,
            sort_order: self.sort_order,
            page: self.page,
            limit: self.limit,
        }
    }
}
