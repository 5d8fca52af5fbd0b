use roster_sources::CustomerQuery;
use std::path::Path;

pub async fn run(config: Option<&Path>, query: CustomerQuery) -> anyhow::Result<()> {
    let views = super::build_views(config)?;
    super::emit(views.customer_page(&query).await)
}
