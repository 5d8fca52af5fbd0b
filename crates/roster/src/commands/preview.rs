use std::path::Path;

pub async fn run(config: Option<&Path>) -> anyhow::Result<()> {
    let views = super::build_views(config)?;
    super::emit(views.preview(chrono::Utc::now()).await)
}
