use roster_core::ConfigPaths;
use std::path::Path;

/// Version banner plus the config file this invocation would read
fn banner(explicit: Option<&Path>, default_paths: Option<ConfigPaths>) -> Vec<String> {
    let config_line = match (explicit, default_paths) {
        (Some(path), _) => format!("config: {} (--config)", path.display()),
        (None, Some(paths)) => {
            let file = paths.config_file();
            let state = if file.exists() { "found" } else { "not found, using defaults" };
            format!("config: {} ({state})", file.display())
        }
        (None, None) => "config: no user config directory, using defaults".to_string(),
    };

    vec![
        format!("roster {}", env!("CARGO_PKG_VERSION")),
        config_line,
    ]
}

pub fn run(config: Option<&Path>) -> anyhow::Result<()> {
    for line in banner(config, ConfigPaths::new()) {
        println!("{line}");
    }
    Ok(())
}
