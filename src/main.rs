use anyhow::Context;
use cim_domain_skill::{serve, SkillConfig};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries responses only
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::var("SKILL_CONFIG") {
        Ok(path) => SkillConfig::from_file(&path)
            .with_context(|| format!("loading skill config from {}", path))?,
        Err(_) => SkillConfig::default(),
    };
    let config = config.apply_env().context("applying SKILL_* overrides")?;

    tracing::info!(
        dialog_mode = ?config.dialog_mode,
        app_id_restricted = config.app_id.is_some(),
        "skill handler ready, reading events from stdin"
    );

    let stdin = BufReader::new(tokio::io::stdin());
    let handled = serve(stdin, tokio::io::stdout(), &config).await?;

    tracing::info!(handled, "stdin closed, exiting");
    Ok(())
}
