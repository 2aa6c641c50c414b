use std::sync::Arc;

use journal_session::config::GateConfig;
use journal_session::nav::{ClickRouter, NavControl};
use journal_session::render::SectionVisibility;
use journal_session::services::http_auth::HttpAuthService;
use journal_session::services::token_store::FileTokenStore;
use journal_session::{LoadOutcome, SessionGate};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = GateConfig::from_env()?;
    let auth = HttpAuthService::from_config(&config)?;
    tracing::info!(api = auth.base_url(), token_path = %config.token_path.display(), "booting session gate");

    let mut gate = SessionGate::new(
        Box::new(FileTokenStore::new(&config.token_path)),
        Arc::new(auth),
        Box::new(SectionVisibility::default()),
    );
    let mut router = ClickRouter::new();
    SessionGate::wire_navigation(&mut router)?;
    let wired: Vec<&str> = NavControl::ALL
        .into_iter()
        .filter(|c| router.is_registered(*c))
        .map(NavControl::element_id)
        .collect();
    tracing::info!(controls = ?wired, "navigation wired");

    match gate.on_load().await {
        LoadOutcome::Authenticated => {
            if let Some(user) = gate.session().user() {
                tracing::info!(username = %user.username, user_type = ?user.user_type, "logged in");
            }
        }
        LoadOutcome::NoToken => tracing::info!("not logged in"),
        LoadOutcome::Rejected(e) => tracing::info!(reason = e.error_code(), "not logged in"),
        LoadOutcome::Stale => {}
    }
    tracing::info!(section = ?gate.section(), "page ready");

    Ok(())
}
