use anyhow::Result;
use eduassist_config::AppConfig;
use eduassist_runtime::RelayServices;

fn build_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.orchestrator.upstream.api_key = Some("unit-test-key".into());
    config.orchestrator.upstream.base_url = "http://127.0.0.1:9".into();
    config
}

#[test]
fn initialise_bootstraps_orchestrator() -> Result<()> {
    let config = build_config();
    let services = RelayServices::initialise(&config)?;

    assert!(services.orchestrator.is_ready());
    assert_eq!(
        services.orchestrator.active_model(),
        config.orchestrator.model
    );
    assert!(services.access_token.is_none());
    assert_eq!(services.max_body_bytes, config.http.max_body_bytes);
    Ok(())
}

#[test]
fn initialise_reports_orchestrator_bootstrap_failures() {
    std::env::remove_var(eduassist_orchestrator::API_KEY_ENV);
    let mut config = build_config();
    config.orchestrator.upstream.api_key = None;

    let error = match RelayServices::initialise(&config) {
        Ok(_) => panic!("expected orchestrator bootstrap to fail without API key"),
        Err(error) => error,
    };
    let message = format!("{error:?}");
    assert!(
        message.contains("failed to bootstrap orchestrator"),
        "expected orchestrator bootstrap failure context, got {message}"
    );
}

#[test]
fn blank_access_token_leaves_relay_open() -> Result<()> {
    let mut config = build_config();
    config.http.access_token = Some("   ".into());

    let services = RelayServices::initialise(&config)?;
    assert!(services.access_token.is_none());

    config.http.access_token = Some("classroom".into());
    let services = RelayServices::initialise(&config)?;
    assert_eq!(services.access_token.as_deref(), Some("classroom"));
    Ok(())
}
