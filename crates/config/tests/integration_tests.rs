//! Integration tests for the config crate

use entropy_intents_config::{
    validate_config, AppConfig, ConfigError, ConfigLoader, Environment, GateSettings,
};
use std::io::Write;
use std::path::{Path, PathBuf};

fn shipped(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../config")
        .join(name)
}

#[test]
fn test_load_mainnet_config() {
    let config = ConfigLoader::from_file(&shipped("mainnet.toml"))
        .expect("Failed to load mainnet config");

    assert_eq!(config.network.environment, Environment::Mainnet);
    assert_eq!(config.network.chain_id, "entropy-1");
    assert!(config.gate.liquidity_activation_steps > 3);
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_load_testnet_config() {
    let config = ConfigLoader::from_file(&shipped("testnet.toml"))
        .expect("Failed to load testnet config");

    assert_eq!(config.network.environment, Environment::Testnet);
    assert_eq!(config.network.log_level, "debug");
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_load_local_config() {
    let config = ConfigLoader::from_file(&shipped("local.toml"))
        .expect("Failed to load local config");

    assert_eq!(config.network.environment, Environment::Local);
    assert_eq!(config.network.log_level, "trace");
    assert_eq!(config.network.beacon_seed_bytes().unwrap(), [0u8; 32]);
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_config_validation_invalid_log_level() {
    let mut config = AppConfig::default();
    config.network.log_level = "invalid".to_string();

    let err = validate_config(&config).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(ref msg) if msg.contains("network.log_level")));
}

#[test]
fn test_config_validation_reports_every_problem() {
    let mut config = AppConfig {
        gate: GateSettings {
            admin: String::new(),
            liquidity_activation_steps: 3,
            routers: vec![],
        },
        ..Default::default()
    };
    config.network.beacon_seed = "short".to_string();
    config.network.chain_id = " ".to_string();
    config.executor.max_batch_size = 0;

    let msg = validate_config(&config).unwrap_err().to_string();
    for field in [
        "network.beacon_seed",
        "network.chain_id",
        "gate.admin",
        "gate.routers",
        "executor.max_batch_size",
    ] {
        assert!(msg.contains(field), "missing {field} in {msg}");
    }
}

#[test]
fn test_env_overrides_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[network]
environment = "local"
log_level = "info"

[gate]
liquidity_activation_steps = 3
"#
    )
    .unwrap();

    std::env::set_var("ENTROPY_INTENTS_FILEOVR_NETWORK__LOG_LEVEL", "warn");
    std::env::set_var("ENTROPY_INTENTS_FILEOVR_GATE__LIQUIDITY_ACTIVATION_STEPS", "7");

    let config =
        ConfigLoader::from_file_with_env(file.path(), "ENTROPY_INTENTS_FILEOVR").unwrap();
    assert_eq!(config.network.environment, Environment::Local);
    assert_eq!(config.network.log_level, "warn");
    assert_eq!(config.gate.liquidity_activation_steps, 7);
    assert_eq!(config.executor.max_batch_size, 8);
}

#[test]
fn test_env_only_config() {
    std::env::set_var("ENTROPY_INTENTS_ENVONLY_NETWORK__ENVIRONMENT", "testnet");
    std::env::set_var("ENTROPY_INTENTS_ENVONLY_GATE__ROUTERS", "router,router-b");

    let config = ConfigLoader::from_env_with_prefix("ENTROPY_INTENTS_ENVONLY").unwrap();
    assert_eq!(config.network.environment, Environment::Testnet);
    assert_eq!(config.gate.routers, vec!["router", "router-b"]);
}

#[test]
fn test_env_router_list_replaces_file_list() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[gate]
routers = ["router", "router-b"]
"#
    )
    .unwrap();

    std::env::set_var("ENTROPY_INTENTS_ROUTERS_GATE__ROUTERS", "router,router-c,router-d");

    let config =
        ConfigLoader::from_file_with_env(file.path(), "ENTROPY_INTENTS_ROUTERS").unwrap();
    assert_eq!(config.gate.routers, vec!["router", "router-c", "router-d"]);
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_missing_file_with_env() {
    let result = ConfigLoader::from_file_with_env(
        Path::new("/nonexistent/entropy.toml"),
        "ENTROPY_INTENTS_MISSING",
    );
    assert!(matches!(result, Err(ConfigError::LoadError(_))));
}

#[test]
fn test_config_builder() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(
        file,
        r#"
network:
  environment: testnet
executor:
  max_batch_size: 2
"#
    )
    .unwrap();

    let config = ConfigLoader::builder()
        .set_default("network.log_level", "error")
        .unwrap()
        .add_file(file.path(), true)
        .build()
        .unwrap();

    assert_eq!(config.network.environment, Environment::Testnet);
    assert_eq!(config.network.log_level, "error");
    assert_eq!(config.executor.max_batch_size, 2);
}

#[test]
fn test_json_format() {
    let json = r#"{ "network": { "environment": "local" }, "executor": { "max_batch_size": 3 } }"#;
    let config = ConfigLoader::from_json(json).unwrap();
    assert_eq!(config.executor.max_batch_size, 3);
    assert_eq!(config.contracts.executor, "executor");
}

#[test]
fn test_default_values() {
    let config = ConfigLoader::from_toml("[network]\nenvironment = \"local\"\n").unwrap();

    assert_eq!(config.network.log_level, "info");
    assert_eq!(config.network.genesis_step, 1);
    assert_eq!(config.gate.admin, "admin");
    assert_eq!(config.gate.liquidity_activation_steps, 3);
    assert_eq!(config.gate.routers, vec!["router"]);
    assert!(validate_config(&config).is_ok());
}
