//! Configuration validation

use crate::{AppConfig, ConfigError, Result};
use std::collections::HashSet;

/// Hard cap on intents per executor batch
pub const MAX_BATCH_SIZE: usize = 8;

/// Validation error details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate the entire application configuration
pub fn validate_config(config: &AppConfig) -> Result<()> {
    let mut errors = Vec::new();

    // Validate network config
    if let Err(e) = validate_log_level(&config.network.log_level) {
        errors.push(e);
    }

    if config.network.chain_id.trim().is_empty() {
        errors.push(ValidationError::new(
            "network.chain_id",
            "chain id cannot be empty",
        ));
    }

    if let Err(e) = validate_beacon_seed(&config.network.beacon_seed) {
        errors.push(e);
    }

    // Validate contract addresses
    let contracts = [
        ("contracts.ledger", &config.contracts.ledger),
        ("contracts.gate", &config.contracts.gate),
        ("contracts.executor", &config.contracts.executor),
        ("contracts.venue", &config.contracts.venue),
        ("contracts.router", &config.contracts.router),
    ];
    let mut seen = HashSet::new();
    for (field, address) in contracts {
        if address.trim().is_empty() {
            errors.push(ValidationError::new(field, "address cannot be empty"));
        } else if !seen.insert(address.as_str()) {
            errors.push(ValidationError::new(
                field,
                format!("address {address} is used by another component"),
            ));
        }
    }

    // Validate gate settings
    if config.gate.admin.trim().is_empty() {
        errors.push(ValidationError::new("gate.admin", "admin cannot be empty"));
    }

    if config.gate.routers.is_empty() {
        errors.push(ValidationError::new(
            "gate.routers",
            "at least one router must be allowed",
        ));
    }

    let routers: HashSet<_> = config.gate.routers.iter().collect();
    if routers.len() != config.gate.routers.len() {
        errors.push(ValidationError::new(
            "gate.routers",
            "duplicate routers found",
        ));
    }

    if !config.gate.routers.is_empty() && !routers.contains(&config.contracts.router) {
        errors.push(ValidationError::new(
            "gate.routers",
            format!(
                "deployed router {} is not allow-listed",
                config.contracts.router
            ),
        ));
    }

    // Validate executor settings
    let batch = config.executor.max_batch_size;
    if batch == 0 || batch > MAX_BATCH_SIZE {
        errors.push(ValidationError::new(
            "executor.max_batch_size",
            format!("must be between 1 and {MAX_BATCH_SIZE}, got {batch}"),
        ));
    }

    if !errors.is_empty() {
        let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        return Err(ConfigError::ValidationError(error_messages.join("; ")));
    }

    Ok(())
}

/// Validate log level
fn validate_log_level(level: &str) -> std::result::Result<(), ValidationError> {
    match level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ValidationError::new(
            "network.log_level",
            format!("invalid log level: {level}"),
        )),
    }
}

/// Validate beacon seed: exactly 32 hex-encoded bytes
fn validate_beacon_seed(seed: &str) -> std::result::Result<(), ValidationError> {
    if seed.len() != 64 || !seed.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ValidationError::new(
            "network.beacon_seed",
            "must be 64 hex characters",
        ));
    }
    Ok(())
}
