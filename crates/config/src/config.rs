//! Deployment configuration for the entropy intents protocol

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Network configuration
    pub network: NetworkConfig,

    /// Component addresses
    #[serde(default)]
    pub contracts: ContractAddresses,

    /// Enforcement gate settings
    #[serde(default)]
    pub gate: GateSettings,

    /// Executor settings
    #[serde(default)]
    pub executor: ExecutorSettings,
}

/// Network environment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Environment type (mainnet, testnet, local)
    pub environment: Environment,

    /// Chain identifier mixed into every beacon
    #[serde(default = "default_chain_id")]
    pub chain_id: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Step the ledger opens at
    #[serde(default = "default_genesis_step")]
    pub genesis_step: u64,

    /// Hex-encoded 32-byte seed of the beacon chain
    #[serde(default = "default_beacon_seed")]
    pub beacon_seed: String,
}

impl NetworkConfig {
    /// Decoded beacon seed
    pub fn beacon_seed_bytes(&self) -> crate::Result<[u8; 32]> {
        let bytes = hex::decode(&self.beacon_seed)
            .map_err(|e| crate::ConfigError::ParseError(format!("beacon_seed: {e}")))?;
        bytes.try_into().map_err(|b: Vec<u8>| {
            crate::ConfigError::ParseError(format!(
                "beacon_seed: expected 32 bytes, got {}",
                b.len()
            ))
        })
    }
}

/// Environment types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Mainnet,
    Testnet,
    Local,
}

/// Addresses every component is deployed under
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractAddresses {
    #[serde(default = "default_ledger_address")]
    pub ledger: String,

    #[serde(default = "default_gate_address")]
    pub gate: String,

    #[serde(default = "default_executor_address")]
    pub executor: String,

    #[serde(default = "default_venue_address")]
    pub venue: String,

    #[serde(default = "default_router_address")]
    pub router: String,
}

/// Enforcement gate configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateSettings {
    /// Account allowed to maintain the router list and activation delay
    #[serde(default = "default_admin")]
    pub admin: String,

    /// Steps a position must age before it can be withdrawn
    #[serde(default = "default_liquidity_activation_steps")]
    pub liquidity_activation_steps: u64,

    /// Routers allow-listed at instantiation
    #[serde(default = "default_routers")]
    pub routers: Vec<String>,
}

/// Executor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorSettings {
    /// Intents per batch; never above 8
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
}

// Default value functions
fn default_chain_id() -> String {
    "entropy-local-1".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_genesis_step() -> u64 {
    1
}

fn default_beacon_seed() -> String {
    "00".repeat(32)
}

fn default_ledger_address() -> String {
    "ledger".to_string()
}

fn default_gate_address() -> String {
    "gate".to_string()
}

fn default_executor_address() -> String {
    "executor".to_string()
}

fn default_venue_address() -> String {
    "venue".to_string()
}

fn default_router_address() -> String {
    "router".to_string()
}

fn default_admin() -> String {
    "admin".to_string()
}

fn default_liquidity_activation_steps() -> u64 {
    3
}

fn default_routers() -> Vec<String> {
    vec![default_router_address()]
}

fn default_max_batch_size() -> usize {
    8
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Local,
            chain_id: default_chain_id(),
            log_level: default_log_level(),
            genesis_step: default_genesis_step(),
            beacon_seed: default_beacon_seed(),
        }
    }
}

impl Default for ContractAddresses {
    fn default() -> Self {
        Self {
            ledger: default_ledger_address(),
            gate: default_gate_address(),
            executor: default_executor_address(),
            venue: default_venue_address(),
            router: default_router_address(),
        }
    }
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            admin: default_admin(),
            liquidity_activation_steps: default_liquidity_activation_steps(),
            routers: default_routers(),
        }
    }
}

impl Default for ExecutorSettings {
    fn default() -> Self {
        Self {
            max_batch_size: default_max_batch_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_consistent() {
        let config = AppConfig::default();
        assert_eq!(config.network.environment, Environment::Local);
        assert_eq!(config.gate.liquidity_activation_steps, 3);
        assert_eq!(config.executor.max_batch_size, 8);
        assert_eq!(config.gate.routers, vec![config.contracts.router.clone()]);
    }

    #[test]
    fn test_beacon_seed_bytes() {
        let mut network = NetworkConfig::default();
        assert_eq!(network.beacon_seed_bytes().unwrap(), [0u8; 32]);

        network.beacon_seed = "ab".repeat(32);
        assert_eq!(network.beacon_seed_bytes().unwrap(), [0xab; 32]);

        network.beacon_seed = "abcd".to_string();
        assert!(network.beacon_seed_bytes().is_err());

        network.beacon_seed = "zz".repeat(32);
        assert!(network.beacon_seed_bytes().is_err());
    }
}
