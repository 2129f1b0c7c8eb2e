use crate::payment::{CardPolicy, WalletRegistry, DEFAULT_CARD_BALANCE, INVALID_CVV};
use crate::screening::NoFlyList;
use crate::CoreResult;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub business_rules: BusinessRules,
    #[serde(default)]
    pub wallet: WalletConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    #[serde(default = "default_no_fly_list")]
    pub no_fly_list: Vec<String>,
    #[serde(default = "default_card_opening_balance")]
    pub card_opening_balance: i64,
    #[serde(default = "default_invalid_cvv")]
    pub invalid_cvv: String,
}

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            no_fly_list: default_no_fly_list(),
            card_opening_balance: default_card_opening_balance(),
            invalid_cvv: default_invalid_cvv(),
        }
    }
}

fn default_no_fly_list() -> Vec<String> {
    vec!["Peter".to_string(), "Johannes".to_string()]
}

fn default_card_opening_balance() -> i64 { DEFAULT_CARD_BALANCE }

fn default_invalid_cvv() -> String { INVALID_CVV.to_string() }

/// Wallet accounts, keyed by credential
#[derive(Debug, Deserialize, Clone)]
pub struct WalletConfig {
    #[serde(default = "default_wallet_accounts")]
    pub accounts: HashMap<String, String>,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            accounts: default_wallet_accounts(),
        }
    }
}

fn default_wallet_accounts() -> HashMap<String, String> {
    HashMap::from([
        ("amanda1985".to_string(), "amanda@ya.com".to_string()),
        ("qwerty".to_string(), "john@amazon.eu".to_string()),
    ])
}

impl Config {
    pub fn load() -> CoreResult<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `SKYORDER_BUSINESS_RULES__CARD_OPENING_BALANCE=5000`
            .add_source(Self::environment())
            .build()?;

        let config: Config = s.try_deserialize()?;
        config.log_summary(&run_mode);
        Ok(config)
    }

    /// Parse a TOML document, then apply `overrides` as if they were
    /// `SKYORDER_*` environment variables.
    pub fn from_toml_str(toml: &str, overrides: HashMap<String, String>) -> CoreResult<Self> {
        let s = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .add_source(Self::environment().source(Some(overrides.into_iter().collect())))
            .build()?;

        Ok(s.try_deserialize()?)
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix("SKYORDER")
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("business_rules.no_fly_list")
            .try_parsing(true)
    }

    pub fn no_fly_list(&self) -> NoFlyList {
        NoFlyList::new(self.business_rules.no_fly_list.iter().cloned())
    }

    pub fn wallet_registry(&self) -> WalletRegistry {
        WalletRegistry::new(self.wallet.accounts.clone())
    }

    pub fn card_policy(&self) -> CardPolicy {
        CardPolicy {
            opening_balance: self.business_rules.card_opening_balance,
            invalid_cvv: self.business_rules.invalid_cvv.clone(),
        }
    }

    fn log_summary(&self, run_mode: &str) {
        tracing::info!(
            "Loaded {} configuration: {} no-fly entries, {} wallet accounts",
            run_mode,
            self.business_rules.no_fly_list.len(),
            self.wallet.accounts.len()
        );
    }
}
