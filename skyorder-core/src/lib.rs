pub mod app_config;
pub mod payment;
pub mod screening;

pub use app_config::Config;
pub use payment::{CardPolicy, CreditCard, PaymentMethod, PaymentStrategy, Wallet, WalletRegistry};
pub use screening::NoFlyList;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type CoreResult<T> = Result<T, CoreError>;
