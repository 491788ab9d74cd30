pub mod adjustment;
pub mod config;
pub mod persistence;

pub use adjustment::AdjustmentError;
pub use config::ConfigError;
pub use persistence::StoreError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Adjustment(#[from] adjustment::AdjustmentError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Store(#[from] persistence::StoreError),
}
