mod config_error;

pub use config_error::ConfigError;

/// Convenience alias used across the workspace.
pub type TaxlensResult<T> = Result<T, TaxlensError>;

/// Top-level error for the taxlens engine.
///
/// Analysis paths degrade to empty partial results instead of failing; the
/// only fatal condition is a corrupt static configuration table.
#[derive(Debug, thiserror::Error)]
pub enum TaxlensError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}
