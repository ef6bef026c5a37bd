use database::DbError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Strategy '{strategy}' not found.")]
    StrategyNotFound {
        strategy: String,
        available: Vec<String>,
    },

    #[error(transparent)]
    Storage(#[from] DbError),
}
