use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Invalid database connection settings: {0}")]
    ConnectionConfigError(String),

    #[error("Ledger query failed: {0}")]
    QueryError(#[from] sqlx::Error),
}
