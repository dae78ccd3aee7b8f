use thiserror::Error;

/// Fatal load-time failures. There is no partial-result mode: any of these
/// aborts the whole derivation pass.
#[derive(Debug, Error)]
pub enum OrderLoadError {
    #[error("data source unavailable: {0}")]
    DataSource(#[from] sea_orm::DbErr),

    #[error("table '{0}' not found in data source")]
    MissingTable(&'static str),

    #[error("table '{table}' is missing expected column '{column}'")]
    SchemaMismatch {
        table: &'static str,
        column: &'static str,
    },
}
