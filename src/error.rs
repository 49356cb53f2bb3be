use sqlx::Error as SqlxError;

/// Typed fault surfaced by the relational query port.
///
/// Connectivity faults mean the store is unreachable and a retry at the
/// transport layer can succeed; query faults are programmer errors
/// (malformed statement or parameters) and must never be retried.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unreachable: {0}")]
    Connectivity(#[source] SqlxError),

    #[error("query failed: {0}")]
    Query(#[source] SqlxError),
}

impl StoreError {
    pub fn is_connectivity(&self) -> bool {
        matches!(self, StoreError::Connectivity(_))
    }
}

impl From<SqlxError> for StoreError {
    fn from(err: SqlxError) -> Self {
        match err {
            SqlxError::Io(_)
            | SqlxError::Tls(_)
            | SqlxError::PoolTimedOut
            | SqlxError::PoolClosed
            | SqlxError::Configuration(_) => StoreError::Connectivity(err),
            _ => StoreError::Query(err),
        }
    }
}
