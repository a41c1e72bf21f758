use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Sled error: {0}")]
    Sled(#[from] sled::Error),

    #[error("Failed to encode or decode document: {0}")]
    Codec(#[from] bincode::Error),

    #[error("Duplicate key '{key}' in collection '{collection}'")]
    DuplicateKey {
        collection: &'static str,
        key: String,
    },

    #[error("Unexpected store error: {0}")]
    Unexpected(String),
}

/// Outcome of a failed bulk insert.
#[derive(Error, Debug)]
pub enum BulkWriteError<D> {
    /// The write stopped partway. `inserted` holds the documents that were
    /// persisted before the fault, in submission order.
    #[error("Bulk write partially failed after {} of {attempted} documents: {source}", inserted.len())]
    Partial {
        inserted: Vec<D>,
        attempted: usize,
        #[source]
        source: StoreError,
    },

    /// Nothing is known to have been written.
    #[error("Bulk write failed: {0}")]
    Failed(#[from] StoreError),
}
