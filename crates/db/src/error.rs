use survey_core::error::CoreError;

/// Failure from a [`crate::ResponseStore`] or [`crate::UserStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing database rejected or failed a query.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row could not be turned into a domain record.
    #[error(transparent)]
    Core(#[from] CoreError),
}
