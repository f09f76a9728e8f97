/// A rule violated by an incoming submission.
///
/// The display strings are returned verbatim to clients.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// One or more required fields were absent or blank, in field order.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid tower selection")]
    InvalidTower,

    #[error("Invalid problem selection")]
    InvalidProblem,
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The request carried no submission payload at all.
    #[error("No data received")]
    NoData,
}
