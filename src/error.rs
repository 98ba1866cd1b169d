//! Error definitions shared by `wait` and `interval`.
use thiserror_no_std::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Failure of a timing operation.
pub enum TimersError {
    /// The abort signal fired before the delay elapsed.
    #[error("Operation aborted")]
    Aborted,
}
