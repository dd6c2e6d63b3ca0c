/// The result of a builder call that can be rejected.
pub type BuildResult<T> = Result<T, BuildError>;

/// Errors that can occur while assembling a pattern.
///
/// An error is always reported by the call that caused it, before that call
/// changes anything. Once a chain has been assembled, rendering it can no
/// longer fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A repetition count was negative.
    InvalidQuantity {
        /// The rejected count.
        quantity: i32,
    },
    /// A capture group name the host syntax cannot parse.
    InvalidGroupName {
        /// The rejected name.
        name: String,
    },
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::InvalidQuantity { quantity } => {
                write!(f, "quantity cannot be negative: {}", quantity)
            }
            BuildError::InvalidGroupName { name } => write!(
                f,
                "invalid group name {:?}: expected an ASCII letter followed by ASCII letters or digits",
                name
            ),
        }
    }
}

impl std::error::Error for BuildError {}
