/// Structured error types for standup-core.
///
/// Library consumers get `thiserror` enums; the binary wraps them in `anyhow`.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Twist id not one of the known transformations
    #[error("unknown twist type '{0}'")]
    UnknownTwist(String),
}
