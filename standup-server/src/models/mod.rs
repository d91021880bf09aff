//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod member;
pub mod validation;
pub mod window;

pub use member::{Emoji, MemberName};
pub use validation::ValidationError;
pub use window::DaysWindow;
