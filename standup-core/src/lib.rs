//! standup-core: speaking-order logic for the standup spinner
//!
//! Pure domain code with no I/O:
//! - `member`: participants fed into a spin
//! - `twist`: the five named transformations over a shuffled order
//! - `stats`: per-member aggregation over recorded spins

pub mod error;
pub mod member;
pub mod stats;
pub mod twist;

pub use error::CoreError;
pub use member::{Member, DEFAULT_EMOJI, PAIR_EMOJI};
pub use stats::{aggregate, MemberStats, SpinRecord};
pub use twist::{apply_twist, Slot, Twist, TwistOutcome};
