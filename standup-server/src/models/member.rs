//! Team member name and emoji validation

use standup_core::DEFAULT_EMOJI;

use super::ValidationError;

/// Maximum length for member names, in characters
const MAX_NAME_LEN: usize = 64;

/// Maximum length for an emoji string. Generous for ZWJ sequences.
const MAX_EMOJI_LEN: usize = 16;

/// Validated, trimmed member name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberName(String);

impl MemberName {
    /// Create a member name.
    ///
    /// # Rules
    /// - Surrounding whitespace is trimmed
    /// - Must not be empty after trimming
    /// - Max 64 characters
    ///
    /// # Example
    /// ```
    /// use standup_server::models::MemberName;
    ///
    /// assert_eq!(MemberName::new("  Ada ").unwrap().as_str(), "Ada");
    /// assert!(MemberName::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }
        if s.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "name",
                max: MAX_NAME_LEN,
            });
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Member emoji. Blank input falls back to the default avatar.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Emoji(String);

impl Emoji {
    pub fn new(s: Option<&str>) -> Result<Self, ValidationError> {
        let s = s.map(str::trim).unwrap_or_default();
        if s.is_empty() {
            return Ok(Self::default());
        }
        if s.chars().count() > MAX_EMOJI_LEN {
            return Err(ValidationError::TooLong {
                field: "emoji",
                max: MAX_EMOJI_LEN,
            });
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Default for Emoji {
    fn default() -> Self {
        Self(DEFAULT_EMOJI.to_owned())
    }
}
