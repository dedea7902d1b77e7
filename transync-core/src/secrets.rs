//! Secret handling for transync
//!
//! The access token travels through the program as a [`Token`], which never
//! prints its value. Anything that ends up in a log line and may contain the
//! token (command lines, git output) goes through [`Token::redact`] first.

use std::fmt;

/// Replacement text for masked secrets
pub const REDACTED: &str = "***";

/// GitHub access token
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Wrap a raw token, trimming surrounding whitespace
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_string())
    }

    /// Get the raw token value
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Mask every occurrence of the token in `text`
    pub fn redact(&self, text: &str) -> String {
        if self.0.is_empty() {
            return text.to_string();
        }
        text.replace(&self.0, REDACTED)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({})", REDACTED)
    }
}
