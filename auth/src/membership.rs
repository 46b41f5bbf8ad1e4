//! Membership levels.

use crate::error::AuthError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Membership level of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Membership {
    /// Default tier.
    Basic,
    /// Paid tier.
    Premium,
}

impl Membership {
    /// Stored representation (lowercase).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Premium => "premium",
        }
    }
}

impl FromStr for Membership {
    type Err = AuthError;

    /// Case-insensitive parse; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "premium" => Ok(Self::Premium),
            _ => Err(AuthError::InvalidMembership(s.to_string())),
        }
    }
}

impl fmt::Display for Membership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Basic".parse::<Membership>().unwrap(), Membership::Basic);
        assert_eq!("PREMIUM".parse::<Membership>().unwrap(), Membership::Premium);
        assert_eq!(" premium ".parse::<Membership>().unwrap(), Membership::Premium);
    }

    #[test]
    fn parse_rejects_unknown_levels() {
        assert_eq!(
            "gold".parse::<Membership>(),
            Err(AuthError::InvalidMembership("gold".to_string()))
        );
        assert!("".parse::<Membership>().is_err());
    }

    #[test]
    fn stored_lowercase() {
        assert_eq!(Membership::Premium.to_string(), "premium");
    }
}
