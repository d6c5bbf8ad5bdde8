//! Bin-location identifier parsing.
//!
//! Warehouse bin locations follow a fixed format: an aisle (walkway) number,
//! a position number along the aisle, and a shelf level letter, e.g.
//! `W08-113-A`. Odd and even positions face each other across the aisle, so
//! `position / 2` groups a facing pair into one walking stop.

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Matches `W08-113-A` style identifiers: optional aisle prefix letters,
/// aisle digits, separator, position digits, optional separator, level letter.
fn location_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Z]*(\d+)[-_ ](\d+)[-_ ]?([A-Z])$").expect("valid bin location regex")
    })
}

/// A parsed warehouse bin location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinLocation {
    /// The identifier as given (trimmed, uppercased)
    pub raw: String,
    /// Walkway/aisle number
    pub aisle: u32,
    /// Position number along the aisle
    pub position: u32,
    /// Shelf level letter (A = lowest)
    pub level: char,
}

impl BinLocation {
    /// Parses a bin-location identifier.
    ///
    /// Input is trimmed and uppercased before matching, so `w08-113-a`
    /// parses the same as `W08-113-A`. Separators may be `-`, `_` or a
    /// space; the separator before the level letter is optional.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier does not match the fixed format.
    pub fn parse(input: &str) -> Result<Self> {
        let raw = input.trim().to_uppercase();
        let captures = location_regex()
            .captures(&raw)
            .ok_or_else(|| anyhow::anyhow!("'{input}' is not a valid bin location"))?;

        let aisle: u32 = captures[1]
            .parse()
            .map_err(|_| anyhow::anyhow!("Aisle number in '{input}' is out of range"))?;
        let position: u32 = captures[2]
            .parse()
            .map_err(|_| anyhow::anyhow!("Position number in '{input}' is out of range"))?;
        let level = captures[3]
            .chars()
            .next()
            .ok_or_else(|| anyhow::anyhow!("Missing level letter in '{input}'"))?;

        Ok(Self {
            raw,
            aisle,
            position,
            level,
        })
    }

    /// Facing odd/even positions share a bay pair and are picked together.
    #[must_use]
    pub const fn bay_pair(&self) -> u32 {
        self.position / 2
    }

    /// Composite sort key: aisle, then bay pair, then position, then level.
    #[must_use]
    pub fn sort_key(&self) -> (u32, u32, u32, u32) {
        (self.aisle, self.bay_pair(), self.position, self.level as u32)
    }
}

impl fmt::Display for BinLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_standard_format() {
        let location = BinLocation::parse("W08-113-A").unwrap();
        assert_eq!(location.aisle, 8);
        assert_eq!(location.position, 113);
        assert_eq!(location.level, 'A');
        assert_eq!(location.raw, "W08-113-A");
    }

    #[test]
    fn test_parse_lowercase_and_whitespace() {
        let location = BinLocation::parse("  w08-113-c ").unwrap();
        assert_eq!(location.level, 'C');
        assert_eq!(location.raw, "W08-113-C");
    }

    #[test]
    fn test_parse_alternate_separators() {
        assert!(BinLocation::parse("W08_113_A").is_ok());
        assert!(BinLocation::parse("08 113 A").is_ok());
        // Separator before the level letter is optional
        let location = BinLocation::parse("W08-113A").unwrap();
        assert_eq!(location.position, 113);
    }

    #[test]
    fn test_parse_without_prefix_letter() {
        let location = BinLocation::parse("8-113-B").unwrap();
        assert_eq!(location.aisle, 8);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(BinLocation::parse("").is_err());
        assert!(BinLocation::parse("W08").is_err());
        assert!(BinLocation::parse("W08-113").is_err());
        assert!(BinLocation::parse("W08-113-AB").is_err());
        assert!(BinLocation::parse("aisle eight").is_err());
    }

    #[test]
    fn test_bay_pair_groups_facing_positions() {
        let odd = BinLocation::parse("W08-113-A").unwrap();
        let even = BinLocation::parse("W08-112-A").unwrap();
        assert_eq!(odd.bay_pair(), even.bay_pair());

        let next = BinLocation::parse("W08-114-A").unwrap();
        assert_ne!(odd.bay_pair(), next.bay_pair());
    }

    #[test]
    fn test_sort_key_ordering() {
        let a = BinLocation::parse("W08-112-A").unwrap();
        let b = BinLocation::parse("W08-113-A").unwrap();
        let c = BinLocation::parse("W08-113-B").unwrap();
        let d = BinLocation::parse("W09-001-A").unwrap();
        assert!(a.sort_key() < b.sort_key());
        assert!(b.sort_key() < c.sort_key());
        assert!(c.sort_key() < d.sort_key());
    }
}
