//!
//! Proof-of-work ("bitwork") requirements: a hex prefix a transaction id must start with,
//! optionally refined by a minimum value for the following hex digit.
//!

use crate::errors::bitwork::{BitworkError, BitworkResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::{fmt::Display, str::FromStr};

// A single trailing newline is part of the grammar, it makes the prefix unsatisfiable
static PREFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9]{1,64}\n?$").unwrap());

/// Largest accepted extension value (a full extra hex digit)
pub const MAX_BITWORK_EXT: u8 = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitwork {
    raw: String,
    prefix: String,
    ext: Option<u8>,
}

impl Bitwork {
    /// Parses `"<prefix>[.<ext>]"`
    pub fn parse(value: &str) -> BitworkResult<Self> {
        if value.is_empty() {
            return Err(BitworkError::Empty);
        }
        let mut parts = value.split('.');
        let prefix = parts.next().unwrap_or_default();
        let ext = parts.next();
        if parts.next().is_some() {
            return Err(BitworkError::TooManySeparators(value.to_owned()));
        }
        if !PREFIX_RE.is_match(prefix) {
            return Err(BitworkError::InvalidPrefix(prefix.to_owned()));
        }
        let ext = match ext {
            None => None,
            Some(ext) => {
                if ext.is_empty() || !ext.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(BitworkError::InvalidExtension(ext.to_owned()));
                }
                match ext.parse::<u8>() {
                    Ok(parsed) if parsed <= MAX_BITWORK_EXT => Some(parsed),
                    _ => return Err(BitworkError::InvalidExtension(ext.to_owned())),
                }
            }
        };
        Ok(Self { raw: value.to_owned(), prefix: prefix.to_owned(), ext })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn ext(&self) -> Option<u8> {
        self.ext
    }

    /// Whether the displayed (byte-reversed hex) transaction id satisfies this requirement.
    /// An extension of 0 is the same as no extension.
    pub fn matches(&self, txid_hex: &str) -> bool {
        if !txid_hex.starts_with(&self.prefix) {
            return false;
        }
        match self.ext {
            None | Some(0) => true,
            Some(ext) => match txid_hex[self.prefix.len()..].chars().next().and_then(|c| c.to_digit(16)) {
                Some(digit) => digit >= ext as u32,
                None => false,
            },
        }
    }
}

impl FromStr for Bitwork {
    type Err = BitworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for Bitwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for Bitwork {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TXID: &str = "00ab12c4d3805673d1080bd6f527b3153dd5f8f7584731dec04b332e6285761b";

    #[test]
    fn test_parse() {
        let bitwork = Bitwork::parse("00ab.7").unwrap();
        assert_eq!((bitwork.prefix(), bitwork.ext(), bitwork.as_str()), ("00ab", Some(7), "00ab.7"));
        assert_eq!(Bitwork::parse("abc").unwrap().ext(), None);
        assert_eq!(Bitwork::parse("a.15").unwrap().ext(), Some(15));
        assert_eq!(Bitwork::parse("a.0").unwrap().ext(), Some(0));
        assert_eq!(Bitwork::parse(&"f".repeat(64)).unwrap().prefix().len(), 64);

        let cases = [
            ("", BitworkError::Empty),
            ("ab.1.2", BitworkError::TooManySeparators("ab.1.2".to_owned())),
            ("AB", BitworkError::InvalidPrefix("AB".to_owned())),
            (".3", BitworkError::InvalidPrefix(String::new())),
            ("a b", BitworkError::InvalidPrefix("a b".to_owned())),
            ("ab.16", BitworkError::InvalidExtension("16".to_owned())),
            ("ab.-1", BitworkError::InvalidExtension("-1".to_owned())),
            ("ab.", BitworkError::InvalidExtension(String::new())),
            ("ab.x", BitworkError::InvalidExtension("x".to_owned())),
        ];
        for (value, expected) in cases {
            assert_eq!(Bitwork::parse(value), Err(expected), "{value}");
        }
        assert!(Bitwork::parse(&"f".repeat(65)).is_err());
        assert!(Bitwork::parse("ab\n\n").is_err());
    }

    #[test]
    fn test_trailing_newline_prefix_never_matches() {
        let bitwork = Bitwork::parse("00ab\n").unwrap();
        assert_eq!(bitwork.prefix(), "00ab\n");
        assert!(!bitwork.matches(TXID));
        assert!(!Bitwork::parse("00\n.3").unwrap().matches(TXID));
    }

    #[test]
    fn test_matches() {
        assert!(Bitwork::parse("00").unwrap().matches(TXID));
        assert!(Bitwork::parse("00ab12").unwrap().matches(TXID));
        assert!(!Bitwork::parse("01").unwrap().matches(TXID));
        // Next digit after "00" is 'a' = 10
        assert!(Bitwork::parse("00.10").unwrap().matches(TXID));
        assert!(!Bitwork::parse("00.11").unwrap().matches(TXID));
        assert!(Bitwork::parse("00.0").unwrap().matches(TXID));
        // Prefix covering the whole id leaves no digit for the extension
        assert!(Bitwork::parse(TXID).unwrap().matches(TXID));
        assert!(!Bitwork::parse(&format!("{TXID}.1")).unwrap().matches(TXID));
    }

    #[test]
    fn test_lower_ext_is_monotonic() {
        for ext in 1..=MAX_BITWORK_EXT {
            let stricter = Bitwork::parse(&format!("00ab1.{ext}")).unwrap();
            let looser = Bitwork::parse(&format!("00ab1.{}", ext - 1)).unwrap();
            if stricter.matches(TXID) {
                assert!(looser.matches(TXID));
            }
        }
        // ext = 15 behaves like requiring one more 'f'
        assert!(Bitwork::parse("00.15").unwrap().matches("00f1"));
        assert!(!Bitwork::parse("00.15").unwrap().matches("00e1"));
    }
}
