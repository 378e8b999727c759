//!
//! Grammars of the names an atomical can claim.
//!

use once_cell::sync::Lazy;
use regex::Regex;

// Names may end with a single newline
static REALM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z][a-z0-9\-]{0,63}\n?$").unwrap());
static SUBNAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9\-]{0,63}\n?$").unwrap());
static TICKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9]{1,21}\n?$").unwrap());

pub const MAX_NAME_LEN: usize = 64;

/// Base predicate shared by realms, subrealms and containers
fn is_valid_namebase(name: &str) -> bool {
    !name.is_empty() && name.len() <= MAX_NAME_LEN && !name.starts_with('-') && !name.ends_with('-')
}

pub fn is_valid_realm_name(name: &str) -> bool {
    is_valid_namebase(name) && REALM_RE.is_match(name)
}

pub fn is_valid_subrealm_name(name: &str) -> bool {
    is_valid_namebase(name) && SUBNAME_RE.is_match(name)
}

pub fn is_valid_container_name(name: &str) -> bool {
    is_valid_namebase(name) && SUBNAME_RE.is_match(name)
}

pub fn is_valid_ticker_name(name: &str) -> bool {
    TICKER_RE.is_match(name)
}
