pub mod delays;
pub mod dmint;
pub mod mint_validator;
pub mod name_candidates;
pub mod operations;
pub mod reveal;
pub mod subrealm_rules;
pub mod transfers;
