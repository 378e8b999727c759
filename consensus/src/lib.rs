//!
//! Protocol processes of the atomicals overlay: locating the operation of a transaction,
//! validating mints, assigning spent atomicals to outputs, evaluating subrealm rules and
//! arbitrating name claims.
//!
//! Every process is a pure function of its inputs. The host index supplies the transaction,
//! the atomicals spent at its inputs and the heights involved, and persists the results.
//!

pub mod errors;
pub mod processes;
pub mod test_helpers;
