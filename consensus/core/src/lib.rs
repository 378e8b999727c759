//!
//! Core types of the atomicals overlay protocol: identifiers, payloads, the transaction view the
//! protocol consumes, mint records and the protocol parameters.
//!

pub mod atomical_id;
pub mod atomical_ref;
pub mod bitwork;
pub mod config;
pub mod errors;
pub mod mint;
pub mod name;
pub mod operation;
pub mod payload;
pub mod spent;
pub mod tx;

pub use atomical_id::{AtomicalId, Location};
pub use operation::OpType;
