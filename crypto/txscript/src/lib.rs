//!
//! Witness script handling for the atomicals protocol: a push-data reader, the envelope
//! tokenizer, standard output recognition and a reveal script builder.
//!

pub mod envelope;
pub mod opcodes;
pub mod script_builder;
pub mod standard;

pub use envelope::{ENVELOPE_MARKER, Envelope, parse_envelope, parse_witness_envelope};
pub use standard::{is_unspendable, payment_marker_atomical_id};
