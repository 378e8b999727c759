extern crate self as atomicals_core;

pub mod hex;
pub mod log;

#[doc(hidden)]
pub use ::log as __log;
