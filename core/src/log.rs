//!
//! Logging macros used across the atomicals crates.
//!
//! The macros forward to the `log` facade so the log target is always the module
//! path of the caller. Initializing a logger is left to the host process.
//!

pub use ::log::{Level, LevelFilter};

#[macro_export]
macro_rules! trace {
    ($($t:tt)*) => (
        $crate::__log::trace!($($t)*)
    )
}

#[macro_export]
macro_rules! debug {
    ($($t:tt)*) => (
        $crate::__log::debug!($($t)*)
    )
}

#[macro_export]
macro_rules! info {
    ($($t:tt)*) => (
        $crate::__log::info!($($t)*)
    )
}

#[macro_export]
macro_rules! warn {
    ($($t:tt)*) => (
        $crate::__log::warn!($($t)*)
    )
}

#[macro_export]
macro_rules! error {
    ($($t:tt)*) => (
        $crate::__log::error!($($t)*)
    )
}
