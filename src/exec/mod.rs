//! External rendering tool support: availability probing and invocation

pub mod invoke;
pub mod probe;

/// Executable name of the external graph tool
pub const D2_BIN: &str = "d2";
/// Executable name of the external text-diagram tool
pub const DIAGON_BIN: &str = "diagon";

/// Upper bound on captured stderr carried into error details
pub const STDERR_LIMIT: usize = 100;
