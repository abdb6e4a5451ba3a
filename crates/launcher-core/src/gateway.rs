use crate::error::GatewayError;
use crate::input::RawInput;

/// Presents candidates and blocks until one line is chosen or typed.
pub trait Picker {
    fn prompt(&mut self, candidates: &[String], label: &str) -> Result<RawInput, GatewayError>;
}

/// Hands a target to the host's URL handler without waiting on it.
pub trait Opener {
    fn open(&mut self, target: &str) -> Result<(), GatewayError>;
}
