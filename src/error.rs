//! Driver error type

use core::fmt;

use crate::device::State;
use crate::register::RegisterSpec;

/// All possible errors in this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Error<E> {
    /// Writing a configuration register failed
    Write {
        /// Register that failed
        register: u8,
        /// Bus error
        source: E,
    },
    /// Reading a register failed
    Read {
        /// Register that failed
        register: u8,
        /// Bus error
        source: E,
    },
    /// Operation not allowed in the device's current state
    InvalidState(State),
    /// Another operation holds the device
    Busy,
}

impl<E> Error<E> {
    /// Register a bus error happened on
    pub fn register(&self) -> Option<u8> {
        match self {
            Error::Write { register, .. } | Error::Read { register, .. } => Some(*register),
            Error::InvalidState(_) | Error::Busy => None,
        }
    }

    /// True for transport failures
    pub fn is_bus_error(&self) -> bool {
        self.register().is_some()
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Write { register, source } => {
                let name = register_name(*register);
                write!(f, "write to {name} ({register:#04x}) failed: {source:?}")
            }
            Error::Read { register, source } => {
                let name = register_name(*register);
                write!(f, "read of {name} ({register:#04x}) failed: {source:?}")
            }
            Error::InvalidState(state) => write!(f, "device is {state:?}"),
            Error::Busy => f.write_str("device busy"),
        }
    }
}

fn register_name(register: u8) -> &'static str {
    RegisterSpec::lookup(register).map_or("unknown register", |spec| spec.name)
}

impl<E: core::error::Error + 'static> core::error::Error for Error<E> {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Error::Write { source, .. } | Error::Read { source, .. } => Some(source),
            Error::InvalidState(_) | Error::Busy => None,
        }
    }
}

/// Bring-up failed; the bus is handed back to the caller
#[derive(Debug)]
pub struct AttachError<BUS, E> {
    /// Why initialization failed
    pub error: Error<E>,
    /// The bus the device was attached with
    pub bus: BUS,
}

impl<BUS, E: fmt::Debug> fmt::Display for AttachError<BUS, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "attach failed: {}", self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::{LS_DATA_1, PS_MEAS_RATE};
    extern crate std;
    use std::string::ToString;

    #[test]
    fn display_names_the_register() {
        let err: Error<()> = Error::Read {
            register: LS_DATA_1,
            source: (),
        };
        assert_eq!(err.to_string(), "read of LS_DATA_1 (0x0e) failed: ()");

        let err: Error<()> = Error::Write {
            register: PS_MEAS_RATE,
            source: (),
        };
        assert_eq!(err.to_string(), "write to PS_MEAS_RATE (0x03) failed: ()");
        assert_eq!(err.register(), Some(PS_MEAS_RATE));
    }

    #[test]
    fn state_errors_carry_no_register() {
        let err: Error<()> = Error::InvalidState(State::Failed);
        assert_eq!(err.to_string(), "device is Failed");
        assert!(!err.is_bus_error());
        assert_eq!(Error::<()>::Busy.register(), None);
    }
}
