//! Assembling channel bytes into readings

use core::fmt;

use crate::register::{main_status, ALS_DATA, PRX_DATA};

/// Largest value an ALS reading can take (24 bits)
pub const ALS_MAX: u32 = 0x00FF_FFFF;

/// Number of data registers behind the ALS channel
pub const ALS_LEN: usize = ALS_DATA.len();

/// Number of data registers behind the proximity channel
pub const PRX_LEN: usize = PRX_DATA.len();

/// Compose the three ALS data bytes, least significant first.
pub const fn compose_als(bytes: [u8; ALS_LEN]) -> u32 {
    (bytes[0] as u32) | ((bytes[1] as u32) << 8) | ((bytes[2] as u32) << 16)
}

/// Compose the two proximity data bytes, least significant first.
///
/// The result is two's complement: bit 7 of the high byte is the sign bit.
/// Use [`Reading::as_unsigned`] for the unsigned view of the same bits.
pub const fn compose_proximity(bytes: [u8; PRX_LEN]) -> i16 {
    i16::from_le_bytes(bytes)
}

/// Measurement channel of the part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Channel {
    /// Ambient light
    Als,
    /// Proximity
    Proximity,
}

impl Channel {
    /// Attribute name a file-style surface exposes the channel under
    pub const fn attribute(self) -> &'static str {
        match self {
            Channel::Als => "lux_data",
            Channel::Proximity => "prx_data",
        }
    }

    /// Attribute group the channel belongs to
    pub const fn group(self) -> &'static str {
        match self {
            Channel::Als => "apds9922_als",
            Channel::Proximity => "apds9922_prx",
        }
    }
}

/// A single channel measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Reading {
    /// Raw 24-bit ALS count, `0..=ALS_MAX`
    Als(u32),
    /// Raw proximity count
    Proximity(i16),
}

impl Reading {
    /// Channel the reading came from
    pub const fn channel(self) -> Channel {
        match self {
            Reading::Als(_) => Channel::Als,
            Reading::Proximity(_) => Channel::Proximity,
        }
    }

    /// Channel value reinterpreted as an unsigned count.
    ///
    /// Proximity keeps its 16 bits, so `-1` reads as `65535`.
    pub const fn as_unsigned(self) -> u32 {
        match self {
            Reading::Als(value) => value,
            Reading::Proximity(value) => value as u16 as u32,
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Als(value) => write!(f, "{value}"),
            Reading::Proximity(value) => write!(f, "{value}"),
        }
    }
}

/// Device status information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct StatusInfo {
    /// True if device went through power-up event
    pub power_on_occurred: bool,
    /// True if the ALS interrupt condition is active
    pub als_interrupt: bool,
    /// True if new ALS data is available
    pub als_data_ready: bool,
    /// Proximity logic output, true when an object is near
    pub proximity_near: bool,
    /// True if the proximity interrupt condition is active
    pub proximity_interrupt: bool,
    /// True if new proximity data is available
    pub proximity_data_ready: bool,
}

impl From<u8> for StatusInfo {
    fn from(status: u8) -> Self {
        Self {
            power_on_occurred: status & main_status::POWER_ON != 0,
            als_interrupt: status & main_status::LS_INT != 0,
            als_data_ready: status & main_status::LS_DATA != 0,
            proximity_near: status & main_status::PS_LOGIC != 0,
            proximity_interrupt: status & main_status::PS_INT != 0,
            proximity_data_ready: status & main_status::PS_DATA != 0,
        }
    }
}

/// Part number and revision from PART_ID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct PartId {
    /// High nibble
    pub part: u8,
    /// Low nibble
    pub revision: u8,
}

impl From<u8> for PartId {
    fn from(value: u8) -> Self {
        Self {
            part: value >> 4,
            revision: value & 0x0F,
        }
    }
}
