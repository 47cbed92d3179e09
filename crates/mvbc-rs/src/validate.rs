// crates/mvbc-rs/src/validate.rs
//! Field validators for project file values.
//!
//! Every validator maps one raw scalar to its canonical type or rejects it.
//! Absence is the caller's business; validators only see values that are present
//! and of the right JSON type. Numbers arrive already truncated to an integer.
//!
//! The poll interval is the exception: it never rejects, unsupported values are
//! replaced by [`DEFAULT_POLL_INTERVAL_MS`].

use crate::types::{
    DEFAULT_POLL_INTERVAL_MS, DeviceAddress, Direction, FAST_POLL_INTERVALS_MS, FunctionCode,
    Interface, InterruptNumber, MAX_DEVICE_ADDRESS, MAX_FUNCTION_CODE, MAX_INTERRUPT_NUMBER,
    MAX_PORT_ADDRESS, MAX_STRING_LENGTH, Mode, PollInterval, PortAddress, PortType, RECOMMENDED_POLL_INTERVALS_MS,
};
use alloc::string::{String, ToString};
use core::fmt;
use log::warn;

/// A field value that is present but outside its legal range or set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// `interface` is neither "EMD" nor "ESD+".
    UnknownInterface(String),
    /// `mode` is not one of "static", "dynamic", "combined".
    UnknownMode(String),
    /// Port `type` is not one of "la", "da", "pp".
    UnknownPortType(String),
    /// Port `direction` is neither "source" nor "sink".
    UnknownDirection(String),
    /// `device_addr` outside 1-4095.
    DeviceAddressOutOfRange(i64),
    /// Port `addr` outside 1-4095.
    PortAddressOutOfRange(i64),
    /// `fcode` outside 0-15.
    FunctionCodeOutOfRange(i64),
    /// `irq` outside 0-7.
    InterruptOutOfRange(i64),
    /// `num_data` other than 0 or 1.
    NumericDataOutOfRange(i64),
    /// Device `path` longer than a bounded string holds (byte length).
    PathTooLong(usize),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownInterface(v) => write!(f, "Unknown interface '{}' (expected EMD or ESD+)", v),
            Self::UnknownMode(v) => {
                write!(f, "Unknown mode '{}' (expected static, dynamic or combined)", v)
            }
            Self::UnknownPortType(v) => write!(f, "Unknown port type '{}' (expected la, da or pp)", v),
            Self::UnknownDirection(v) => {
                write!(f, "Unknown port direction '{}' (expected sink or source)", v)
            }
            Self::DeviceAddressOutOfRange(v) => {
                write!(f, "Device address {} out of range 1-{}", v, MAX_DEVICE_ADDRESS)
            }
            Self::PortAddressOutOfRange(v) => {
                write!(f, "Port address {} out of range 1-{}", v, MAX_PORT_ADDRESS)
            }
            Self::FunctionCodeOutOfRange(v) => {
                write!(f, "F-Code {} out of range 0-{}", v, MAX_FUNCTION_CODE)
            }
            Self::InterruptOutOfRange(v) => {
                write!(f, "Interrupt number {} out of range 0-{}", v, MAX_INTERRUPT_NUMBER)
            }
            Self::NumericDataOutOfRange(v) => write!(f, "num_data {} is neither 0 nor 1", v),
            Self::PathTooLong(len) => write!(
                f,
                "Device path is {} bytes long, at most {} supported",
                len,
                MAX_STRING_LENGTH - 1
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FieldError {}

/// "EMD" or "ESD+", case sensitive.
pub fn validate_interface(value: &str) -> Result<Interface, FieldError> {
    match value {
        "EMD" => Ok(Interface::Emd),
        "ESD+" => Ok(Interface::EsdPlus),
        other => Err(FieldError::UnknownInterface(other.to_string())),
    }
}

/// The device node path must fit a bounded string uncut: a shortened path
/// would address a different device.
pub fn validate_device_path(value: &str) -> Result<&str, FieldError> {
    if value.len() <= MAX_STRING_LENGTH - 1 {
        Ok(value)
    } else {
        Err(FieldError::PathTooLong(value.len()))
    }
}

pub fn validate_mode(value: &str) -> Result<Mode, FieldError> {
    match value {
        "static" => Ok(Mode::Static),
        "dynamic" => Ok(Mode::Dynamic),
        "combined" => Ok(Mode::Combined),
        other => Err(FieldError::UnknownMode(other.to_string())),
    }
}

pub fn validate_port_type(value: &str) -> Result<PortType, FieldError> {
    match value {
        "la" => Ok(PortType::ProcessData),
        "da" => Ok(PortType::DeviceStatus),
        "pp" => Ok(PortType::MessageData),
        other => Err(FieldError::UnknownPortType(other.to_string())),
    }
}

pub fn validate_direction(value: &str) -> Result<Direction, FieldError> {
    match value {
        "source" => Ok(Direction::Source),
        "sink" => Ok(Direction::Sink),
        other => Err(FieldError::UnknownDirection(other.to_string())),
    }
}

pub fn validate_device_address(value: i64) -> Result<DeviceAddress, FieldError> {
    if (1..=i64::from(MAX_DEVICE_ADDRESS)).contains(&value) {
        Ok(DeviceAddress(value as u16))
    } else {
        Err(FieldError::DeviceAddressOutOfRange(value))
    }
}

/// Valid range depends on the memory configuration; the encoder always selects mode 3 (1-4095).
pub fn validate_port_address(value: i64) -> Result<PortAddress, FieldError> {
    if (1..=i64::from(MAX_PORT_ADDRESS)).contains(&value) {
        Ok(PortAddress(value as u16))
    } else {
        Err(FieldError::PortAddressOutOfRange(value))
    }
}

pub fn validate_function_code(value: i64) -> Result<FunctionCode, FieldError> {
    if (0..=i64::from(MAX_FUNCTION_CODE)).contains(&value) {
        Ok(FunctionCode(value as u8))
    } else {
        Err(FieldError::FunctionCodeOutOfRange(value))
    }
}

/// Maps a requested poll interval onto a supported one. Never fails.
///
/// 1, 2, 4 and 8 ms are accepted but warned about because they consume a lot of
/// bus bandwidth. 16 to 1024 ms (powers of two) are accepted silently. Anything
/// else falls back to [`DEFAULT_POLL_INTERVAL_MS`].
pub fn validate_poll_interval(value: i64) -> PollInterval {
    if let Some(ms) = FAST_POLL_INTERVALS_MS
        .iter()
        .copied()
        .find(|&ms| i64::from(ms) == value)
    {
        warn!(
            "poll_ms value is {}! Recommended values are 16/32/64/128/256/512/1024 ms.",
            ms
        );
        return PollInterval(ms);
    }

    if let Some(ms) = RECOMMENDED_POLL_INTERVALS_MS
        .iter()
        .copied()
        .find(|&ms| i64::from(ms) == value)
    {
        return PollInterval(ms);
    }

    warn!(
        "Unsupported poll_ms value {}, using default {} ms.",
        value, DEFAULT_POLL_INTERVAL_MS
    );
    PollInterval::default()
}

/// 0 disables the interrupt, 1-7 select DTI1-DTI7.
pub fn validate_interrupt_number(value: i64) -> Result<InterruptNumber, FieldError> {
    if (0..=i64::from(MAX_INTERRUPT_NUMBER)).contains(&value) {
        Ok(InterruptNumber(value as u8))
    } else {
        Err(FieldError::InterruptOutOfRange(value))
    }
}

/// Port carries numerical (1) or non-numerical (0) data.
pub fn validate_numeric_data(value: i64) -> Result<bool, FieldError> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(FieldError::NumericDataOutOfRange(value)),
    }
}
