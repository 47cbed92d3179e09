// crates/mvbc-rs/src/descriptor.rs
//! In-memory descriptor tree produced by the project parser and consumed by the
//! register encoder.
//!
//! A fresh tree is built for every configuration run; nothing here is shared
//! between runs.

use crate::types::{
    DEFAULT_NAME, DeviceAddress, Direction, FunctionCode, Interface, InterruptNumber,
    MAX_STRING_LENGTH, Mode, PollInterval, PortAddress, PortType,
};
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// A string limited to `MAX_STRING_LENGTH - 1` bytes.
///
/// Longer input is cut at the last UTF-8 character boundary that fits and
/// [`BoundedString::is_truncated`] reports it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BoundedString {
    value: String,
    truncated: bool,
}

impl BoundedString {
    /// Usable bytes; the driver structures reserve one byte for the terminator.
    pub const CAPACITY: usize = MAX_STRING_LENGTH - 1;

    pub fn new(s: &str) -> Self {
        if s.len() <= Self::CAPACITY {
            return Self {
                value: String::from(s),
                truncated: false,
            };
        }

        let mut end = Self::CAPACITY;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        Self {
            value: String::from(&s[..end]),
            truncated: true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// The documented "n/a" placeholder.
    pub fn placeholder() -> Self {
        Self::new(DEFAULT_NAME)
    }
}

impl fmt::Display for BoundedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl PartialEq<str> for BoundedString {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl PartialEq<&str> for BoundedString {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for BoundedString {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

/// One statically configured port.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PortDescriptor {
    pub name: BoundedString,
    pub address: PortAddress,
    pub port_type: PortType,
    pub direction: Direction,
    pub function_code: FunctionCode,
    pub poll_interval: PollInterval,
    pub interrupt: InterruptNumber,
    pub numeric_data: bool,
}

impl PortDescriptor {
    /// A port with every optional field at its documented default.
    pub fn new(address: PortAddress, function_code: FunctionCode) -> Self {
        Self {
            name: BoundedString::placeholder(),
            address,
            port_type: PortType::default(),
            direction: Direction::default(),
            function_code,
            poll_interval: PollInterval::default(),
            interrupt: InterruptNumber::NONE,
            numeric_data: false,
        }
    }
}

/// Template applied to ports the sniffer discovers in dynamic and combined mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DefaultPortConfig {
    pub port_type: PortType,
    pub poll_interval: PollInterval,
    pub interrupt: InterruptNumber,
    pub numeric_data: bool,
}

/// All port configuration of one controller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PortSetup {
    /// Used when the mode is dynamic or combined.
    pub default_port: DefaultPortConfig,
    /// Used when the mode is static or combined, in document order.
    pub ports: Vec<PortDescriptor>,
}

impl PortSetup {
    pub fn port_count(&self) -> usize {
        self.ports.len()
    }
}

/// Complete configuration of one MVB controller.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DeviceDescriptor {
    pub description: BoundedString,
    /// Device node of the controller, e.g. `/dev/mvbc0`.
    pub path: BoundedString,
    pub interface: Interface,
    pub address: DeviceAddress,
    pub mode: Mode,
    /// Run the traffic memory test during reset.
    pub test_traffic_memory: bool,
    pub port_setup: PortSetup,
}

impl DeviceDescriptor {
    /// A device with every optional field at its documented default and no ports.
    pub fn new(path: &str, interface: Interface, address: DeviceAddress, mode: Mode) -> Self {
        Self {
            description: BoundedString::placeholder(),
            path: BoundedString::new(path),
            interface,
            address,
            mode,
            test_traffic_memory: false,
            port_setup: PortSetup::default(),
        }
    }
}

/// A project: the set of controllers configured together.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Project {
    pub name: BoundedString,
    pub version: BoundedString,
    /// Document order. Never longer than `MAX_DEVICES`.
    pub devices: Vec<DeviceDescriptor>,
}

impl Project {
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }
}

impl Default for Project {
    fn default() -> Self {
        Self {
            name: BoundedString::placeholder(),
            version: BoundedString::placeholder(),
            devices: Vec::new(),
        }
    }
}
