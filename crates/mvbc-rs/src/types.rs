use core::fmt;

// --- Capacity Constants ---

/// Maximum number of MVB controllers a single project may configure.
pub const MAX_DEVICES: usize = 4;

/// Maximum number of statically configured ports per controller.
pub const MAX_PORT_COUNT: usize = 4095;

/// Size of every string field in the driver-facing structures, terminator included.
pub const MAX_STRING_LENGTH: usize = 64;

// --- MVB Address Space (Memory Configuration Mode 3) ---

/// Highest device address on the bus.
pub const MAX_DEVICE_ADDRESS: u16 = 4095;

/// Highest logical port address on the bus.
pub const MAX_PORT_ADDRESS: u16 = 4095;

/// F-Codes are 4 bits wide.
pub const MAX_FUNCTION_CODE: u8 = 15;

/// DTI1..DTI7; 0 disables the interrupt.
pub const MAX_INTERRUPT_NUMBER: u8 = 7;

// --- Documented Defaults ---

/// Placeholder used for every optional string field (project name, description, port name).
pub const DEFAULT_NAME: &str = "n/a";

/// Poll interval substituted for missing or unsupported `poll_ms` values.
pub const DEFAULT_POLL_INTERVAL_MS: u16 = 16;

/// Location of the project file when the caller does not name one.
pub const DEFAULT_PROJECT_CONFIG_FILE: &str = "/usr/share/mvbc_example.json";

/// Poll intervals the controller supports but which load the bus heavily.
pub const FAST_POLL_INTERVALS_MS: [u16; 4] = [1, 2, 4, 8];

/// Poll intervals accepted without comment.
pub const RECOMMENDED_POLL_INTERVALS_MS: [u16; 7] = [16, 32, 64, 128, 256, 512, 1024];

/// MVB device address, 1-4095.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DeviceAddress(pub u16);

/// Logical port address, 1-4095.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PortAddress(pub u16);

/// 4-bit F-Code identifying the kind of data a port carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FunctionCode(pub u8);

/// Port status poll interval in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PollInterval(pub u16);

impl Default for PollInterval {
    fn default() -> Self {
        PollInterval(DEFAULT_POLL_INTERVAL_MS)
    }
}

/// Data-transfer interrupt line used instead of polling. 0 means "poll".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InterruptNumber(pub u8);

impl InterruptNumber {
    /// No interrupt; the port is polled.
    pub const NONE: Self = Self(0);

    pub fn is_enabled(&self) -> bool {
        self.0 != 0
    }
}

/// MVB interface (physical layer) of a controller.
/// Discriminants follow the driver's interface enumeration, where 0 is the unsupported OGF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u8)]
pub enum Interface {
    /// Electrical Short Distance (ESD+).
    EsdPlus = 1,
    /// Electrical Medium Distance (EMD).
    Emd = 2,
}

impl Interface {
    /// The spelling used in project files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interface::EsdPlus => "ESD+",
            Interface::Emd => "EMD",
        }
    }
}

/// Operational mode of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u8)]
pub enum Mode {
    /// Ports come exclusively from the static list.
    Static = 0,
    /// The sniffer creates sink ports from the default template.
    Dynamic = 1,
    /// Static list plus ports added by the sniffer.
    Combined = 2,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Static => "static",
            Mode::Dynamic => "dynamic",
            Mode::Combined => "combined",
        }
    }

    /// True if the project file carries a `config.static` port list for this mode.
    pub fn uses_static_ports(&self) -> bool {
        matches!(self, Mode::Static | Mode::Combined)
    }

    /// True if the project file carries a `config.default` port template for this mode.
    pub fn uses_default_port(&self) -> bool {
        matches!(self, Mode::Dynamic | Mode::Combined)
    }
}

/// Port type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u8)]
pub enum PortType {
    /// Process data, logical addressing (F-Code 0..4).
    #[default]
    ProcessData = 0,
    /// Device status, device addressing (F-Code 15).
    DeviceStatus = 1,
    /// Message data, physical port addressing (F-Code 8, 9, 12..15).
    MessageData = 2,
}

impl PortType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PortType::ProcessData => "la",
            PortType::DeviceStatus => "da",
            PortType::MessageData => "pp",
        }
    }
}

/// Port direction relative to the configuring controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u8)]
pub enum Direction {
    /// Receive data.
    #[default]
    Sink = 0,
    /// Send data.
    Source = 1,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Sink => "sink",
            Direction::Source => "source",
        }
    }
}

/// Decoder line selection (single or redundant line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u8)]
pub enum LineMode {
    LineA = 0,
    LineB = 1,
    /// Both lines, redundant operation.
    LineAB = 2,
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
