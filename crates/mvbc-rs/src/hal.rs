use crate::register::{DeviceConfigPayload, PortConfigPayload, ResetPayload};
use core::fmt;

/// A negative result code returned by the device-control transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlError {
    code: i32,
}

impl ControlError {
    /// Generic failure, also used when the device node cannot be opened.
    pub const GENERIC: Self = Self { code: -1 };

    /// Wraps a transport result code. Non-negative codes are clamped to -1
    /// so that a `ControlError` is always negative.
    pub fn new(code: i32) -> Self {
        if code < 0 {
            Self { code }
        } else {
            Self::GENERIC
        }
    }

    pub fn code(&self) -> i32 {
        self.code
    }
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Device control call failed with code {}", self.code)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ControlError {}

/// Commands understood by the MVBC driver.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Command {
    /// Stop the controller and drop its current configuration.
    Shutdown,
    Reset(ResetPayload),
    SetDeviceConfig(DeviceConfigPayload),
    SetPortConfig(PortConfigPayload),
    /// Start bus traffic with the applied configuration.
    Run,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Shutdown => CommandKind::Shutdown,
            Command::Reset(_) => CommandKind::Reset,
            Command::SetDeviceConfig(_) => CommandKind::SetDeviceConfig,
            Command::SetPortConfig(_) => CommandKind::SetPortConfig,
            Command::Run => CommandKind::Run,
        }
    }
}

/// Payload-free identifier of a [`Command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CommandKind {
    Shutdown,
    Reset,
    SetDeviceConfig,
    SetPortConfig,
    Run,
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandKind::Shutdown => "shutdown",
            CommandKind::Reset => "reset",
            CommandKind::SetDeviceConfig => "set-device-configuration",
            CommandKind::SetPortConfig => "set-port-configuration",
            CommandKind::Run => "run",
        };
        f.write_str(name)
    }
}

/// Hardware Abstraction Layer for the MVBC device-control call.
///
/// This trait abstracts delivery of encoded register payloads to the driver,
/// keeping parsing and encoding platform-agnostic (no_std). Implementations own
/// any timeout or retry policy; callers never retry.
pub trait DeviceControl {
    /// Submits one command to the controller behind `device_path` (e.g. `/dev/mvbc0`).
    ///
    /// Returns `Ok(0)` on success. A positive status means the driver accepted the
    /// command but reported a problem; callers accumulate it and continue.
    /// `Err` carries a negative code and stops the whole configuration run.
    fn submit(&mut self, device_path: &str, command: &Command) -> Result<u32, ControlError>;
}

impl<T: DeviceControl + ?Sized> DeviceControl for &mut T {
    fn submit(&mut self, device_path: &str, command: &Command) -> Result<u32, ControlError> {
        (**self).submit(device_path, command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_error_is_always_negative() {
        assert_eq!(ControlError::new(-5).code(), -5);
        assert_eq!(ControlError::new(0).code(), -1);
        assert_eq!(ControlError::new(17).code(), -1);
    }

    #[test]
    fn test_command_kind() {
        assert_eq!(Command::Shutdown.kind(), CommandKind::Shutdown);
        assert_eq!(Command::Run.kind(), CommandKind::Run);
    }
}
