// crates/mvbc-rs/src/init.rs
//! Brings the controllers of a project up in document order.
//!
//! Per device: shutdown, reset, device configuration, every port configuration,
//! run. A positive step status is accumulated into [`InitStatus`] and the run
//! continues; a negative one ([`ControlError`]) stops the run at once, including
//! all devices that follow.

use crate::descriptor::{DeviceDescriptor, Project};
use crate::hal::{Command, CommandKind, ControlError, DeviceControl};
use crate::log::{DeviceLogContext, dev_debug, dev_error, dev_info, dev_warn};
use crate::register::{DeviceConfigPayload, PortConfigPayload, ResetPayload};
use alloc::string::String;
use core::fmt;
use core::ops::BitOr;

/// Accumulated step failures of a configuration run as a type-safe bitmask.
///
/// Bit values match the status codes historically returned by the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InitStatus(pub u32);

impl InitStatus {
    // --- Flag Constants ---
    pub const RESET: Self = Self(1 << 1);
    pub const TEST_TRAFFIC_MEMORY: Self = Self(1 << 2);
    pub const SET_DEVICE_CONFIG: Self = Self(1 << 3);
    pub const SET_PORT_CONFIG: Self = Self(1 << 4);
    pub const RUN: Self = Self(1 << 5);
    pub const SHUTDOWN: Self = Self(1 << 6);

    /// Returns an empty set of flags.
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    /// Checks if all of the specified flags are set.
    pub fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Inserts the specified flags.
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }
}

impl BitOr for InitStatus {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

/// One step of the per-device sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Step {
    Shutdown,
    Reset,
    SetDeviceConfig,
    /// Index into the device's static port list.
    SetPortConfig(usize),
    Run,
}

impl Step {
    fn status_flag(&self) -> InitStatus {
        match self {
            Step::Shutdown => InitStatus::SHUTDOWN,
            Step::Reset => InitStatus::RESET,
            Step::SetDeviceConfig => InitStatus::SET_DEVICE_CONFIG,
            Step::SetPortConfig(_) => InitStatus::SET_PORT_CONFIG,
            Step::Run => InitStatus::RUN,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Shutdown => write!(f, "{}", CommandKind::Shutdown),
            Step::Reset => write!(f, "{}", CommandKind::Reset),
            Step::SetDeviceConfig => write!(f, "{}", CommandKind::SetDeviceConfig),
            Step::SetPortConfig(i) => write!(f, "{} (port {})", CommandKind::SetPortConfig, i),
            Step::Run => write!(f, "{}", CommandKind::Run),
        }
    }
}

/// A configuration run stopped by a negative transport result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitError {
    pub device_index: usize,
    pub device_path: String,
    pub step: Step,
    pub error: ControlError,
    /// Status accumulated before the abort.
    pub status: InitStatus,
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Configuration aborted at device {} ({}) during {}: {}",
            self.device_index, self.device_path, self.step, self.error
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InitError {}

/// Configures every device of `project`, in order.
///
/// Returns the accumulated status (empty on full success), or the first abort.
pub fn configure_project<C: DeviceControl + ?Sized>(
    project: &Project,
    control: &mut C,
) -> Result<InitStatus, InitError> {
    let mut status = InitStatus::empty();

    for (index, device) in project.devices.iter().enumerate() {
        configure_device(index, device, control, &mut status)?;
    }

    log::info!(
        "Configured {} device(s), status {:#x}",
        project.device_count(),
        status.bits()
    );
    Ok(status)
}

/// Runs the full sequence for one device, folding step results into `status`.
pub fn configure_device<C: DeviceControl + ?Sized>(
    index: usize,
    device: &DeviceDescriptor,
    control: &mut C,
    status: &mut InitStatus,
) -> Result<(), InitError> {
    let path = device.path.as_str();
    let ctx = DeviceLogContext { index, path };

    dev_info!(
        ctx,
        "Configuring {} controller at address {} in {} mode with {} port(s)",
        device.interface,
        device.address.0,
        device.mode,
        device.port_setup.port_count()
    );

    let mut run_step = |step: Step, command: Command, status: &mut InitStatus| {
        match control.submit(path, &command) {
            Ok(0) => {
                dev_debug!(ctx, "{} ok", step);
                Ok(())
            }
            Ok(code) => {
                dev_warn!(ctx, "{} reported status {:#x}", step, code);
                status.insert(step.status_flag());
                if step == Step::Reset && device.test_traffic_memory {
                    status.insert(InitStatus::TEST_TRAFFIC_MEMORY);
                }
                Ok(())
            }
            Err(error) => {
                dev_error!(ctx, "{} failed: {}", step, error);
                Err(InitError {
                    device_index: index,
                    device_path: String::from(path),
                    step,
                    error,
                    status: *status,
                })
            }
        }
    };

    run_step(Step::Shutdown, Command::Shutdown, status)?;
    run_step(
        Step::Reset,
        Command::Reset(ResetPayload::encode(device)),
        status,
    )?;
    run_step(
        Step::SetDeviceConfig,
        Command::SetDeviceConfig(DeviceConfigPayload::encode(device)),
        status,
    )?;

    for (port_index, port) in device.port_setup.ports.iter().enumerate() {
        let payload = PortConfigPayload::encode(port);
        dev_debug!(
            ctx,
            "port {} PCS0 {:#06x}",
            port.address.0,
            payload.control_word.bits()
        );
        run_step(
            Step::SetPortConfig(port_index),
            Command::SetPortConfig(payload),
            status,
        )?;
    }

    run_step(Step::Run, Command::Run, status)
}

/// Shuts down the controller behind `device_path`, dropping its configuration.
pub fn shutdown<C: DeviceControl + ?Sized>(
    control: &mut C,
    device_path: &str,
) -> Result<u32, ControlError> {
    control.submit(device_path, &Command::Shutdown)
}
