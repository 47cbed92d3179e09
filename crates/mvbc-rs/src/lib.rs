#![cfg_attr(not(feature = "std"), no_std)]

// 'alloc' is used for dynamic allocation (e.g., Vec<PortDescriptor> in the port setup)
extern crate alloc;

// --- Foundation Modules ---
pub mod types;
pub mod hal;
pub mod log;

// --- Configuration Model ---
pub mod descriptor;
pub mod validate;

// --- Register Encoding & Submission ---
pub mod register;
pub mod init;
pub mod dry_run;

// --- Top-level Exports ---
pub use types::{
    DeviceAddress, Direction, FunctionCode, Interface, InterruptNumber, Mode, PollInterval,
    PortAddress, PortType,
};
pub use hal::{Command, CommandKind, ControlError, DeviceControl};
pub use descriptor::{
    BoundedString, DefaultPortConfig, DeviceDescriptor, PortDescriptor, PortSetup, Project,
};
pub use validate::FieldError;
pub use register::{DevicePayloads, encode_device};
pub use init::{InitError, InitStatus, Step, configure_project, shutdown};
pub use dry_run::DryRunControl;

/// Version of this library as `major.minor.patch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

/// Returns the library version.
pub fn library_version() -> LibraryVersion {
    LibraryVersion {
        major: env!("CARGO_PKG_VERSION_MAJOR").parse().unwrap_or(0),
        minor: env!("CARGO_PKG_VERSION_MINOR").parse().unwrap_or(0),
        patch: env!("CARGO_PKG_VERSION_PATCH").parse().unwrap_or(0),
    }
}

/// Firmware version of the PLD that hosts the controller.
///
/// The driver has no command to query it, so the value is fixed.
pub const PLD_FIRMWARE_VERSION: u32 = 1;

/// Returns the PLD firmware version.
pub fn pld_firmware_version() -> u32 {
    PLD_FIRMWARE_VERSION
}

impl core::fmt::Display for LibraryVersion {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
