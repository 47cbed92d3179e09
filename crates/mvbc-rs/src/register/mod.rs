// crates/mvbc-rs/src/register/mod.rs
//! Register encoder: maps a validated device descriptor onto the fixed-layout
//! payloads of the device-control commands.
//!
//! Encoding is deterministic and free of side effects. Submitting the payloads
//! is done by [`crate::init`].

pub mod device;
pub mod port;
pub mod reset;

pub use device::{DeviceConfigPayload, SINK_TIME_ALL_PORTS, SINK_TIME_INTERVAL_32_MS};
pub use port::{PortConfigPayload, PortControlWord};
pub use reset::{MemoryConfig, ResetPayload, ResetRegisters, StatusControl};

use crate::descriptor::DeviceDescriptor;
use alloc::vec::Vec;

/// Every payload needed to bring one controller up.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DevicePayloads {
    pub reset: ResetPayload,
    pub device: DeviceConfigPayload,
    /// One entry per static port, in document order.
    pub ports: Vec<PortConfigPayload>,
}

/// Encodes all register payloads of a device.
pub fn encode_device(device: &DeviceDescriptor) -> DevicePayloads {
    DevicePayloads {
        reset: ResetPayload::encode(device),
        device: DeviceConfigPayload::encode(device),
        ports: device
            .port_setup
            .ports
            .iter()
            .map(PortConfigPayload::encode)
            .collect(),
    }
}
