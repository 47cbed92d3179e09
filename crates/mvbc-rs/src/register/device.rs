// crates/mvbc-rs/src/register/device.rs

use crate::descriptor::DeviceDescriptor;
use crate::types::{DeviceAddress, Interface, LineMode};

/// Sink-time supervision interval code 6 (32 ms).
pub const SINK_TIME_INTERVAL_32_MS: u16 = 6;

/// Sink-time supervision over all 4096 ports.
pub const SINK_TIME_ALL_PORTS: u16 = 0x0FFF;

/// Payload of the set-device-configuration command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DeviceConfigPayload {
    pub line: LineMode,
    pub device_address: DeviceAddress,
    pub interface: Interface,
    pub sink_time_interval: u16,
    /// Number of docks (ports) under sink-time supervision, as a mask.
    pub sink_time_ports: u16,
}

impl DeviceConfigPayload {
    /// Always redundant (both lines) with sink-time supervision on every port.
    pub fn encode(device: &DeviceDescriptor) -> Self {
        Self {
            line: LineMode::LineAB,
            device_address: device.address,
            interface: device.interface,
            sink_time_interval: SINK_TIME_INTERVAL_32_MS,
            sink_time_ports: SINK_TIME_ALL_PORTS,
        }
    }
}
