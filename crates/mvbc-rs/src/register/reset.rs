// crates/mvbc-rs/src/register/reset.rs

use crate::descriptor::{DefaultPortConfig, DeviceDescriptor};
use crate::types::Mode;
use core::ops::BitOr;

/// Status Control Register (SCR) as a type-safe bitmask.
/// (Reference: MVBC02D data sheet, SCR layout)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StatusControl(pub u16);

impl StatusControl {
    // --- Flag Constants ---
    /// IL: initialisation level "configuration" (bits 0-1 = 01).
    pub const IL_CONFIGURATION: Self = Self(1 << 0);
    /// WS: minimum number of wait states, bits 8-9. Must stay zero.
    pub const WAITSTATE_MASK: Self = Self(0b11 << 8);
    /// TMO: timeout coefficient 42.7 us (bits 10-11 = 01).
    pub const TMO_42_7_US: Self = Self(1 << 10);
    /// QUIET: read-only mode, the controller does not transmit.
    pub const QUIET: Self = Self(1 << 14);

    /// The SCR value written on every reset.
    ///
    /// The wait state bits stay zero: any other setting makes the controller
    /// deliver corrupted port data.
    pub const RESET_VALUE: Self = Self(Self::QUIET.0 | Self::TMO_42_7_US.0 | Self::IL_CONFIGURATION.0);

    pub fn bits(&self) -> u16 {
        self.0
    }

    /// Checks if all of the specified flags are set.
    pub fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Wait state field (bits 8-9).
    pub fn waitstates(&self) -> u16 {
        (self.0 & Self::WAITSTATE_MASK.0) >> 8
    }
}

impl BitOr for StatusControl {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

/// Memory Configuration Register (MCR).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MemoryConfig(pub u16);

impl MemoryConfig {
    /// MCM field, bits 0-2.
    pub const MCM_MASK: u16 = 0b111;
    /// Memory configuration mode 3: 4096 ports, address range 00000H-3FFFFH for queues and messages.
    pub const MCM_MODE_3: Self = Self(3);

    pub fn bits(&self) -> u16 {
        self.0
    }

    pub fn memory_configuration_mode(&self) -> u16 {
        self.0 & Self::MCM_MASK
    }
}

/// Registers written by the reset command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ResetRegisters {
    pub scr: StatusControl,
    pub mcr: MemoryConfig,
}

impl Default for ResetRegisters {
    fn default() -> Self {
        Self {
            scr: StatusControl::RESET_VALUE,
            mcr: MemoryConfig::MCM_MODE_3,
        }
    }
}

/// Payload of the reset command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ResetPayload {
    pub registers: ResetRegisters,
    pub operation_mode: Mode,
    pub test_traffic_memory: bool,
    /// Template the driver uses for ports found by the sniffer.
    pub default_port: DefaultPortConfig,
}

impl ResetPayload {
    pub fn encode(device: &DeviceDescriptor) -> Self {
        Self {
            registers: ResetRegisters::default(),
            operation_mode: device.mode,
            test_traffic_memory: device.test_traffic_memory,
            default_port: device.port_setup.default_port,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DeviceAddress, Interface, InterruptNumber, PollInterval, PortType};

    #[test]
    fn test_reset_register_layout() {
        let regs = ResetRegisters::default();
        assert_eq!(regs.scr.bits(), 0x4401);
        assert!(regs.scr.contains(StatusControl::QUIET));
        assert!(regs.scr.contains(StatusControl::TMO_42_7_US));
        assert!(regs.scr.contains(StatusControl::IL_CONFIGURATION));
        assert_eq!(regs.scr.waitstates(), 0);
        assert_eq!(regs.mcr.bits(), 0x0003);
        assert_eq!(regs.mcr.memory_configuration_mode(), 3);
    }

    #[test]
    fn test_reset_payload_carries_device_settings() {
        let mut device =
            DeviceDescriptor::new("/dev/mvbc1", Interface::EsdPlus, DeviceAddress(7), Mode::Combined);
        device.test_traffic_memory = true;
        device.port_setup.default_port = DefaultPortConfig {
            port_type: PortType::DeviceStatus,
            poll_interval: PollInterval(64),
            interrupt: InterruptNumber(2),
            numeric_data: true,
        };

        let payload = ResetPayload::encode(&device);
        assert_eq!(payload.operation_mode, Mode::Combined);
        assert!(payload.test_traffic_memory);
        assert_eq!(payload.default_port, device.port_setup.default_port);
        assert_eq!(payload.registers, ResetRegisters::default());
    }

    #[test]
    fn test_status_control_bitor() {
        let scr = StatusControl::QUIET | StatusControl::IL_CONFIGURATION;
        assert_eq!(scr.bits(), 0x4001);
        assert!(!scr.contains(StatusControl::TMO_42_7_US));
    }
}
