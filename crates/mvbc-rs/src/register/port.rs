// crates/mvbc-rs/src/register/port.rs

use crate::descriptor::PortDescriptor;
use crate::types::{Direction, FunctionCode, InterruptNumber, PollInterval, PortAddress, PortType};

/// Word 0 of the Port Control and Status register (PCS0).
///
/// ```text
///  15   12 11  10  9   8  7   5  4   2   1   0
/// +-------+---+---+-------+-----+-----+---+---+
/// | F-Code|SRC|SNK|       | DTI |     |NUM|   |
/// +-------+---+---+-------+-----+-----+---+---+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PortControlWord(pub u16);

impl PortControlWord {
    const FCODE_SHIFT: u16 = 12;
    const DIRECTION_BASE: u16 = 10;
    const DTI_SHIFT: u16 = 5;
    const DTI_MASK: u16 = 0b111;
    const NUM_SHIFT: u16 = 1;

    /// Builds the control word from its fields.
    ///
    /// The interrupt field is only written for a nonzero interrupt number;
    /// polled ports leave bits 5-7 clear.
    pub fn new(
        function_code: FunctionCode,
        direction: Direction,
        numeric_data: bool,
        interrupt: InterruptNumber,
    ) -> Self {
        let mut word = 0u16;
        word |= u16::from(function_code.0) << Self::FCODE_SHIFT;
        word |= 1 << (Self::DIRECTION_BASE + direction as u16);
        word |= u16::from(numeric_data) << Self::NUM_SHIFT;
        if interrupt.is_enabled() {
            word |= (u16::from(interrupt.0) & Self::DTI_MASK) << Self::DTI_SHIFT;
        }
        Self(word)
    }

    pub fn bits(&self) -> u16 {
        self.0
    }

    pub fn function_code(&self) -> FunctionCode {
        FunctionCode((self.0 >> Self::FCODE_SHIFT) as u8)
    }

    pub fn is_sink(&self) -> bool {
        self.0 & (1 << Self::DIRECTION_BASE) != 0
    }

    pub fn is_source(&self) -> bool {
        self.0 & (1 << (Self::DIRECTION_BASE + 1)) != 0
    }

    pub fn numeric_data(&self) -> bool {
        self.0 & (1 << Self::NUM_SHIFT) != 0
    }

    pub fn interrupt(&self) -> InterruptNumber {
        InterruptNumber(((self.0 >> Self::DTI_SHIFT) & Self::DTI_MASK) as u8)
    }
}

/// Payload of the set-port-configuration command for one port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PortConfigPayload {
    /// Marks the port as coming from the static list rather than the sniffer. Always set.
    pub static_conf: bool,
    pub port_address: PortAddress,
    pub function_code: FunctionCode,
    pub port_type: PortType,
    pub control_word: PortControlWord,
    /// Present only for polled ports (interrupt number 0).
    pub poll_interval: Option<PollInterval>,
}

impl PortConfigPayload {
    pub fn encode(port: &PortDescriptor) -> Self {
        let control_word = PortControlWord::new(
            port.function_code,
            port.direction,
            port.numeric_data,
            port.interrupt,
        );

        // Either interrupt or polling, never both.
        let poll_interval = if port.interrupt.is_enabled() {
            None
        } else {
            Some(port.poll_interval)
        };

        Self {
            static_conf: true,
            port_address: port.address,
            function_code: port.function_code,
            port_type: port.port_type,
            control_word,
            poll_interval,
        }
    }

    pub fn interrupt(&self) -> Option<InterruptNumber> {
        let irq = self.control_word.interrupt();
        irq.is_enabled().then_some(irq)
    }
}
