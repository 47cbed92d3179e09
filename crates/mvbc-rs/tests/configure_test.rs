// crates/mvbc-rs/tests/configure_test.rs

use mvbc_rs::register::StatusControl;
use mvbc_rs::{
    BoundedString, Command, CommandKind, ControlError, DeviceAddress, DeviceDescriptor, Direction,
    DryRunControl, FunctionCode, InitStatus, Interface, InterruptNumber, Mode, PollInterval,
    PortAddress, PortDescriptor, PortType, Project, Step, configure_project, encode_device,
};

fn sample_port(irq: u8) -> PortDescriptor {
    PortDescriptor {
        name: BoundedString::new("ADC"),
        address: PortAddress(10),
        port_type: PortType::ProcessData,
        direction: Direction::Sink,
        function_code: FunctionCode(3),
        poll_interval: PollInterval(32),
        interrupt: InterruptNumber(irq),
        numeric_data: true,
    }
}

fn sample_project() -> Project {
    let mut first = DeviceDescriptor::new("/dev/mvbc0", Interface::Emd, DeviceAddress(0x10), Mode::Static);
    first.port_setup.ports.push(sample_port(0));
    first.port_setup.ports.push(sample_port(5));

    let mut second =
        DeviceDescriptor::new("/dev/mvbc1", Interface::EsdPlus, DeviceAddress(0x20), Mode::Dynamic);
    second.test_traffic_memory = true;

    Project {
        name: BoundedString::new("train-a"),
        version: BoundedString::new("1.2"),
        devices: vec![first, second],
    }
}

/// The polled port from the example project: F-Code 3 in bits 12-15, sink bit 10,
/// numeric data bit 1, poll interval 32 ms, no interrupt.
#[test]
fn test_polled_port_payload() {
    let payloads = encode_device(&sample_project().devices[0]);
    let port = &payloads.ports[0];

    let word = port.control_word.bits();
    assert_eq!(word >> 12, 3);
    assert_eq!(word & (1 << 10), 1 << 10);
    assert_eq!(word & (1 << 1), 1 << 1);
    assert_eq!((word >> 5) & 0b111, 0);
    assert_eq!(port.poll_interval, Some(PollInterval(32)));
    assert_eq!(port.interrupt(), None);
}

/// Same port with irq 5: bits 5-7 carry the interrupt and no poll interval is encoded.
#[test]
fn test_interrupt_port_payload() {
    let payloads = encode_device(&sample_project().devices[0]);
    let port = &payloads.ports[1];

    assert_eq!((port.control_word.bits() >> 5) & 0b111, 5);
    assert_eq!(port.poll_interval, None);
    assert_eq!(port.interrupt(), Some(InterruptNumber(5)));
}

#[test]
fn test_full_run_submits_in_document_order() {
    let project = sample_project();
    let mut control = DryRunControl::new();

    let status = configure_project(&project, &mut control).expect("dry run must succeed");
    assert_eq!(status, InitStatus::empty());

    let trace: Vec<(&str, CommandKind)> = control
        .submitted()
        .iter()
        .map(|s| (s.device_path.as_str(), s.command.kind()))
        .collect();

    assert_eq!(
        trace,
        vec![
            ("/dev/mvbc0", CommandKind::Shutdown),
            ("/dev/mvbc0", CommandKind::Reset),
            ("/dev/mvbc0", CommandKind::SetDeviceConfig),
            ("/dev/mvbc0", CommandKind::SetPortConfig),
            ("/dev/mvbc0", CommandKind::SetPortConfig),
            ("/dev/mvbc0", CommandKind::Run),
            ("/dev/mvbc1", CommandKind::Shutdown),
            ("/dev/mvbc1", CommandKind::Reset),
            ("/dev/mvbc1", CommandKind::SetDeviceConfig),
            ("/dev/mvbc1", CommandKind::Run),
        ]
    );

    match &control.submitted()[7].command {
        Command::Reset(reset) => {
            assert_eq!(reset.operation_mode, Mode::Dynamic);
            assert!(reset.test_traffic_memory);
            assert_eq!(reset.registers.scr, StatusControl::RESET_VALUE);
            assert_eq!(reset.registers.scr.waitstates(), 0);
        }
        other => panic!("expected reset payload, got {:?}", other),
    }
}

#[test]
fn test_abort_keeps_accumulated_status() {
    let project = sample_project();
    let mut control = DryRunControl::new();
    control.respond("/dev/mvbc0", CommandKind::SetPortConfig, Ok(1));
    control.respond("/dev/mvbc1", CommandKind::Reset, Err(ControlError::new(-19)));

    let err = configure_project(&project, &mut control).unwrap_err();
    assert_eq!(err.device_index, 1);
    assert_eq!(err.step, Step::Reset);
    assert_eq!(err.error.code(), -19);
    assert_eq!(err.status, InitStatus::SET_PORT_CONFIG);
}

#[test]
fn test_library_version_matches_package() {
    let version = mvbc_rs::library_version();
    assert_eq!(version.to_string(), env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_pld_firmware_version() {
    assert_eq!(mvbc_rs::pld_firmware_version(), 1);
    assert_eq!(mvbc_rs::pld_firmware_version(), mvbc_rs::PLD_FIRMWARE_VERSION);
}
