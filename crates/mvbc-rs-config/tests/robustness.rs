// crates/mvbc-rs-config/tests/robustness.rs

use mvbc_rs::types::{MAX_DEVICES, MAX_PORT_COUNT, MAX_STRING_LENGTH};
use mvbc_rs::{
    DeviceAddress, DryRunControl, FieldError, FunctionCode, PortAddress, configure_project,
};
use mvbc_rs_config::{
    ConfigError, FieldLocation, RunError, init_from_file, load_project_from_str, parse_project,
};
use serde_json::json;
use std::fs;
use std::path::PathBuf;

fn test_file_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path.push(name);
    path
}

#[test]
fn test_too_many_devices_rejected_before_parsing() {
    let content = fs::read_to_string(test_file_path("too_many_devices.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&content).unwrap();

    let parsed = parse_project(&doc);
    assert!(parsed.project.devices.is_empty());
    match parsed.error {
        Some(ConfigError::TooManyDevices { found, max }) => {
            assert_eq!(found, 5);
            assert_eq!(max, MAX_DEVICES);
        }
        other => panic!("unexpected {:?}", other),
    }
    // The project header was still read.
    assert_eq!(parsed.project.name, "Overfull");
}

#[test]
fn test_missing_mandatory_field_halts_later_devices() {
    let content = fs::read_to_string(test_file_path("missing_interface.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&content).unwrap();

    let parsed = parse_project(&doc);
    assert_eq!(parsed.project.device_count(), 1);
    assert_eq!(parsed.project.devices[0].address, DeviceAddress(1));
    match parsed.error {
        Some(ConfigError::MissingField { location, field }) => {
            assert_eq!(location, FieldLocation::device(1));
            assert_eq!(field, "interface");
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_rejected_document_touches_no_device() {
    let path = test_file_path("missing_interface.json");
    let mut control = DryRunControl::new();

    let err = init_from_file(Some(&path), &mut control).unwrap_err();
    assert!(matches!(err, RunError::Config(ConfigError::MissingField { .. })));
    assert_eq!(err.code(), -202);
    assert!(control.submitted().is_empty());
}

#[test]
fn test_boundary_values() {
    let doc = json!({ "project": { "devices": [ {
        "path": "/dev/mvbc0", "interface": "EMD", "device_addr": 4095, "mode": "static",
        "config": { "static": [
            { "addr": 1, "fcode": 0, "irq": 0, "num_data": 0 },
            { "addr": 4095, "fcode": 15, "irq": 7, "num_data": 1 }
        ] }
    } ] } });
    let project = parse_project(&doc).into_result().unwrap();
    let ports = &project.devices[0].port_setup.ports;
    assert_eq!(ports[0].address, PortAddress(1));
    assert_eq!(ports[1].address, PortAddress(4095));
    assert_eq!(ports[1].function_code, FunctionCode(15));
}

#[test]
fn test_out_of_range_values_rejected() {
    let cases = [
        ("device_addr", json!(0), "device_addr"),
        ("device_addr", json!(4096), "device_addr"),
        ("mode", json!("Static"), "mode"),
    ];
    for (field, value, expected) in cases {
        let mut doc = json!({ "project": { "devices": [ {
            "path": "/dev/mvbc0", "interface": "EMD", "device_addr": 1, "mode": "dynamic"
        } ] } });
        doc["project"]["devices"][0][field] = value;
        match parse_project(&doc).error {
            Some(ConfigError::InvalidField { field, .. }) => assert_eq!(field, expected),
            other => panic!("{}: unexpected {:?}", field, other),
        }
    }
}

#[test]
fn test_port_error_carries_location() {
    let doc = json!({ "project": { "devices": [ {
        "path": "/dev/mvbc0", "interface": "EMD", "device_addr": 1, "mode": "static",
        "config": { "static": [
            { "addr": 1, "fcode": 0 },
            { "addr": 2, "fcode": 0, "irq": 8 }
        ] }
    } ] } });
    let err = load_project_from_str(&doc.to_string()).unwrap_err();
    match err {
        ConfigError::InvalidField {
            location,
            field,
            source,
        } => {
            assert_eq!(location, FieldLocation::port(0, 1));
            assert_eq!(field, "irq");
            assert_eq!(source, FieldError::InterruptOutOfRange(8));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_fractional_numbers_truncate() {
    let doc = json!({ "project": { "devices": [ {
        "path": "/dev/mvbc0", "interface": "EMD", "device_addr": 10.7, "mode": "static",
        "config": { "static": [ { "addr": 10.2, "fcode": 3.9 } ] }
    } ] } });
    let project = parse_project(&doc).into_result().unwrap();
    assert_eq!(project.devices[0].address, DeviceAddress(10));
    assert_eq!(project.devices[0].port_setup.ports[0].address, PortAddress(10));
    assert_eq!(
        project.devices[0].port_setup.ports[0].function_code,
        FunctionCode(3)
    );
}

#[test]
fn test_long_strings_truncated() {
    let long = "x".repeat(200);
    let doc = json!({ "project": { "name": long, "devices": [] } });
    let project = parse_project(&doc).into_result().unwrap();
    assert_eq!(project.name.len(), MAX_STRING_LENGTH - 1);
    assert!(project.name.is_truncated());
}

#[test]
fn test_non_object_entries() {
    let doc = json!({ "project": { "devices": [ 42 ] } });
    assert!(matches!(
        parse_project(&doc).error,
        Some(ConfigError::MissingField { field: "path", .. })
    ));

    let doc = json!({ "project": { "devices": [ {
        "path": "/dev/mvbc0", "interface": "EMD", "device_addr": 1, "mode": "static",
        "config": { "static": [ "port" ] }
    } ] } });
    assert!(matches!(
        parse_project(&doc).error,
        Some(ConfigError::MissingField { field: "addr", .. })
    ));
}

fn static_device(ports: usize) -> serde_json::Value {
    let ports: Vec<serde_json::Value> = (0..ports)
        .map(|i| json!({ "addr": (i % 4095) + 1, "fcode": 0 }))
        .collect();
    json!({ "project": { "devices": [ {
        "path": "/dev/mvbc0", "interface": "EMD", "device_addr": 1, "mode": "static",
        "config": { "static": ports }
    } ] } })
}

#[test]
fn test_port_capacity() {
    let parsed = parse_project(&static_device(MAX_PORT_COUNT + 1));
    assert!(parsed.project.devices.is_empty());
    match parsed.error {
        Some(ConfigError::TooManyPorts { device, found, max }) => {
            assert_eq!(device, 0);
            assert_eq!(found, 4096);
            assert_eq!(max, 4095);
        }
        other => panic!("unexpected {:?}", other),
    }

    let project = parse_project(&static_device(MAX_PORT_COUNT))
        .into_result()
        .unwrap();
    assert_eq!(project.devices[0].port_setup.port_count(), 4095);
}

#[test]
fn test_overlong_device_path_never_submitted() {
    let path = format!("/dev/{}X", "a".repeat(58));
    assert_eq!(path.len(), MAX_STRING_LENGTH);
    let doc = json!({ "project": { "devices": [ {
        "path": path, "interface": "EMD", "device_addr": 1, "mode": "dynamic"
    } ] } });

    let parsed = parse_project(&doc);
    match &parsed.error {
        Some(ConfigError::InvalidField {
            location,
            field,
            source,
        }) => {
            assert_eq!(*location, FieldLocation::device(0));
            assert_eq!(*field, "path");
            assert_eq!(*source, FieldError::PathTooLong(64));
        }
        other => panic!("unexpected {:?}", other),
    }

    // Whatever was parsed before the error reaches no device under a shortened name.
    let mut control = DryRunControl::new();
    configure_project(&parsed.project, &mut control).unwrap();
    assert!(control.submitted().is_empty());
}
