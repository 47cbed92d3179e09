// crates/mvbc-rs-config/src/parser/port.rs

//! Parses the `config` object of a device: the static port list and the
//! dynamic-mode default port template.

use super::utils::{bounded, invalid, missing, optional_int, optional_str, required_int};
use crate::accessor::ValueAccessor;
use crate::error::{ConfigError, FieldLocation};
use alloc::vec::Vec;
use log::{debug, warn};
use mvbc_rs::types::MAX_PORT_COUNT;
use mvbc_rs::validate::{
    validate_direction, validate_function_code, validate_interrupt_number,
    validate_numeric_data, validate_poll_interval, validate_port_address, validate_port_type,
};
use mvbc_rs::{BoundedString, DefaultPortConfig, Mode, PortDescriptor, PortSetup};

const STATIC_PORTS: &str = "config.static";

/// Builds the port setup of a device according to its mode.
pub(super) fn parse_port_setup<A: ValueAccessor>(
    device: &A,
    device_index: usize,
    mode: Mode,
) -> Result<PortSetup, ConfigError> {
    let mut setup = PortSetup::default();

    if mode.uses_static_ports() {
        setup.ports = parse_static_ports(device, device_index)?;
    }
    if mode.uses_default_port() {
        setup.default_port = parse_default_port(device, device_index);
    }

    Ok(setup)
}

/// Parses `config.static`. The first rejected port aborts the device.
pub(super) fn parse_static_ports<A: ValueAccessor>(
    device: &A,
    device_index: usize,
) -> Result<Vec<PortDescriptor>, ConfigError> {
    let Some(count) = device.get_array_len(STATIC_PORTS) else {
        warn!(
            "device {}: '{}' array not found, no static ports configured",
            device_index, STATIC_PORTS
        );
        return Ok(Vec::new());
    };

    if count > MAX_PORT_COUNT {
        log::error!(
            "device {}: {} static ports exceed the maximum of {}",
            device_index,
            count,
            MAX_PORT_COUNT
        );
        return Err(ConfigError::TooManyPorts {
            device: device_index,
            found: count,
            max: MAX_PORT_COUNT,
        });
    }
    debug!("device {}: {} static port(s)", device_index, count);

    let mut ports = Vec::with_capacity(count);
    for port_index in 0..count {
        let location = FieldLocation::port(device_index, port_index);
        let Some(entry) = device.get_array_element(STATIC_PORTS, port_index) else {
            return Err(missing(location, "addr"));
        };
        ports.push(parse_static_port(entry, location)?);
    }

    Ok(ports)
}

/// Parses one element of `config.static`.
///
/// `addr` and `fcode` are mandatory. The optional fields fall back to their
/// defaults when absent, but a present value that fails validation aborts.
pub(super) fn parse_static_port<A: ValueAccessor>(
    entry: &A,
    location: FieldLocation,
) -> Result<PortDescriptor, ConfigError> {
    let name = optional_str(entry, "name")
        .map(|s| bounded(s, "name"))
        .unwrap_or_else(BoundedString::placeholder);

    let address = validate_port_address(required_int(entry, "addr", location)?)
        .map_err(|e| invalid(location, "addr", e))?;

    let port_type = match optional_str(entry, "type") {
        Some(s) => validate_port_type(s).map_err(|e| invalid(location, "type", e))?,
        None => Default::default(),
    };

    let direction = match optional_str(entry, "direction") {
        Some(s) => validate_direction(s).map_err(|e| invalid(location, "direction", e))?,
        None => Default::default(),
    };

    let function_code = validate_function_code(required_int(entry, "fcode", location)?)
        .map_err(|e| invalid(location, "fcode", e))?;

    let mut port = PortDescriptor::new(address, function_code);
    port.name = name;
    port.port_type = port_type;
    port.direction = direction;

    if let Some(ms) = optional_int(entry, "poll_ms") {
        port.poll_interval = validate_poll_interval(ms);
    }
    if let Some(irq) = optional_int(entry, "irq") {
        port.interrupt =
            validate_interrupt_number(irq).map_err(|e| invalid(location, "irq", e))?;
    }
    if let Some(num) = optional_int(entry, "num_data") {
        port.numeric_data =
            validate_numeric_data(num).map_err(|e| invalid(location, "num_data", e))?;
    }

    debug!(
        "{}: '{}' addr {} type {} {} fcode {} poll {} ms irq {} num_data {}",
        location,
        port.name,
        port.address.0,
        port.port_type,
        port.direction,
        port.function_code.0,
        port.poll_interval.0,
        port.interrupt.0,
        port.numeric_data
    );
    Ok(port)
}

/// Parses `config.default`. Never fails: every rejected field keeps its default.
pub(super) fn parse_default_port<A: ValueAccessor>(
    device: &A,
    device_index: usize,
) -> DefaultPortConfig {
    let mut template = DefaultPortConfig::default();

    if let Some(s) = optional_str(device, "config.default.type") {
        match validate_port_type(s) {
            Ok(port_type) => template.port_type = port_type,
            Err(e) => warn!("device {}: default port: {} -> set default", device_index, e),
        }
    }
    if let Some(ms) = optional_int(device, "config.default.poll_ms") {
        template.poll_interval = validate_poll_interval(ms);
    }
    if let Some(irq) = optional_int(device, "config.default.irq") {
        match validate_interrupt_number(irq) {
            Ok(interrupt) => template.interrupt = interrupt,
            Err(e) => warn!("device {}: default port: {} -> set default", device_index, e),
        }
    }
    if let Some(num) = optional_int(device, "config.default.num_data") {
        match validate_numeric_data(num) {
            Ok(numeric) => template.numeric_data = numeric,
            Err(e) => warn!("device {}: default port: {} -> set default", device_index, e),
        }
    }

    debug!(
        "device {}: default port type {} poll {} ms irq {} num_data {}",
        device_index,
        template.port_type,
        template.poll_interval.0,
        template.interrupt.0,
        template.numeric_data
    );
    template
}
