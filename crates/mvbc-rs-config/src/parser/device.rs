// crates/mvbc-rs-config/src/parser/device.rs

use super::port::parse_port_setup;
use super::utils::{bounded, invalid, optional_int, optional_str, required_int, required_str};
use crate::accessor::ValueAccessor;
use crate::error::{ConfigError, FieldLocation};
use log::{debug, info};
use mvbc_rs::validate::{
    validate_device_address, validate_device_path, validate_interface, validate_mode,
};
use mvbc_rs::DeviceDescriptor;

/// Parses one element of `project.devices`.
///
/// `path`, `interface`, `device_addr` and `mode` are mandatory; `description`
/// and `traffic_memory` are optional. Port errors are propagated unchanged.
pub(super) fn parse_device<A: ValueAccessor>(
    entry: &A,
    index: usize,
) -> Result<DeviceDescriptor, ConfigError> {
    let location = FieldLocation::device(index);

    let path = validate_device_path(required_str(entry, "path", location)?)
        .map_err(|e| invalid(location, "path", e))?;

    let description = optional_str(entry, "description").map(|s| bounded(s, "description"));

    let interface = validate_interface(required_str(entry, "interface", location)?)
        .map_err(|e| invalid(location, "interface", e))?;

    let address = validate_device_address(required_int(entry, "device_addr", location)?)
        .map_err(|e| invalid(location, "device_addr", e))?;

    let mode = validate_mode(required_str(entry, "mode", location)?)
        .map_err(|e| invalid(location, "mode", e))?;

    let mut device = DeviceDescriptor::new(path, interface, address, mode);
    if let Some(description) = description {
        device.description = description;
    }
    // Any nonzero number enables the test; no further validation.
    device.test_traffic_memory = optional_int(entry, "traffic_memory").is_some_and(|v| v != 0);

    debug!(
        "{}: path '{}' description '{}' traffic memory test {}",
        location, device.path, device.description, device.test_traffic_memory
    );

    device.port_setup = parse_port_setup(entry, index, mode)?;

    info!(
        "{}: {} controller at address {} in {} mode, {} static port(s)",
        location,
        device.interface,
        device.address.0,
        device.mode,
        device.port_setup.port_count()
    );
    Ok(device)
}
