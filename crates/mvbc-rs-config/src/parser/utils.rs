// crates/mvbc-rs-config/src/parser/utils.rs

//! Field readers shared by the device and port parsers.

use crate::accessor::ValueAccessor;
use crate::error::{ConfigError, FieldLocation};
use log::{debug, error, warn};
use mvbc_rs::{BoundedString, FieldError};

/// Document numbers are doubles; they are truncated toward zero (saturating).
pub(super) fn to_int(value: f64) -> i64 {
    value as i64
}

/// Reads a mandatory string field.
pub(super) fn required_str<'a, A: ValueAccessor>(
    value: &'a A,
    field: &'static str,
    location: FieldLocation,
) -> Result<&'a str, ConfigError> {
    value.get_str(field).ok_or_else(|| missing(location, field))
}

/// Reads a mandatory number field, truncated to an integer.
pub(super) fn required_int<A: ValueAccessor>(
    value: &A,
    field: &'static str,
    location: FieldLocation,
) -> Result<i64, ConfigError> {
    value
        .get_number(field)
        .map(to_int)
        .ok_or_else(|| missing(location, field))
}

/// Reads an optional string field. Absence and a wrong JSON type look the same.
pub(super) fn optional_str<'a, A: ValueAccessor>(value: &'a A, field: &str) -> Option<&'a str> {
    let found = value.get_str(field);
    if found.is_none() {
        debug!("'{}' is not a string -> set default", field);
    }
    found
}

/// Reads an optional number field, truncated to an integer.
pub(super) fn optional_int<A: ValueAccessor>(value: &A, field: &str) -> Option<i64> {
    let found = value.get_number(field).map(to_int);
    if found.is_none() {
        debug!("'{}' is not a number -> set default", field);
    }
    found
}

/// Copies `value` into a bounded string, warning if it had to be cut.
pub(super) fn bounded(value: &str, field: &str) -> BoundedString {
    let bounded = BoundedString::new(value);
    if bounded.is_truncated() {
        warn!(
            "'{}' longer than {} bytes, truncated to '{}'",
            field,
            BoundedString::CAPACITY,
            bounded
        );
    }
    bounded
}

pub(super) fn missing(location: FieldLocation, field: &'static str) -> ConfigError {
    error!("{}: mandatory field '{}' missing or mistyped", location, field);
    ConfigError::MissingField { location, field }
}

pub(super) fn invalid(location: FieldLocation, field: &'static str, source: FieldError) -> ConfigError {
    error!("{}: invalid '{}': {}", location, field, source);
    ConfigError::InvalidField {
        location,
        field,
        source,
    }
}
