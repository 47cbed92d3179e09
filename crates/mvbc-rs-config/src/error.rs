// crates/mvbc-rs-config/src/error.rs

use alloc::string::String;
use core::fmt;
use mvbc_rs::{FieldError, InitError};

/// Where in the document a field lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLocation {
    /// Index into `project.devices`.
    pub device: usize,
    /// Index into the device's `config.static` array, if the field belongs to a port.
    pub port: Option<usize>,
}

impl FieldLocation {
    pub fn device(device: usize) -> Self {
        Self { device, port: None }
    }

    pub fn port(device: usize, port: usize) -> Self {
        Self {
            device,
            port: Some(port),
        }
    }
}

impl fmt::Display for FieldLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.port {
            Some(port) => write!(f, "device {} port {}", self.device, port),
            None => write!(f, "device {}", self.device),
        }
    }
}

/// Errors that stop a project document from being parsed.
#[derive(Debug)]
pub enum ConfigError {
    /// The project file could not be read.
    FileRead { path: String, reason: String },

    /// The document is not well-formed JSON.
    MalformedDocument(serde_json::Error),

    /// The document root is not a JSON object.
    NotAnObject,

    /// `project.devices` is absent or not an array.
    MissingDevices,

    /// More devices than the library can configure.
    TooManyDevices { found: usize, max: usize },

    /// More static ports in one device than the controller has.
    TooManyPorts {
        device: usize,
        found: usize,
        max: usize,
    },

    /// A mandatory field is absent or has the wrong JSON type.
    MissingField {
        location: FieldLocation,
        field: &'static str,
    },

    /// A field is present but its value was rejected.
    InvalidField {
        location: FieldLocation,
        field: &'static str,
        source: FieldError,
    },
}

impl ConfigError {
    /// Legacy numeric status of this error.
    ///
    /// -200 for capacity errors, -201 for unreadable or structurally invalid
    /// documents, -202 for field errors.
    pub fn code(&self) -> i32 {
        match self {
            ConfigError::TooManyDevices { .. } | ConfigError::TooManyPorts { .. } => -200,
            ConfigError::FileRead { .. }
            | ConfigError::MalformedDocument(_)
            | ConfigError::NotAnObject => -201,
            ConfigError::MissingDevices
            | ConfigError::MissingField { .. }
            | ConfigError::InvalidField { .. } => -202,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::MalformedDocument(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileRead { path, reason } => {
                write!(f, "Cannot read project file '{}': {}", path, reason)
            }
            ConfigError::MalformedDocument(e) => write!(f, "Malformed project document: {}", e),
            ConfigError::NotAnObject => write!(f, "Project document root is not a JSON object"),
            ConfigError::MissingDevices => write!(f, "'project.devices' array not found"),
            ConfigError::TooManyDevices { found, max } => {
                write!(f, "Too many devices: found {}, at most {} supported", found, max)
            }
            ConfigError::TooManyPorts { device, found, max } => write!(
                f,
                "Too many static ports in device {}: found {}, at most {} supported",
                device, found, max
            ),
            ConfigError::MissingField { location, field } => {
                write!(f, "{}: mandatory field '{}' missing or mistyped", location, field)
            }
            ConfigError::InvalidField {
                location,
                field,
                source,
            } => write!(f, "{}: invalid '{}': {}", location, field, source),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::MalformedDocument(e) => Some(e),
            ConfigError::InvalidField { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Failure of a complete init run: either the document or a device.
#[derive(Debug)]
pub enum RunError {
    /// The document was rejected; no device was touched.
    Config(ConfigError),
    /// A device returned a negative status.
    Init(InitError),
}

impl RunError {
    /// Negative status code of the failure.
    pub fn code(&self) -> i32 {
        match self {
            RunError::Config(e) => e.code(),
            RunError::Init(e) => e.error.code(),
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        RunError::Config(e)
    }
}

impl From<InitError> for RunError {
    fn from(e: InitError) -> Self {
        RunError::Init(e)
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Config(e) => write!(f, "{}", e),
            RunError::Init(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::Config(e) => Some(e),
            RunError::Init(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use mvbc_rs::{ControlError, InitStatus, Step};

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ invalid").unwrap_err();
        let err: ConfigError = json_err.into();
        assert!(matches!(err, ConfigError::MalformedDocument(_)));
        assert_eq!(err.code(), -201);
    }

    #[test]
    fn test_legacy_codes() {
        assert_eq!(ConfigError::TooManyDevices { found: 5, max: 4 }.code(), -200);
        assert_eq!(ConfigError::NotAnObject.code(), -201);
        assert_eq!(ConfigError::MissingDevices.code(), -202);
        let missing = ConfigError::MissingField {
            location: FieldLocation::port(1, 3),
            field: "fcode",
        };
        assert_eq!(missing.code(), -202);
        assert_eq!(
            missing.to_string(),
            "device 1 port 3: mandatory field 'fcode' missing or mistyped"
        );
    }

    #[test]
    fn test_run_error_code() {
        let init = InitError {
            device_index: 0,
            device_path: "/dev/mvbc0".to_string(),
            step: Step::Run,
            error: ControlError::new(-7),
            status: InitStatus::empty(),
        };
        assert_eq!(RunError::from(init).code(), -7);
        assert_eq!(RunError::from(ConfigError::NotAnObject).code(), -201);
    }
}
