// crates/mvbc-rs-config/src/parser.rs

mod device;
mod port;
mod utils;

use crate::accessor::{ValueAccessor, ValueKind};
use crate::error::{ConfigError, FieldLocation};
use log::{debug, error, info};
use mvbc_rs::types::MAX_DEVICES;
use mvbc_rs::Project;
use serde_json::Value;

const DEVICES: &str = "project.devices";

/// A parse result that keeps whatever was built before the first error.
#[derive(Debug)]
pub struct ParsedProject {
    /// Devices parsed successfully, in document order, up to the first error.
    pub project: Project,
    /// The error that stopped parsing, if any.
    pub error: Option<ConfigError>,
}

impl ParsedProject {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Discards the partial project if parsing stopped early.
    pub fn into_result(self) -> Result<Project, ConfigError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.project),
        }
    }
}

/// Parses a project JSON string slice into a descriptor tree.
///
/// # Errors
/// Returns a `ConfigError` if the JSON is malformed, the document shape is
/// wrong, or any device or static port is rejected.
pub fn load_project_from_str(json: &str) -> Result<Project, ConfigError> {
    let root: Value = serde_json::from_str(json)?;
    load_project_from_value(&root)
}

/// Same as [`load_project_from_str`] for an already decoded document.
pub fn load_project_from_value<A: ValueAccessor>(root: &A) -> Result<Project, ConfigError> {
    parse_project(root).into_result()
}

/// Reads and parses a project file.
#[cfg(feature = "std")]
pub fn load_project_from_file(path: &std::path::Path) -> Result<Project, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        error!("Cannot read project file '{}': {}", path.display(), e);
        ConfigError::FileRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
    })?;
    load_project_from_str(&content)
}

/// Walks the document and builds the project, stopping at the first fatal error.
pub fn parse_project<A: ValueAccessor>(root: &A) -> ParsedProject {
    let mut project = Project::default();

    if root.kind() != ValueKind::Object {
        error!("Project document root is not a JSON object");
        return ParsedProject {
            project,
            error: Some(ConfigError::NotAnObject),
        };
    }

    if let Some(name) = root.get_str("project.name") {
        project.name = utils::bounded(name, "project.name");
    }
    if let Some(version) = root.get_str("project.version") {
        project.version = utils::bounded(version, "project.version");
    }
    info!("Project '{}' version '{}'", project.name, project.version);

    let Some(count) = root.get_array_len(DEVICES) else {
        error!("'{}' array not found", DEVICES);
        return ParsedProject {
            project,
            error: Some(ConfigError::MissingDevices),
        };
    };

    if count > MAX_DEVICES {
        error!("{} devices found, at most {} supported", count, MAX_DEVICES);
        return ParsedProject {
            project,
            error: Some(ConfigError::TooManyDevices {
                found: count,
                max: MAX_DEVICES,
            }),
        };
    }
    debug!("{} device(s) found", count);

    for index in 0..count {
        let result = match root.get_array_element(DEVICES, index) {
            Some(entry) => device::parse_device(entry, index),
            None => Err(utils::missing(FieldLocation::device(index), "path")),
        };
        match result {
            Ok(device) => project.devices.push(device),
            Err(e) => {
                error!("Project parsing stopped at device {}", index);
                return ParsedProject {
                    project,
                    error: Some(e),
                };
            }
        }
    }

    ParsedProject {
        project,
        error: None,
    }
}
