// crates/mvbc-rs-config/src/init.rs

//! One-call bring-up: read a project file, then configure every controller in it.

use crate::error::RunError;
use crate::parser::load_project_from_file;
use log::info;
use mvbc_rs::types::DEFAULT_PROJECT_CONFIG_FILE;
use mvbc_rs::{DeviceControl, InitStatus, configure_project};
use std::path::Path;

/// Parses the project at `path` (or [`DEFAULT_PROJECT_CONFIG_FILE`]) and
/// configures its devices through `control`.
///
/// A rejected document is reported before any command reaches a device.
pub fn init_from_file<C: DeviceControl + ?Sized>(
    path: Option<&Path>,
    control: &mut C,
) -> Result<InitStatus, RunError> {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_PROJECT_CONFIG_FILE));
    info!("Loading project file '{}'", path.display());

    let project = load_project_from_file(path)?;
    Ok(configure_project(&project, control)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use mvbc_rs::DryRunControl;

    #[test]
    fn test_unreadable_file_touches_no_device() {
        let mut control = DryRunControl::new();
        let err = init_from_file(Some(Path::new("/nonexistent/mvbc.json")), &mut control)
            .unwrap_err();
        assert!(matches!(err, RunError::Config(ConfigError::FileRead { .. })));
        assert_eq!(err.code(), -201);
        assert!(control.submitted().is_empty());
    }
}
