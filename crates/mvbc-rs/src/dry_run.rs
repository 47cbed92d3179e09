// crates/mvbc-rs/src/dry_run.rs
//! A [`DeviceControl`] that talks to no hardware.
//!
//! It records every submitted command and answers with scripted results, which
//! makes it usable both for offline inspection of a project's register payloads
//! and as the simulated controller in tests.

use crate::hal::{Command, CommandKind, ControlError, DeviceControl};
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

/// Device nodes of the MVBC driver live below this prefix.
pub const DEVICE_NODE_PREFIX: &str = "/dev";

/// A command as it was handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SubmittedCommand {
    pub device_path: String,
    pub command: Command,
}

/// Records commands and returns `Ok(0)` unless told otherwise.
#[derive(Debug, Default)]
pub struct DryRunControl {
    submitted: Vec<SubmittedCommand>,
    responses: BTreeMap<(String, CommandKind), Result<u32, ControlError>>,
}

impl DryRunControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the result of every `kind` command sent to `device_path`.
    pub fn respond(
        &mut self,
        device_path: &str,
        kind: CommandKind,
        result: Result<u32, ControlError>,
    ) {
        self.responses
            .insert((String::from(device_path), kind), result);
    }

    /// Every command seen so far, including rejected ones, in submission order.
    pub fn submitted(&self) -> &[SubmittedCommand] {
        &self.submitted
    }

    pub fn into_submitted(self) -> Vec<SubmittedCommand> {
        self.submitted
    }
}

impl DeviceControl for DryRunControl {
    fn submit(&mut self, device_path: &str, command: &Command) -> Result<u32, ControlError> {
        self.submitted.push(SubmittedCommand {
            device_path: String::from(device_path),
            command: command.clone(),
        });

        // The driver can only be reached through its device node.
        if !device_path.starts_with(DEVICE_NODE_PREFIX) {
            log::error!("Refusing device path '{}' outside {}", device_path, DEVICE_NODE_PREFIX);
            return Err(ControlError::GENERIC);
        }

        self.responses
            .get(&(String::from(device_path), command.kind()))
            .copied()
            .unwrap_or(Ok(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_and_answers() {
        let mut control = DryRunControl::new();
        control.respond("/dev/mvbc0", CommandKind::Run, Err(ControlError::new(-5)));

        assert_eq!(control.submit("/dev/mvbc0", &Command::Shutdown), Ok(0));
        assert_eq!(
            control.submit("/dev/mvbc0", &Command::Run),
            Err(ControlError::new(-5))
        );
        assert_eq!(control.submit("/dev/mvbc1", &Command::Run), Ok(0));
        assert_eq!(control.submitted().len(), 3);
        assert_eq!(control.submitted()[1].device_path, "/dev/mvbc0");
    }

    #[test]
    fn test_rejects_paths_outside_dev() {
        let mut control = DryRunControl::new();
        assert_eq!(
            control.submit("/tmp/mvbc0", &Command::Shutdown),
            Err(ControlError::GENERIC)
        );
        assert_eq!(control.submitted().len(), 1);
    }
}
