// src/lib.rs

#![cfg_attr(not(feature = "std"), no_std)]
#![doc = "Parses and validates MVB controller project configuration (JSON) files."]
#![doc = ""]
#![doc = "This `no_std + alloc` library turns a project document into the"]
#![doc = "`mvbc_rs::Project` descriptor tree consumed by the register encoder."]
#![doc = ""]
#![doc = "It supports:"]
#![doc = "- `load_project_from_str`: Parsing a JSON project document."]
#![doc = "- `parse_project`: Parsing any `ValueAccessor` document, keeping the partial result."]
#![doc = "- `init_from_file` (`std`): Loading a project file and configuring every device."]

extern crate alloc;

// --- Crate Modules ---

mod accessor;
mod error;
#[cfg(feature = "std")]
mod init;
mod parser;

// --- Public API Re-exports ---

pub use accessor::{ValueAccessor, ValueKind};
pub use error::{ConfigError, FieldLocation, RunError};
#[cfg(feature = "std")]
pub use init::init_from_file;
#[cfg(feature = "std")]
pub use parser::load_project_from_file;
pub use parser::{ParsedProject, load_project_from_str, load_project_from_value, parse_project};
