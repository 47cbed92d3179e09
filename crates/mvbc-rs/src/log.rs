use alloc::format;
use alloc::string::String;

/// Trait for structs that provide metadata for logging
pub trait LogMetadata {
    fn meta(&self) -> String;
}

/// Identifies the controller a log line belongs to.
pub struct DeviceLogContext<'a> {
    /// Position of the device in the project file.
    pub index: usize,
    pub path: &'a str,
}

impl LogMetadata for DeviceLogContext<'_> {
    fn meta(&self) -> String {
        format!("device[{}] {}", self.index, self.path)
    }
}

// =============================================
// Logging Macros (namespaced under crate::log)
// =============================================

// ===== dev_info! =====
macro_rules! dev_info {
    ($ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {{
        let meta = $crate::log::LogMetadata::meta(&$ctx);
        log::info!(concat!("[{}] ", $fmt), meta $(, $($arg)+)?);
    }};
}

// ===== dev_warn! =====
macro_rules! dev_warn {
    ($ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {{
        let meta = $crate::log::LogMetadata::meta(&$ctx);
        log::warn!(concat!("[{}] ", $fmt), meta $(, $($arg)+)?);
    }};
}

// ===== dev_error! =====
macro_rules! dev_error {
    ($ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {{
        let meta = $crate::log::LogMetadata::meta(&$ctx);
        log::error!(concat!("[{}] ", $fmt), meta $(, $($arg)+)?);
    }};
}

// ===== dev_debug! =====
macro_rules! dev_debug {
    ($ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {{
        let meta = $crate::log::LogMetadata::meta(&$ctx);
        log::debug!(concat!("[{}] ", $fmt), meta $(, $($arg)+)?);
    }};
}

// Re-export macros for use in other files
pub(crate) use dev_debug;
pub(crate) use dev_error;
pub(crate) use dev_info;
pub(crate) use dev_warn;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_context_meta() {
        let ctx = DeviceLogContext {
            index: 2,
            path: "/dev/mvbc2",
        };
        assert_eq!(ctx.meta(), "device[2] /dev/mvbc2");
    }
}
