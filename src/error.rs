//! Application-level error type.
//!
//! Every failure that reaches `main` is an [`AppError`]: a message for stderr
//! plus the process exit code. Component errors (e.g. [`crate::io::LoadError`])
//! convert into it at the module boundary.
//!
//! Exit codes:
//! - `1` no data file could be obtained (missing local file, download failure)
//! - `2` I/O, config or malformed-input errors
//! - `3` a selected label is not in the series collection
//! - `4` chart rendering failed

pub const EXIT_NO_DATA: u8 = 1;
pub const EXIT_INPUT: u8 = 2;
pub const EXIT_LOOKUP: u8 = 3;
pub const EXIT_RENDER: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn no_data(message: impl Into<String>) -> Self {
        Self::new(EXIT_NO_DATA, message)
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::new(EXIT_INPUT, message)
    }

    /// A selected label that the loaded collection does not contain.
    pub fn unknown_label(label: &str) -> Self {
        Self::new(EXIT_LOOKUP, format!("Unknown label '{label}': not present in the loaded dataset."))
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::new(EXIT_RENDER, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
