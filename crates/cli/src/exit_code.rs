//! Exit code definitions for the s3-client CLI
//!
//! Scripts only need to tell success from failure; the error message on
//! stderr carries the detail.

/// Exit codes for the s3-client CLI application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Operation completed successfully
    Success = 0,

    /// Any error: usage, address, local filesystem or remote service
    GeneralError = 1,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }
}
