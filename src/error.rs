//! Errors reported by drivers and devices.
//!
//! The native layer reports failures as a null handle plus an integer code.
//! Those codes are mapped to [`Error`] at the boundary with
//! [`Error::from_native`]; no raw code is ever handed to the caller.

use std::os::raw::c_int;

use crate::common::assert_error_traits;

/// Failure codes used by the native driver interface.
///
/// Backends implemented outside this crate return these from their open
/// calls.
pub mod code {
    use std::os::raw::c_int;

    /// No driver corresponds to the driver id.
    pub const NO_DRIVER: c_int = 1;
    /// The driver is not a file output driver.
    pub const NOT_FILE: c_int = 2;
    /// The driver is not a live output driver.
    pub const NOT_LIVE: c_int = 3;
    /// A valid option key has an invalid value.
    pub const BAD_OPTION: c_int = 4;
    /// The device could not be opened.
    pub const OPEN_DEVICE: c_int = 5;
    /// The output file could not be opened.
    pub const OPEN_FILE: c_int = 6;
    /// The output file exists and overwriting was not requested.
    pub const FILE_EXISTS: c_int = 7;
    /// The sample format is not supported by the driver.
    pub const BAD_FORMAT: c_int = 8;
    /// Unspecified failure.
    pub const FAIL: c_int = 100;
}

/// Error opening or configuring an output device.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// The referenced driver id does not exist.
    #[error("no driver corresponds to driver id")]
    NoDriver,
    /// The driver does not support live playback.
    #[error("this driver is not a live output device")]
    NotLive,
    /// The driver does not support file output.
    #[error("this driver is not a file output driver")]
    NotFile,
    /// A recognized option key was given an invalid value.
    #[error("a valid option key has an invalid value")]
    BadOption,
    /// The underlying device or file could not be opened.
    #[error("cannot open the device")]
    OpenDevice,
    /// Unspecified native failure.
    #[error("libao failure")]
    Fail,
    /// Building the option list ran out of memory.
    #[error("out of memory while building the option list")]
    OutOfMemory,
}
assert_error_traits! {Error}

impl Error {
    /// Maps a native failure code to its error kind.
    ///
    /// Codes without a dedicated kind become [`Error::Fail`]. Failures to open
    /// the output file, including refusing to overwrite one, are reported as
    /// [`Error::OpenDevice`].
    pub fn from_native(code: c_int) -> Self {
        match code {
            code::NO_DRIVER => Error::NoDriver,
            code::NOT_FILE => Error::NotFile,
            code::NOT_LIVE => Error::NotLive,
            code::BAD_OPTION => Error::BadOption,
            code::OPEN_DEVICE | code::OPEN_FILE | code::FILE_EXISTS => Error::OpenDevice,
            _ => Error::Fail,
        }
    }
}

/// Result type used throughout this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
