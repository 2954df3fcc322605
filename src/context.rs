//! The initialized audio subsystem.
//!
//! Everything starts from an [`Ao`]: it initializes the backend when created
//! and shuts it down when dropped. Driver queries and device opening are
//! methods on it, and every [`Device`] borrows it, so the subsystem cannot be
//! shut down while a device is still open:
//!
//! ```compile_fail
//! # fn demo<B: aout::Backend>(ao: aout::Ao<B>, format: aout::SampleFormat) -> aout::Result<()> {
//! let driver = ao.default_driver_id().ok_or(aout::Error::NoDriver)?;
//! let device = ao.open_live(driver, &format, &[])?;
//! ao.shutdown(); // error: `ao` is still borrowed by `device`
//! drop(device);
//! # Ok(())
//! # }
//! ```

use std::ffi::CString;

use crate::{Backend, Device, DeviceKind, Driver, DriverId, DriverOption, Error, OptionList};
use crate::{Result, SampleFormat};

/// Handle to an initialized audio subsystem.
pub struct Ao<B: Backend> {
    backend: B,
}

#[cfg(feature = "libao")]
impl Ao<crate::libao::LibAo> {
    /// Initializes the system libao.
    pub fn new() -> Self {
        Self::initialize(crate::libao::LibAo::new())
    }
}

#[cfg(feature = "libao")]
impl Default for Ao<crate::libao::LibAo> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> Ao<B> {
    /// Starts the audio subsystem behind `backend`. Must happen before any
    /// driver or device operation, which is why they are methods on the
    /// returned handle.
    pub fn initialize(backend: B) -> Self {
        // SAFETY: the backend is owned from here on and shut down exactly
        // once, in `Drop`.
        unsafe { backend.initialize() };
        #[cfg(feature = "tracing")]
        tracing::debug!("audio subsystem initialized");
        Self { backend }
    }

    /// Releases subsystem-wide resources. Same as dropping the handle.
    ///
    /// Driver metadata obtained earlier stays valid, it is owned by the
    /// caller. Devices cannot outlive this call.
    pub fn shutdown(self) {}

    pub(crate) fn backend(&self) -> &B {
        &self.backend
    }

    /// The subsystem's preferred driver, `None` if no usable driver exists.
    pub fn default_driver_id(&self) -> Option<DriverId> {
        DriverId::from_native(self.backend.default_driver_id())
    }

    /// Looks a driver up by its short name.
    pub fn driver_id(&self, short_name: &str) -> Option<DriverId> {
        let Ok(short_name) = CString::new(short_name) else {
            return None;
        };
        let id = DriverId::from_native(self.backend.driver_id(&short_name));
        #[cfg(feature = "tracing")]
        if id.is_none() {
            tracing::debug!(?short_name, "no driver with this short name");
        }
        id
    }

    /// Metadata of the driver with the given id.
    ///
    /// # Errors
    /// [`Error::NoDriver`] if the id is invalid.
    pub fn driver_info(&self, id: DriverId) -> Result<Driver> {
        let native = id.to_native().ok_or(Error::NoDriver)?;
        self.backend.driver_info(native).ok_or(Error::NoDriver)
    }

    /// Metadata of the driver with the given short name.
    ///
    /// # Errors
    /// [`Error::NoDriver`] if there is no such driver.
    pub fn driver(&self, short_name: &str) -> Result<Driver> {
        let id = self.driver_id(short_name).ok_or(Error::NoDriver)?;
        self.driver_info(id)
    }

    /// Every registered driver, in registration order. Computed anew on each
    /// call.
    pub fn drivers(&self) -> Vec<Driver> {
        self.backend.driver_info_list()
    }

    /// Opens a live output device.
    ///
    /// The option list and the duplicated channel matrix only live for the
    /// duration of the native call and are freed whether it succeeds or not.
    ///
    /// # Errors
    /// - [`Error::OutOfMemory`] if the option list could not be built; the
    ///   device is not opened.
    /// - [`Error::BadOption`] if an option or the channel matrix is invalid.
    /// - Any error the driver reports, for example [`Error::NotLive`] or
    ///   [`Error::OpenDevice`].
    pub fn open_live(
        &self,
        driver: DriverId,
        format: &SampleFormat,
        options: &[DriverOption],
    ) -> Result<Device<'_, B>> {
        let native_id = driver.to_native().ok_or(Error::NoDriver)?;
        let options = OptionList::build(&self.backend, options)?;
        let matrix = format.matrix_c_string()?;
        let native_format = format.to_native(matrix.as_deref())?;

        let handle = self
            .backend
            .open_live(native_id, &native_format, options.as_raw())
            .map_err(Error::from_native)
            .inspect_err(|_err| {
                #[cfg(feature = "tracing")]
                tracing::debug!(%driver, error = %_err, "could not open live device");
            })?;

        Ok(Device::new(self, handle, driver, DeviceKind::Live, format.clone()))
    }

    /// Opens a file output device writing to `path`. An existing file is only
    /// replaced if `overwrite` is set.
    ///
    /// The path, option list and channel matrix are duplicated only for the
    /// duration of the native call.
    ///
    /// # Errors
    /// Same as [`Ao::open_live`], plus [`Error::NotFile`] if the driver cannot
    /// write files and [`Error::OpenDevice`] if `path` cannot be opened.
    pub fn open_file(
        &self,
        driver: DriverId,
        path: impl AsRef<std::path::Path>,
        overwrite: bool,
        format: &SampleFormat,
        options: &[DriverOption],
    ) -> Result<Device<'_, B>> {
        let native_id = driver.to_native().ok_or(Error::NoDriver)?;
        let options = OptionList::build(&self.backend, options)?;
        let path = path_c_string(path.as_ref())?;
        let matrix = format.matrix_c_string()?;
        let native_format = format.to_native(matrix.as_deref())?;

        let handle = self
            .backend
            .open_file(
                native_id,
                &path,
                overwrite,
                &native_format,
                options.as_raw(),
            )
            .map_err(Error::from_native)
            .inspect_err(|_err| {
                #[cfg(feature = "tracing")]
                tracing::debug!(%driver, ?path, error = %_err, "could not open file device");
            })?;

        Ok(Device::new(self, handle, driver, DeviceKind::File, format.clone()))
    }
}

impl<B: Backend> Drop for Ao<B> {
    fn drop(&mut self) {
        // SAFETY: initialized in `initialize`. Devices borrow `self`, so none
        // can still be open.
        unsafe { self.backend.shutdown() };
        #[cfg(feature = "tracing")]
        tracing::debug!("audio subsystem shut down");
    }
}

impl<B: Backend> core::fmt::Debug for Ao<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Ao").finish_non_exhaustive()
    }
}

#[cfg(unix)]
fn path_c_string(path: &std::path::Path) -> Result<CString> {
    use std::os::unix::ffi::OsStrExt;
    CString::new(path.as_os_str().as_bytes()).map_err(|_| Error::OpenDevice)
}

#[cfg(not(unix))]
fn path_c_string(path: &std::path::Path) -> Result<CString> {
    let path = path.to_str().ok_or(Error::OpenDevice)?;
    CString::new(path).map_err(|_| Error::OpenDevice)
}
