#![allow(dead_code)]
// in separate folder so its not ran as integration test
//
// An in-memory native layer. Records every call that crosses the backend
// boundary so tests can check what the safe layer handed over and that
// everything it allocated got freed.
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::ffi::CStr;
use std::os::raw::c_int;

use aout::{code, Backend, ByteOrder, Driver, DriverId, DriverKind, NativeFormat};

/// Copy of a `NativeFormat` that outlives the open call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenFormat {
    pub bits: c_int,
    pub rate: c_int,
    pub channels: c_int,
    pub byte_format: c_int,
    pub matrix: Option<String>,
}

impl From<&NativeFormat<'_>> for SeenFormat {
    fn from(format: &NativeFormat<'_>) -> Self {
        Self {
            bits: format.bits,
            rate: format.rate,
            channels: format.channels,
            byte_format: format.byte_format,
            matrix: format
                .matrix
                .map(|matrix| matrix.to_string_lossy().into_owned()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenCall {
    pub driver: c_int,
    pub path: Option<String>,
    pub overwrite: bool,
    pub format: SeenFormat,
    pub options: Vec<(String, String)>,
}

#[derive(Debug)]
pub struct FakeOptions {
    id: usize,
    pairs: Vec<(String, String)>,
}

#[derive(Debug)]
pub struct FakeDevice {
    pub id: usize,
}

pub struct FakeBackend {
    drivers: Vec<Driver>,
    default_driver: Option<c_int>,

    pub initialized: Cell<usize>,
    pub shut_down: Cell<usize>,

    lists_created: Cell<usize>,
    lists_freed: RefCell<Vec<usize>>,
    appends: Cell<usize>,
    fail_append_at: Cell<Option<usize>>,

    pub opens: RefCell<Vec<OpenCall>>,
    devices_opened: Cell<usize>,
    /// `(device id, bytes)` for every `play`.
    pub played: RefCell<Vec<(usize, Vec<u8>)>>,
    pub reject_play: Cell<bool>,
    pub closed: RefCell<Vec<usize>>,
    pub fail_close: Cell<bool>,
}

impl FakeBackend {
    /// A live `null` driver (the default) and a file `raw` driver.
    pub fn new() -> Self {
        Self::with_drivers(
            vec![
                Driver::new(DriverId::new(0), DriverKind::Live, "null")
                    .with_name("Null output")
                    .with_author("Test Suite")
                    .with_comment("discards everything")
                    .with_options(["debug"]),
                Driver::new(DriverId::new(1), DriverKind::File, "raw")
                    .with_name("Raw sample output")
                    .with_preferred_byte_order(ByteOrder::Little)
                    .with_priority(10)
                    .with_options(["byteorder", "debug"]),
            ],
            Some(0),
        )
    }

    /// Drivers get ids in list order.
    pub fn with_drivers(drivers: Vec<Driver>, default_driver: Option<c_int>) -> Self {
        Self {
            drivers,
            default_driver,
            initialized: Cell::new(0),
            shut_down: Cell::new(0),
            lists_created: Cell::new(0),
            lists_freed: RefCell::new(Vec::new()),
            appends: Cell::new(0),
            fail_append_at: Cell::new(None),
            opens: RefCell::new(Vec::new()),
            devices_opened: Cell::new(0),
            played: RefCell::new(Vec::new()),
            reject_play: Cell::new(false),
            closed: RefCell::new(Vec::new()),
            fail_close: Cell::new(false),
        }
    }

    pub fn with_default_driver(mut self, default_driver: Option<c_int>) -> Self {
        self.default_driver = default_driver;
        self
    }

    /// The `n`th append from now on (0 based) runs out of memory.
    pub fn fail_append_at(&self, n: usize) {
        self.fail_append_at.set(Some(self.appends.get() + n));
    }

    pub fn lists_created(&self) -> usize {
        self.lists_created.get()
    }

    pub fn lists_freed(&self) -> usize {
        self.lists_freed.borrow().len()
    }

    /// Every list freed exactly once.
    pub fn all_lists_released_once(&self) -> bool {
        let freed = self.lists_freed.borrow();
        let unique: HashSet<_> = freed.iter().collect();
        unique.len() == freed.len() && freed.len() == self.lists_created.get()
    }

    pub fn open_count(&self) -> usize {
        self.opens.borrow().len()
    }

    pub fn last_open(&self) -> Option<OpenCall> {
        self.opens.borrow().last().cloned()
    }

    /// Total bytes submitted in each `play` call, in order.
    pub fn played_lengths(&self) -> Vec<usize> {
        self.played.borrow().iter().map(|(_, b)| b.len()).collect()
    }

    fn driver(&self, id: c_int) -> Option<&Driver> {
        usize::try_from(id).ok().and_then(|id| self.drivers.get(id))
    }

    fn check_options(&self, options: &FakeOptions) -> Result<(), c_int> {
        for (key, value) in &options.pairs {
            if key == "byteorder" && !matches!(value.as_str(), "native" | "big" | "little") {
                return Err(code::BAD_OPTION);
            }
        }
        Ok(())
    }

    fn open(&self, call: OpenCall, wanted: DriverKind, options: &FakeOptions) -> Result<FakeDevice, c_int> {
        let driver = self.driver(call.driver).cloned();
        self.opens.borrow_mut().push(call.clone());

        let driver = driver.ok_or(code::NO_DRIVER)?;
        match (wanted, driver.kind()) {
            (DriverKind::Live, DriverKind::File) => return Err(code::NOT_LIVE),
            (DriverKind::File, DriverKind::Live) => return Err(code::NOT_FILE),
            _ => {}
        }
        self.check_options(options)?;
        if call.format.bits != 8 && call.format.bits != 16 {
            return Err(code::BAD_FORMAT);
        }
        match call.path.as_deref() {
            Some("") => return Err(code::OPEN_FILE),
            Some(path) if path.ends_with("exists.raw") && !call.overwrite => {
                return Err(code::FILE_EXISTS)
            }
            _ => {}
        }

        let id = self.devices_opened.get();
        self.devices_opened.set(id + 1);
        Ok(FakeDevice { id })
    }
}

fn pairs(options: &FakeOptions) -> Vec<(String, String)> {
    options.pairs.clone()
}

impl Backend for FakeBackend {
    type Device = FakeDevice;
    type Options = FakeOptions;

    unsafe fn initialize(&self) {
        self.initialized.set(self.initialized.get() + 1);
    }

    unsafe fn shutdown(&self) {
        self.shut_down.set(self.shut_down.get() + 1);
    }

    fn default_driver_id(&self) -> c_int {
        self.default_driver.unwrap_or(-1)
    }

    fn driver_id(&self, short_name: &CStr) -> c_int {
        self.drivers
            .iter()
            .position(|d| d.short_name().as_bytes() == short_name.to_bytes())
            .map_or(-1, |id| id as c_int)
    }

    fn driver_info(&self, id: c_int) -> Option<Driver> {
        self.driver(id).cloned()
    }

    fn driver_info_list(&self) -> Vec<Driver> {
        self.drivers.clone()
    }

    fn new_options(&self) -> FakeOptions {
        let id = self.lists_created.get();
        self.lists_created.set(id + 1);
        FakeOptions {
            id,
            pairs: Vec::new(),
        }
    }

    fn append_option(&self, options: &mut FakeOptions, key: &CStr, value: &CStr) -> bool {
        let n = self.appends.get();
        self.appends.set(n + 1);
        if self.fail_append_at.get() == Some(n) {
            return false;
        }
        options.pairs.push((
            key.to_string_lossy().into_owned(),
            value.to_string_lossy().into_owned(),
        ));
        true
    }

    fn free_options(&self, options: FakeOptions) {
        self.lists_freed.borrow_mut().push(options.id);
    }

    fn open_live(
        &self,
        driver_id: c_int,
        format: &NativeFormat<'_>,
        options: &FakeOptions,
    ) -> Result<FakeDevice, c_int> {
        let call = OpenCall {
            driver: driver_id,
            path: None,
            overwrite: false,
            format: format.into(),
            options: pairs(options),
        };
        self.open(call, DriverKind::Live, options)
    }

    fn open_file(
        &self,
        driver_id: c_int,
        path: &CStr,
        overwrite: bool,
        format: &NativeFormat<'_>,
        options: &FakeOptions,
    ) -> Result<FakeDevice, c_int> {
        let call = OpenCall {
            driver: driver_id,
            path: Some(path.to_string_lossy().into_owned()),
            overwrite,
            format: format.into(),
            options: pairs(options),
        };
        self.open(call, DriverKind::File, options)
    }

    fn play(&self, device: &mut FakeDevice, samples: &[u8]) -> bool {
        self.played.borrow_mut().push((device.id, samples.to_vec()));
        !self.reject_play.get()
    }

    fn close(&self, device: FakeDevice) -> bool {
        self.closed.borrow_mut().push(device.id);
        !self.fail_close.get()
    }
}

// The checks below lean on the fake's own bookkeeping.
#[test]
fn fake_reports_unknown_names_as_negative() {
    let fake = FakeBackend::new();
    assert_eq!(fake.driver_id(c"raw"), 1);
    assert_eq!(fake.driver_id(c"pulse"), -1);
}

#[test]
fn fake_detects_double_free() {
    let fake = FakeBackend::new();
    let list = fake.new_options();
    let copy = FakeOptions {
        id: list.id,
        pairs: Vec::new(),
    };
    fake.free_options(list);
    assert!(fake.all_lists_released_once());
    fake.free_options(copy);
    assert!(!fake.all_lists_released_once());
}
