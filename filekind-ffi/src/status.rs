//! Status codes returned across the C boundary.

use std::ffi::{CStr, c_char};

/// Outcome of an exported call. `Ok` is zero; every other value names one
/// kind of [`filekind::Error`].
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FkStatus {
    Ok = 0,
    InvalidInput = 1,
    SessionClosed = 2,
    FileNotFound = 3,
    Io = 4,
    ModelLoad = 5,
    Inference = 6,
    UnknownLabel = 7,
    SessionBusy = 8,
    Config = 9,
    /// A panic was caught at the boundary.
    Internal = 255,
}

impl From<&filekind::Error> for FkStatus {
    fn from(err: &filekind::Error) -> Self {
        use filekind::Error;
        match err {
            Error::InvalidInput(_) => FkStatus::InvalidInput,
            Error::SessionClosed => FkStatus::SessionClosed,
            Error::FileNotFound(_) => FkStatus::FileNotFound,
            Error::Io(_) => FkStatus::Io,
            Error::ModelLoad(_) => FkStatus::ModelLoad,
            Error::Inference(_) => FkStatus::Inference,
            Error::UnknownLabel(_) => FkStatus::UnknownLabel,
            Error::SessionBusy => FkStatus::SessionBusy,
            Error::Config(_) => FkStatus::Config,
        }
    }
}

impl FkStatus {
    pub fn message(self) -> &'static CStr {
        match self {
            FkStatus::Ok => c"ok",
            FkStatus::InvalidInput => c"invalid input",
            FkStatus::SessionClosed => c"session has been released",
            FkStatus::FileNotFound => c"file not found",
            FkStatus::Io => c"I/O error",
            FkStatus::ModelLoad => c"failed to load model",
            FkStatus::Inference => c"inference failed",
            FkStatus::UnknownLabel => c"model produced an unregistered label",
            FkStatus::SessionBusy => c"session is busy",
            FkStatus::Config => c"invalid configuration",
            FkStatus::Internal => c"internal error",
        }
    }
}

impl FkStatus {
    /// Status for a raw code received from C; `None` for values no call
    /// returns.
    pub fn from_code(code: u32) -> Option<Self> {
        let status = match code {
            0 => FkStatus::Ok,
            1 => FkStatus::InvalidInput,
            2 => FkStatus::SessionClosed,
            3 => FkStatus::FileNotFound,
            4 => FkStatus::Io,
            5 => FkStatus::ModelLoad,
            6 => FkStatus::Inference,
            7 => FkStatus::UnknownLabel,
            8 => FkStatus::SessionBusy,
            9 => FkStatus::Config,
            255 => FkStatus::Internal,
            _ => return None,
        };
        Some(status)
    }
}

/// Static, NUL-terminated description of a status code. Never null; the
/// caller must not free it. Codes no call returns get "unknown status".
#[unsafe(no_mangle)]
pub extern "C" fn filekind_status_message(code: u32) -> *const c_char {
    match FkStatus::from_code(code) {
        Some(status) => status.message().as_ptr(),
        None => c"unknown status".as_ptr(),
    }
}
