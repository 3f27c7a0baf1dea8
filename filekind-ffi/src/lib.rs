//! C bindings for filekind.
//!
//! A thin boundary over [`filekind::Session`]: every function returns an
//! [`FkStatus`] and writes its result through an out-pointer, so failures are
//! never reported as null returns. No classification logic lives here.
//!
//! # Ownership
//!
//! - A session handle from `filekind_session_new` is freed with
//!   `filekind_session_free`, exactly once. `filekind_session_release` drops
//!   the model early but leaves the handle valid; further identify calls on
//!   it return `SessionClosed`.
//! - Every `FkTypeInfo` written by an identify call is owned by the caller
//!   and freed with `filekind_typeinfo_free`. It does not borrow from the
//!   session and may outlive it.
//! - A session handle may be shared between threads for identify calls.
//!
//! # Example
//!
//! ```c
//! FkSession *session = NULL;
//! if (filekind_session_new(&session) != FK_OK) { ... }
//!
//! FkTypeInfo info;
//! FkStatus status = filekind_identify_path(session, "photo.bin", &info);
//! if (status == FK_OK) {
//!     printf("%s %s\n", info.label, info.mime_type);
//!     for (size_t i = 0; i < info.extensions_len; i++) {
//!         printf("  .%s\n", info.extensions[i]);
//!     }
//!     filekind_typeinfo_free(&info);
//! } else {
//!     fprintf(stderr, "%s\n", filekind_status_message((uint32_t)status));
//! }
//!
//! filekind_session_release(session);
//! filekind_session_free(session);
//! ```

mod status;
mod types;

use std::ffi::{CStr, c_char};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::slice;

use filekind::{Session, TypeInfo};

pub use status::{FkStatus, filekind_status_message};
pub use types::FkTypeInfo;

/// Opaque session handle.
pub struct FkSession {
    inner: Session,
}

/// Run `f`, turning errors and panics into a status code.
fn guard(f: impl FnOnce() -> Result<(), FkStatus>) -> FkStatus {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(())) => FkStatus::Ok,
        Ok(Err(status)) => status,
        Err(_) => {
            tracing::error!("panic caught at the C boundary");
            FkStatus::Internal
        },
    }
}

fn status_of(err: filekind::Error) -> FkStatus {
    tracing::debug!(error = %err, "call failed");
    FkStatus::from(&err)
}

unsafe fn session_ref<'a>(session: *const FkSession) -> Result<&'a Session, FkStatus> {
    // SAFETY: caller passes null or a live handle from `filekind_session_new`.
    unsafe { session.as_ref() }
        .map(|handle| &handle.inner)
        .ok_or(FkStatus::InvalidInput)
}

unsafe fn write_info(out: *mut FkTypeInfo, info: &TypeInfo) {
    // SAFETY: caller checked `out` is non-null and writable.
    unsafe { out.write(FkTypeInfo::from(info)) };
}

/// Load the built-in model into a new session and store the handle in `*out`.
///
/// # Safety
///
/// `out` must be null or valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn filekind_session_new(out: *mut *mut FkSession) -> FkStatus {
    guard(|| {
        if out.is_null() {
            return Err(FkStatus::InvalidInput);
        }
        let inner = Session::new().map_err(status_of)?;
        let handle = Box::into_raw(Box::new(FkSession { inner }));
        unsafe { out.write(handle) };
        Ok(())
    })
}

/// Drop the session's model, waiting for in-flight calls. Idempotent.
///
/// # Safety
///
/// `session` must be null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn filekind_session_release(session: *const FkSession) -> FkStatus {
    guard(|| {
        unsafe { session_ref(session) }?.release();
        Ok(())
    })
}

/// Free a session handle. Null is ignored.
///
/// # Safety
///
/// `session` must be null or a live handle not used after this call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn filekind_session_free(session: *mut FkSession) {
    if session.is_null() {
        return;
    }
    let _ = catch_unwind(AssertUnwindSafe(|| {
        // SAFETY: produced by `Box::into_raw` in `filekind_session_new`.
        let handle = unsafe { Box::from_raw(session) };
        handle.inner.release();
    }));
}

/// Identify the file at `path`, a NUL-terminated UTF-8 string.
///
/// # Safety
///
/// `session` must be null or a live handle, `path` null or a valid C string,
/// `out` null or valid for writes. `*out` is only written on `Ok`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn filekind_identify_path(
    session: *const FkSession,
    path: *const c_char,
    out: *mut FkTypeInfo,
) -> FkStatus {
    guard(|| {
        let session = unsafe { session_ref(session) }?;
        if path.is_null() || out.is_null() {
            return Err(FkStatus::InvalidInput);
        }
        let path = unsafe { CStr::from_ptr(path) }
            .to_str()
            .map_err(|_| FkStatus::InvalidInput)?;
        let info = session.identify_path(path).map_err(status_of)?;
        unsafe { write_info(out, &info) };
        Ok(())
    })
}

/// Identify `len` bytes at `data`. `data` may be null when `len` is zero.
///
/// # Safety
///
/// `session` must be null or a live handle, `data` valid for `len` bytes of
/// reads, `out` null or valid for writes. `*out` is only written on `Ok`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn filekind_identify_bytes(
    session: *const FkSession,
    data: *const u8,
    len: usize,
    out: *mut FkTypeInfo,
) -> FkStatus {
    guard(|| {
        let session = unsafe { session_ref(session) }?;
        if out.is_null() || (data.is_null() && len > 0) {
            return Err(FkStatus::InvalidInput);
        }
        let bytes: &[u8] = if len == 0 {
            &[]
        } else {
            unsafe { slice::from_raw_parts(data, len) }
        };
        let info = session.identify_bytes(bytes).map_err(status_of)?;
        unsafe { write_info(out, &info) };
        Ok(())
    })
}

/// Free the strings inside `info` and null them out. Safe to call twice.
///
/// # Safety
///
/// `info` must be null or point to a struct written by an identify call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn filekind_typeinfo_free(info: *mut FkTypeInfo) {
    if let Some(info) = unsafe { info.as_mut() } {
        unsafe { info.free_fields() };
    }
}
