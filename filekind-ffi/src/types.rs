//! C-compatible result structure.

use std::ffi::{CString, c_char};
use std::ptr;

use filekind::TypeInfo;

/// Owned copy of a [`TypeInfo`]. Every string is NUL-terminated and owned by
/// the struct; release it with `filekind_typeinfo_free`.
#[repr(C)]
#[derive(Debug)]
pub struct FkTypeInfo {
    pub label: *mut c_char,
    pub mime_type: *mut c_char,
    pub group: *mut c_char,
    pub description: *mut c_char,
    /// `extensions_len` extensions without the dot, canonical first. Null
    /// when there are none.
    pub extensions: *mut *mut c_char,
    pub extensions_len: usize,
    pub is_text: bool,
}

/// Registry strings never contain NUL, but an interior NUL must not become
/// undefined behaviour, so it is cut off there.
fn to_c_string(value: &str) -> *mut c_char {
    let bytes = value.as_bytes();
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    match CString::new(&bytes[..end]) {
        Ok(s) => s.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

unsafe fn free_c_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        // SAFETY: produced by `CString::into_raw` in `to_c_string`.
        drop(unsafe { CString::from_raw(ptr) });
    }
}

fn to_c_array(values: &[String]) -> (*mut *mut c_char, usize) {
    if values.is_empty() {
        return (ptr::null_mut(), 0);
    }
    let array: Box<[*mut c_char]> = values.iter().map(|v| to_c_string(v)).collect();
    let len = array.len();
    (Box::into_raw(array).cast::<*mut c_char>(), len)
}

unsafe fn free_c_array(array: *mut *mut c_char, len: usize) {
    if array.is_null() {
        return;
    }
    // SAFETY: produced by `Box::into_raw` in `to_c_array` with this length.
    let array = unsafe { Box::from_raw(ptr::slice_from_raw_parts_mut(array, len)) };
    for &entry in array.iter() {
        unsafe { free_c_string(entry) };
    }
}

impl From<&TypeInfo> for FkTypeInfo {
    fn from(info: &TypeInfo) -> Self {
        let (extensions, extensions_len) = to_c_array(info.extensions());
        Self {
            label: to_c_string(info.label()),
            mime_type: to_c_string(info.mime_type()),
            group: to_c_string(info.group()),
            description: to_c_string(info.description()),
            extensions,
            extensions_len,
            is_text: info.is_text(),
        }
    }
}

impl FkTypeInfo {
    /// # Safety
    ///
    /// `self` must have been built by the `From<&TypeInfo>` conversion and
    /// not freed before.
    pub(crate) unsafe fn free_fields(&mut self) {
        for field in [
            &mut self.label,
            &mut self.mime_type,
            &mut self.group,
            &mut self.description,
        ] {
            unsafe { free_c_string(*field) };
            *field = ptr::null_mut();
        }
        unsafe { free_c_array(self.extensions, self.extensions_len) };
        self.extensions = ptr::null_mut();
        self.extensions_len = 0;
    }
}
