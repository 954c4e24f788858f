use core::ffi::c_void;
use core::ptr::{self, NonNull};

use tracing::trace;
use widestring::{U16CStr, U16CString};
use windows_sys::Win32::Foundation::{
    E_NOTIMPL, ERROR_CALL_NOT_IMPLEMENTED, ERROR_NOT_SUPPORTED, ERROR_PROC_NOT_FOUND, GetLastError,
    LocalFree,
};
use windows_sys::Win32::Security::Authorization::ConvertSidToStringSidW;
use windows_sys::Win32::Security::Isolation::DeriveAppContainerSidFromAppContainerName;
use windows_sys::Win32::Security::{FreeSid, PSID};

use super::IdentitySubsystem;
use crate::error::{ConversionError, Unavailable, hresult_from_win32};
use crate::{ContainerName, Error, NameError, Sid};

/// The Windows identity subsystem (`userenv` / `advapi32`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostSubsystem;

impl HostSubsystem {
    /// The host subsystem.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// A SID allocated by `DeriveAppContainerSidFromAppContainerName`, freed with
/// `FreeSid` on drop.
#[derive(Debug)]
pub struct DerivedSid {
    ptr: NonNull<c_void>,
}

impl AsRef<Sid> for DerivedSid {
    #[inline]
    fn as_ref(&self) -> &Sid {
        // SAFETY: `ptr` is a SID allocated by the host, alive until `drop`.
        unsafe { Sid::from_raw(self.ptr.as_ptr()) }
    }
}

impl Drop for DerivedSid {
    #[inline]
    fn drop(&mut self) {
        // SAFETY: `ptr` was returned by DeriveAppContainerSidFromAppContainerName,
        // whose contract is to release it with FreeSid, and is freed only here.
        unsafe {
            FreeSid(self.ptr.as_ptr());
        }
        trace!("released derived SID");
    }
}

/// A string allocated by the host with `LocalAlloc`, freed with `LocalFree`.
struct LocalWideString {
    ptr: NonNull<u16>,
}

impl LocalWideString {
    fn to_utf8(&self) -> Result<String, ConversionError> {
        // SAFETY: the host returned a NUL-terminated UTF-16 buffer that lives
        // until `drop`.
        let wide = unsafe { U16CStr::from_ptr_str(self.ptr.as_ptr()) };
        String::from_utf16(wide.as_slice()).map_err(|_| ConversionError::InvalidUtf16)
    }
}

impl Drop for LocalWideString {
    fn drop(&mut self) {
        // SAFETY: allocated by ConvertSidToStringSidW (LocalAlloc), freed once.
        unsafe {
            LocalFree(self.ptr.as_ptr().cast::<c_void>());
        }
    }
}

fn derive_error(hresult: i32) -> Error {
    let unavailable = [
        ERROR_NOT_SUPPORTED,
        ERROR_CALL_NOT_IMPLEMENTED,
        ERROR_PROC_NOT_FOUND,
    ]
    .into_iter()
    .any(|code| hresult_from_win32(code) == hresult);
    if hresult == E_NOTIMPL || unavailable {
        Unavailable::Host(hresult).into()
    } else {
        NameError::Rejected { hresult }.into()
    }
}

impl IdentitySubsystem for HostSubsystem {
    type Sid = DerivedSid;

    fn derive_sid(&self, name: &ContainerName) -> Result<DerivedSid, Error> {
        let wide = U16CString::from_str(name.as_str()).map_err(|err| NameError::InteriorNul {
            index: err.nul_position(),
        })?;
        let mut raw: PSID = ptr::null_mut();
        // SAFETY: `wide` is NUL-terminated and outlives the call; `raw` is a
        // valid out-parameter.
        let hresult =
            unsafe { DeriveAppContainerSidFromAppContainerName(wide.as_ptr(), &raw mut raw) };
        if hresult < 0 {
            return Err(derive_error(hresult));
        }
        NonNull::new(raw)
            .map(|ptr| DerivedSid { ptr })
            .ok_or_else(|| Unavailable::NoSid.into())
    }

    fn sid_to_string(&self, sid: &DerivedSid) -> Result<String, Error> {
        let mut raw: *mut u16 = ptr::null_mut();
        // SAFETY: `sid` is a valid SID; `raw` is a valid out-parameter.
        let ok = unsafe { ConvertSidToStringSidW(sid.as_ref().as_raw(), &raw mut raw) };
        if ok == 0 {
            // SAFETY: GetLastError can be called immediately after a failing FFI call.
            let code = unsafe { GetLastError() };
            return Err(ConversionError::Host(code).into());
        }
        let text = NonNull::new(raw)
            .map(|ptr| LocalWideString { ptr })
            .ok_or(ConversionError::NullBuffer)?;
        Ok(text.to_utf8()?)
    }
}
