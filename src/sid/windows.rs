use windows_sys::Win32::Security::PSID;

use super::Sid;

impl Sid {
    /// Creates a reference to a `Sid` from a raw `PSID` pointer.
    ///
    /// # Safety
    /// The `raw` pointer must point to a valid SID memory block with a correct layout
    /// and live at least as long as the returned reference.
    #[inline]
    pub const unsafe fn from_raw<'a>(raw: PSID) -> &'a Self {
        // Safety: Same precondition as the public API.
        unsafe { Self::from_raw_internal(raw as *const ()) }
    }

    /// Returns the underlying raw `PSID` pointer.
    #[inline]
    #[must_use]
    pub const fn as_raw(&self) -> PSID {
        core::ptr::from_ref(self).cast_mut().cast()
    }
}
