//! Errors of a resolution, one variant per failed step, and their `HRESULT`s.

#![allow(clippy::cast_possible_wrap, reason = "HRESULTs are u32 bit patterns stored as i32")]

use thiserror::Error as ThisError;

use crate::NameError;

const E_NOTIMPL: i32 = 0x8000_4001_u32 as i32;
const E_FAIL: i32 = 0x8000_4005_u32 as i32;

/// `HRESULT_FROM_WIN32`.
#[must_use]
#[inline]
pub const fn hresult_from_win32(code: u32) -> i32 {
    if code as i32 <= 0 {
        code as i32
    } else {
        ((code & 0x0000_FFFF) | 0x8007_0000) as i32
    }
}

/// Which of the three outcomes a failed resolution belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The name is empty, malformed, or refused by the subsystem's naming rules.
    InvalidName,
    /// A SID was derived but could not be rendered as text.
    ConversionFailure,
    /// The identity subsystem cannot be reached or does not exist here.
    SystemUnavailable,
}

/// Why the derived SID could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ConversionError {
    /// `ConvertSidToStringSidW` failed with this Win32 error code.
    #[error("ConvertSidToStringSidW failed (error {0})")]
    Host(u32),
    /// The host returned text that is not UTF-16.
    #[error("SID string is not valid UTF-16")]
    InvalidUtf16,
    /// `ConvertSidToStringSidW` succeeded without returning a buffer.
    #[error("ConvertSidToStringSidW returned no string")]
    NullBuffer,
    /// The text does not parse as a canonical SID.
    #[error("malformed SID string {text:?}: {source}")]
    Malformed {
        /// The text as returned.
        text: String,
        /// What the parser refused.
        source: parsing::InvalidSidFormat,
    },
}

/// Why no identity subsystem could serve the request.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Unavailable {
    /// The host subsystem only exists on Windows.
    #[error("the host identity subsystem requires Windows")]
    UnsupportedPlatform,
    /// The requested backend was compiled out.
    #[error("the {0} backend is not compiled in")]
    BackendDisabled(&'static str),
    /// The host reported success without returning a SID.
    #[error("DeriveAppContainerSidFromAppContainerName returned no SID")]
    NoSid,
    /// The host reported that the operation is not supported.
    #[error("DeriveAppContainerSidFromAppContainerName is not supported (HRESULT 0x{0:08X})")]
    Host(i32),
}

/// Error returned by a resolution; the variant names the step that failed.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// Deriving the SID from the name failed.
    #[error("deriving the SID failed: {0}")]
    InvalidName(#[from] NameError),
    /// Converting the derived SID to text failed.
    #[error("converting the SID to text failed: {0}")]
    ConversionFailure(#[from] ConversionError),
    /// The identity subsystem could not be used.
    #[error("identity subsystem unavailable: {0}")]
    SystemUnavailable(#[from] Unavailable),
}

impl Error {
    /// The outcome class of this error.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidName(_) => ErrorKind::InvalidName,
            Self::ConversionFailure(_) => ErrorKind::ConversionFailure,
            Self::SystemUnavailable(_) => ErrorKind::SystemUnavailable,
        }
    }

    /// The closest `HRESULT`: the host's own code when there is one.
    #[inline]
    #[must_use]
    pub const fn hresult(&self) -> i32 {
        const E_INVALIDARG: i32 = hresult_from_win32(87);
        match self {
            Self::InvalidName(NameError::Rejected { hresult })
            | Self::SystemUnavailable(Unavailable::Host(hresult)) => *hresult,
            Self::InvalidName(_) => E_INVALIDARG,
            Self::ConversionFailure(ConversionError::Host(code)) => hresult_from_win32(*code),
            Self::ConversionFailure(_) | Self::SystemUnavailable(Unavailable::NoSid) => E_FAIL,
            Self::SystemUnavailable(_) => E_NOTIMPL,
        }
    }
}

#[cfg(all(windows, feature = "windows_result"))]
impl From<Error> for windows_result::HRESULT {
    #[inline]
    fn from(value: Error) -> Self {
        Self(value.hresult())
    }
}

#[cfg(all(windows, feature = "windows_result"))]
impl From<Error> for windows_result::Error {
    #[inline]
    fn from(value: Error) -> Self {
        Self::from_hresult(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(Error::from(NameError::Empty).kind(), ErrorKind::InvalidName);
        assert_eq!(
            Error::from(ConversionError::InvalidUtf16).kind(),
            ErrorKind::ConversionFailure
        );
        assert_eq!(
            Error::from(Unavailable::UnsupportedPlatform).kind(),
            ErrorKind::SystemUnavailable
        );
    }

    #[test]
    fn hresults() {
        assert_eq!(hresult_from_win32(0), 0);
        assert_eq!(hresult_from_win32(87), 0x8007_0057_u32 as i32);
        assert_eq!(
            Error::from(NameError::Rejected { hresult: -1 }).hresult(),
            -1
        );
        assert_eq!(
            Error::from(ConversionError::Host(8)).hresult(),
            0x8007_0008_u32 as i32
        );
        assert_eq!(Error::from(NameError::Empty).hresult(), hresult_from_win32(87));
        assert_eq!(Error::from(ConversionError::NullBuffer).hresult(), E_FAIL);
        assert_eq!(Error::from(Unavailable::NoSid).hresult(), E_FAIL);
    }

    #[test]
    fn messages_name_the_step() {
        assert_eq!(
            Error::from(NameError::Empty).to_string(),
            "deriving the SID failed: container name is empty"
        );
        assert_eq!(
            Error::from(ConversionError::NullBuffer).to_string(),
            "converting the SID to text failed: ConvertSidToStringSidW returned no string"
        );
        assert_eq!(
            Error::from(Unavailable::NoSid).to_string(),
            "identity subsystem unavailable: \
             DeriveAppContainerSidFromAppContainerName returned no SID"
        );
        assert!(
            Error::from(ConversionError::Host(8))
                .to_string()
                .starts_with("converting the SID to text failed")
        );
    }
}
