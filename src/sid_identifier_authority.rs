/// Identifier authority component of a SID (6-byte, big-endian value).
///
/// See also: [`Sid::identifier_authority`](crate::Sid::identifier_authority).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SidIdentifierAuthority {
    /// Raw big-endian bytes.
    pub value: [u8; 6],
}

impl SidIdentifierAuthority {
    /// `SECURITY_NULL_SID_AUTHORITY` (`S-1-0`).
    pub const NULL_AUTHORITY: Self = Self::from_u64(0);
    /// `SECURITY_WORLD_SID_AUTHORITY` (`S-1-1`).
    pub const WORLD_AUTHORITY: Self = Self::from_u64(1);
    /// `SECURITY_NT_AUTHORITY` (`S-1-5`).
    pub const NT_AUTHORITY: Self = Self::from_u64(5);
    /// `SECURITY_APP_PACKAGE_AUTHORITY` (`S-1-15`), the authority of every
    /// AppContainer and capability SID.
    pub const APP_PACKAGE_AUTHORITY: Self = Self::from_u64(15);

    /// Wraps raw big-endian bytes.
    #[inline]
    #[must_use]
    pub const fn new(value: [u8; 6]) -> Self {
        Self { value }
    }

    /// Builds an authority from its numeric value; bits above 48 are dropped.
    #[inline]
    #[must_use]
    pub const fn from_u64(value: u64) -> Self {
        let bytes = value.to_be_bytes();
        Self {
            value: [bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7]],
        }
    }

    /// Numeric value of the authority.
    #[inline]
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        let v = self.value;
        u64::from_be_bytes([0, 0, v[0], v[1], v[2], v[3], v[4], v[5]])
    }
}

impl From<[u8; 6]> for SidIdentifierAuthority {
    #[inline]
    fn from(value: [u8; 6]) -> Self {
        Self { value }
    }
}

impl From<SidIdentifierAuthority> for [u8; 6] {
    #[inline]
    fn from(value: SidIdentifierAuthority) -> Self {
        value.value
    }
}
