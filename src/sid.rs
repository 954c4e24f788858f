//! Zero-copy view of a Windows Security Identifier (SID).
//!
//! `Sid` is a `repr(C)` dynamically-sized type matching the Windows SID
//! in-memory layout (header + trailing `[u32]` sub-authorities). It is never
//! built by value: it is borrowed from an owner such as
//! [`AppContainerSid`](crate::AppContainerSid) or from a SID allocated by the
//! host identity subsystem.

#[cfg(windows)]
mod windows;

#[cfg(not(has_ptr_metadata))]
use crate::polyfills_ptr::from_raw_parts;
#[cfg(has_ptr_metadata)]
use core::ptr::from_raw_parts;

use crate::{SidIdentifierAuthority, SidSizeInfo};

pub use parsing::{MAX_SUBAUTHORITY_COUNT, MIN_SUBAUTHORITY_COUNT};

use core::{
    alloc::Layout,
    fmt::{self, Display},
    hash::Hash,
    slice,
};

/// `SECURITY_APP_PACKAGE_BASE_RID`: first sub-authority of AppContainer SIDs.
pub const APP_PACKAGE_BASE_RID: u32 = 2;
/// `SECURITY_APP_PACKAGE_RID_COUNT`: sub-authority count of AppContainer SIDs.
pub const APP_PACKAGE_RID_COUNT: u8 = 8;

/// C-compatible, dynamically-sized Windows Security Identifier.
///
/// # Invariants
/// - `sub_authority` length equals `sub_authority_count`.
/// - `sub_authority_count` is in `1..=15`.
#[repr(C)]
#[derive(Debug)]
pub struct Sid {
    /// The SID revision value, always [`Sid::REVISION`].
    pub revision: u8,
    pub(crate) sub_authority_count: u8,
    /// The SID identifier authority value.
    pub identifier_authority: SidIdentifierAuthority,
    /// The SID sub-authority values.
    pub sub_authority: [u32],
}

/// Fixed-size header of a SID (no trailing sub-authorities).
#[allow(dead_code, reason = "only used for its size")]
#[repr(C)]
pub struct SidHead {
    pub revision: u8,
    pub sub_authority_count: u8,
    pub identifier_authority: SidIdentifierAuthority,
}

pub const SID_HEAD_SIZE: usize = size_of::<SidHead>();

impl Sid {
    /// Revision of every SID Windows produces (`SID_REVISION`).
    pub const REVISION: u8 = parsing::SID_REVISION;

    /// Returns the binary representation of this SID, header and
    /// sub-authorities, as Windows lays it out.
    #[inline]
    #[must_use]
    pub const fn as_binary(&self) -> &[u8] {
        let len = self.get_current_min_layout().size();
        // Safety: `self` is backed by an allocation of at least the layout
        // computed from `sub_authority_count`; the slice borrows `self`.
        unsafe { slice::from_raw_parts(core::ptr::from_ref(self).cast::<u8>(), len) }
    }

    /// Builds a `&Sid` from a thin pointer, reading the sub-authority count
    /// from the header to forge the fat pointer.
    ///
    /// # Safety
    /// `raw` must point to a valid SID that outlives `'a`.
    #[cfg_attr(not(windows), allow(dead_code))]
    pub(crate) const unsafe fn from_raw_internal<'a>(raw: *const ()) -> &'a Self {
        #[expect(
            clippy::multiple_unsafe_ops_per_block,
            reason = "single unsafe block for clarity"
        )]
        // Safety: precondition defined in the method doc.
        unsafe {
            let metadata = {
                let ptr: *const Self = from_raw_parts(raw, 0);
                (*ptr).sub_authority_count
            };
            &*from_raw_parts(raw, metadata as usize)
        }
    }

    /// Returns the sub-authorities (`[u32]`, length `sub_authority_count`).
    #[must_use]
    #[inline]
    pub const fn get_sub_authorities(&self) -> &[u32] {
        &self.sub_authority
    }

    /// Minimal `Layout` for this instance given its `sub_authority_count`.
    #[must_use]
    #[inline]
    pub const fn get_current_min_layout(&self) -> Layout {
        match SidSizeInfo::from_count(self.sub_authority_count) {
            Some(info) => info.get_layout(),
            None => unreachable!(),
        }
    }

    /// Whether this SID has the shape of an AppContainer SID:
    /// `S-1-15-2-` followed by seven RIDs.
    #[must_use]
    #[inline]
    pub fn is_app_container(&self) -> bool {
        self.identifier_authority == SidIdentifierAuthority::APP_PACKAGE_AUTHORITY
            && self.sub_authority_count == APP_PACKAGE_RID_COUNT
            && self.sub_authority.first() == Some(&APP_PACKAGE_BASE_RID)
    }
}

impl Display for Sid {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S-{}", self.revision)?;

        // Same rule as ConvertSidToStringSid: decimal below 2^32, hex above.
        let id_auth_value = self.identifier_authority.as_u64();
        if id_auth_value <= 0xFFFF_FFFF {
            write!(f, "-{id_auth_value}")?;
        } else {
            write!(f, "-0x{id_auth_value:012X}")?;
        }

        for &sub_auth in self.get_sub_authorities() {
            write!(f, "-{sub_auth}")?;
        }
        Ok(())
    }
}

impl PartialEq for Sid {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.as_binary() == other.as_binary()
    }
}

impl Eq for Sid {}

impl Hash for Sid {
    #[inline]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.revision.hash(state);
        self.sub_authority_count.hash(state);
        self.identifier_authority.hash(state);
        Hash::hash_slice(self.get_sub_authorities(), state);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Unwrap is not an issue in test")]
mod tests {
    use super::*;
    use crate::AppContainerSid;
    use crate::sid_identifier_authority::test::arb_identifier_authority;
    use proptest::prelude::*;
    use std::hash::{DefaultHasher, Hasher};

    /// Header followed by `subs`, aligned for `u32`.
    fn sid_buffer(authority: SidIdentifierAuthority, subs: &[u32]) -> Vec<u32> {
        let mut head = [0u8; SID_HEAD_SIZE];
        head[0] = Sid::REVISION;
        head[1] = u8::try_from(subs.len()).unwrap();
        head[2..].copy_from_slice(&authority.value);
        let mut words = vec![
            u32::from_ne_bytes(head[..4].try_into().unwrap()),
            u32::from_ne_bytes(head[4..].try_into().unwrap()),
        ];
        words.extend_from_slice(subs);
        words
    }

    fn view(buffer: &[u32]) -> &Sid {
        // Safety: `sid_buffer` lays out a valid SID and `buffer` outlives the view.
        unsafe { Sid::from_raw_internal(buffer.as_ptr().cast()) }
    }

    #[test]
    fn display_uses_hex_for_wide_authority() {
        let buffer = sid_buffer(SidIdentifierAuthority::from_u64(0x1_0000_0000), &[7]);
        assert_eq!(view(&buffer).to_string(), "S-1-0x000100000000-7");
    }

    #[test]
    fn binary_matches_windows_layout() {
        let buffer = sid_buffer(SidIdentifierAuthority::NT_AUTHORITY, &[32, 544]);
        let sid = view(&buffer);
        assert_eq!(sid.to_string(), "S-1-5-32-544");
        assert_eq!(
            sid.as_binary(),
            [1, 2, 0, 0, 0, 0, 0, 5, 32, 0, 0, 0, 32, 2, 0, 0]
        );
    }

    #[test]
    fn app_container_shape() {
        let app = AppContainerSid::from_rids([1, 2, 3, 4, 5, 6, 7]);
        assert!(app.as_sid().is_app_container());

        let capability = sid_buffer(SidIdentifierAuthority::APP_PACKAGE_AUTHORITY, &[3, 1]);
        assert!(!view(&capability).is_app_container());

        let nt = sid_buffer(SidIdentifierAuthority::NT_AUTHORITY, &[2, 1, 2, 3, 4, 5, 6, 7]);
        assert!(!view(&nt).is_app_container());
    }

    proptest! {
        #[test]
        fn display_parses_back(
            authority in arb_identifier_authority(),
            subs in proptest::collection::vec(any::<u32>(), 1..=15),
        ) {
            let buffer = sid_buffer(authority, &subs);
            let sid = view(&buffer);
            let display = sid.to_string();
            prop_assert!(display.starts_with("S-1-"), "Display does not start with S-1-: {}", display);
            let components: parsing::SidComponents = display.parse().unwrap();
            prop_assert_eq!(components.identifier_authority, authority.value);
            prop_assert_eq!(components.sub_authority.as_slice(), subs.as_slice());
        }

        #[test]
        fn hash_follows_eq(subs in proptest::collection::vec(any::<u32>(), 1..=15)) {
            let first = sid_buffer(SidIdentifierAuthority::NT_AUTHORITY, &subs);
            let second = first.clone();
            prop_assert_eq!(view(&first), view(&second));
            let mut h1 = DefaultHasher::new();
            view(&first).hash(&mut h1);
            let mut h2 = DefaultHasher::new();
            view(&second).hash(&mut h2);
            prop_assert_eq!(h1.finish(), h2.finish());
        }
    }
}
