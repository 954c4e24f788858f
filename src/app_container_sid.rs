#[cfg(not(has_ptr_metadata))]
use crate::polyfills_ptr::from_raw_parts;
use crate::sid::{APP_PACKAGE_BASE_RID, APP_PACKAGE_RID_COUNT};
use crate::{Sid, SidIdentifierAuthority};
#[cfg(has_ptr_metadata)]
use core::ptr::from_raw_parts;
use core::{
    fmt::{self, Display},
    hash::{self, Hash},
    str::FromStr,
};
use delegate::delegate;
use parsing::{InvalidSidFormat, SidComponents};
use thiserror::Error;

/// Number of RIDs derived from the container name (the sub-authorities after
/// [`APP_PACKAGE_BASE_RID`]).
pub const APP_CONTAINER_RID_COUNT: usize = APP_PACKAGE_RID_COUNT as usize - 1;

/// Owned AppContainer SID: `S-1-15-2-<r1>-...-<r7>`.
///
/// Stored inline with the exact Windows layout, so it can be viewed as a
/// [`Sid`] without allocation.
///
/// # Examples
/// ```rust
/// # use app_container_sid::AppContainerSid;
/// let edge: AppContainerSid =
///     "S-1-15-2-3624051433-2125758914-1423191267-1740899205-1073925389-3782572162-737981194"
///         .parse()
///         .expect("AppContainer SID");
/// assert_eq!(edge.rids()[0], 3_624_051_433);
/// assert!(edge.as_sid().is_app_container());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct AppContainerSid {
    revision: u8,
    // Always APP_PACKAGE_RID_COUNT.
    sub_authority_count: u8,
    identifier_authority: SidIdentifierAuthority,
    sub_authority: [u32; APP_PACKAGE_RID_COUNT as usize],
}

/// Error returned when a SID is not an AppContainer SID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NotAppContainer {
    /// The text is not a SID at all.
    #[error("invalid SID string: {0}")]
    Format(#[from] InvalidSidFormat),
    /// The SID is well formed but not `S-1-15-2-` with seven RIDs.
    #[error("not an AppContainer SID")]
    Shape,
}

impl AppContainerSid {
    /// Builds the SID from the seven name-derived RIDs.
    #[inline]
    #[must_use]
    pub const fn from_rids(rids: [u32; APP_CONTAINER_RID_COUNT]) -> Self {
        let [r1, r2, r3, r4, r5, r6, r7] = rids;
        Self {
            revision: Sid::REVISION,
            sub_authority_count: APP_PACKAGE_RID_COUNT,
            identifier_authority: SidIdentifierAuthority::APP_PACKAGE_AUTHORITY,
            sub_authority: [APP_PACKAGE_BASE_RID, r1, r2, r3, r4, r5, r6, r7],
        }
    }

    /// The seven name-derived RIDs.
    #[inline]
    #[must_use]
    pub fn rids(&self) -> &[u32] {
        self.sub_authority.get(1..).unwrap_or_default()
    }

    /// Views this SID as a dynamically-sized [`Sid`].
    #[inline]
    #[must_use]
    pub const fn as_sid(&self) -> &Sid {
        // SAFETY: `repr(C)` header identical to `Sid`, followed by exactly
        // `sub_authority_count` u32 values; the fat pointer metadata matches.
        unsafe {
            &*from_raw_parts(
                core::ptr::from_ref(self).cast::<()>(),
                APP_PACKAGE_RID_COUNT as usize,
            )
        }
    }

    delegate! {
        to self.as_sid() {
            /// Binary representation, as Windows lays it out (40 bytes).
            #[must_use]
            pub fn as_binary(&self) -> &[u8];
        }
    }
}

impl AsRef<Sid> for AppContainerSid {
    #[inline]
    fn as_ref(&self) -> &Sid {
        self.as_sid()
    }
}

impl TryFrom<&Sid> for AppContainerSid {
    type Error = NotAppContainer;

    #[inline]
    fn try_from(value: &Sid) -> Result<Self, Self::Error> {
        if !value.is_app_container() {
            return Err(NotAppContainer::Shape);
        }
        let mut rids = [0u32; APP_CONTAINER_RID_COUNT];
        rids.copy_from_slice(value.get_sub_authorities().get(1..).unwrap_or_default());
        Ok(Self::from_rids(rids))
    }
}

impl FromStr for AppContainerSid {
    type Err = NotAppContainer;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let components = SidComponents::from_str(s)?;
        let (base, rids) = components
            .sub_authority
            .split_first()
            .ok_or(NotAppContainer::Shape)?;
        if components.identifier_authority != SidIdentifierAuthority::APP_PACKAGE_AUTHORITY.value
            || *base != APP_PACKAGE_BASE_RID
        {
            return Err(NotAppContainer::Shape);
        }
        let rids: [u32; APP_CONTAINER_RID_COUNT] =
            rids.try_into().map_err(|_| NotAppContainer::Shape)?;
        Ok(Self::from_rids(rids))
    }
}

impl PartialEq<Sid> for AppContainerSid {
    #[inline]
    fn eq(&self, other: &Sid) -> bool {
        self.as_sid().eq(other)
    }
}

impl PartialEq<AppContainerSid> for Sid {
    #[inline]
    fn eq(&self, other: &AppContainerSid) -> bool {
        self.eq(other.as_sid())
    }
}

impl Display for AppContainerSid {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self.as_sid(), f)
    }
}

impl Hash for AppContainerSid {
    #[inline]
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.as_sid().hash(state);
    }
}
