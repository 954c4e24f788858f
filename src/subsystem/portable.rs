use sha2::{Digest, Sha256};

use super::IdentitySubsystem;
use crate::app_container_sid::APP_CONTAINER_RID_COUNT;
use crate::{AppContainerSid, ContainerName, Error, NamePolicy};

/// The AppContainer SID derivation, computed in-process.
///
/// Windows derives the seven RIDs from the SHA-256 of the lowercased name
/// encoded as UTF-16LE, keeping the first 28 bytes as little-endian `u32`s.
/// Names are checked against a [`NamePolicy`] first, so this subsystem
/// refuses what `CreateAppContainerProfile` refuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PortableSubsystem {
    policy: NamePolicy,
}

impl PortableSubsystem {
    /// Subsystem enforcing [`NamePolicy::APP_CONTAINER`].
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_policy(NamePolicy::APP_CONTAINER)
    }

    /// Subsystem enforcing `policy`.
    #[inline]
    #[must_use]
    pub const fn with_policy(policy: NamePolicy) -> Self {
        Self { policy }
    }
}

impl IdentitySubsystem for PortableSubsystem {
    type Sid = AppContainerSid;

    #[inline]
    fn derive_sid(&self, name: &ContainerName) -> Result<AppContainerSid, Error> {
        self.policy.check(name)?;
        Ok(AppContainerSid::from_rids(derive_rids(name)))
    }

    #[inline]
    fn sid_to_string(&self, sid: &AppContainerSid) -> Result<String, Error> {
        Ok(sid.to_string())
    }
}

/// The seven name-derived RIDs of `name`, without any naming check.
#[inline]
#[must_use]
pub fn derive_rids(name: &ContainerName) -> [u32; APP_CONTAINER_RID_COUNT] {
    let mut hasher = Sha256::new();
    for unit in name.as_str().to_lowercase().encode_utf16() {
        hasher.update(unit.to_le_bytes());
    }
    let digest = hasher.finalize();

    let mut rids = [0u32; APP_CONTAINER_RID_COUNT];
    for (rid, chunk) in rids.iter_mut().zip(digest.chunks_exact(4)) {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(chunk);
        *rid = u32::from_le_bytes(bytes);
    }
    rids
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Unwrap is not an issue in test")]
mod tests {
    use super::*;
    use crate::{ErrorKind, NameError};
    use proptest::prelude::*;

    fn name(s: &str) -> ContainerName {
        ContainerName::new(s).unwrap()
    }

    #[test]
    fn published_edge_sid() {
        let subsystem = PortableSubsystem::new();
        let sid = subsystem
            .derive_sid(&name("Microsoft.MicrosoftEdge_8wekyb3d8bbwe"))
            .unwrap();
        assert_eq!(
            subsystem.sid_to_string(&sid).unwrap(),
            "S-1-15-2-3624051433-2125758914-1423191267-1740899205-1073925389-3782572162-737981194"
        );
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(
            derive_rids(&name("Contoso.DemoApp_8wekyb3d8bbwe")),
            derive_rids(&name("CONTOSO.DEMOAPP_8WEKYB3D8BBWE"))
        );
    }

    #[test]
    fn policy_is_enforced() {
        let err = PortableSubsystem::new()
            .derive_sid(&name("Contoso/App"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidName);
        assert_eq!(
            err,
            Error::InvalidName(NameError::ForbiddenChar { ch: '/', index: 7 })
        );

        let lenient = PortableSubsystem::with_policy(NamePolicy::new(64, b"-_. /"));
        assert!(lenient.derive_sid(&name("Contoso/App")).is_ok());
    }

    proptest! {
        #[test]
        fn distinct_names_distinct_sids(a in "[a-z0-9]{1,32}", b in "[a-z0-9]{1,32}") {
            prop_assume!(a != b);
            prop_assert_ne!(derive_rids(&name(&a)), derive_rids(&name(&b)));
        }
    }
}
