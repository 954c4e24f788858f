//! AppContainer names (package family names) and the rules applied to them.
//!
//! - [`ContainerName`] only guarantees what every subsystem needs: the name is
//!   not blank and has no NUL character.
//! - [`NamePolicy`] is the naming rule set a subsystem may enforce on top of
//!   that; [`NamePolicy::APP_CONTAINER`] follows `CreateAppContainerProfile`.

use core::{
    fmt::{self, Display},
    str::FromStr,
};

use thiserror::Error;

/// Why a container name was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    /// The name is empty or only whitespace.
    #[error("container name is empty")]
    Empty,

    /// The name contains a NUL character.
    #[error("NUL character at index {index}")]
    InteriorNul {
        /// Byte index of the NUL character.
        index: usize,
    },

    /// The name exceeds the policy's maximum length (in UTF-16 code units).
    #[error("container name too long: max={max}, actual={actual}")]
    TooLong {
        /// Maximum accepted length.
        max: usize,
        /// Length of the rejected name.
        actual: usize,
    },

    /// A character outside the policy's character set.
    #[error("forbidden character {ch:?} at index {index}")]
    ForbiddenChar {
        /// The offending character.
        ch: char,
        /// Byte index of the character.
        index: usize,
    },

    /// The host identity subsystem refused the name.
    #[error("rejected by the identity subsystem (HRESULT 0x{hresult:08X})")]
    Rejected {
        /// `HRESULT` returned by the host.
        hresult: i32,
    },
}

/// Naming rules, checked at runtime by the subsystems that apply them.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NamePolicy {
    /// Maximum length in UTF-16 code units (the unit Windows counts in).
    pub max_len: usize,
    /// ASCII punctuation accepted besides ASCII letters and digits.
    pub allowed_punctuation: &'static [u8],
}

impl NamePolicy {
    /// Rules of `CreateAppContainerProfile`: up to 64 characters matching
    /// `[-_. A-Za-z0-9]+`.
    pub const APP_CONTAINER: Self = Self::new(64, b"-_. ");

    /// Const constructor for convenience.
    #[inline]
    #[must_use]
    pub const fn new(max_len: usize, allowed_punctuation: &'static [u8]) -> Self {
        Self {
            max_len,
            allowed_punctuation,
        }
    }

    /// Checks `name` against this policy.
    ///
    /// # Errors
    /// [`NameError::TooLong`] or [`NameError::ForbiddenChar`].
    #[inline]
    pub fn check(&self, name: &ContainerName) -> Result<(), NameError> {
        let name = name.as_str();
        let len = name.encode_utf16().count();
        if len > self.max_len {
            return Err(NameError::TooLong {
                max: self.max_len,
                actual: len,
            });
        }
        match name.char_indices().find(|&(_, ch)| !self.allows(ch)) {
            Some((index, ch)) => Err(NameError::ForbiddenChar { ch, index }),
            None => Ok(()),
        }
    }

    fn allows(&self, ch: char) -> bool {
        ch.is_ascii_alphanumeric()
            || u8::try_from(ch).is_ok_and(|b| self.allowed_punctuation.contains(&b))
    }
}

impl Default for NamePolicy {
    #[inline]
    fn default() -> Self {
        Self::APP_CONTAINER
    }
}

/// A non-blank, NUL-free AppContainer name, e.g. a package family name such
/// as `Contoso.DemoApp_8wekyb3d8bbwe`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerName(String);

impl ContainerName {
    /// Validating constructor.
    ///
    /// # Errors
    /// [`NameError::Empty`] or [`NameError::InteriorNul`].
    #[inline]
    pub fn new<S: Into<String>>(name: S) -> Result<Self, NameError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(NameError::Empty);
        }
        if let Some(index) = name.find('\0') {
            return Err(NameError::InteriorNul { index });
        }
        Ok(Self(name))
    }

    /// The name as given.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ContainerName {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ContainerName {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ContainerName {
    type Err = NameError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Unwrap is not an issue in test")]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn check(name: &str) -> Result<(), NameError> {
        NamePolicy::APP_CONTAINER.check(&ContainerName::new(name)?)
    }

    #[test]
    fn empty_and_nul_are_rejected() {
        assert_eq!(ContainerName::new(""), Err(NameError::Empty));
        assert_eq!(ContainerName::new(" \t"), Err(NameError::Empty));
        assert_eq!(
            ContainerName::new("Contoso\0App"),
            Err(NameError::InteriorNul { index: 7 })
        );
    }

    #[test]
    fn blank_name_is_empty_not_forbidden() {
        assert_eq!(check(" "), Err(NameError::Empty));
        assert_eq!(check("   "), Err(NameError::Empty));
        assert!(check("a b").is_ok());
    }

    #[test]
    fn package_family_names_pass() {
        assert!(check("Contoso.DemoApp_8wekyb3d8bbwe").is_ok());
        assert!(check("Microsoft.MicrosoftEdge_8wekyb3d8bbwe").is_ok());
        assert!(check("my-sandbox name").is_ok());
    }

    #[test]
    fn forbidden_characters() {
        assert_eq!(
            check("Contoso/App"),
            Err(NameError::ForbiddenChar { ch: '/', index: 7 })
        );
        assert_eq!(
            check("Caf\u{e9}"),
            Err(NameError::ForbiddenChar {
                ch: '\u{e9}',
                index: 3
            })
        );
        assert!(matches!(
            check("a\\b"),
            Err(NameError::ForbiddenChar { ch: '\\', .. })
        ));
    }

    #[test]
    fn length_limit() {
        assert!(check(&"a".repeat(64)).is_ok());
        assert_eq!(
            check(&"a".repeat(65)),
            Err(NameError::TooLong {
                max: 64,
                actual: 65
            })
        );
    }

    proptest! {
        #[test]
        fn allowed_alphabet_always_passes(name in r"[-_. A-Za-z0-9]{1,64}") {
            prop_assume!(!name.trim().is_empty());
            prop_assert!(check(&name).is_ok());
        }

        #[test]
        fn display_is_identity(name in r"[^\x00\s]+") {
            let parsed: ContainerName = name.parse().unwrap();
            prop_assert_eq!(parsed.to_string(), name);
        }
    }
}
