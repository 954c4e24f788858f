//! Platform backend selection and one-call resolution.

use cfg_if::cfg_if;

use crate::Error;

/// Which identity subsystem serves a resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Backend {
    /// [`Backend::Host`] on Windows, [`Backend::Portable`] elsewhere.
    #[default]
    Auto,
    /// The Windows identity subsystem.
    Host,
    /// The in-process derivation.
    Portable,
}

impl Backend {
    /// Resolves [`Backend::Auto`] for the current platform.
    #[inline]
    #[must_use]
    pub const fn effective(self) -> Self {
        match self {
            Self::Auto if cfg!(windows) => Self::Host,
            Self::Auto => Self::Portable,
            other => other,
        }
    }
}

/// Resolves `name` with the subsystem selected by `backend`.
///
/// # Errors
/// See [`Resolver::resolve`](crate::Resolver::resolve);
/// [`Error::SystemUnavailable`] when the backend does not exist on this
/// platform or build.
#[inline]
pub fn resolve_with(backend: Backend, name: &str) -> Result<String, Error> {
    match backend.effective() {
        Backend::Host => resolve_host(name),
        Backend::Auto | Backend::Portable => resolve_portable(name),
    }
}

/// Resolves `name` with [`Backend::Auto`].
///
/// # Errors
/// See [`resolve_with`].
#[inline]
pub fn resolve(name: &str) -> Result<String, Error> {
    resolve_with(Backend::Auto, name)
}

cfg_if! {
    if #[cfg(windows)] {
        fn resolve_host(name: &str) -> Result<String, Error> {
            crate::Resolver::new(crate::subsystem::HostSubsystem::new()).resolve(name)
        }
    } else {
        fn resolve_host(_name: &str) -> Result<String, Error> {
            Err(crate::error::Unavailable::UnsupportedPlatform.into())
        }
    }
}

cfg_if! {
    if #[cfg(feature = "portable")] {
        fn resolve_portable(name: &str) -> Result<String, Error> {
            crate::Resolver::new(crate::subsystem::PortableSubsystem::new()).resolve(name)
        }
    } else {
        fn resolve_portable(_name: &str) -> Result<String, Error> {
            Err(crate::error::Unavailable::BackendDisabled("portable").into())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Unwrap is not an issue in test")]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn auto_picks_platform_backend() {
        let expected = if cfg!(windows) {
            Backend::Host
        } else {
            Backend::Portable
        };
        assert_eq!(Backend::Auto.effective(), expected);
        assert_eq!(Backend::Portable.effective(), Backend::Portable);
    }

    #[cfg(not(windows))]
    #[test]
    fn host_needs_windows() {
        use crate::error::Unavailable;
        let err = resolve_with(Backend::Host, "Contoso.DemoApp_8wekyb3d8bbwe").unwrap_err();
        assert_eq!(err, Error::SystemUnavailable(Unavailable::UnsupportedPlatform));
    }

    #[test]
    fn empty_name_is_invalid_on_every_backend() {
        for backend in [Backend::Auto, Backend::Host, Backend::Portable] {
            let missing = match backend.effective() {
                Backend::Host => !cfg!(windows),
                _ => !cfg!(feature = "portable"),
            };
            let expected = if missing {
                ErrorKind::SystemUnavailable
            } else {
                ErrorKind::InvalidName
            };
            let kind = resolve_with(backend, "").map_err(|err| err.kind());
            assert_eq!(kind, Err(expected), "{backend:?}");
        }
    }
}
