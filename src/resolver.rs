//! Name-to-SID resolution over an injected [`IdentitySubsystem`].

use parsing::SidComponents;
use tracing::{debug, trace, warn};

use crate::error::ConversionError;
use crate::subsystem::IdentitySubsystem;
use crate::{ContainerName, Error};

/// Resolves AppContainer names to SID strings.
///
/// Holds no state besides the subsystem; each call derives, converts, and
/// releases its own identifier.
///
/// # Examples
/// ```rust
/// # #[cfg(feature = "portable")]
/// # {
/// use app_container_sid::{Resolver, subsystem::PortableSubsystem};
///
/// let resolver = Resolver::new(PortableSubsystem::new());
/// let sid = resolver.resolve("Microsoft.MicrosoftEdge_8wekyb3d8bbwe").unwrap();
/// assert_eq!(
///     sid,
///     "S-1-15-2-3624051433-2125758914-1423191267-1740899205-1073925389-3782572162-737981194"
/// );
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Resolver<S> {
    subsystem: S,
}

impl<S: IdentitySubsystem> Resolver<S> {
    /// Wraps `subsystem`.
    #[inline]
    pub const fn new(subsystem: S) -> Self {
        Self { subsystem }
    }

    /// The injected subsystem.
    #[inline]
    pub const fn subsystem(&self) -> &S {
        &self.subsystem
    }

    /// Resolves `name` to the canonical text of its SID.
    ///
    /// # Errors
    /// [`Error::InvalidName`] for an empty name or one the subsystem refuses,
    /// [`Error::ConversionFailure`] when the SID cannot be rendered as a
    /// canonical SID string, [`Error::SystemUnavailable`] when the subsystem
    /// cannot serve the call.
    #[inline]
    pub fn resolve(&self, name: &str) -> Result<String, Error> {
        let name = ContainerName::new(name)?;
        self.resolve_name(&name)
    }

    /// Same as [`Resolver::resolve`] for an already validated name.
    ///
    /// # Errors
    /// See [`Resolver::resolve`].
    pub fn resolve_name(&self, name: &ContainerName) -> Result<String, Error> {
        debug!(%name, "deriving AppContainer SID");
        let sid = self.subsystem.derive_sid(name)?;
        trace!(
            app_container = sid.as_ref().is_app_container(),
            "derived SID"
        );

        let text = self.subsystem.sid_to_string(&sid)?;
        if let Err(source) = text.parse::<SidComponents>() {
            warn!(%text, %source, "identity subsystem returned a malformed SID string");
            return Err(ConversionError::Malformed { text, source }.into());
        }
        drop(sid);

        debug!(%name, sid = %text, "resolved");
        Ok(text)
    }
}
