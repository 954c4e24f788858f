//! The identity subsystem capability and its adapters.
//!
//! A resolution needs exactly two things from the platform: derive the SID of
//! an AppContainer name, and render a SID as text. [`IdentitySubsystem`] is
//! that capability; the [`Resolver`](crate::Resolver) is generic over it so
//! the binary injects a real adapter and tests inject fakes.

#[cfg(windows)]
mod host;
#[cfg(feature = "portable")]
mod portable;

#[cfg(windows)]
pub use host::{DerivedSid, HostSubsystem};
#[cfg(feature = "portable")]
pub use portable::{PortableSubsystem, derive_rids};

use crate::{ContainerName, Error, Sid};

/// Host capability used by the resolver.
pub trait IdentitySubsystem {
    /// The derived identifier. Owning it owns the host resource: dropping it
    /// releases the resource, once.
    type Sid: AsRef<Sid>;

    /// Derives the SID of `name`.
    ///
    /// # Errors
    /// [`Error::InvalidName`] when the name is refused,
    /// [`Error::SystemUnavailable`] when the subsystem cannot serve the call.
    fn derive_sid(&self, name: &ContainerName) -> Result<Self::Sid, Error>;

    /// Renders `sid` in canonical textual form.
    ///
    /// # Errors
    /// [`Error::ConversionFailure`].
    fn sid_to_string(&self, sid: &Self::Sid) -> Result<String, Error>;
}

impl<T: IdentitySubsystem + ?Sized> IdentitySubsystem for &T {
    type Sid = T::Sid;

    #[inline]
    fn derive_sid(&self, name: &ContainerName) -> Result<Self::Sid, Error> {
        (**self).derive_sid(name)
    }

    #[inline]
    fn sid_to_string(&self, sid: &Self::Sid) -> Result<String, Error> {
        (**self).sid_to_string(sid)
    }
}
