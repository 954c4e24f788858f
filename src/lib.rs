//! # AppContainer name to SID resolution
//!
//! Resolves an AppContainer name (typically an MSIX package family name such
//! as `Contoso.DemoApp_8wekyb3d8bbwe`) to the canonical text of its Security
//! Identifier, `S-1-15-2-<r1>-...-<r7>`.
//!
//! The crate provides:
//! - [`Resolver`]: the name to SID string operation, generic over an
//!   [`IdentitySubsystem`](subsystem::IdentitySubsystem).
//! - [`subsystem`]: the capability trait and its adapters: the Windows host
//!   (`DeriveAppContainerSidFromAppContainerName`) and a portable derivation
//!   that computes the same SID on any platform.
//! - [`Sid`]: a `repr(C)` dynamically-sized view matching the Windows SID
//!   in-memory layout, and [`AppContainerSid`], an owned AppContainer SID.
//! - [`resolve`] / [`resolve_with`]: one-call resolution on the platform's
//!   [`Backend`].
//!
//! ## Examples
//! ```rust
//! # #[cfg(feature = "portable")]
//! # {
//! use app_container_sid::{Backend, resolve_with};
//!
//! let sid = resolve_with(Backend::Portable, "Contoso.DemoApp_8wekyb3d8bbwe").unwrap();
//! assert!(sid.starts_with("S-1-15-2-"));
//! # }
//! ```
//!
//! ### Errors name the failing step
//! ```rust
//! use app_container_sid::{ErrorKind, resolve};
//!
//! let err = resolve("").unwrap_err();
//! assert!(matches!(err.kind(), ErrorKind::InvalidName | ErrorKind::SystemUnavailable));
//! ```
//!
//! ## Layout & ABI
//! The memory layout of [`Sid`] matches Windows: a `repr(C)` header followed by
//! `sub_authority_count` 32-bit sub-authorities. [`Sid::as_binary`] exposes it
//! without copying.

#![warn(missing_docs)]
#![cfg_attr(needs_ptr_metadata_feature, feature(ptr_metadata))]
#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]

mod app_container_sid;
mod backend;
mod container_name;
mod error;
#[cfg(not(has_ptr_metadata))]
pub(crate) mod polyfills_ptr;
mod resolver;
mod sid;
mod sid_identifier_authority;
mod sid_size_info;
pub mod subsystem;

pub use app_container_sid::{APP_CONTAINER_RID_COUNT, AppContainerSid, NotAppContainer};
pub use backend::{Backend, resolve, resolve_with};
pub use container_name::{ContainerName, NameError, NamePolicy};
pub use error::{ConversionError, Error, ErrorKind, Unavailable, hresult_from_win32};
pub use resolver::Resolver;
pub use sid::{APP_PACKAGE_BASE_RID, APP_PACKAGE_RID_COUNT, Sid};

/// Identifier authority component of a SID (6-byte value).
///
/// See also: [`Sid::identifier_authority`].
pub use sid_identifier_authority::SidIdentifierAuthority;

pub(crate) use sid_size_info::SidSizeInfo;
