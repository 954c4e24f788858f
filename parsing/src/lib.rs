//! Parsing of the canonical textual SID form (`S-1-15-2-...`).
//!
//! Shared by the `app-container-sid` crate to check the strings an identity
//! subsystem hands back and to build SIDs from text.
#![cfg_attr(not(feature = "std"), no_std)]

use core::str::FromStr;

use arrayvec::ArrayVec;
use thiserror::Error;

/// Minimum number of sub-authorities of a valid SID.
pub const MIN_SUBAUTHORITY_COUNT: u8 = 1;
/// Maximum number of sub-authorities of a valid SID (`SID_MAX_SUB_AUTHORITIES`).
pub const MAX_SUBAUTHORITY_COUNT: u8 = 15;
/// The only SID revision Windows defines.
pub const SID_REVISION: u8 = 1;

const MAX_IDENTIFIER_AUTHORITY: u64 = 0xFFFF_FFFF_FFFF;

/// Components of a SID string, in the order they appear in the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidComponents {
    /// The SID revision value, always [`SID_REVISION`] once parsed.
    pub revision: u8,
    /// The 48-bit identifier authority, big-endian.
    pub identifier_authority: [u8; 6],
    /// The SID sub-authority values (1 to 15 of them).
    pub sub_authority: ArrayVec<u32, { MAX_SUBAUTHORITY_COUNT as usize }>,
}

/// Error returned when a string is not a canonical SID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidSidFormat {
    /// The string does not start with `S-`.
    #[error("missing 'S-' prefix")]
    MissingPrefix,
    /// The revision is missing, not a number, or not `1`.
    #[error("missing or unsupported revision")]
    Revision,
    /// The identifier authority is missing, malformed, or wider than 48 bits.
    #[error("missing or invalid identifier authority")]
    IdentifierAuthority,
    /// A sub-authority is not a decimal 32-bit value.
    #[error("invalid sub-authority at position {0}")]
    SubAuthority(usize),
    /// No sub-authority follows the identifier authority.
    #[error("no sub-authority")]
    NoSubAuthority,
    /// More than [`MAX_SUBAUTHORITY_COUNT`] sub-authorities.
    #[error("more than {MAX_SUBAUTHORITY_COUNT} sub-authorities")]
    TooManySubAuthorities,
}

impl FromStr for SidComponents {
    type Err = InvalidSidFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('-');
        if !parts
            .next()
            .is_some_and(|head| head.eq_ignore_ascii_case("s"))
        {
            return Err(InvalidSidFormat::MissingPrefix);
        }

        let revision = parts
            .next()
            .and_then(parse_decimal)
            .filter(|&value| value == u64::from(SID_REVISION))
            .map(|_| SID_REVISION)
            .ok_or(InvalidSidFormat::Revision)?;

        let identifier_authority = parts
            .next()
            .and_then(parse_identifier_authority)
            .ok_or(InvalidSidFormat::IdentifierAuthority)?;

        let mut sub_authority = ArrayVec::new();
        for (index, part) in parts.enumerate() {
            let value = parse_decimal(part)
                .and_then(|value| u32::try_from(value).ok())
                .ok_or(InvalidSidFormat::SubAuthority(index))?;
            sub_authority
                .try_push(value)
                .map_err(|_| InvalidSidFormat::TooManySubAuthorities)?;
        }
        if sub_authority.is_empty() {
            return Err(InvalidSidFormat::NoSubAuthority);
        }

        Ok(Self {
            revision,
            identifier_authority,
            sub_authority,
        })
    }
}

/// Digits only: `u64::from_str` would also take a leading `+`.
fn parse_decimal(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn parse_identifier_authority(s: &str) -> Option<[u8; 6]> {
    let value = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
            u64::from_str_radix(hex, 16).ok()?
        }
        Some(_) => return None,
        None => parse_decimal(s)?,
    };
    if value > MAX_IDENTIFIER_AUTHORITY {
        return None;
    }
    let mut authority = [0u8; 6];
    authority.copy_from_slice(value.to_be_bytes().get(2..)?);
    Some(authority)
}
