use crate::sid::Sid;

/// Builds a `*const Sid` from a thin pointer and its sub-authority count.
#[allow(clippy::cast_ptr_alignment)]
pub const fn from_raw_parts(src: *const (), sub_authority_count: usize) -> *const Sid {
    core::ptr::slice_from_raw_parts(src, sub_authority_count) as *const Sid
}
