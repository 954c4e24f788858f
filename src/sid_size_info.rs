use crate::sid::{MAX_SUBAUTHORITY_COUNT, MIN_SUBAUTHORITY_COUNT, SID_HEAD_SIZE};
use core::alloc::Layout;

pub const fn sub_authority_size_guard(size: usize) -> bool {
    MIN_SUBAUTHORITY_COUNT as usize <= size && size <= MAX_SUBAUTHORITY_COUNT as usize
}

/// Size information of a SID with a given number of sub-authorities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SidSizeInfo {
    sub_authority_count: u8,
}

impl SidSizeInfo {
    pub const fn from_count(sub_authority_count: u8) -> Option<Self> {
        if sub_authority_size_guard(sub_authority_count as usize) {
            Some(Self {
                sub_authority_count,
            })
        } else {
            None
        }
    }

    /// `SID_HEAD_SIZE + 4 * count`, aligned like `u32` (what `GetSidLengthRequired` reports).
    pub const fn get_layout(self) -> Layout {
        let size = SID_HEAD_SIZE + self.sub_authority_count as usize * size_of::<u32>();
        match Layout::from_size_align(size, align_of::<u32>()) {
            Ok(layout) => layout,
            Err(_) => unreachable!(),
        }
    }
}
