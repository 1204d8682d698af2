/// Viewport width at and above which the wide layout applies.
pub const WIDE_VIEWPORT_MIN_WIDTH: u32 = 1200;

pub const WIDE_PAGE_SIZE: usize = 6;
pub const NARROW_PAGE_SIZE: usize = 3;

/// Cards per page for a viewport `width` in logical pixels.
#[must_use]
pub fn page_size_for_width(width: u32) -> usize {
    if width >= WIDE_VIEWPORT_MIN_WIDTH {
        WIDE_PAGE_SIZE
    } else {
        NARROW_PAGE_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_is_inclusive() {
        assert_eq!(page_size_for_width(1199), 3);
        assert_eq!(page_size_for_width(1200), 6);
    }

    #[test]
    fn extremes() {
        assert_eq!(page_size_for_width(0), 3);
        assert_eq!(page_size_for_width(u32::MAX), 6);
    }
}
