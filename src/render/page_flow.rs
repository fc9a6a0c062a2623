//! Vertical cursor tracking and page breaks.
//!
//! The cursor is an explicit value threaded through each emission call; every
//! step returns a new cursor instead of mutating shared state, so pagination
//! is unit-testable without a document backend.
//!
//! Two break points exist:
//! - `ensure_space` is a look-ahead check used before an atomic unit (a
//!   section header plus its minimum following content, or a fixed block of
//!   lines), so a header is never stranded at the bottom of a page.
//! - `advance_line` is the per-line decrement used while emitting wrapped
//!   lines; it triggers its own break when a paragraph runs past the bottom
//!   padding mid-unit. This is the only place mid-unit pagination happens.

/// Fixed page geometry in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub top_padding: f32,
    pub bottom_padding: f32,
    pub left_margin: f32,
    pub content_width: f32,
}

impl PageGeometry {
    /// A4 portrait with the margins both renderers use.
    pub const A4: PageGeometry = PageGeometry {
        page_width: 210.0,
        page_height: 297.0,
        top_padding: 17.0,
        bottom_padding: 20.0,
        left_margin: 20.0,
        content_width: 170.0,
    };

    /// Vertical offset of the first line on a fresh page.
    pub fn start_offset(&self) -> f32 {
        self.page_height - self.top_padding
    }

    /// Usable vertical space per page.
    pub fn capacity(&self) -> f32 {
        self.page_height - self.top_padding - self.bottom_padding
    }
}

/// Current write position: page index plus vertical offset from the page
/// bottom edge (printpdf convention: offset decreases as text goes down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageCursor {
    pub page: usize,
    pub offset: f32,
}

impl PageCursor {
    pub fn start(geo: &PageGeometry) -> Self {
        Self {
            page: 0,
            offset: geo.start_offset(),
        }
    }
}

/// Guarantee `min_required` vertical space below the cursor.
///
/// If the remaining space above the bottom padding is insufficient, a new
/// page is allocated and the offset reset to the top; otherwise the cursor
/// is returned unchanged.
pub fn ensure_space(geo: &PageGeometry, cursor: PageCursor, min_required: f32) -> PageCursor {
    if cursor.offset - min_required < geo.bottom_padding {
        PageCursor {
            page: cursor.page + 1,
            offset: geo.start_offset(),
        }
    } else {
        cursor
    }
}

/// Advance past one emitted line of height `line_height`.
///
/// Unlike `ensure_space`, the break happens after the fact: when the
/// decremented offset falls below the bottom padding, the next line starts
/// on a fresh page.
pub fn advance_line(geo: &PageGeometry, cursor: PageCursor, line_height: f32) -> PageCursor {
    let offset = cursor.offset - line_height;
    if offset < geo.bottom_padding {
        PageCursor {
            page: cursor.page + 1,
            offset: geo.start_offset(),
        }
    } else {
        PageCursor {
            page: cursor.page,
            offset,
        }
    }
}

/// Apply inter-section spacing. Never allocates a page by itself; the next
/// `ensure_space` handles an exhausted page.
pub fn advance_spacing(geo: &PageGeometry, cursor: PageCursor, spacing: f32) -> PageCursor {
    let offset = (cursor.offset - spacing).max(geo.bottom_padding);
    PageCursor {
        page: cursor.page,
        offset,
    }
}
