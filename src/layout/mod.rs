//! Page geometry, word wrapping and pagination.

mod geometry;
pub mod line_breaker;
mod paginate;

pub use geometry::{
    ContentMetrics, LayoutGeometry, Margins, PageGeometry, PageSize, Unit, CHAR_WIDTH_RATIO,
    DEFAULT_FONT_SIZE, LINE_HEIGHT_RATIO,
};
pub use line_breaker::{break_lines, break_paragraphs, paragraph_spans};
pub use paginate::{optimize_headings, page_breaks, paginate, HeadingPlacement};
