//! Rendering analysis results and laid-out text.

mod json;
mod paged;

pub use json::{to_json, value_to_json, JsonFormat};
pub use paged::{paginate_text, to_paged_text, PageText, PagedDocument, FORM_FEED};
