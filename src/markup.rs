//! HTML serialization of the display tree.
//!
//! The page layout lives in `templates/page.html`. Every interpolated value
//! is HTML-escaped by the template engine, so names and URLs from the remote
//! documents cannot inject markup; an escaped attribute still decodes to the
//! exact source value.

use askama::Template;

use crate::error::RenderError;
use crate::view::PageView;

#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate<'a> {
    view: &'a PageView,
}

/// Serializes a page into a complete HTML document.
///
/// # Errors
///
/// Returns [`RenderError::Template`] if the template engine fails.
pub fn render_markup(view: &PageView) -> Result<String, RenderError> {
    Ok(PageTemplate { view }.render()?)
}
