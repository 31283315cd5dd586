//! `render` command
//!
//! Runs the render operation once and writes the result to stdout.

use crate::cli::args::{RenderArgs, RenderFormat};
use crate::error::ShowcaseError;
use crate::fetch::HttpDataSource;
use crate::markup::render_markup;
use crate::page::render_page;

use super::load_config;

/// Render the page once.
///
/// # Errors
///
/// Returns a config error for invalid configuration, a fetch error if
/// either document cannot be fetched, or a render error if serialization
/// fails. Nothing is written to stdout on error.
pub async fn run(args: &RenderArgs) -> Result<(), ShowcaseError> {
    let config = load_config(args.source.config.as_deref(), &args.source.overrides())?;
    let source = HttpDataSource::new(config.endpoints.clone())?;

    let page = render_page(&source, &config.site).await?;

    let output = match args.format {
        RenderFormat::Html => render_markup(&page)?,
        RenderFormat::Json => serde_json::to_string_pretty(&page)?,
    };
    println!("{output}");
    Ok(())
}
