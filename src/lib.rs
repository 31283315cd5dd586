//! `showcase` - Server-rendered portfolio page
//!
//! Fetches a General Info document and a Portfolio Mapping document from
//! configurable endpoints, derives a display tree from them, and serves it
//! as a single HTML page.

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod markup;
pub mod observability;
pub mod page;
pub mod server;
pub mod view;
