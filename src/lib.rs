//! newstui — terminal reader for The Guardian content search API.

#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::too_many_lines,
    clippy::too_long_first_doc_paragraph
)]

pub mod api;
pub mod app;
pub mod article;
pub mod browser;
pub mod config;
pub mod connectivity;
pub mod credential;
pub mod error;
pub mod loader;
pub mod logging;
pub mod tui;
