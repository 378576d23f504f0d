//! TUI views and rendering.

mod views;

pub use views::{
    article_lines, draw_articles, empty_state_message, LOADING_MESSAGE, NO_INTERNET_MESSAGE,
    NO_NEWS_MESSAGE,
};
