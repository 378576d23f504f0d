//! TUI view rendering for the article list.

use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::LoadState;
use crate::article::ArticleRecord;
use crate::config::AppConfig;

pub const LOADING_MESSAGE: &str = "Loading…";
pub const NO_INTERNET_MESSAGE: &str = "No internet connection.";
pub const NO_NEWS_MESSAGE: &str = "No news found.";

/// Text shown in place of the list, or None when rows should be drawn.
pub fn empty_state_message(state: &LoadState) -> Option<&str> {
    match state {
        LoadState::Loading => Some(LOADING_MESSAGE),
        LoadState::Populated => None,
        LoadState::Empty => Some(NO_NEWS_MESSAGE),
        LoadState::NoConnectivity => Some(NO_INTERNET_MESSAGE),
        LoadState::Failed(description) => Some(description.as_str()),
    }
}

/// Headline on the first line; section, author and date on the second.
pub fn article_lines(article: &ArticleRecord, selected: bool) -> [Line<'_>; 2] {
    let headline_style = if selected {
        Style::default()
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            .fg(Color::Green)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let meta = format!(
        "   {} · {} · {}",
        article.section, article.author, article.date
    );
    [
        Line::from(vec![
            Span::raw(if selected { "▶ " } else { "  " }),
            Span::styled(article.headline.as_str(), headline_style),
        ]),
        Line::from(Span::styled(meta, Style::default().fg(Color::DarkGray))),
    ]
}

fn search_title(config: &AppConfig) -> String {
    match config.tag.as_deref() {
        Some(tag) if !tag.is_empty() => format!(
            " The Guardian: \"{}\" in {} since {} ",
            config.query, tag, config.from_date
        ),
        _ => format!(
            " The Guardian: \"{}\" since {} ",
            config.query, config.from_date
        ),
    }
}

pub fn draw_articles(
    frame: &mut Frame,
    config: &AppConfig,
    state: &LoadState,
    articles: &[ArticleRecord],
    selected: usize,
    scroll: usize,
    toast: Option<&str>,
) {
    let area = frame.area();
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(area);

    let title = Paragraph::new(search_title(config)).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(title, chunks[0]);

    let content_area = chunks[1];
    let block_title = if articles.is_empty() {
        " Articles ".to_string()
    } else {
        format!(" Articles ({}/{}) ", selected + 1, articles.len())
    };
    let block = Block::default().borders(Borders::ALL).title(block_title);

    if let Some(message) = empty_state_message(state) {
        let para = Paragraph::new(message)
            .block(block)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true });
        frame.render_widget(para, content_area);
    } else {
        let visible = (content_area.height.saturating_sub(2) as usize / 2).max(1);
        let start = scroll.min(articles.len().saturating_sub(visible));
        let end = (start + visible).min(articles.len());
        let lines: Vec<Line> = articles[start..end]
            .iter()
            .enumerate()
            .flat_map(|(i, a)| article_lines(a, start + i == selected))
            .collect();
        frame.render_widget(Paragraph::new(lines).block(block), content_area);
    }

    if let Some(message) = toast {
        let toast = Paragraph::new(message).style(Style::default().fg(Color::Yellow));
        frame.render_widget(toast, chunks[2]);
    }

    let help = Line::from(Span::styled(
        " ↑/↓: select  Enter: open in browser  q: quit ",
        Style::default().add_modifier(Modifier::DIM),
    ));
    frame.render_widget(Paragraph::new(help), chunks[3]);
}
