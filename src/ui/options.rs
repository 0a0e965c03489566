//! Option list rendering.
//!
//! Displays the wheel's options with their accent colors, the add-option
//! input and the capacity counter.

use crate::app::App;
use crate::wheel::{SpinState, MAX_OPTIONS, MIN_OPTIONS};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use super::wheel::option_color;

/// Height reserved for the counter and control hints at the bottom.
const FOOTER_HEIGHT: u16 = 3;

/// Shortens `text` to `max` characters, marking the cut with "...".
#[inline]
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

/// Renders the option list panel.
///
/// # Arguments
///
/// * `frame` - The frame to render to
/// * `area` - The area to render in
/// * `app` - Application state
pub fn render_option_list(frame: &mut Frame, area: Rect, app: &App) {
    let locked = app.session.state() == SpinState::Spinning;
    let block = Block::default()
        .title(" Options ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if app.input.is_some() {
            Color::Cyan
        } else {
            Color::Gray
        }));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),                // Option list
            Constraint::Length(1),             // Input line
            Constraint::Length(FOOTER_HEIGHT), // Counter and hints
        ])
        .split(inner);

    let max_label_len = inner.width.saturating_sub(6) as usize;
    let winner = app.session.result().map(|o| o.id);

    let items: Vec<ListItem> = app
        .session
        .options()
        .as_slice()
        .iter()
        .map(|option| {
            let mut label_style =
                Style::default().fg(if locked { Color::DarkGray } else { Color::Gray });
            if winner == Some(option.id) {
                label_style = Style::default()
                    .fg(option_color(option))
                    .add_modifier(Modifier::BOLD);
            }
            ListItem::new(Line::from(vec![
                Span::styled("● ", Style::default().fg(option_color(option))),
                Span::styled(truncate(&option.label, max_label_len), label_style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(Color::Rgb(40, 40, 40))
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.selected));
    frame.render_stateful_widget(list, chunks[0], &mut state);

    if let Some(input) = &app.input {
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("+ ", Style::default().fg(Color::Green)),
                Span::styled(
                    truncate(input, max_label_len),
                    Style::default()
                        .fg(Color::Yellow)
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    "_",
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::RAPID_BLINK),
                ),
            ])),
            chunks[1],
        );
    }

    let count = app.session.options().len();
    let count_style = if count >= MAX_OPTIONS {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };
    let key_style = Style::default().fg(Color::Yellow);
    let desc_style = Style::default().fg(Color::DarkGray);

    let counter = Line::from(vec![
        Span::styled(format!("{} / {}", count, MAX_OPTIONS), count_style),
        Span::styled(
            format!("  (min {}, max {})", MIN_OPTIONS, MAX_OPTIONS),
            desc_style,
        ),
    ]);
    let hints = Line::from(vec![
        Span::styled("[", desc_style),
        Span::styled("a", key_style),
        Span::styled("]Add ", desc_style),
        Span::styled("[", desc_style),
        Span::styled("d", key_style),
        Span::styled("]Del ", desc_style),
        Span::styled("[", desc_style),
        Span::styled("m", key_style),
        Span::styled(
            if app.session.is_muted() {
                "]Unmute"
            } else {
                "]Mute"
            },
            desc_style,
        ),
    ]);

    frame.render_widget(
        Paragraph::new(vec![Line::from(""), counter, hints]),
        chunks[2],
    );
}
