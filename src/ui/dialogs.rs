//! Dialog overlays.
//!
//! Provides the modal that announces the wheel's pick.

use crate::app::App;
use crate::wheel::SpinState;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::centered_rect;
use super::wheel::option_color;

/// Renders the result dialog while the session is celebrating.
///
/// # Arguments
///
/// * `frame` - The frame to render to
/// * `app` - Application state
pub fn render_result_dialog(frame: &mut Frame, app: &App) {
    if app.session.state() != SpinState::Celebrating {
        return;
    }
    let Some(winner) = app.session.result() else {
        return;
    };

    let area = centered_rect(40, 30, frame.area());
    frame.render_widget(Clear, area);

    let accent = option_color(winner);
    let block = Block::default()
        .title(" Result ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Spacer
            Constraint::Length(1), // Heading
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Winner
            Constraint::Min(1),    // Spacer
            Constraint::Length(1), // Instructions
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(
            "The wheel has chosen",
            Style::default().fg(Color::White),
        ))
        .alignment(Alignment::Center),
        chunks[1],
    );

    frame.render_widget(
        Paragraph::new(Span::styled(
            winner.label.as_str(),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        chunks[3],
    );

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(Color::Yellow)),
            Span::styled(" OK", Style::default().fg(Color::DarkGray)),
        ]))
        .alignment(Alignment::Center),
        chunks[5],
    );
}
