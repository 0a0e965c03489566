//! Terminal user interface components.
//!
//! This module provides the visual components for the wheel: the wheel
//! itself, the option list, the title and status bars, and the overlays.

mod dialogs;
mod help;
mod options;
mod wheel;

use crate::app::App;
use crate::wheel::SpinState;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub use dialogs::render_result_dialog;
pub use help::render_help;
pub use options::render_option_list;
pub use wheel::{option_color, render_wheel};

/// Width of the option list panel.
const OPTIONS_PANEL_WIDTH: u16 = 34;

/// Renders the title bar with the spin state and sound indicator.
fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let (state_text, state_color) = match app.session.state() {
        SpinState::Idle => ("READY", Color::Green),
        SpinState::Spinning => ("SPINNING", Color::Yellow),
        SpinState::Celebrating => ("WINNER", Color::Magenta),
    };

    let mut spans = vec![
        Span::styled(
            " Lucky Wheel ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            state_text,
            Style::default()
                .fg(state_color)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    if let Some(progress) = app.session.progress() {
        spans.push(Span::styled(
            format!(" {:3.0}%", progress * 100.0),
            Style::default().fg(Color::DarkGray),
        ));
    }

    spans.push(Span::raw("  "));
    spans.push(if app.session.is_muted() {
        Span::styled("Sound: off", Style::default().fg(Color::Red))
    } else {
        Span::styled("Sound: on", Style::default().fg(Color::Green))
    });

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Renders the status line: the latest message, or a short key hint.
fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.status_message {
        Some((message, _)) => Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Yellow),
        )),
        None => Line::from(vec![
            Span::styled("[Space]", Style::default().fg(Color::Yellow)),
            Span::styled(" Spin  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[?]", Style::default().fg(Color::Yellow)),
            Span::styled(" Help  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[q]", Style::default().fg(Color::Yellow)),
            Span::styled(" Quit", Style::default().fg(Color::DarkGray)),
        ]),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Renders the complete UI.
///
/// The layout is divided into:
/// - Top: Title bar with spin state and sound indicator
/// - Left: The wheel
/// - Right: Option list with the add input and counter
/// - Bottom: Status line
///
/// The result dialog and help overlay are drawn on top when active.
pub fn render(frame: &mut Frame, app: &App) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(10),   // Content
            Constraint::Length(1), // Status
        ])
        .split(frame.area());

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(30),                     // Wheel
            Constraint::Length(OPTIONS_PANEL_WIDTH), // Options
        ])
        .split(main_chunks[1]);

    render_title(frame, main_chunks[0], app);
    render_wheel(frame, content_chunks[0], app);
    render_option_list(frame, content_chunks[1], app);
    render_status(frame, main_chunks[2], app);

    render_result_dialog(frame, app);
    if app.show_help {
        render_help(frame);
    }
}

/// Helper function to center a rectangle within another rectangle.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioEngine;
    use crate::session::WheelSession;
    use crate::wheel::OptionList;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::rc::Rc;

    fn app() -> App {
        let audio = Rc::new(AudioEngine::silent());
        App::new(WheelSession::new(OptionList::with_defaults(), audio))
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(50, 50, area);
        assert_eq!(popup.width, 50);
        assert_eq!(popup.height, 25);
        assert_eq!(popup.x, 25);
    }

    #[test]
    fn test_render_idle_screen() {
        let app = app();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Lucky Wheel"));
        assert!(text.contains("READY"));
        assert!(text.contains("8 / 10"));
        assert!(text.contains("Hot pot"));
    }

    #[test]
    fn test_render_help_overlay() {
        let mut app = app();
        app.show_help = true;
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();
        assert!(screen_text(&terminal).contains("Keyboard Shortcuts"));
    }
}
