//! Help overlay rendering.
//!
//! Displays keyboard shortcuts in a modal overlay.

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::centered_rect;

/// Key binding entry for the help display.
struct KeyBinding {
    key: &'static str,
    description: &'static str,
}

const GENERAL_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        key: "?",
        description: "Toggle this help",
    },
    KeyBinding {
        key: "q",
        description: "Quit",
    },
    KeyBinding {
        key: "Ctrl+C",
        description: "Force quit",
    },
    KeyBinding {
        key: "m",
        description: "Mute / unmute sound",
    },
];

const WHEEL_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        key: "Space / Enter",
        description: "Spin the wheel",
    },
    KeyBinding {
        key: "Enter / Esc",
        description: "Close the result",
    },
];

const OPTION_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        key: "k / Up",
        description: "Select previous option",
    },
    KeyBinding {
        key: "j / Down",
        description: "Select next option",
    },
    KeyBinding {
        key: "a",
        description: "Add an option",
    },
    KeyBinding {
        key: "d / Delete",
        description: "Remove the selected option",
    },
];

/// Builds the help text, one section per binding group.
fn help_lines() -> Vec<Line<'static>> {
    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(Color::White);

    let sections: [(&'static str, &[KeyBinding]); 3] = [
        ("General", GENERAL_BINDINGS),
        ("Wheel", WHEEL_BINDINGS),
        ("Options", OPTION_BINDINGS),
    ];

    let mut lines = Vec::new();
    for (title, bindings) in sections {
        lines.push(Line::from(Span::styled(title, section_style)));
        for binding in bindings {
            lines.push(Line::from(vec![
                Span::styled(format!("{:15}", binding.key), key_style),
                Span::styled(binding.description, desc_style),
            ]));
        }
        lines.push(Line::from(""));
    }
    lines
}

/// Renders the help overlay.
///
/// # Arguments
///
/// * `frame` - The frame to render to
pub fn render_help(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help - Keyboard Shortcuts ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Fixed footer
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(help_lines()), chunks[0]);

    let footer = Paragraph::new(Line::from(Span::styled(
        "Close: ?/Esc",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )));
    frame.render_widget(footer, chunks[1]);
}
