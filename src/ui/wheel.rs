//! Wheel rendering.
//!
//! Draws the wheel on a braille canvas, rotated by the session's current
//! angle, with the fixed pointer at the top.

use crate::app::App;
use crate::wheel::{slice_angle, slice_under_pointer, SpinState, WheelOption};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

/// Half-extent of the canvas along its shorter axis, in wheel radii.
const VIEW_EXTENT: f64 = 1.25;

/// Distance of the labels from the hub, in wheel radii.
const LABEL_RADIUS: f64 = 0.58;

/// Longest label drawn on the wheel before truncation.
const MAX_LABEL_CHARS: usize = 10;

/// Terminal color for an option's accent.
pub fn option_color(option: &WheelOption) -> Color {
    option
        .rgb()
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::White)
}

/// Point at `radius` along a direction measured clockwise from the top.
#[inline]
fn polar(degrees: f64, radius: f64) -> (f64, f64) {
    let radians = degrees.to_radians();
    (radius * radians.sin(), radius * radians.cos())
}

/// Canvas bounds that keep the wheel round.
///
/// Terminal cells are about twice as tall as they are wide, so the axis
/// with more room gets a wider range.
fn canvas_bounds(area: Rect) -> ([f64; 2], [f64; 2]) {
    let width = area.width.max(1) as f64;
    let height = (area.height.max(1) as f64) * 2.0;
    if width >= height {
        let x = VIEW_EXTENT * width / height;
        ([-x, x], [-VIEW_EXTENT, VIEW_EXTENT])
    } else {
        let y = VIEW_EXTENT * height / width;
        ([-VIEW_EXTENT, VIEW_EXTENT], [-y, y])
    }
}

fn truncate_label(label: &str) -> String {
    if label.chars().count() > MAX_LABEL_CHARS {
        let mut short: String = label.chars().take(MAX_LABEL_CHARS - 1).collect();
        short.push('~');
        short
    } else {
        label.to_string()
    }
}

/// Renders the wheel panel.
///
/// # Arguments
///
/// * `frame` - The frame to render to
/// * `area` - The area to render in
/// * `app` - Application state
pub fn render_wheel(frame: &mut Frame, area: Rect, app: &App) {
    let session = &app.session;
    let title = match session.state() {
        SpinState::Spinning => " Spinning ",
        _ => " Wheel ",
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    let (x_bounds, y_bounds) = canvas_bounds(inner);

    let options = session.options().as_slice();
    let count = options.len();
    let angle = session.current_angle();
    let under_pointer = slice_under_pointer(angle, count);

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(move |ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: 1.0,
                color: Color::Gray,
            });

            if count >= 2 {
                let slice = slice_angle(count);
                for (i, option) in options.iter().enumerate() {
                    let (x2, y2) = polar(i as f64 * slice + angle, 1.0);
                    ctx.draw(&CanvasLine {
                        x1: 0.0,
                        y1: 0.0,
                        x2,
                        y2,
                        color: option_color(option),
                    });
                }
            }

            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: 0.12,
                color: Color::White,
            });

            ctx.layer();

            if count > 0 {
                let slice = slice_angle(count);
                for (i, option) in options.iter().enumerate() {
                    let (x, y) = polar((i as f64 + 0.5) * slice + angle, LABEL_RADIUS);
                    let mut style = Style::default().fg(option_color(option));
                    if i == under_pointer {
                        style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                    }
                    let text = truncate_label(&option.label);
                    // Center the text on its anchor point.
                    let offset = text.chars().count() as f64 / 2.0 * (x_bounds[1] - x_bounds[0])
                        / inner.width.max(1) as f64;
                    ctx.print(x - offset, y, Line::from(Span::styled(text, style)));
                }
            }

            ctx.print(
                0.0,
                1.0 + (VIEW_EXTENT - 1.0) / 2.0,
                Line::from(Span::styled(
                    "▼",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
            );
        });

    frame.render_widget(canvas, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polar_directions() {
        let (x, y) = polar(0.0, 1.0);
        assert!(x.abs() < 1e-12 && (y - 1.0).abs() < 1e-12);
        // Clockwise: a quarter turn points right.
        let (x, y) = polar(90.0, 1.0);
        assert!((x - 1.0).abs() < 1e-12 && y.abs() < 1e-12);
    }

    #[test]
    fn test_canvas_bounds_keep_aspect() {
        let (x, y) = canvas_bounds(Rect::new(0, 0, 80, 20));
        assert_eq!(y, [-VIEW_EXTENT, VIEW_EXTENT]);
        assert!((x[1] - VIEW_EXTENT * 2.0).abs() < 1e-12);

        let (x, y) = canvas_bounds(Rect::new(0, 0, 20, 40));
        assert_eq!(x, [-VIEW_EXTENT, VIEW_EXTENT]);
        assert!((y[1] - VIEW_EXTENT * 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("Nap"), "Nap");
        assert_eq!(truncate_label("Extraordinarily long"), "Extraordi~");
    }

    #[test]
    fn test_option_color() {
        assert_eq!(
            option_color(&WheelOption::new("a", "#4ECDC4")),
            Color::Rgb(0x4E, 0xCD, 0xC4)
        );
        assert_eq!(option_color(&WheelOption::new("a", "teal")), Color::White);
    }
}
