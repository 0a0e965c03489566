//! Application state and event handling.
//!
//! This module defines the front-end state that sits between the terminal
//! and the wheel session: list selection, the add-option input, status
//! messages and the help overlay.

use crate::session::WheelSession;
use crate::wheel::SpinState;
use std::time::{Duration, Instant};

/// How long a status message stays visible.
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// Main application state.
pub struct App {
    /// The wheel being spun.
    pub session: WheelSession,
    /// Index of the highlighted option in the list panel.
    pub selected: usize,
    /// Text being typed for a new option, while the input is open.
    pub input: Option<String>,
    /// Temporary status message and when it was set.
    pub status_message: Option<(String, Instant)>,
    /// Whether the help overlay is visible.
    pub show_help: bool,
    /// Set when the user asks to quit.
    pub should_quit: bool,
}

impl App {
    /// Creates the application around a session.
    pub fn new(session: WheelSession) -> Self {
        Self {
            session,
            selected: 0,
            input: None,
            status_message: None,
            show_help: false,
            should_quit: false,
        }
    }

    /// Sets a status message to display temporarily.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// Clears expired status messages.
    pub fn clear_expired_status(&mut self) {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed() > STATUS_TIMEOUT {
                self.status_message = None;
            }
        }
    }

    /// Advances the spin. Should be called every frame.
    pub fn update(&mut self) {
        if let Some(winner) = self.session.poll() {
            self.set_status(format!("The wheel picked {}", winner.label));
        }
        self.clear_expired_status();
    }

    /// Spins the wheel, explaining why when it cannot.
    pub fn spin(&mut self) {
        if self.session.spin() {
            self.set_status("Spinning...");
        } else if self.session.state() == SpinState::Idle && !self.session.options().can_spin() {
            self.set_status("Add at least two options to spin");
        }
    }

    /// Closes the winner dialog.
    pub fn close_result(&mut self) {
        self.session.close_result();
    }

    /// Toggles sound and reports the new state.
    pub fn toggle_mute(&mut self) {
        if self.session.toggle_mute() {
            self.set_status("Sound off");
        } else {
            self.set_status("Sound on");
        }
    }

    /// Moves the list selection up.
    pub fn select_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Moves the list selection down.
    pub fn select_down(&mut self) {
        if self.selected + 1 < self.session.options().len() {
            self.selected += 1;
        }
    }

    /// Opens the new-option input.
    pub fn start_add(&mut self) {
        if self.session.options().is_full() {
            self.set_status("The wheel is full");
            return;
        }
        self.input = Some(String::new());
    }

    /// Appends a character to the new-option input.
    pub fn input_char(&mut self, c: char) {
        if let Some(input) = &mut self.input {
            input.push(c);
        }
    }

    /// Deletes the last character of the new-option input.
    pub fn input_backspace(&mut self) {
        if let Some(input) = &mut self.input {
            input.pop();
        }
    }

    /// Adds the typed option and closes the input.
    ///
    /// An empty input just closes; other failures keep the input open.
    pub fn confirm_add(&mut self) {
        let Some(label) = self.input.take() else {
            return;
        };
        if label.trim().is_empty() {
            return;
        }
        match self.session.add_option(&label) {
            Ok(_) => {
                self.selected = self.session.options().len() - 1;
                self.set_status(format!("Added {}", label.trim()));
            }
            Err(e) => {
                self.set_status(e.to_string());
                self.input = Some(label);
            }
        }
    }

    /// Closes the new-option input without adding.
    pub fn cancel_add(&mut self) {
        self.input = None;
    }

    /// Removes the highlighted option.
    pub fn remove_selected(&mut self) {
        let Some(id) = self.session.options().get(self.selected).map(|o| o.id) else {
            return;
        };
        match self.session.remove_option(id) {
            Ok(removed) => {
                self.selected = self
                    .selected
                    .min(self.session.options().len().saturating_sub(1));
                self.set_status(format!("Removed {}", removed.label));
            }
            Err(e) => self.set_status(e.to_string()),
        }
    }

    /// Stops any running spin and asks the main loop to exit.
    pub fn quit(&mut self) {
        self.session.shutdown();
        self.should_quit = true;
    }
}
