//! Wheel options and the editable option list.
//!
//! An option is one labeled slice of the wheel. The list owns the options
//! in display order; slice `i` of the wheel belongs to option `i`.

use thiserror::Error;
use uuid::Uuid;

use super::{MAX_OPTIONS, MIN_OPTIONS};

/// Accent colors assigned to new options in order, wrapping around.
pub const PALETTE: [&str; 10] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEEAD", "#FF9F43", "#54A0FF", "#5F27CD",
    "#FF5252", "#341F97",
];

/// Labels of the options a fresh list starts with.
pub const DEFAULT_LABELS: [&str; 8] = [
    "Hot pot", "Barbecue", "Bubble tea", "Workout", "Nap", "Study", "Movie", "Games",
];

/// Stable identifier for an option within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OptionId(Uuid);

impl OptionId {
    /// Generates a new random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OptionId {
    fn default() -> Self {
        Self::new()
    }
}

/// A single selectable item on the wheel.
///
/// Options are immutable once created; editing the list replaces or
/// removes whole options.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelOption {
    /// Unique identifier for this option.
    pub id: OptionId,
    /// Display text.
    pub label: String,
    /// Accent color as a `#RRGGBB` hex string.
    pub color: String,
}

impl WheelOption {
    /// Creates an option with a fresh identifier.
    pub fn new(label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: OptionId::new(),
            label: label.into(),
            color: color.into(),
        }
    }

    /// Parses the accent color into RGB components.
    ///
    /// Returns `None` if the color is not a `#RRGGBB` string.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.color.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
        let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
        let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
        Some((r, g, b))
    }
}

/// Errors returned by option list edits.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionError {
    #[error("the wheel already has the maximum of {max} options", max = MAX_OPTIONS)]
    Full,
    #[error("option label is empty")]
    EmptyLabel,
    #[error("the wheel needs at least {min} options", min = MIN_OPTIONS)]
    TooFew,
    #[error("no option with that id")]
    NotFound,
    #[error("options cannot change while the wheel is spinning")]
    Busy,
}

/// Ordered list of wheel options with the editing rules applied.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionList {
    options: Vec<WheelOption>,
}

impl OptionList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            options: Vec::with_capacity(MAX_OPTIONS),
        }
    }

    /// Creates a list with the default options.
    pub fn with_defaults() -> Self {
        let mut list = Self::new();
        for label in DEFAULT_LABELS {
            // Defaults never exceed the capacity.
            let _ = list.add(label);
        }
        list
    }

    /// Builds a list from already-constructed options, keeping at most
    /// [`MAX_OPTIONS`] of them.
    pub fn from_options(options: impl IntoIterator<Item = WheelOption>) -> Self {
        Self {
            options: options.into_iter().take(MAX_OPTIONS).collect(),
        }
    }

    /// Appends a new option with the next palette color.
    ///
    /// # Arguments
    ///
    /// * `label` - Display text; surrounding whitespace is trimmed
    ///
    /// # Returns
    ///
    /// The id of the new option
    ///
    /// # Errors
    ///
    /// Returns [`OptionError::Full`] when the list is at capacity and
    /// [`OptionError::EmptyLabel`] when the trimmed label is empty.
    pub fn add(&mut self, label: &str) -> Result<OptionId, OptionError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(OptionError::EmptyLabel);
        }
        if self.is_full() {
            return Err(OptionError::Full);
        }
        let color = PALETTE[self.options.len() % PALETTE.len()];
        let option = WheelOption::new(label, color);
        let id = option.id;
        self.options.push(option);
        tracing::debug!(label, "option added");
        Ok(id)
    }

    /// Removes the option with the given id.
    ///
    /// Refuses to drop below [`MIN_OPTIONS`] so the wheel stays spinnable.
    pub fn remove(&mut self, id: OptionId) -> Result<WheelOption, OptionError> {
        let index = self
            .options
            .iter()
            .position(|o| o.id == id)
            .ok_or(OptionError::NotFound)?;
        if self.options.len() <= MIN_OPTIONS {
            return Err(OptionError::TooFew);
        }
        let removed = self.options.remove(index);
        tracing::debug!(label = %removed.label, "option removed");
        Ok(removed)
    }

    /// Returns the options in wheel order.
    pub fn as_slice(&self) -> &[WheelOption] {
        &self.options
    }

    /// Returns the option at an index.
    pub fn get(&self, index: usize) -> Option<&WheelOption> {
        self.options.get(index)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.options.len() >= MAX_OPTIONS
    }

    /// Whether the wheel has enough options to spin.
    pub fn can_spin(&self) -> bool {
        self.options.len() >= MIN_OPTIONS
    }
}

impl Default for OptionList {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_palette_in_order() {
        let list = OptionList::with_defaults();
        assert_eq!(list.len(), DEFAULT_LABELS.len());
        for (i, option) in list.as_slice().iter().enumerate() {
            assert_eq!(option.color, PALETTE[i]);
            assert_eq!(option.label, DEFAULT_LABELS[i]);
        }
    }

    #[test]
    fn test_add_trims_and_rejects_empty() {
        let mut list = OptionList::new();
        assert_eq!(list.add("   "), Err(OptionError::EmptyLabel));
        list.add("  Tacos ").unwrap();
        assert_eq!(list.get(0).unwrap().label, "Tacos");
    }

    #[test]
    fn test_add_stops_at_capacity() {
        let mut list = OptionList::with_defaults();
        list.add("Ninth").unwrap();
        list.add("Tenth").unwrap();
        assert!(list.is_full());
        assert_eq!(list.add("Eleventh"), Err(OptionError::Full));
        // Palette wraps after ten entries; the tenth gets the last color.
        assert_eq!(list.get(9).unwrap().color, PALETTE[9]);
    }

    #[test]
    fn test_remove_keeps_minimum() {
        let mut list = OptionList::new();
        let a = list.add("A").unwrap();
        let b = list.add("B").unwrap();
        let c = list.add("C").unwrap();
        assert_eq!(list.remove(b).unwrap().label, "B");
        assert_eq!(list.remove(a), Err(OptionError::TooFew));
        assert_eq!(list.len(), 2);
        assert_eq!(list.remove(b), Err(OptionError::NotFound));
        assert!(list.as_slice().iter().any(|o| o.id == c));
    }

    #[test]
    fn test_ids_are_unique() {
        let list = OptionList::with_defaults();
        let ids: std::collections::HashSet<OptionId> =
            list.as_slice().iter().map(|o| o.id).collect();
        assert_eq!(ids.len(), list.len());
    }

    #[test]
    fn test_rgb_parsing() {
        let option = WheelOption::new("x", "#FF6B6B");
        assert_eq!(option.rgb(), Some((0xFF, 0x6B, 0x6B)));
        assert_eq!(WheelOption::new("x", "red").rgb(), None);
        assert_eq!(WheelOption::new("x", "#12345").rgb(), None);
    }
}
