//! Progress-bar view for one work interval.
//!
//! The bar is the visual sub-tree the refresher mutates on every pass: a
//! fill whose extent tracks the completion percentage, a numeric label with
//! the elapsed minutes, and an end-time label stamped with the wall clock.
//! The refresher never creates or destroys these parts; it only writes
//! style and text state into a pre-existing [`Model`].
//!
//! # Basic Usage
//!
//! ```rust
//! use taskstack_widgets::progressbar::{new, with_width, without_minutes_label};
//!
//! // A bar with default settings.
//! let bar = new(&[]);
//!
//! // A narrower bar without the minutes label.
//! let bar = new(&[with_width(20), without_minutes_label()]);
//! ```
//!
//! # Applying refresh results
//!
//! ```rust
//! use taskstack_widgets::progressbar::new;
//!
//! let mut bar = new(&[]);
//! bar.set_percent(40.0);
//! bar.set_minutes(10);
//! bar.set_end_time("13:05".to_string(), "2026-08-30".to_string());
//! assert_eq!(bar.percent(), 40.0);
//! assert!(!bar.overflowed());
//!
//! bar.mark_overflow();
//! assert!(bar.overflowed());
//! // Marking again is a no-op; nothing ever clears the marker.
//! bar.mark_overflow();
//! assert!(bar.overflowed());
//! ```

use lipgloss_extras::lipgloss::{Color, Style};

const DEFAULT_WIDTH: i32 = 40;
const DEFAULT_FULL_COLOR: &str = "#7571F9";
const DEFAULT_EMPTY_COLOR: &str = "#606060";
const DEFAULT_OVERFLOW_COLOR: &str = "#FF4757";

/// Configuration options for the bar's appearance and which label slots it
/// carries.
///
/// Options are applied in order by [`new`], mirroring the option pattern
/// used throughout this crate.
pub enum BarOption {
    /// Sets the width of the bar in cells (fill only; labels are extra).
    WithWidth(i32),
    /// Customizes the characters used for filled and empty cells.
    WithFillCharacters(char, char),
    /// Sets the fill color used while the interval is within budget.
    WithFillColor(String),
    /// Sets the fill color used once the bar is marked overflowed.
    WithOverflowColor(String),
    /// Builds the bar without a minutes label slot. Writes to the missing
    /// slot are skipped silently.
    WithoutMinutesLabel,
    /// Builds the bar without an end-time label slot.
    WithoutEndTimeLabel,
}

impl BarOption {
    fn apply(&self, m: &mut Model) {
        match self {
            BarOption::WithWidth(width) => m.width = *width,
            BarOption::WithFillCharacters(full, empty) => {
                m.full = *full;
                m.empty = *empty;
            }
            BarOption::WithFillColor(color) => m.full_color = color.clone(),
            BarOption::WithOverflowColor(color) => m.overflow_color = color.clone(),
            BarOption::WithoutMinutesLabel => m.has_minutes_label = false,
            BarOption::WithoutEndTimeLabel => m.has_end_time_label = false,
        }
    }
}

/// Sets the width of the bar in cells.
pub fn with_width(w: i32) -> BarOption {
    BarOption::WithWidth(w)
}

/// Customizes the characters used for filled and empty cells.
///
/// ```rust
/// use taskstack_widgets::progressbar::{new, with_fill_characters};
///
/// let ascii_bar = new(&[with_fill_characters('=', '-')]);
/// ```
pub fn with_fill_characters(full: char, empty: char) -> BarOption {
    BarOption::WithFillCharacters(full, empty)
}

/// Sets the in-budget fill color (hex code or named color).
pub fn with_fill_color(color: String) -> BarOption {
    BarOption::WithFillColor(color)
}

/// Sets the fill color applied once the bar is marked overflowed.
pub fn with_overflow_color(color: String) -> BarOption {
    BarOption::WithOverflowColor(color)
}

/// Builds the bar without a minutes label slot.
pub fn without_minutes_label() -> BarOption {
    BarOption::WithoutMinutesLabel
}

/// Builds the bar without an end-time label slot.
pub fn without_end_time_label() -> BarOption {
    BarOption::WithoutEndTimeLabel
}

/// The visual state of one progress bar.
///
/// All fields written during a refresh pass persist until the next pass
/// overwrites them; the overflow marker persists for the life of the model.
#[derive(Debug, Clone)]
pub struct Model {
    /// Width of the fill in cells.
    pub width: i32,
    /// Character for filled cells.
    pub full: char,
    /// Character for empty cells.
    pub empty: char,
    /// Color of the fill while within budget.
    pub full_color: String,
    /// Color of the empty portion.
    pub empty_color: String,
    /// Color of the fill once overflowed.
    pub overflow_color: String,
    /// Style applied to the minutes label text.
    pub minutes_style: Style,
    /// Style applied to the end-time label text.
    pub end_time_style: Style,

    percent: f64,
    overflow: bool,
    has_minutes_label: bool,
    minutes: Option<i64>,
    has_end_time_label: bool,
    end_time: Option<String>,
    end_time_title: Option<String>,
}

/// Creates a new progress bar with the given options applied over the
/// defaults: width 40, `█`/`░` cells, both label slots present, 0%.
pub fn new(opts: &[BarOption]) -> Model {
    let mut m = Model {
        width: DEFAULT_WIDTH,
        full: '█',
        empty: '░',
        full_color: DEFAULT_FULL_COLOR.to_string(),
        empty_color: DEFAULT_EMPTY_COLOR.to_string(),
        overflow_color: DEFAULT_OVERFLOW_COLOR.to_string(),
        minutes_style: Style::new(),
        end_time_style: Style::new(),
        percent: 0.0,
        overflow: false,
        has_minutes_label: true,
        minutes: None,
        has_end_time_label: true,
        end_time: None,
        end_time_title: None,
    };
    for opt in opts {
        opt.apply(&mut m);
    }
    m
}

impl Model {
    /// Writes the machine-readable progress attribute, clamped to
    /// `0.0..=100.0`. Non-finite input is ignored so a bad upstream value
    /// can never poison the stored percentage.
    pub fn set_percent(&mut self, percent: f64) {
        if percent.is_finite() {
            self.percent = percent.clamp(0.0, 100.0);
        }
    }

    /// Returns the last written progress percentage.
    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// Adds the overflow marker. Idempotent; no API removes the marker,
    /// since elapsed time cannot decrease within a pass sequence.
    pub fn mark_overflow(&mut self) {
        self.overflow = true;
    }

    /// Returns whether the overflow marker is present.
    pub fn overflowed(&self) -> bool {
        self.overflow
    }

    /// Writes the elapsed-minutes label. Skipped when the bar was built
    /// without a minutes slot.
    pub fn set_minutes(&mut self, minutes: i64) {
        if self.has_minutes_label {
            self.minutes = Some(minutes);
        }
    }

    /// Returns the minutes label text, if the slot exists and was written.
    pub fn minutes_text(&self) -> Option<String> {
        self.minutes.map(|m| m.to_string())
    }

    /// Writes the end-time label and its tooltip/title text. Skipped when
    /// the bar was built without an end-time slot.
    pub fn set_end_time(&mut self, label: String, title: String) {
        if self.has_end_time_label {
            self.end_time = Some(label);
            self.end_time_title = Some(title);
        }
    }

    /// Returns the end-time label text, if written.
    pub fn end_time_text(&self) -> Option<&str> {
        self.end_time.as_deref()
    }

    /// Returns the end-time tooltip/title text, if written.
    pub fn end_time_title(&self) -> Option<&str> {
        self.end_time_title.as_deref()
    }

    /// Renders the bar at its stored percentage, followed by the minutes
    /// and end-time labels when present.
    pub fn view(&self) -> String {
        let mut out = self.fill_view();
        if let Some(minutes) = &self.minutes {
            out.push(' ');
            out.push_str(&self.minutes_style.render(&minutes.to_string()));
        }
        if let Some(end_time) = &self.end_time {
            out.push(' ');
            out.push_str(&self.end_time_style.render(end_time));
        }
        out
    }

    /// Renders the fill portion only.
    fn fill_view(&self) -> String {
        let tw = std::cmp::max(0, self.width);
        let fw = std::cmp::max(
            0,
            std::cmp::min(tw, ((tw as f64) * self.percent / 100.0).round() as i32),
        );

        let fill_color = if self.overflow {
            &self.overflow_color
        } else {
            &self.full_color
        };
        let full_styled = Style::new()
            .foreground(Color::from(fill_color.as_str()))
            .render(&self.full.to_string());
        let empty_styled = Style::new()
            .foreground(Color::from(self.empty_color.as_str()))
            .render(&self.empty.to_string());

        let mut result = full_styled.repeat(fw as usize);
        result.push_str(&empty_styled.repeat((tw - fw) as usize));
        result
    }
}

impl Default for Model {
    fn default() -> Self {
        new(&[])
    }
}
