#![warn(missing_docs)]

//! # taskstack-widgets
//!
//! Pomodoro task-stack widgets for terminal dashboards built with
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//!
//! ## Overview
//!
//! A work interval (one pomodoro) is described by three externally supplied
//! attributes: the unix second it started, its nominal duration in minutes,
//! and the grace minutes allowed past that duration. This crate derives the
//! interval's visual state from those attributes and the wall clock, writes
//! it into a progress-bar view, and keeps every bar fresh with a
//! self-rescheduling refresh pass. Components follow the Elm Architecture
//! pattern with `init()`, `update()`, and `view()` methods.
//!
//! ## Components
//!
//! - [`interval`]: attribute parsing and the derived snapshot (elapsed
//!   minutes, clamped percentage, overflow).
//! - [`progressbar`]: the bar view — fill extent, machine-readable percent,
//!   monotonic overflow marker, minutes and end-time labels.
//! - [`refresher`]: the refresh loop — an explicit entry list, per-element
//!   failure isolation, and a tick re-armed after each pass completes.
//! - [`clock`]: UTC wall-clock capture and `HH:MM` / `YYYY-MM-DD` labels.
//! - [`stack`]: the task dashboard — pipeline, current task with a live
//!   bar, and completed-today sections.
//!
//! ## Quick Start
//!
//! ```rust
//! use taskstack_widgets::prelude::*;
//!
//! let mut refresher = refresher_new(&[]);
//! refresher.push(RefreshEntry::new(
//!     RawAttrs::new("1700000000", "25", "5"),
//!     progressbar_new(&[]),
//! ));
//!
//! // First pass now, then one pass per interval.
//! let _cmd = refresher.init();
//! println!("{}", refresher.view());
//! ```
//!
//! ## Integration with bubbletea-rs
//!
//! ```rust
//! use taskstack_widgets::prelude::*;
//! use bubbletea_rs::{Cmd, Model, Msg};
//!
//! struct App {
//!     stack: TaskStack,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut stack = TaskStack::new();
//!         let cmd = stack.init();
//!         (Self { stack }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.stack.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.stack.view()
//!     }
//! }
//! ```

pub mod clock;
pub mod interval;
pub mod progressbar;
pub mod refresher;
pub mod stack;

pub use clock::{date_utc, hhmm_utc, unix_now};
pub use interval::{AttrError, RawAttrs, Snapshot, WorkInterval};
pub use progressbar::Model as ProgressBar;
pub use refresher::{
    new as refresher_new, with_interval, Entry as RefreshEntry, Model as Refresher, RefreshMsg,
    DEFAULT_REFRESH_INTERVAL,
};
pub use stack::{
    current_progress, CurrentTask, Model as TaskStack, Pomodoro, Task, DEFAULT_UNIT_MINUTES,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use taskstack_widgets::prelude::*;
///
/// let bar = progressbar_new(&[progressbar_with_width(20)]);
/// assert_eq!(bar.percent(), 0.0);
/// ```
pub mod prelude {
    pub use crate::clock::{date_utc, hhmm_utc, unix_now};
    pub use crate::interval::{AttrError, RawAttrs, Snapshot, WorkInterval};
    pub use crate::progressbar::{
        new as progressbar_new, with_fill_characters as progressbar_with_fill_characters,
        with_width as progressbar_with_width, without_end_time_label, without_minutes_label,
        BarOption, Model as ProgressBar,
    };
    pub use crate::refresher::{
        new as refresher_new, with_interval, Entry as RefreshEntry, Model as Refresher,
        RefreshMsg, DEFAULT_REFRESH_INTERVAL,
    };
    pub use crate::stack::{
        current_progress, CurrentTask, Model as TaskStack, Pomodoro, Task, DEFAULT_UNIT_MINUTES,
    };
}
