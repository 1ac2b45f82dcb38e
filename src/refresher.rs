//! Self-rescheduling refresher for work-interval progress bars.
//!
//! The refresher owns an explicit list of entries built at initialization —
//! each entry couples the raw interval attributes with the bar it manages —
//! and recomputes every active bar's visual state on a repeating tick. The
//! tick is re-armed only after a pass has run to completion, so passes never
//! overlap and the configured delay is measured from the end of one pass to
//! the start of the next.
//!
//! # Basic Usage
//!
//! ```rust
//! use taskstack_widgets::interval::RawAttrs;
//! use taskstack_widgets::progressbar;
//! use taskstack_widgets::refresher::{new, with_interval, Entry};
//! use std::time::Duration;
//!
//! let mut refresher = new(&[with_interval(Duration::from_secs(1))]);
//! refresher.push(Entry::new(
//!     RawAttrs::new("1700000000", "25", "5"),
//!     progressbar::new(&[]),
//! ));
//!
//! // Runs the first pass immediately and arms the tick.
//! let _cmd = refresher.init();
//! ```
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//! use taskstack_widgets::refresher;
//!
//! struct App {
//!     refresher: refresher::Model,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut refresher = refresher::new(&[]);
//!         let cmd = refresher.init();
//!         (Self { refresher }, Some(cmd))
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         // Forward refresh ticks; the refresher re-arms itself.
//!         self.refresher.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.refresher.view()
//!     }
//! }
//! ```

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Model as BubbleTeaModel, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use crate::clock::{date_utc, hhmm_utc, unix_now};
use crate::interval::{RawAttrs, Snapshot, WorkInterval};
use crate::progressbar;

// Internal ID management for refresher instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Delay between the end of one refresh pass and the start of the next.
///
/// The single authoritative value; override it per instance with
/// [`with_interval`].
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(15);

/// Message that triggers one refresh pass.
///
/// Carries the owning refresher's ID so multiple refreshers can coexist,
/// and an internal tag so a stale schedule (from before the latest re-arm)
/// cannot cause double-ticking.
#[derive(Debug, Clone)]
pub struct RefreshMsg {
    /// The unique identifier of the refresher this message targets.
    pub id: i64,
    tag: i64,
}

/// One managed timer element: its markers, its raw attributes, and the bar
/// it owns.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Marks the entry as a work interval.
    pub worked: bool,
    /// Marks the interval as currently running. Entries without both
    /// markers are skipped entirely by a pass.
    pub active: bool,
    /// Externally supplied attributes, re-read on every pass.
    pub attrs: RawAttrs,
    /// The bar this entry writes into.
    pub bar: progressbar::Model,
}

impl Entry {
    /// Creates an entry carrying both markers.
    pub fn new(attrs: RawAttrs, bar: progressbar::Model) -> Self {
        Self {
            worked: true,
            active: true,
            attrs,
            bar,
        }
    }

    fn selected(&self) -> bool {
        self.worked && self.active
    }

    /// Applies one refresh to this entry as of `now_secs`.
    ///
    /// The end-time label depends only on the wall clock and is always
    /// written. The derived fields are written only when the attributes
    /// parse; a contract violation leaves them untouched so the bar simply
    /// keeps its previous state until a later pass.
    fn apply(&mut self, now_secs: i64) {
        self.bar
            .set_end_time(hhmm_utc(now_secs), date_utc(now_secs));
        if let Ok(interval) = WorkInterval::from_attrs(&self.attrs) {
            let snap = Snapshot::compute(&interval, now_secs);
            self.bar.set_percent(snap.percent);
            if snap.overflowed {
                self.bar.mark_overflow();
            }
            self.bar.set_minutes(snap.elapsed_minutes);
        }
    }
}

/// Configuration options for the refresher.
pub enum RefresherOption {
    /// Overrides [`DEFAULT_REFRESH_INTERVAL`] for this instance.
    WithInterval(Duration),
}

impl RefresherOption {
    fn apply(&self, m: &mut Model) {
        match self {
            RefresherOption::WithInterval(interval) => m.interval = *interval,
        }
    }
}

/// Overrides the refresh delay for this instance.
pub fn with_interval(interval: Duration) -> RefresherOption {
    RefresherOption::WithInterval(interval)
}

/// The refresher model: an entry list plus the re-armed tick state.
#[derive(Debug, Clone)]
pub struct Model {
    /// An identifier to keep us from receiving messages intended for other
    /// refreshers.
    id: i64,
    /// Re-arm tag; a tick from a superseded schedule is rejected.
    tag: i64,
    /// Delay between passes, measured from pass completion.
    pub interval: Duration,
    entries: Vec<Entry>,
}

/// Creates a new refresher with an empty entry list.
pub fn new(opts: &[RefresherOption]) -> Model {
    let mut m = Model {
        id: next_id(),
        tag: 0,
        interval: DEFAULT_REFRESH_INTERVAL,
        entries: Vec::new(),
    };
    for opt in opts {
        opt.apply(&mut m);
    }
    m
}

impl Model {
    /// Returns the unique identifier of this refresher instance.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Appends a managed entry. The entry list is built once at
    /// initialization; there is no per-pass scan for bars.
    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Returns the managed entries.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns a mutable handle to the managed entries, e.g. to flip an
    /// entry's `active` marker between passes.
    pub fn entries_mut(&mut self) -> &mut [Entry] {
        &mut self.entries
    }

    /// Runs the first pass immediately and returns the command that arms
    /// the repeating tick.
    pub fn init(&mut self) -> Cmd {
        self.refresh();
        self.schedule()
    }

    /// Runs one refresh pass against the live wall clock.
    ///
    /// The clock is captured once per element, so each bar's derived
    /// fields are mutually consistent even if the pass straddles a minute
    /// boundary.
    pub fn refresh(&mut self) {
        for entry in &mut self.entries {
            if entry.selected() {
                entry.apply(unix_now());
            }
        }
    }

    /// Runs one refresh pass with every element evaluated at the given
    /// wall-clock second. Two passes at the same instant produce identical
    /// state.
    pub fn refresh_at(&mut self, now_secs: i64) {
        for entry in &mut self.entries {
            if entry.selected() {
                entry.apply(now_secs);
            }
        }
    }

    /// Arms the next tick, superseding any earlier schedule.
    fn schedule(&mut self) -> Cmd {
        self.tag += 1;
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(self.interval, move |_| {
            Box::new(RefreshMsg { id, tag }) as Msg
        })
    }

    /// Processes a [`RefreshMsg`]: runs the pass body to completion, then
    /// re-arms the tick. Messages for other refreshers or from superseded
    /// schedules are ignored.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(refresh_msg) = msg.downcast_ref::<RefreshMsg>() {
            if refresh_msg.id != self.id {
                return None;
            }
            if refresh_msg.tag > 0 && refresh_msg.tag != self.tag {
                return None;
            }
            self.refresh();
            return Some(self.schedule());
        }
        None
    }

    /// Renders every managed bar, one per line. Skipped entries render in
    /// whatever state their last pass left them.
    pub fn view(&self) -> String {
        self.entries
            .iter()
            .map(|e| e.bar.view())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        let mut model = new(&[]);
        let cmd = model.init();
        (model, Some(cmd))
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

impl Default for Model {
    fn default() -> Self {
        new(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(start: i64, unit: &str, grace: &str) -> Entry {
        Entry::new(
            RawAttrs::new(&start.to_string(), unit, grace),
            progressbar::new(&[]),
        )
    }

    fn bar_state(e: &Entry) -> (f64, bool, Option<String>, Option<String>) {
        (
            e.bar.percent(),
            e.bar.overflowed(),
            e.bar.minutes_text(),
            e.bar.end_time_text().map(str::to_string),
        )
    }

    #[test]
    fn test_default_interval() {
        let refresher = new(&[]);
        assert_eq!(refresher.interval, DEFAULT_REFRESH_INTERVAL);
        assert_eq!(refresher.interval, Duration::from_secs(15));
    }

    #[test]
    fn test_with_interval_overrides_default() {
        let refresher = new(&[with_interval(Duration::from_secs(1))]);
        assert_eq!(refresher.interval, Duration::from_secs(1));
    }

    #[test]
    fn test_unique_ids() {
        assert_ne!(new(&[]).id(), new(&[]).id());
    }

    #[test]
    fn test_pass_updates_active_entry() {
        let now = 50_000;
        let mut refresher = new(&[]);
        refresher.push(entry(now - 30, "25", "5"));

        refresher.refresh_at(now);

        let e = &refresher.entries()[0];
        assert_eq!(e.bar.percent(), 4.0);
        assert_eq!(e.bar.minutes_text(), Some("1".to_string()));
        assert!(!e.bar.overflowed());
        assert!(e.bar.end_time_text().is_some());
    }

    #[test]
    fn test_pass_skips_unselected_entries() {
        let now = 50_000;
        let mut refresher = new(&[]);
        refresher.push(entry(now - 300, "25", "5"));
        refresher.entries_mut()[0].active = false;

        refresher.refresh_at(now);

        let e = &refresher.entries()[0];
        assert_eq!(e.bar.percent(), 0.0);
        assert_eq!(e.bar.minutes_text(), None);
        assert_eq!(e.bar.end_time_text(), None);
    }

    #[test]
    fn test_both_markers_required() {
        let now = 50_000;
        let mut refresher = new(&[]);
        refresher.push(entry(now - 300, "25", "5"));
        refresher.entries_mut()[0].worked = false;

        refresher.refresh_at(now);
        assert_eq!(refresher.entries()[0].bar.minutes_text(), None);
    }

    #[test]
    fn test_overflowed_entry_gets_marker() {
        let now = 50_000;
        let mut refresher = new(&[]);
        refresher.push(entry(now - 90, "1", "0"));

        refresher.refresh_at(now);

        let e = &refresher.entries()[0];
        assert_eq!(e.bar.percent(), 100.0);
        assert_eq!(e.bar.minutes_text(), Some("2".to_string()));
        assert!(e.bar.overflowed());
    }

    #[test]
    fn test_overflow_survives_a_clock_step_backwards() {
        let now = 50_000;
        let mut refresher = new(&[]);
        refresher.push(entry(now - 90, "1", "0"));

        refresher.refresh_at(now);
        assert!(refresher.entries()[0].bar.overflowed());

        // A later pass at an earlier instant must not clear the marker.
        refresher.refresh_at(now - 80);
        assert!(refresher.entries()[0].bar.overflowed());
    }

    #[test]
    fn test_bad_entry_does_not_abort_the_pass() {
        let now = 50_000;
        let mut refresher = new(&[]);
        let mut broken = entry(now - 30, "25", "5");
        broken.attrs.start = None;
        refresher.push(broken);
        refresher.push(entry(now - 30, "25", "5"));

        refresher.refresh_at(now);

        // The broken element's derived fields stay untouched.
        let broken = &refresher.entries()[0];
        assert_eq!(broken.bar.percent(), 0.0);
        assert_eq!(broken.bar.minutes_text(), None);
        assert!(!broken.bar.overflowed());
        // The wall-clock label still updates; it depends on no attribute.
        assert!(broken.bar.end_time_text().is_some());

        // The sibling still got its full update.
        let ok = &refresher.entries()[1];
        assert_eq!(ok.bar.percent(), 4.0);
        assert_eq!(ok.bar.minutes_text(), Some("1".to_string()));
    }

    #[test]
    fn test_non_numeric_attrs_are_contained() {
        let now = 50_000;
        let mut refresher = new(&[]);
        refresher.push(Entry::new(
            RawAttrs::new("half past nine", "25", "5"),
            progressbar::new(&[]),
        ));

        refresher.refresh_at(now);
        assert_eq!(refresher.entries()[0].bar.percent(), 0.0);
        assert_eq!(refresher.entries()[0].bar.minutes_text(), None);
    }

    #[test]
    fn test_passes_are_idempotent_at_a_fixed_instant() {
        let now = 50_000;
        let mut refresher = new(&[]);
        refresher.push(entry(now - 90, "1", "0"));
        refresher.push(entry(now - 30, "25", "5"));

        refresher.refresh_at(now);
        let first: Vec<_> = refresher.entries().iter().map(bar_state).collect();
        refresher.refresh_at(now);
        let second: Vec<_> = refresher.entries().iter().map(bar_state).collect();

        assert_eq!(first, second);
        assert_eq!(refresher.view(), refresher.view());
    }

    #[test]
    fn test_end_time_label_shape() {
        let mut refresher = new(&[]);
        refresher.push(entry(0, "25", "5"));

        // 03:07 UTC on 1970-01-01.
        refresher.refresh_at(3 * 3600 + 7 * 60);

        let e = &refresher.entries()[0];
        assert_eq!(e.bar.end_time_text(), Some("03:07"));
        assert_eq!(e.bar.end_time_title(), Some("1970-01-01"));
    }

    #[test]
    fn test_update_reschedules_after_refresh() {
        let mut refresher = new(&[]);
        refresher.push(entry(unix_now() - 30, "25", "5"));
        let _armed = refresher.init();

        let msg = RefreshMsg {
            id: refresher.id(),
            tag: refresher.tag,
        };
        let cmd = refresher.update(Box::new(msg));
        assert!(cmd.is_some());
        assert!(refresher.entries()[0].bar.minutes_text().is_some());
    }

    #[test]
    fn test_update_rejects_other_instances() {
        let mut refresher = new(&[]);
        let msg = RefreshMsg {
            id: refresher.id() + 999,
            tag: refresher.tag,
        };
        assert!(refresher.update(Box::new(msg)).is_none());
    }

    #[test]
    fn test_update_rejects_superseded_schedule() {
        let mut refresher = new(&[]);
        let _armed = refresher.init();
        let stale = RefreshMsg {
            id: refresher.id(),
            tag: refresher.tag,
        };
        // Re-arming supersedes the outstanding schedule.
        let _rearmed = refresher.schedule();
        assert!(refresher.update(Box::new(stale)).is_none());
    }

    #[test]
    fn test_update_ignores_unrelated_messages() {
        let mut refresher = new(&[]);
        assert!(refresher.update(Box::new("not a refresh msg")).is_none());
    }

    #[test]
    fn test_view_renders_one_line_per_entry() {
        let mut refresher = new(&[]);
        refresher.push(entry(0, "25", "5"));
        refresher.push(entry(0, "25", "5"));
        assert_eq!(refresher.view().lines().count(), 2);
    }
}
