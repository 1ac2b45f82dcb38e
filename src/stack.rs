//! Task-stack dashboard: a pipeline of queued tasks, the current task with
//! its live progress bar, and the tasks completed today, each annotated with
//! its completed-pomodoro count.

use bubbletea_rs::{Cmd, Msg};
use lipgloss_extras::lipgloss::{Color, Style};
use once_cell::sync::Lazy;

use crate::interval::RawAttrs;
use crate::{progressbar, refresher};

/// Default nominal pomodoro duration, in minutes.
pub const DEFAULT_UNIT_MINUTES: u32 = 25;

static HEADING_STYLE: Lazy<Style> = Lazy::new(|| Style::new().bold(true));
static TASK_STYLE: Lazy<Style> =
    Lazy::new(|| Style::new().foreground(Color::from("#C6C6C6")));
static COUNT_STYLE: Lazy<Style> =
    Lazy::new(|| Style::new().foreground(Color::from("#87875F")));
static URL_STYLE: Lazy<Style> = Lazy::new(|| {
    Style::new()
        .foreground(Color::from("#5F87AF"))
        .underline(true)
});

/// A completed work interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pomodoro {
    /// Unix second the interval began.
    pub start: i64,
    /// Unix second the interval ended.
    pub end: i64,
}

impl Pomodoro {
    /// Whole minutes the interval ran; a clock anomaly where `end`
    /// precedes `start` counts as zero.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).max(0) / 60
    }
}

/// One tracked task and its completed pomodoros.
#[derive(Debug, Clone)]
pub struct Task {
    /// Task number, e.g. an issue number.
    pub number: u64,
    /// Human-readable title.
    pub title: String,
    /// Link to the task's issue page, if it has one.
    pub url: Option<String>,
    /// Completed work intervals recorded against the task.
    pub pomodoros: Vec<Pomodoro>,
}

impl Task {
    /// Creates a task with no recorded pomodoros and no issue link.
    pub fn new(number: u64, title: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            url: None,
            pomodoros: Vec::new(),
        }
    }

    /// Attaches the task's issue link.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Renders the completed-pomodoro count, e.g. `🍅 × 3`.
    pub fn count_view(&self) -> String {
        COUNT_STYLE.render(&format!("🍅 × {}", self.pomodoros.len()))
    }

    /// Renders the numbered title, with the issue link appended when present.
    fn title_view(&self) -> String {
        let titled = TASK_STYLE.render(&format!("{} {}", self.number, self.title));
        match &self.url {
            Some(url) => format!("{} {}", titled, URL_STYLE.render(url)),
            None => titled,
        }
    }

    fn line_view(&self) -> String {
        format!("{} {}", self.title_view(), self.count_view())
    }
}

/// Render-time bootstrap percentage for an interval already `elapsed_minutes`
/// in: the value the page embeds before the first refresh pass replaces it
/// with the wall-clock recomputation.
pub fn current_progress(elapsed_minutes: i64, unit_minutes: u32) -> f64 {
    if unit_minutes == 0 {
        return 0.0;
    }
    (elapsed_minutes as f64 / unit_minutes as f64 * 100.0).clamp(0.0, 100.0)
}

/// The task currently being worked, with the refresher that keeps its bar
/// live.
#[derive(Debug, Clone)]
pub struct CurrentTask {
    /// The task itself.
    pub task: Task,
    /// Refresher owning the task's progress bar entry.
    pub refresher: refresher::Model,
}

impl CurrentTask {
    /// Starts working `task` at `start_secs`, tracking an interval of
    /// [`DEFAULT_UNIT_MINUTES`] with no grace period.
    pub fn begin(task: Task, start_secs: i64) -> Self {
        let mut refresher = refresher::new(&[]);
        refresher.push(refresher::Entry::new(
            RawAttrs::new(
                &start_secs.to_string(),
                &DEFAULT_UNIT_MINUTES.to_string(),
                "0",
            ),
            progressbar::new(&[]),
        ));
        Self { task, refresher }
    }
}

/// The dashboard model.
#[derive(Debug, Clone, Default)]
pub struct Model {
    /// Tasks queued behind the current one.
    pub stacked: Vec<Task>,
    /// The task being worked right now, if any.
    pub current: Option<CurrentTask>,
    /// Tasks finished today.
    pub done_today: Vec<Task>,
}

impl Model {
    /// Creates an empty dashboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the current task's first refresh pass and arms its tick.
    pub fn init(&mut self) -> Option<Cmd> {
        self.current.as_mut().map(|c| c.refresher.init())
    }

    /// Forwards refresh ticks to the current task's refresher.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.current.as_mut().and_then(|c| c.refresher.update(msg))
    }

    /// Renders the pipeline, current-task, and completed-today sections.
    /// Sections without content are omitted, except the pipeline heading
    /// which is always shown.
    pub fn view(&self) -> String {
        let mut sections = Vec::new();

        let mut pipeline = vec![HEADING_STYLE.render("Task Pipeline")];
        pipeline.extend(self.stacked.iter().map(Task::line_view));
        sections.push(pipeline.join("\n"));

        if let Some(current) = &self.current {
            sections.push(format!(
                "{}\n{}\n{}",
                HEADING_STYLE.render("Current Task"),
                current.task.title_view(),
                current.refresher.view()
            ));
        }

        if !self.done_today.is_empty() {
            let mut today = vec![HEADING_STYLE.render("Completed Today")];
            today.extend(self.done_today.iter().map(Task::line_view));
            sections.push(today.join("\n"));
        }

        sections.join("\n\n")
    }
}
