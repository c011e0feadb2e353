//! Application State
//!
//! The console controller: owns the client state, routes actions by focused
//! field, and runs network requests as background tasks reporting back over
//! an event channel.

use crate::client::ApiClient;
use crate::config::Config;
use crate::models::{AnnotatorInfo, InputSource, Job, SubmissionOptions};
use crate::state::{self, AnnotatorChoice, ConsoleState};
use crate::tui::event::AppAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::mpsc;
use tracing::{debug, error, info};
use tui_textarea::TextArea;

/// Current view/screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Console,
    Help,
}

/// Which form element has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Text,
    FilePath,
    Assembly,
    Annotators,
    Jobs,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Text => Focus::FilePath,
            Focus::FilePath => Focus::Assembly,
            Focus::Assembly => Focus::Annotators,
            Focus::Annotators => Focus::Jobs,
            Focus::Jobs => Focus::Text,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Text => Focus::Jobs,
            Focus::FilePath => Focus::Text,
            Focus::Assembly => Focus::FilePath,
            Focus::Annotators => Focus::Assembly,
            Focus::Jobs => Focus::Annotators,
        }
    }
}

/// Status line content
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Ready,
    Submitting,
    Info(String),
    Error(String),
}

/// Events from background request tasks
#[derive(Debug)]
pub enum AppEvent {
    /// Annotator registry fetch completed
    AnnotatorsLoaded(HashMap<String, AnnotatorInfo>),
    /// Job list fetch completed
    JobsLoaded(Vec<Job>),
    /// The server acknowledged a submission
    JobAccepted(Job),
    /// View payload received for a job
    ViewResponse { job_id: String, body: serde_json::Value },
    /// A request failed
    Error(String),
}

/// Main application state
pub struct App {
    pub config: Config,
    client: ApiClient,

    // Client state (pure, headless-testable)
    pub state: ConsoleState,
    pub choices: Vec<AnnotatorChoice>,

    // UI state
    pub view: View,
    pub focus: Focus,
    pub should_quit: bool,
    pub input: TextArea<'static>,
    pub file_path: String,
    pub assembly_index: usize,
    pub annotator_cursor: usize,
    pub job_cursor: usize,
    pub status: Status,

    // Display hook for view responses; logged, not rendered
    pub last_view_response: Option<(String, serde_json::Value)>,

    // Async communication
    event_rx: mpsc::Receiver<AppEvent>,
    event_tx: mpsc::Sender<AppEvent>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config) -> Self {
        let client = ApiClient::new(config.server.base_url.clone());

        let mut input = TextArea::default();
        input.set_cursor_line_style(ratatui::style::Style::default());
        input.set_placeholder_text("Paste variants here, or set a file path below...");

        let assembly_index = config
            .submit
            .assemblies
            .iter()
            .position(|a| *a == config.submit.default_assembly)
            .unwrap_or(0);

        let (tx, rx) = mpsc::channel(100);

        Self {
            config,
            client,
            state: ConsoleState::new(),
            choices: Vec::new(),
            view: View::Console,
            focus: Focus::Text,
            should_quit: false,
            input,
            file_path: String::new(),
            assembly_index,
            annotator_cursor: 0,
            job_cursor: 0,
            status: Status::Ready,
            last_view_response: None,
            event_rx: rx,
            event_tx: tx,
        }
    }

    /// The assembly currently selected in the single-select control.
    pub fn assembly(&self) -> &str {
        self.config
            .submit
            .assemblies
            .get(self.assembly_index)
            .map(|a| a.as_str())
            .unwrap_or(&self.config.submit.default_assembly)
    }

    /// Issue the two independent startup fetches: annotator registry and
    /// existing job list. Their completions are unordered.
    pub fn spawn_initial_fetches(&self) {
        let client = self.client.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            match client.list_annotators().await {
                Ok(annotators) => {
                    tx.send(AppEvent::AnnotatorsLoaded(annotators)).await.ok();
                }
                Err(e) => {
                    tx.send(AppEvent::Error(format!("annotator fetch failed: {e}")))
                        .await
                        .ok();
                }
            }
        });

        let client = self.client.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            match client.list_jobs().await {
                Ok(jobs) => {
                    tx.send(AppEvent::JobsLoaded(jobs)).await.ok();
                }
                Err(e) => {
                    tx.send(AppEvent::Error(format!("job list fetch failed: {e}")))
                        .await
                        .ok();
                }
            }
        });
    }

    /// Poll for completed background requests
    pub fn poll_events(&mut self) {
        let mut events = Vec::new();
        while let Ok(event) = self.event_rx.try_recv() {
            events.push(event);
        }
        for event in events {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::AnnotatorsLoaded(annotators) => {
                info!("loaded {} annotators", annotators.len());
                self.state.replace_annotators(annotators);
                self.choices = state::build_choices(&self.state.annotators);
                self.annotator_cursor = 0;
            }
            AppEvent::JobsLoaded(jobs) => {
                info!("loaded {} jobs", jobs.len());
                self.state.jobs.clear();
                self.state.merge_jobs(jobs);
                self.clamp_job_cursor();
            }
            AppEvent::JobAccepted(job) => {
                info!(job_id = %job.id, "job accepted");
                self.status = Status::Info(format!("Submitted job {}", job.id));
                self.state.insert_job(job);
            }
            AppEvent::ViewResponse { job_id, body } => {
                // Response is only logged; kept as a display hook.
                debug!(%job_id, %body, "view response");
                self.status = Status::Info(format!("View response logged for job {job_id}"));
                self.last_view_response = Some((job_id, body));
            }
            AppEvent::Error(message) => {
                error!("{message}");
                self.status = Status::Error(message);
            }
        }
    }

    /// Handle a user action
    pub fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::Quit | AppAction::ForceQuit => {
                self.should_quit = true;
            }
            AppAction::Submit => self.submit(),
            AppAction::Refresh => {
                self.status = Status::Info("Refreshing...".to_string());
                self.spawn_initial_fetches();
            }
            AppAction::ToggleHelp => {
                self.view = if self.view == View::Help {
                    View::Console
                } else {
                    View::Help
                };
            }
            AppAction::Escape => {
                self.view = View::Console;
            }
            AppAction::NextField => {
                self.focus = self.focus.next();
            }
            AppAction::PrevField => {
                self.focus = self.focus.prev();
            }
            AppAction::Activate => self.activate(),
            AppAction::Up => self.navigate(-1, 0),
            AppAction::Down => self.navigate(1, 0),
            AppAction::Left => self.navigate(0, -1),
            AppAction::Right => self.navigate(0, 1),
            AppAction::Input(key) => self.handle_input(key),
            AppAction::Tick => {}
        }
    }

    /// Enter on the focused element
    fn activate(&mut self) {
        match self.focus {
            Focus::Text => {
                self.feed_text_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
            }
            Focus::FilePath => {}
            Focus::Assembly => self.cycle_assembly(1),
            Focus::Annotators => self.toggle_annotator(),
            Focus::Jobs => self.view_selected_job(),
        }
    }

    fn navigate(&mut self, rows: i32, cols: i32) {
        match self.focus {
            Focus::Text => {
                let code = match (rows, cols) {
                    (-1, _) => KeyCode::Up,
                    (1, _) => KeyCode::Down,
                    (_, -1) => KeyCode::Left,
                    _ => KeyCode::Right,
                };
                self.feed_text_key(KeyEvent::new(code, KeyModifiers::NONE));
            }
            Focus::FilePath => {}
            Focus::Assembly => {
                if cols != 0 {
                    self.cycle_assembly(cols);
                }
            }
            Focus::Annotators => {
                if rows != 0 {
                    self.move_cursor_annotators(rows);
                }
            }
            Focus::Jobs => {
                if rows != 0 {
                    self.move_cursor_jobs(rows);
                }
            }
        }
    }

    /// Route raw key input to the focused field
    fn handle_input(&mut self, key: KeyEvent) {
        match self.focus {
            Focus::Text => {
                // Editing the text clears the selected file; exactly one
                // input source is used per submission.
                self.file_path.clear();
                self.feed_text_key(key);
            }
            Focus::FilePath => match key.code {
                KeyCode::Char(c) => {
                    self.clear_text();
                    self.file_path.push(c);
                }
                KeyCode::Backspace => {
                    self.file_path.pop();
                }
                _ => {}
            },
            Focus::Annotators => match key.code {
                KeyCode::Char(' ') => self.toggle_annotator(),
                KeyCode::Char('a') => state::set_all_checked(&mut self.choices, true),
                KeyCode::Char('n') => state::set_all_checked(&mut self.choices, false),
                _ => {}
            },
            Focus::Assembly | Focus::Jobs => {}
        }
    }

    fn feed_text_key(&mut self, key: KeyEvent) {
        self.input.input(key);
    }

    fn clear_text(&mut self) {
        if !self.text_value().is_empty() {
            let mut input = TextArea::default();
            input.set_cursor_line_style(ratatui::style::Style::default());
            input.set_placeholder_text("Paste variants here, or set a file path below...");
            self.input = input;
        }
    }

    fn text_value(&self) -> String {
        let joined = self.input.lines().join("\n");
        if joined.trim().is_empty() {
            String::new()
        } else {
            joined
        }
    }

    fn cycle_assembly(&mut self, step: i32) {
        let len = self.config.submit.assemblies.len();
        if len == 0 {
            return;
        }
        let idx = self.assembly_index as i32 + step;
        self.assembly_index = idx.rem_euclid(len as i32) as usize;
    }

    fn toggle_annotator(&mut self) {
        if let Some(choice) = self.choices.get_mut(self.annotator_cursor) {
            choice.checked = !choice.checked;
        }
    }

    fn move_cursor_annotators(&mut self, step: i32) {
        if self.choices.is_empty() {
            return;
        }
        let max = self.choices.len() - 1;
        let idx = (self.annotator_cursor as i32 + step).clamp(0, max as i32);
        self.annotator_cursor = idx as usize;
    }

    fn move_cursor_jobs(&mut self, step: i32) {
        if self.state.jobs.is_empty() {
            return;
        }
        let max = self.state.jobs.len() - 1;
        let idx = (self.job_cursor as i32 + step).clamp(0, max as i32);
        self.job_cursor = idx as usize;
    }

    fn clamp_job_cursor(&mut self) {
        if self.state.jobs.is_empty() {
            self.job_cursor = 0;
        } else if self.job_cursor >= self.state.jobs.len() {
            self.job_cursor = self.state.jobs.len() - 1;
        }
    }

    /// Build and send the submission from the current form state.
    fn submit(&mut self) {
        let text = self.text_value();
        let file_path = self.file_path.trim().to_string();
        if text.is_empty() && file_path.is_empty() {
            self.status = Status::Error("Nothing to submit: paste text or set a file path".to_string());
            return;
        }

        let options = SubmissionOptions {
            annotators: state::checked_names(&self.choices),
            assembly: self.assembly().to_string(),
        };
        self.status = Status::Submitting;

        let client = self.client.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            // The file is only read when the text input is empty; non-empty
            // text always wins.
            let file = if text.is_empty() {
                match tokio::fs::read(&file_path).await {
                    Ok(bytes) => {
                        let name = Path::new(&file_path)
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_else(|| file_path.clone());
                        Some((bytes, name))
                    }
                    Err(e) => {
                        tx.send(AppEvent::Error(format!("cannot read {file_path}: {e}")))
                            .await
                            .ok();
                        return;
                    }
                }
            } else {
                None
            };

            let Some(source) = InputSource::resolve(&text, file) else {
                tx.send(AppEvent::Error("Nothing to submit".to_string()))
                    .await
                    .ok();
                return;
            };

            match client.submit_job(source, &options).await {
                Ok(job) => {
                    tx.send(AppEvent::JobAccepted(job)).await.ok();
                }
                Err(e) => {
                    tx.send(AppEvent::Error(format!("submission failed: {e}")))
                        .await
                        .ok();
                }
            }
        });
    }

    /// Request the view payload for the selected job. Disabled jobs
    /// (viewable=false) only get a status hint.
    fn view_selected_job(&mut self) {
        let Some(job) = self.state.jobs.get(self.job_cursor) else {
            return;
        };
        if !job.viewable {
            self.status = Status::Info(format!("Job {} is not viewable yet", job.id));
            return;
        }

        let job_id = job.id.clone();
        self.status = Status::Info(format!("Requesting view for job {job_id}"));
        let client = self.client.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            match client.view_job(&job_id).await {
                Ok(body) => {
                    tx.send(AppEvent::ViewResponse { job_id, body }).await.ok();
                }
                Err(e) => {
                    tx.send(AppEvent::Error(format!("view request failed: {e}")))
                        .await
                        .ok();
                }
            }
        });
    }
}
