use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::{AppConfig, Theme};
use crate::events::Action;
use crate::speech::{Speaker, SpeechEvent};
use crate::state::{AppState, LoadStatus};
use crate::verses::{
    spawn_load, today_day_of_month, FilterAxis, LoadEvent, LoadedVerses, Verse, VerseStore,
};

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Help,
    Picker(Picker),
}

/// Dialog listing every value of one filter axis. Row 0 is "All".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Picker {
    pub axis: FilterAxis,
    pub cursor: usize,
}

pub struct App {
    // State
    pub running: bool,
    pub input_mode: InputMode,
    pub state: AppState,
    pub store: VerseStore,
    pub status_message: Option<String>,

    // Settings
    pub config: AppConfig,

    // Playback
    speaker: Speaker,
    speech_rx: mpsc::Receiver<SpeechEvent>,

    // Async loading
    load_rx: Option<mpsc::Receiver<LoadEvent>>,
    load_task: Option<JoinHandle<()>>,

    rng: StdRng,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let (speech_tx, speech_rx) = mpsc::channel(16);
        let speaker =
            Speaker::from_config(config.speech_command.as_deref(), &config.speech_args, speech_tx);

        let mut app = Self::with_parts(config, speaker, speech_rx, StdRng::from_os_rng());
        app.start_load();
        Ok(app)
    }

    fn with_parts(
        config: AppConfig,
        speaker: Speaker,
        speech_rx: mpsc::Receiver<SpeechEvent>,
        rng: StdRng,
    ) -> Self {
        let state = AppState::new(config.theme, config.initial_age_group.clone());

        Self {
            running: true,
            input_mode: InputMode::Normal,
            state,
            store: VerseStore::default(),
            status_message: None,

            config,

            speaker,
            speech_rx,

            load_rx: None,
            load_task: None,

            rng,
        }
    }

    /// Kick off the one-time background load of the collection.
    pub fn start_load(&mut self) {
        if self.load_task.as_ref().is_some_and(|t| !t.is_finished()) {
            return;
        }

        let source = self.config.verse_source();
        info!(%source, "loading verses");
        self.status_message = Some(format!("Loading verses from {}", source));

        let (tx, rx) = mpsc::channel(1);
        self.load_rx = Some(rx);
        self.load_task = Some(spawn_load(source, tx));
        self.state.load_status = LoadStatus::Loading;
    }

    /// Drain the load channel.
    pub fn process_load_events(&mut self) {
        let event = match self.load_rx.as_mut().map(|rx| rx.try_recv()) {
            Some(Ok(event)) => Some(event),
            // The task ended without reporting
            Some(Err(TryRecvError::Disconnected)) => None,
            Some(Err(TryRecvError::Empty)) | None => return,
        };

        self.load_rx = None;
        self.load_task = None;

        match event {
            Some(LoadEvent::Loaded(loaded)) => self.apply_loaded(loaded),
            Some(LoadEvent::Failed(e)) => self.report_load_failure(e.to_string()),
            None => {
                warn!("verse load ended without a result");
                self.report_load_failure("the load task stopped unexpectedly".to_string());
            }
        }
    }

    fn report_load_failure(&mut self, reason: String) {
        self.state.load_failed(reason);
        self.status_message = Some("Could not load verses. Press R to retry".to_string());
    }

    fn apply_loaded(&mut self, loaded: LoadedVerses) {
        let rejected = loaded.rejected.len();
        self.store = VerseStore::new(loaded.verses);
        self.state
            .collection_loaded(&self.store, rejected, today_day_of_month(), &mut self.rng);

        self.status_message = Some(if rejected > 0 {
            format!("Loaded {} verses, skipped {} malformed", self.store.len(), rejected)
        } else {
            format!("Loaded {} verses", self.store.len())
        });
        if self.state.current_verse.is_none() && !self.store.is_empty() {
            self.status_message = Some("No verses match the current filters".to_string());
        }
    }

    /// Drain speech completion events.
    pub fn process_speech_events(&mut self) {
        while let Ok(event) = self.speech_rx.try_recv() {
            match event {
                SpeechEvent::Finished => {}
                SpeechEvent::Failed(e) => {
                    warn!(error = %e, "speech failed");
                    self.status_message = Some(format!("Speech error: {}", e));
                }
            }
        }
    }

    pub fn handle_action(&mut self, action: Action) -> Result<()> {
        match self.input_mode.clone() {
            InputMode::Normal => self.handle_normal_action(action),
            InputMode::Help => self.handle_help_action(action),
            InputMode::Picker(picker) => self.handle_picker_action(action, picker),
        }
        Ok(())
    }

    fn handle_normal_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.quit(),

            Action::ShowAnother | Action::Enter => self.show_another(),
            Action::ReadAloud => self.read_aloud(),
            Action::StopSpeech => {
                if self.speaker.cancel() {
                    self.status_message = Some("Stopped reading".to_string());
                }
            }
            Action::ToggleFavorite => {
                if let Some(saved) = self.state.toggle_favorite() {
                    let message = if saved {
                        "Saved to favorites"
                    } else {
                        "Removed from favorites"
                    };
                    self.status_message = Some(message.to_string());
                }
            }
            Action::ToggleMemoryMode => {
                self.state.toggle_memory_mode();
                self.status_message = Some(format!(
                    "Memory mode: {}",
                    if self.state.memory_mode { "ON" } else { "OFF" }
                ));
            }

            Action::CycleFilter { axis, forward } => {
                let next = self
                    .store
                    .index()
                    .cycle(axis, self.state.filters.get(axis), forward);
                self.set_filter(axis, next);
            }
            Action::OpenPicker => {
                let axis = FilterAxis::AgeGroup;
                self.input_mode = InputMode::Picker(Picker {
                    axis,
                    cursor: self.picker_cursor_for(axis),
                });
            }
            Action::ClearFilters => {
                self.state.clear_filters(&self.store, &mut self.rng);
                self.status_message = Some("Showing all verses".to_string());
            }

            Action::ToggleTheme => {
                self.state.toggle_theme();
                self.status_message = Some(format!("Theme: {}", self.state.theme.label()));
            }
            Action::RetryLoad => {
                if matches!(self.state.load_status, LoadStatus::Failed(_)) {
                    self.start_load();
                }
            }
            Action::Help => self.input_mode = InputMode::Help,

            _ => {}
        }
    }

    fn handle_help_action(&mut self, action: Action) {
        match action {
            Action::Escape | Action::Help | Action::Quit | Action::Enter => {
                self.input_mode = InputMode::Normal;
            }
            _ => {}
        }
    }

    fn handle_picker_action(&mut self, action: Action, mut picker: Picker) {
        let rows = self.store.index().values(picker.axis).len() + 1;

        match action {
            Action::Escape | Action::Quit => {
                self.input_mode = InputMode::Normal;
                return;
            }
            Action::Up => picker.cursor = picker.cursor.saturating_sub(1),
            Action::Down => {
                if picker.cursor + 1 < rows {
                    picker.cursor += 1;
                }
            }
            Action::NextAxis => {
                picker.axis = picker.axis.next();
                picker.cursor = self.picker_cursor_for(picker.axis);
            }
            Action::Enter => {
                let value = picker
                    .cursor
                    .checked_sub(1)
                    .and_then(|i| self.store.index().values(picker.axis).get(i).cloned());
                self.set_filter(picker.axis, value);
                self.input_mode = InputMode::Normal;
                return;
            }
            _ => {}
        }

        self.input_mode = InputMode::Picker(picker);
    }

    fn picker_cursor_for(&self, axis: FilterAxis) -> usize {
        self.state
            .filters
            .get(axis)
            .and_then(|current| {
                self.store
                    .index()
                    .values(axis)
                    .iter()
                    .position(|v| v == current)
            })
            .map_or(0, |i| i + 1)
    }

    fn set_filter(&mut self, axis: FilterAxis, value: Option<String>) {
        let label = value.clone().unwrap_or_else(|| "All".to_string());
        let drew = self
            .state
            .set_filter(axis, value, &self.store, &mut self.rng);

        self.status_message = Some(if drew || self.store.is_empty() {
            format!("{}: {}", axis.label(), label)
        } else {
            format!("{}: {} (no matching verses)", axis.label(), label)
        });
    }

    fn show_another(&mut self) {
        if !self.state.show_another(&self.store, &mut self.rng) && !self.store.is_empty() {
            self.status_message = Some("No verses match the current filters".to_string());
        }
    }

    fn read_aloud(&mut self) {
        let Some(text) = self.current_verse().map(|v| v.text.clone()) else {
            return;
        };

        match self.speaker.speak(&text) {
            Ok(()) => self.status_message = Some("Reading aloud...".to_string()),
            Err(e) => {
                info!(error = %e, "read aloud skipped");
                self.status_message = Some("Speech unavailable".to_string());
            }
        }
    }

    fn quit(&mut self) {
        if let Some(task) = self.load_task.take() {
            task.abort();
        }
        self.speaker.cancel();
        self.running = false;
    }

    pub fn current_verse(&self) -> Option<&Verse> {
        self.state.current_verse.and_then(|id| self.store.get(id))
    }

    pub fn daily_verse(&self) -> Option<&Verse> {
        self.state.daily_verse.and_then(|id| self.store.get(id))
    }

    pub fn favorite_verses(&self) -> impl Iterator<Item = &Verse> {
        self.state
            .favorites
            .iter()
            .filter_map(|id| self.store.get(*id))
    }

    pub fn pool_size(&self) -> usize {
        self.state.pool_size(&self.store)
    }

    pub fn is_speaking(&self) -> bool {
        self.speaker.is_speaking()
    }

    pub fn speech_available(&self) -> bool {
        self.speaker.is_available()
    }

    /// Get the current theme
    pub fn theme(&self) -> Theme {
        self.state.theme.theme()
    }
}
