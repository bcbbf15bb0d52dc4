use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::verses::FilterAxis;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    Up,
    Down,
    NextAxis,
    Enter,
    Escape,

    // Verses
    ShowAnother,
    ReadAloud,
    StopSpeech,
    ToggleFavorite,
    ToggleMemoryMode,

    // Filters
    CycleFilter { axis: FilterAxis, forward: bool },
    OpenPicker,
    ClearFilters,

    // UI
    ToggleTheme,
    RetryLoad,
    Help,
    Quit,

    // No action
    None,
}

impl Action {
    pub fn from_key_event(key: KeyEvent) -> Self {
        const PLAIN: KeyModifiers = KeyModifiers::NONE;
        const SHIFT: KeyModifiers = KeyModifiers::SHIFT;

        match (key.code, key.modifiers) {
            // Quit
            (KeyCode::Char('q'), PLAIN) => Action::Quit,
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

            // Navigation
            (KeyCode::Up | KeyCode::Char('k'), PLAIN) => Action::Up,
            (KeyCode::Down | KeyCode::Char('j'), PLAIN) => Action::Down,
            (KeyCode::Tab, PLAIN) => Action::NextAxis,
            (KeyCode::Enter, _) => Action::Enter,
            (KeyCode::Esc, _) => Action::Escape,

            // Verses
            (KeyCode::Char('n') | KeyCode::Char(' '), PLAIN) => Action::ShowAnother,
            (KeyCode::Char('r'), PLAIN) => Action::ReadAloud,
            (KeyCode::Char('s'), PLAIN) => Action::StopSpeech,
            (KeyCode::Char('v'), PLAIN) => Action::ToggleFavorite,
            (KeyCode::Char('m'), PLAIN) => Action::ToggleMemoryMode,

            // Filters
            (KeyCode::Char('a'), PLAIN) => cycle(FilterAxis::AgeGroup, true),
            (KeyCode::Char('A'), PLAIN | SHIFT) => cycle(FilterAxis::AgeGroup, false),
            (KeyCode::Char('t'), PLAIN) => cycle(FilterAxis::Topic, true),
            (KeyCode::Char('T'), PLAIN | SHIFT) => cycle(FilterAxis::Topic, false),
            (KeyCode::Char('b'), PLAIN) => cycle(FilterAxis::Book, true),
            (KeyCode::Char('B'), PLAIN | SHIFT) => cycle(FilterAxis::Book, false),
            (KeyCode::Char('f'), PLAIN) => Action::OpenPicker,
            (KeyCode::Char('c'), PLAIN) => Action::ClearFilters,

            // UI
            (KeyCode::Char('d'), PLAIN) => Action::ToggleTheme,
            (KeyCode::Char('R'), PLAIN | SHIFT) => Action::RetryLoad,
            (KeyCode::Char('?'), PLAIN | SHIFT) => Action::Help,

            _ => Action::None,
        }
    }
}

fn cycle(axis: FilterAxis, forward: bool) -> Action {
    Action::CycleFilter { axis, forward }
}
