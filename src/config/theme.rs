use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Light or dark mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    #[default]
    Light,
    Dark,
}

impl ThemePreset {
    pub fn label(&self) -> &'static str {
        match self {
            ThemePreset::Light => "Light",
            ThemePreset::Dark => "Dark",
        }
    }

    /// Label for the toggle control, naming the mode it switches to.
    pub fn toggle_label(&self) -> &'static str {
        match self {
            ThemePreset::Light => "Dark Mode",
            ThemePreset::Dark => "Light Mode",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ThemePreset::Light => ThemePreset::Dark,
            ThemePreset::Dark => ThemePreset::Light,
        }
    }

    pub fn theme(&self) -> Theme {
        match self {
            ThemePreset::Light => Theme::light(),
            ThemePreset::Dark => Theme::dark(),
        }
    }
}

/// Theme colors for the entire application
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub background: Color,
    pub foreground: Color,
    pub foreground_dim: Color,

    // UI elements
    pub border_active: Color,
    pub border_inactive: Color,

    // Selection
    pub selection_bg: Color,
    pub selection_fg: Color,

    // Verse card
    pub verse_text: Color,
    pub reference: Color,
    pub topic_tag: Color,
    pub masked: Color,
    pub favorite: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    pub header: Color,

    // Dialogs
    pub dialog_border: Color,
    pub dialog_title: Color,

    // Hints/help
    pub hint_key: Color,
    pub hint_text: Color,
}

impl Theme {
    /// Warm light theme - rose/sky/lime pastels on a bright background
    pub fn light() -> Self {
        let paper = Color::Rgb(253, 250, 245);
        let ink = Color::Rgb(31, 41, 55);
        let gray = Color::Rgb(107, 114, 128);
        let rose = Color::Rgb(190, 24, 93);
        let purple = Color::Rgb(124, 58, 237);
        let sky = Color::Rgb(2, 132, 199);
        let green = Color::Rgb(22, 163, 74);
        let amber = Color::Rgb(202, 138, 4);
        let red = Color::Rgb(220, 38, 38);
        let pink = Color::Rgb(236, 72, 153);

        Self {
            background: paper,
            foreground: ink,
            foreground_dim: gray,

            border_active: sky,
            border_inactive: Color::Rgb(209, 213, 219),

            selection_bg: sky,
            selection_fg: paper,

            verse_text: rose,
            reference: purple,
            topic_tag: sky,
            masked: gray,
            favorite: pink,

            success: green,
            warning: amber,
            error: red,

            header: green,

            dialog_border: sky,
            dialog_title: purple,

            hint_key: amber,
            hint_text: gray,
        }
    }

    /// Dark theme - slate/indigo/purple night palette
    pub fn dark() -> Self {
        let slate = Color::Rgb(15, 23, 42);
        let white = Color::Rgb(241, 245, 249);
        let muted = Color::Rgb(148, 163, 184);
        let indigo = Color::Rgb(129, 140, 248);
        let purple = Color::Rgb(192, 132, 252);
        let yellow = Color::Rgb(253, 224, 71);
        let pink = Color::Rgb(244, 114, 182);
        let green = Color::Rgb(74, 222, 128);
        let red = Color::Rgb(248, 113, 113);

        Self {
            background: slate,
            foreground: white,
            foreground_dim: muted,

            border_active: indigo,
            border_inactive: Color::Rgb(51, 65, 85),

            selection_bg: indigo,
            selection_fg: slate,

            verse_text: yellow,
            reference: purple,
            topic_tag: pink,
            masked: muted,
            favorite: pink,

            success: green,
            warning: yellow,
            error: red,

            header: indigo,

            dialog_border: indigo,
            dialog_title: purple,

            hint_key: yellow,
            hint_text: muted,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
