use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::app::App;
use crate::config::Theme;
use crate::state::LoadStatus;

pub struct VerseCard<'a> {
    app: &'a App,
}

impl<'a> VerseCard<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }

    fn verse_lines(&self, theme: &Theme) -> Vec<Line<'a>> {
        let Some(verse) = self.app.current_verse() else {
            return self.placeholder_lines(theme);
        };

        let text_style = if self.app.state.memory_mode {
            Style::default().fg(theme.masked)
        } else {
            Style::default()
                .fg(theme.verse_text)
                .add_modifier(Modifier::BOLD)
        };

        let mut lines = vec![
            Line::from(Span::styled(
                format!("“{}”", self.app.state.display_text(verse)),
                text_style,
            )),
            Line::default(),
            Line::from(Span::styled(
                format!("— {}", verse.reference()),
                Style::default()
                    .fg(theme.reference)
                    .add_modifier(Modifier::ITALIC),
            )),
        ];

        if !verse.topic.is_empty() {
            let tag_style = Style::default().fg(theme.topic_tag);
            let tags: Vec<Span> = verse
                .topic
                .iter()
                .map(|t| Span::styled(format!("#{} ", t), tag_style))
                .collect();
            lines.push(Line::from(tags));
        }

        lines
    }

    fn placeholder_lines(&self, theme: &Theme) -> Vec<Line<'a>> {
        match &self.app.state.load_status {
            LoadStatus::Failed(reason) => vec![
                Line::from(Span::styled(
                    "Could not load verses",
                    Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(reason.clone(), Style::default().fg(theme.foreground_dim))),
                Line::default(),
                Line::from(vec![
                    Span::styled("Press ", Style::default().fg(theme.hint_text)),
                    Span::styled("R", Style::default().fg(theme.hint_key)),
                    Span::styled(" to retry", Style::default().fg(theme.hint_text)),
                ]),
            ],
            LoadStatus::Loading | LoadStatus::Loaded { .. } => vec![Line::from(Span::styled(
                "Loading verse...",
                Style::default().fg(theme.foreground_dim),
            ))],
        }
    }

    /// Button row, labels follow the current toggle states.
    fn controls_line(&self, theme: &Theme) -> Line<'a> {
        let key_style = Style::default().fg(theme.hint_key);
        let label_style = Style::default().fg(theme.foreground);
        let state = &self.app.state;

        let read = if self.app.is_speaking() {
            "Reading..."
        } else {
            "Read Aloud"
        };
        let read_style = if self.app.speech_available() {
            label_style
        } else {
            Style::default().fg(theme.foreground_dim)
        };
        let (save_style, save) = if state.current_is_favorite() {
            (Style::default().fg(theme.favorite).add_modifier(Modifier::BOLD), "♥ Unsave")
        } else {
            (label_style, "♡ Save")
        };
        let memory = if state.memory_mode {
            "Exit Memory Mode"
        } else {
            "Memory Mode"
        };

        Line::from(vec![
            Span::styled("[r] ", key_style),
            Span::styled(read, read_style),
            Span::styled("  [n] ", key_style),
            Span::styled("New Verse", label_style),
            Span::styled("  [v] ", key_style),
            Span::styled(save, save_style),
            Span::styled("  [m] ", key_style),
            Span::styled(memory, label_style),
            Span::styled("  [d] ", key_style),
            Span::styled(state.theme.toggle_label(), label_style),
        ])
    }
}

impl Widget for VerseCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.app.theme();

        let block = Block::default()
            .title(" Verse ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_active))
            .style(Style::default().bg(theme.background));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 2 {
            return;
        }

        // Last row is reserved for the controls.
        let body = Rect::new(
            inner.x + 1,
            inner.y + 1,
            inner.width.saturating_sub(2),
            inner.height - 2,
        );
        Paragraph::new(self.verse_lines(&theme))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(body, buf);

        let controls = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
        Paragraph::new(self.controls_line(&theme))
            .alignment(Alignment::Center)
            .render(controls, buf);
    }
}
