use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::app::App;

/// "Today's Verse", never masked by memory mode.
pub struct DailyVersePanel<'a> {
    app: &'a App,
}

impl<'a> DailyVersePanel<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }
}

impl Widget for DailyVersePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.app.theme();

        let block = Block::default()
            .title(Span::styled(
                " Today's Verse ",
                Style::default().fg(theme.header).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_inactive));

        let line = match self.app.daily_verse() {
            Some(verse) => Line::from(vec![
                Span::styled(
                    format!("“{}”", verse.text),
                    Style::default()
                        .fg(theme.foreground)
                        .add_modifier(Modifier::ITALIC),
                ),
                Span::styled(
                    format!(" — {}", verse.reference()),
                    Style::default().fg(theme.reference),
                ),
            ]),
            None => Line::from(Span::styled(
                "Loading daily verse...",
                Style::default().fg(theme.foreground_dim),
            )),
        };

        Paragraph::new(line)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
