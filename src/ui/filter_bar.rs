use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use crate::app::App;
use crate::verses::FilterAxis;

/// Display name for an age-group label from the dataset.
pub fn age_group_label(value: &str) -> String {
    match value {
        "elementary" => "Elementary".to_string(),
        "preteens" => "Pre-teens".to_string(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}

pub fn value_label(axis: FilterAxis, value: &str) -> String {
    match axis {
        FilterAxis::AgeGroup => age_group_label(value),
        FilterAxis::Topic | FilterAxis::Book => value.to_string(),
    }
}

pub struct FilterBar<'a> {
    app: &'a App,
}

impl<'a> FilterBar<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }
}

impl Widget for FilterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.app.theme();

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(26),
                Constraint::Percentage(26),
                Constraint::Percentage(26),
                Constraint::Percentage(22),
            ])
            .split(area);

        let axes = [
            (FilterAxis::AgeGroup, "a"),
            (FilterAxis::Topic, "t"),
            (FilterAxis::Book, "b"),
        ];

        for (i, (axis, key)) in axes.into_iter().enumerate() {
            let active = self.app.state.filters.get(axis);
            let value = active
                .map(|v| value_label(axis, v))
                .unwrap_or_else(|| "All".to_string());
            let value_style = if active.is_some() {
                Style::default()
                    .fg(theme.header)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.foreground_dim)
            };

            let block = Block::default()
                .title(Line::from(vec![
                    Span::styled(
                        format!(" {} ", axis.label()),
                        Style::default().fg(theme.foreground),
                    ),
                    Span::styled(format!("[{}] ", key), Style::default().fg(theme.hint_key)),
                ]))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border_inactive));

            let inner = block.inner(chunks[i]);
            block.render(chunks[i], buf);
            if inner.height > 0 {
                buf.set_string(inner.x + 1, inner.y, &value, value_style);
            }
        }

        let block = Block::default()
            .title(" Pool ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_inactive));
        let inner = block.inner(chunks[3]);
        block.render(chunks[3], buf);
        if inner.height == 0 {
            return;
        }

        let pool = if self.app.state.filters.is_empty() {
            format!("all {}", self.app.store.len())
        } else {
            format!("{} of {}", self.app.pool_size(), self.app.store.len())
        };
        buf.set_string(inner.x + 1, inner.y, &pool, Style::default().fg(theme.foreground));
    }
}
