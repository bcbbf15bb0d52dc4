use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Widget},
};

use crate::app::App;

pub struct FavoritesPanel<'a> {
    app: &'a App,
}

impl<'a> FavoritesPanel<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }
}

impl Widget for FavoritesPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.app.theme();

        let block = Block::default()
            .title(format!(" Saved ({}) ", self.app.state.favorites.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_inactive));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        if self.app.state.favorites.is_empty() {
            let hint = Line::from(vec![
                Span::styled("Press ", Style::default().fg(theme.hint_text)),
                Span::styled("v", Style::default().fg(theme.hint_key)),
                Span::styled(" to save", Style::default().fg(theme.hint_text)),
            ]);
            buf.set_line(inner.x + 1, inner.y, &hint, inner.width.saturating_sub(2));
            return;
        }

        let current = self.app.state.current_verse;
        let items: Vec<ListItem> = self
            .app
            .favorite_verses()
            .map(|verse| {
                let style = if Some(verse.id) == current {
                    Style::default()
                        .fg(theme.favorite)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.foreground)
                };
                ListItem::new(Line::from(vec![
                    Span::styled("♥ ", Style::default().fg(theme.favorite)),
                    Span::styled(verse.reference(), style),
                ]))
            })
            .collect();

        Widget::render(List::new(items), inner, buf);
    }
}
