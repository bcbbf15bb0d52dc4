use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub header: Rect,
    pub filters: Rect,
    pub verse_card: Rect,
    pub favorites: Rect,
    pub daily_verse: Rect,
    pub footer: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        // Main vertical split: header, filters, content, daily verse, footer
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Length(3), // Filter bar
                Constraint::Min(8),    // Verse card + favorites
                Constraint::Length(5), // Today's verse
                Constraint::Length(2), // Footer
            ])
            .split(area);

        // Content horizontal split: verse card, favorites
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(72), // Verse card
                Constraint::Percentage(28), // Favorites
            ])
            .split(main_chunks[2]);

        Self {
            header: main_chunks[0],
            filters: main_chunks[1],
            verse_card: content_chunks[0],
            favorites: content_chunks[1],
            daily_verse: main_chunks[3],
            footer: main_chunks[4],
        }
    }
}
