pub mod daily_verse;
pub mod favorites;
pub mod filter_bar;
pub mod layout;
pub mod verse_card;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Widget},
};

use crate::app::{App, InputMode, Picker};
use crate::state::LoadStatus;
use crate::verses::FilterAxis;

pub use daily_verse::DailyVersePanel;
pub use favorites::FavoritesPanel;
pub use filter_bar::FilterBar;
pub use layout::AppLayout;
pub use verse_card::VerseCard;

pub fn render(app: &App, area: Rect, buf: &mut Buffer) {
    let layout = AppLayout::new(area);

    // Paint the theme background first so light and dark both fill the screen
    let theme = app.theme();
    buf.set_style(area, Style::default().bg(theme.background).fg(theme.foreground));

    render_header(app, layout.header, buf);
    FilterBar::new(app).render(layout.filters, buf);
    VerseCard::new(app).render(layout.verse_card, buf);
    FavoritesPanel::new(app).render(layout.favorites, buf);
    DailyVersePanel::new(app).render(layout.daily_verse, buf);
    render_footer(app, layout.footer, buf);

    // Overlays
    match &app.input_mode {
        InputMode::Help => render_help_dialog(app, area, buf),
        InputMode::Picker(picker) => render_picker_dialog(app, *picker, area, buf),
        InputMode::Normal => {}
    }
}

fn render_header(app: &App, area: Rect, buf: &mut Buffer) {
    if area.height == 0 {
        return;
    }

    let theme = app.theme();
    let title_style = Style::default()
        .fg(theme.header)
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::styled(" VerseSprout ", title_style),
        Span::styled("│", Style::default().fg(theme.foreground_dim)),
        Span::styled(" Press ", Style::default().fg(theme.foreground_dim)),
        Span::styled("?", Style::default().fg(theme.hint_key)),
        Span::styled(" for help", Style::default().fg(theme.foreground_dim)),
    ];
    if let LoadStatus::Loaded { verses, rejected } = app.state.load_status {
        spans.push(Span::styled("  │ ", Style::default().fg(theme.foreground_dim)));
        spans.push(Span::styled(
            format!("{} verses", verses),
            Style::default().fg(theme.foreground_dim),
        ));
        if rejected > 0 {
            spans.push(Span::styled(
                format!(" ({} skipped)", rejected),
                Style::default().fg(theme.warning),
            ));
        }
    }
    if app.state.memory_mode {
        spans.push(Span::styled("  │ ", Style::default().fg(theme.foreground_dim)));
        spans.push(Span::styled("MEMORY MODE", Style::default().fg(theme.warning)));
    }

    buf.set_line(area.x, area.y, &Line::from(spans), area.width);
}

fn render_footer(app: &App, area: Rect, buf: &mut Buffer) {
    if area.height == 0 {
        return;
    }

    let theme = app.theme();
    let hint_style = Style::default().fg(theme.hint_text);
    let key_style = Style::default().fg(theme.hint_key);

    let line1 = Line::from(vec![
        Span::styled(" ", hint_style),
        Span::styled("a/t/b", key_style),
        Span::styled(":Filter  ", hint_style),
        Span::styled("f", key_style),
        Span::styled(":Pick  ", hint_style),
        Span::styled("c", key_style),
        Span::styled(":Clear  ", hint_style),
        Span::styled("s", key_style),
        Span::styled(":Stop  ", hint_style),
        Span::styled("q", key_style),
        Span::styled(":Quit", hint_style),
    ]);

    buf.set_line(area.x, area.y, &line1, area.width);

    // Status message on second line
    if area.height < 2 {
        return;
    }
    if let Some(ref msg) = app.status_message {
        let status_style = Style::default().fg(theme.success);
        buf.set_string(area.x + 1, area.y + 1, msg, status_style);
    }
}

fn dialog_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(4));
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

fn render_help_dialog(app: &App, area: Rect, buf: &mut Buffer) {
    let dialog_area = dialog_area(area, 52, 24);
    Clear.render(dialog_area, buf);

    let theme = app.theme();
    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dialog_border))
        .style(Style::default().bg(theme.background));

    let inner = block.inner(dialog_area);
    block.render(dialog_area, buf);

    let help_text = [
        "Verses:",
        "  n / Space / Enter  Another verse",
        "  r                  Read aloud",
        "  s                  Stop reading",
        "  v                  Save / unsave",
        "  m                  Toggle memory mode",
        "",
        "Filters:",
        "  a / A              Cycle age group",
        "  t / T              Cycle topic",
        "  b / B              Cycle book",
        "  f                  Pick from a list",
        "  c                  Clear all filters",
        "",
        "General:",
        "  d                  Toggle light/dark",
        "  R                  Retry loading",
        "  q / Ctrl+C         Quit",
        "",
        "Press Esc to close",
    ];

    let desc_style = Style::default().fg(theme.foreground);
    let header_style = Style::default()
        .fg(theme.dialog_title)
        .add_modifier(Modifier::BOLD);

    for (i, line) in help_text.iter().enumerate() {
        if i as u16 >= inner.height {
            break;
        }

        let style = if line.ends_with(':') && !line.starts_with(' ') {
            header_style
        } else {
            desc_style
        };

        buf.set_string(inner.x + 1, inner.y + i as u16, line, style);
    }
}

fn render_picker_dialog(app: &App, picker: Picker, area: Rect, buf: &mut Buffer) {
    let values = app.store.index().values(picker.axis);
    let rows_needed = u16::try_from(values.len())
        .unwrap_or(u16::MAX)
        .saturating_add(6);
    let dialog_area = dialog_area(area, 44, rows_needed);
    Clear.render(dialog_area, buf);

    let theme = app.theme();
    let tabs: Vec<Span> = [FilterAxis::AgeGroup, FilterAxis::Topic, FilterAxis::Book]
        .into_iter()
        .map(|axis| {
            let style = if axis == picker.axis {
                Style::default()
                    .fg(theme.dialog_title)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.foreground_dim)
            };
            Span::styled(format!(" {} ", axis.label()), style)
        })
        .collect();

    let block = Block::default()
        .title(Line::from(tabs))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dialog_border))
        .style(Style::default().bg(theme.background));

    let inner = block.inner(dialog_area);
    block.render(dialog_area, buf);

    if inner.height < 3 {
        return;
    }

    let selected_style = Style::default()
        .fg(theme.selection_fg)
        .bg(theme.selection_bg)
        .add_modifier(Modifier::BOLD);
    let normal_style = Style::default().fg(theme.foreground);
    let active = app.state.filters.get(picker.axis);

    // Keep the cursor in view when the list is taller than the dialog
    let visible = (inner.height - 2) as usize;
    let offset = picker.cursor.saturating_sub(visible.saturating_sub(1));

    let rows = std::iter::once(("All".to_string(), active.is_none())).chain(
        values
            .iter()
            .map(|v| (filter_bar::value_label(picker.axis, v), active == Some(v.as_str()))),
    );

    for (row, (label, is_active)) in rows.enumerate().skip(offset).take(visible) {
        let y = inner.y + (row - offset) as u16;
        let marker = if is_active { "● " } else { "  " };
        let style = if row == picker.cursor {
            selected_style
        } else {
            normal_style
        };
        let text = format!("{}{}", marker, label);
        let max_width = inner.width.saturating_sub(2) as usize;
        buf.set_stringn(inner.x + 1, y, &text, max_width, style);
    }

    let hint_style = Style::default().fg(theme.foreground_dim);
    buf.set_string(
        inner.x + 1,
        inner.y + inner.height - 1,
        "↑/↓ move  Tab axis  Enter apply  Esc close",
        hint_style,
    );
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::app::tests::test_app;
    use crate::events::Action;
    use crate::verses::verse::fixtures::john_and_psalm;

    fn draw(app: &App) -> String {
        draw_sized(app, 120, 32)
    }

    fn draw_sized(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| render(app, frame.area(), frame.buffer_mut()))
            .unwrap();
        let buffer = terminal.backend().buffer();

        let mut screen = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                screen.push_str(buffer[(x, y)].symbol());
            }
            screen.push('\n');
        }
        screen
    }

    #[test]
    fn shows_current_and_daily_verse() {
        let app = test_app(john_and_psalm(), Some("preteens"));
        let screen = draw(&app);

        assert!(screen.contains("VerseSprout"));
        assert!(screen.contains("text of verse 2"));
        assert!(screen.contains("Psalm 23:1"));
        assert!(screen.contains("#comfort"));
        assert!(screen.contains("Today's Verse"));
        assert!(screen.contains("Pre-teens"));
        assert!(screen.contains("1 of 2"));
    }

    #[test]
    fn memory_mode_masks_only_the_card() {
        let mut app = test_app(john_and_psalm(), Some("preteens"));
        app.handle_action(Action::ToggleMemoryMode).unwrap();
        app.state.daily_verse = Some(2);
        let screen = draw(&app);

        assert!(screen.contains("“______”"));
        assert!(screen.contains("Exit Memory Mode"));
        // Daily verse still reads in full
        assert!(screen.contains("“text of verse 2”"));
        assert!(screen.contains("Psalm 23:1"));
    }

    #[test]
    fn empty_collection_shows_loading_placeholder() {
        let app = test_app(Vec::new(), None);
        let screen = draw(&app);

        assert!(screen.contains("Loading verse..."));
        assert!(screen.contains("Loading daily verse..."));
    }

    #[test]
    fn failed_load_shows_reason() {
        let mut app = test_app(Vec::new(), None);
        app.state.load_failed("could not load verses from nowhere.json".to_string());
        let screen = draw(&app);

        assert!(screen.contains("Could not load verses"));
        assert!(screen.contains("nowhere.json"));
    }

    #[test]
    fn theme_button_names_the_other_theme() {
        let mut app = test_app(john_and_psalm(), None);
        assert!(draw(&app).contains("Dark Mode"));
        app.handle_action(Action::ToggleTheme).unwrap();
        assert!(draw(&app).contains("Light Mode"));
    }

    #[test]
    fn favorites_panel_lists_saved_references() {
        let mut app = test_app(john_and_psalm(), Some("preteens"));
        assert!(draw(&app).contains("Saved (0)"));
        app.handle_action(Action::ToggleFavorite).unwrap();

        let screen = draw(&app);
        assert!(screen.contains("Saved (1)"));
        assert!(screen.contains("♥ Psalm 23:1"));
        assert!(screen.contains("Unsave"));
    }

    #[test]
    fn picker_lists_axis_values() {
        let mut app = test_app(john_and_psalm(), None);
        app.handle_action(Action::OpenPicker).unwrap();
        app.handle_action(Action::NextAxis).unwrap();
        let screen = draw(&app);

        assert!(screen.contains("● All"));
        assert!(screen.contains("love"));
        assert!(screen.contains("comfort"));
    }

    #[test]
    fn help_dialog_renders_over_the_card() {
        let mut app = test_app(john_and_psalm(), None);
        app.handle_action(Action::Help).unwrap();
        let screen = draw(&app);

        assert!(screen.contains("Cycle age group"));
        assert!(screen.contains("Press Esc to close"));
    }

    #[test]
    fn short_terminals_render_without_panicking() {
        let app = test_app(john_and_psalm(), Some("preteens"));
        for height in 1..=12 {
            draw_sized(&app, 80, height);
        }

        let header = draw_sized(&app, 80, 1);
        assert!(header.contains("VerseSprout"));
    }

    #[test]
    fn dialogs_survive_tiny_terminals() {
        let mut app = test_app(john_and_psalm(), None);
        app.handle_action(Action::OpenPicker).unwrap();
        for (width, height) in [(80, 1), (80, 3), (80, 6), (10, 4), (3, 3)] {
            draw_sized(&app, width, height);
        }

        app.handle_action(Action::Escape).unwrap();
        app.handle_action(Action::Help).unwrap();
        for (width, height) in [(80, 1), (80, 3), (80, 6), (10, 4), (3, 3)] {
            draw_sized(&app, width, height);
        }
    }

    #[test]
    fn failed_load_renders_on_a_short_terminal() {
        let mut app = test_app(Vec::new(), None);
        app.state.load_failed("could not load verses from nowhere.json".to_string());
        for height in [1, 3, 6] {
            draw_sized(&app, 80, height);
        }
    }
}
