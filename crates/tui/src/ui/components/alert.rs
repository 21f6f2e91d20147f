use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::{
    app::ExpensesState,
    ui::{components::centered_box, theme::Theme},
};

/// Blocking error overlay. Transport, status and validation failures all
/// land here with a short message; the next key dismisses it.
pub fn render(frame: &mut Frame<'_>, area: Rect, state: &ExpensesState) {
    let Some(message) = &state.alert else {
        return;
    };
    let theme = Theme::default();

    let width = ((message.chars().count() + 4).max(30)).min(area.width as usize) as u16;
    let rect = centered_box(width, 4, area);
    frame.render_widget(Clear, rect);

    let block = Block::default()
        .title(" errore ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.error));
    let lines = vec![
        Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(theme.error),
        )),
        Line::from(Span::styled(
            "premi un tasto per chiudere",
            Style::default().fg(theme.dim),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines).block(block).alignment(Alignment::Center),
        rect,
    );
}
