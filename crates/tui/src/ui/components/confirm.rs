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

/// Blocking confirmation prompt for a pending delete.
pub fn render(frame: &mut Frame<'_>, area: Rect, state: &ExpensesState) {
    let Some(id) = &state.pending_delete else {
        return;
    };
    let theme = Theme::default();

    let message = state
        .items
        .iter()
        .find(|expense| &expense.id == id)
        .map(|expense| format!("Eliminare \"{}\" ({})?", expense.description, expense.amount))
        .unwrap_or_else(|| "Eliminare la voce selezionata?".to_string());

    let width = ((message.chars().count() + 4).max(28)).min(area.width as usize) as u16;
    let rect = centered_box(width, 4, area);
    frame.render_widget(Clear, rect);

    let block = Block::default()
        .title(" conferma ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    let lines = vec![
        Line::from(message),
        Line::from(vec![
            Span::styled("y", Style::default().fg(theme.accent)),
            Span::raw(" conferma  "),
            Span::styled("n", Style::default().fg(theme.accent)),
            Span::raw(" annulla"),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(lines).block(block).alignment(Alignment::Center),
        rect,
    );
}
