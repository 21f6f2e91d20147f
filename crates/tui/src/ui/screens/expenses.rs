use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{ExpensesState, icon_for},
    ui::{components::money, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &ExpensesState) {
    let theme = Theme::default();
    let block = Block::default().borders(Borders::ALL).title("Spese");

    let visible = state.filtered();
    if visible.is_empty() {
        let message = if state.loading {
            "Caricamento…"
        } else {
            "Nessuna spesa per questo filtro."
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                message,
                Style::default().fg(theme.dim),
            )))
            .block(block)
            .alignment(Alignment::Center),
            area,
        );
        return;
    }

    let items = visible
        .iter()
        .map(|expense| {
            let date = expense.date.format("%d %b %H:%M").to_string();
            let glyph = icon_for(&expense.category);

            let line = Line::from(vec![
                Span::styled(format!("{date}  "), Style::default().fg(theme.dim)),
                Span::raw(format!("{glyph} ")),
                Span::styled(
                    format!("{:<15}", expense.category),
                    Style::default().fg(theme.dim),
                ),
                money::styled_amount(expense.amount, &theme),
                Span::raw(format!("  {}", expense.description)),
            ]);
            ListItem::new(line)
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected));

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}
