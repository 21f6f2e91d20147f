use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{AddForm, ExpensesState, FormField, icon_for},
    ui::{components::centered_box, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &ExpensesState) {
    let Some(form) = &state.form else {
        return;
    };
    let theme = Theme::default();

    let card_area = centered_box(42, 9, area);
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" nuova spesa ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Description
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Category picker
        ])
        .margin(1)
        .split(inner);

    render_input(
        frame,
        rows[0],
        "Importo",
        &form.amount_input,
        form.focus == FormField::Amount,
        &theme,
    );
    render_input(
        frame,
        rows[2],
        "Descrizione",
        &form.description_input,
        form.focus == FormField::Description,
        &theme,
    );
    render_picker(frame, rows[4], form, &theme);
}

fn render_input(
    frame: &mut Frame<'_>,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    theme: &Theme,
) {
    let cursor = if focused { "│" } else { "" };
    let style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text)
    };

    let line = Line::from(vec![
        Span::styled(format!("{label:<13}"), Style::default().fg(theme.dim)),
        Span::styled(format!("{value}{cursor}"), style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_picker(frame: &mut Frame<'_>, area: Rect, form: &AddForm, theme: &Theme) {
    let focused = form.focus == FormField::Category;
    let style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text)
    };

    let category = form.category();
    let line = Line::from(vec![
        Span::styled(format!("{:<13}", "Categoria"), Style::default().fg(theme.dim)),
        Span::styled(
            format!("‹ {} {} ›", icon_for(category.as_str()), category),
            style,
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
