use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{app::Filter, ui::theme::Theme};

/// Renders the eight mutually-exclusive filter choices as a tab bar.
pub fn render(frame: &mut Frame<'_>, area: Rect, active: Filter, theme: &Theme) {
    let mut spans = Vec::new();
    spans.push(Span::raw(" "));

    for (i, choice) in Filter::CHOICES.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }

        let label = choice.label();
        if *choice == active {
            spans.push(Span::styled("[", Style::default().fg(theme.accent)));
            spans.push(Span::styled(
                label,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled("]", Style::default().fg(theme.accent)));
        } else {
            spans.push(Span::styled(label, Style::default().fg(theme.dim)));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
