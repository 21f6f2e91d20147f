use api_types::Amount;
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// Span for a row amount, right-aligned in a fixed column.
///
/// Amounts are entered positive; a negative value can only come from the
/// server and is rendered in the error color so it stands out.
#[must_use]
pub fn styled_amount(amount: Amount, theme: &Theme) -> Span<'static> {
    let color = if amount.cents() < 0 {
        theme.error
    } else {
        theme.text
    };
    Span::styled(format!("{:>10}", amount.to_string()), Style::default().fg(color))
}

/// Bold span for the running total in the info bar.
#[must_use]
pub fn styled_total(total: Amount, theme: &Theme) -> Span<'static> {
    Span::styled(
        total.to_string(),
        Style::default()
            .fg(theme.positive)
            .add_modifier(Modifier::BOLD),
    )
}
