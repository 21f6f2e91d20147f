pub mod components;
pub mod keymap;
pub mod screens;

mod theme;

use std::io::{Stdout, stdout};

use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{
    Frame,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::ExpensesState;

pub use theme::Theme;

pub type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

pub fn setup_terminal() -> crate::error::Result<Terminal> {
    enable_raw_mode()?;
    let mut out = stdout();
    crossterm::execute!(out, EnterAlternateScreen)?;
    Ok(ratatui::Terminal::new(CrosstermBackend::new(out))?)
}

pub fn restore_terminal(terminal: &mut Terminal) -> crate::error::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

pub fn render(frame: &mut Frame<'_>, state: &ExpensesState) {
    let theme = Theme::default();
    let area = frame.area();

    // Main layout: info bar, filter bar, expense list, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Filter bar (labels + gap)
            Constraint::Min(0),    // Expense list
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::filter_bar::render(frame, layout[1], state.filter, &theme);
    screens::expenses::render(frame, layout[2], state);
    render_bottom_bar(frame, layout[3], state, &theme);

    // Modal overlays, drawn over the shell in stacking order.
    components::add_dialog::render(frame, area, state);
    components::confirm::render(frame, area, state);
    components::alert::render(frame, area, state);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &ExpensesState, theme: &Theme) {
    let refresh = state
        .last_refresh
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());

    let mut line = vec![
        Span::styled("Endpoint", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.endpoint)),
        Span::styled("Voci", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.filtered().len())),
        Span::styled("Totale", Style::default().fg(theme.dim)),
        Span::raw(": "),
        components::money::styled_total(state.total(), theme),
        Span::raw("  "),
        Span::styled("Refresh", Style::default().fg(theme.dim)),
        Span::raw(format!(": {refresh}")),
    ];

    if state.loading {
        line.push(Span::raw("  "));
        line.push(Span::styled("Caricamento…", Style::default().fg(theme.accent)));
    }

    frame.render_widget(Paragraph::new(Line::from(line)), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &ExpensesState, theme: &Theme) {
    let parts = if state.alert.is_some() {
        vec![Span::styled(
            "premi un tasto per chiudere",
            Style::default().fg(theme.dim),
        )]
    } else if state.pending_delete.is_some() {
        hint_spans(&[("y", "conferma"), ("n", "annulla")], theme)
    } else if state.form.is_some() {
        hint_spans(
            &[
                ("Tab", "campo"),
                ("←/→", "categoria"),
                ("Enter", "salva"),
                ("Esc", "annulla"),
            ],
            theme,
        )
    } else {
        hint_spans(
            &[
                ("a", "nuova"),
                ("d", "elimina"),
                ("r", "aggiorna"),
                ("←/→", "filtro"),
                ("j/k", "selezione"),
                ("q", "esci"),
            ],
            theme,
        )
    };

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

fn hint_spans(hints: &[(&'static str, &'static str)], theme: &Theme) -> Vec<Span<'static>> {
    let mut parts = Vec::new();
    for (i, (key, label)) in hints.iter().enumerate() {
        if i > 0 {
            parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
        }
        parts.push(Span::styled(*key, Style::default().fg(theme.accent)));
        parts.push(Span::raw(format!(" {label}")));
    }
    parts
}
