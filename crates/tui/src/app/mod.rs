use std::time::Duration;

use chrono::{DateTime, FixedOffset, Local};
use crossterm::event::{self, Event, KeyEvent};

use api_types::{
    Amount, Category,
    expense::{Expense, ExpenseId, ExpenseNew},
};

use crate::{
    client::{Client, ClientError},
    config::AppConfig,
    error::{AppError, Result},
    ui::{self, keymap::AppAction},
};

/// The active category restriction: every record, or one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    All,
    Category(Category),
}

impl Filter {
    /// The eight mutually-exclusive filter-bar choices, in display order.
    pub const CHOICES: [Filter; 8] = [
        Filter::All,
        Filter::Category(Category::Food),
        Filter::Category(Category::Transportation),
        Filter::Category(Category::Entertainment),
        Filter::Category(Category::Shopping),
        Filter::Category(Category::Bills),
        Filter::Category(Category::Health),
        Filter::Category(Category::Other),
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Category(category) => category.as_str(),
        }
    }

    /// Whether a record with this category string is visible under the filter.
    pub fn matches(self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Category(choice) => choice.as_str() == category,
        }
    }

    fn position(self) -> usize {
        Self::CHOICES.iter().position(|f| *f == self).unwrap_or(0)
    }

    #[must_use]
    pub fn next(self) -> Filter {
        Self::CHOICES[(self.position() + 1) % Self::CHOICES.len()]
    }

    #[must_use]
    pub fn prev(self) -> Filter {
        let len = Self::CHOICES.len();
        Self::CHOICES[(self.position() + len - 1) % len]
    }
}

/// Display glyph for a category string.
///
/// Unknown values (a record fetched from a newer or foreign backend) get a
/// neutral pin rather than failing to render.
pub fn icon_for(category: &str) -> &'static str {
    match Category::from_name(category) {
        Some(Category::Food) => "🍔",
        Some(Category::Transportation) => "🚌",
        Some(Category::Entertainment) => "🎬",
        Some(Category::Shopping) => "🛍",
        Some(Category::Bills) => "🧾",
        Some(Category::Health) => "💊",
        Some(Category::Other) => "📦",
        None => "📌",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Amount,
    Description,
    Category,
}

/// Pending inputs of the add dialog. Present iff the dialog is open.
#[derive(Debug)]
pub struct AddForm {
    pub amount_input: String,
    pub description_input: String,
    pub category_idx: usize,
    pub focus: FormField,
}

impl AddForm {
    fn new() -> Self {
        Self {
            amount_input: String::new(),
            description_input: String::new(),
            category_idx: 0,
            focus: FormField::Amount,
        }
    }

    pub fn category(&self) -> Category {
        Category::ALL[self.category_idx]
    }

    fn focus_next(&mut self) {
        self.focus = match self.focus {
            FormField::Amount => FormField::Description,
            FormField::Description => FormField::Category,
            FormField::Category => FormField::Amount,
        };
    }

    fn focus_prev(&mut self) {
        self.focus = match self.focus {
            FormField::Amount => FormField::Category,
            FormField::Description => FormField::Amount,
            FormField::Category => FormField::Description,
        };
    }

    fn active_input_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Amount => Some(&mut self.amount_input),
            FormField::Description => Some(&mut self.description_input),
            FormField::Category => None,
        }
    }

    fn insert(&mut self, ch: char) {
        if let Some(input) = self.active_input_mut() {
            input.push(ch);
        }
    }

    fn backspace(&mut self) {
        if let Some(input) = self.active_input_mut() {
            input.pop();
        }
    }

    fn pick_next(&mut self) {
        self.category_idx = (self.category_idx + 1) % Category::ALL.len();
    }

    fn pick_prev(&mut self) {
        let len = Category::ALL.len();
        self.category_idx = (self.category_idx + len - 1) % len;
    }

    /// Validates the pending inputs and builds the create payload.
    ///
    /// Both checks happen before any network call: amount and description
    /// must be non-empty and the amount must parse as a decimal. The
    /// description is trimmed of surrounding whitespace on submission.
    pub fn build(&self, date: DateTime<FixedOffset>) -> std::result::Result<ExpenseNew, String> {
        let amount_raw = self.amount_input.trim();
        let description = self.description_input.trim();
        if amount_raw.is_empty() || description.is_empty() {
            return Err("Compila importo e descrizione.".to_string());
        }

        let amount: Amount = amount_raw
            .parse()
            .map_err(|_| "Importo non valido.".to_string())?;

        Ok(ExpenseNew {
            amount,
            description: description.to_string(),
            category: self.category(),
            date,
        })
    }
}

/// The view-model of the one screen.
///
/// Transition methods mutate it; rendering is a pure function over `&self`,
/// re-run by the event loop after every handled event.
#[derive(Debug)]
pub struct ExpensesState {
    pub items: Vec<Expense>,
    pub filter: Filter,
    /// Cursor into the filtered view.
    pub selected: usize,
    /// In-flight flag: an outstanding remote call.
    pub loading: bool,
    pub form: Option<AddForm>,
    /// First half of the delete transition: pending → confirmed/cancelled.
    pub pending_delete: Option<ExpenseId>,
    /// Blocking error overlay; the next key dismisses it.
    pub alert: Option<String>,
    pub last_refresh: Option<DateTime<Local>>,
    pub endpoint: String,
}

impl ExpensesState {
    fn new(endpoint: String) -> Self {
        Self {
            items: Vec::new(),
            filter: Filter::All,
            selected: 0,
            loading: false,
            form: None,
            pending_delete: None,
            alert: None,
            last_refresh: None,
            endpoint,
        }
    }

    /// Records visible under the active filter, relative order preserved.
    pub fn filtered(&self) -> Vec<&Expense> {
        self.items
            .iter()
            .filter(|expense| self.filter.matches(&expense.category))
            .collect()
    }

    /// Sum of the visible amounts, in integer cents.
    pub fn total(&self) -> Amount {
        self.filtered().iter().map(|expense| expense.amount).sum()
    }

    pub fn selected_expense(&self) -> Option<&Expense> {
        self.filtered().get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        let len = self.filtered().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.filtered().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.selected = 0;
    }

    pub fn open_form(&mut self) {
        self.form = Some(AddForm::new());
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Marks the selected record for deletion; confirmation happens later.
    pub fn begin_delete(&mut self) {
        let id = self.selected_expense().map(|expense| expense.id.clone());
        if let Some(id) = id {
            self.pending_delete = Some(id);
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Replaces the whole list with the fetched collection.
    pub fn apply_loaded(&mut self, items: Vec<Expense>) {
        self.items = items;
        self.clamp_selection();
    }

    /// Prepends the server-confirmed record and closes the dialog.
    pub fn apply_created(&mut self, created: Expense) {
        self.items.insert(0, created);
        self.form = None;
        self.selected = 0;
    }

    /// Drops the record with the confirmed id, nothing else.
    pub fn apply_deleted(&mut self, id: &ExpenseId) {
        self.items.retain(|expense| &expense.id != id);
        self.clamp_selection();
    }
}

pub struct App {
    client: Client,
    pub state: ExpensesState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url)?;
        let state = ExpensesState::new(client.endpoint().to_string());

        Ok(Self {
            client,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        self.load().await?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key).await?,
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // A visible alert is blocking: the next key only dismisses it.
        if self.state.alert.take().is_some() {
            return Ok(());
        }

        let action = ui::keymap::map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return Ok(());
        }

        if self.state.pending_delete.is_some() {
            self.handle_confirm_key(action).await
        } else if self.state.form.is_some() {
            self.handle_form_key(action).await
        } else {
            self.handle_list_key(action).await
        }
    }

    async fn handle_confirm_key(&mut self, action: AppAction) -> Result<()> {
        match action {
            AppAction::Submit | AppAction::Input('y' | 'Y') => self.confirm_delete().await?,
            AppAction::Cancel | AppAction::Input('n' | 'N') => self.state.cancel_delete(),
            _ => {}
        }
        Ok(())
    }

    async fn handle_form_key(&mut self, action: AppAction) -> Result<()> {
        match action {
            AppAction::Submit => self.submit_form().await?,
            AppAction::Cancel => self.state.close_form(),
            _ => {
                if let Some(form) = self.state.form.as_mut() {
                    match action {
                        AppAction::NextField => form.focus_next(),
                        AppAction::Up => form.focus_prev(),
                        AppAction::Down => form.focus_next(),
                        AppAction::Backspace => form.backspace(),
                        AppAction::Left if form.focus == FormField::Category => form.pick_prev(),
                        AppAction::Right if form.focus == FormField::Category => form.pick_next(),
                        AppAction::Input(ch) => form.insert(ch),
                        _ => {}
                    }
                }
            }
        }
        Ok(())
    }

    async fn handle_list_key(&mut self, action: AppAction) -> Result<()> {
        match action {
            AppAction::Input('q') => self.should_quit = true,
            AppAction::Input('a') => self.state.open_form(),
            AppAction::Input('d') => self.state.begin_delete(),
            AppAction::Input('r') => self.load().await?,
            AppAction::Down | AppAction::Input('j') => self.state.select_next(),
            AppAction::Up | AppAction::Input('k') => self.state.select_prev(),
            AppAction::Left => {
                let filter = self.state.filter.prev();
                self.state.set_filter(filter);
            }
            AppAction::Right => {
                let filter = self.state.filter.next();
                self.state.set_filter(filter);
            }
            _ => {}
        }
        Ok(())
    }

    /// Fetches the full collection and replaces local state on success.
    ///
    /// While a call is outstanding the keys that would start another one are
    /// ignored, so rapid repeated taps cannot double-submit.
    async fn load(&mut self) -> Result<()> {
        if self.state.loading {
            return Ok(());
        }
        self.state.loading = true;

        match self.client.expenses_list().await {
            Ok(items) => {
                self.state.apply_loaded(items);
                self.state.last_refresh = Some(Local::now());
            }
            Err(err) => {
                tracing::error!("load failed: {err}");
                self.state.alert = Some(message_for_error(&err));
            }
        }

        self.state.loading = false;
        Ok(())
    }

    async fn submit_form(&mut self) -> Result<()> {
        if self.state.loading {
            return Ok(());
        }
        let Some(form) = &self.state.form else {
            return Ok(());
        };

        // Validation failures never reach the network; the inputs stay put.
        let draft = match form.build(Local::now().fixed_offset()) {
            Ok(draft) => draft,
            Err(message) => {
                self.state.alert = Some(message);
                return Ok(());
            }
        };

        self.state.loading = true;
        match self.client.expense_create(&draft).await {
            Ok(created) => {
                tracing::info!(id = %created.id, "expense created");
                self.state.apply_created(created);
            }
            Err(err) => {
                tracing::error!("create failed: {err}");
                self.state.alert = Some(message_for_error(&err));
            }
        }
        self.state.loading = false;
        Ok(())
    }

    async fn confirm_delete(&mut self) -> Result<()> {
        if self.state.loading {
            return Ok(());
        }
        let Some(id) = self.state.pending_delete.clone() else {
            return Ok(());
        };

        self.state.loading = true;
        match self.client.expense_delete(&id).await {
            Ok(()) => {
                tracing::info!(%id, "expense deleted");
                self.state.apply_deleted(&id);
            }
            Err(err) => {
                tracing::error!("delete failed: {err}");
                self.state.alert = Some(message_for_error(&err));
            }
        }
        self.state.pending_delete = None;
        self.state.loading = false;
        Ok(())
    }
}

fn message_for_error(err: &ClientError) -> String {
    match err {
        ClientError::Status(status) => format!("Richiesta rifiutata dal server ({status})."),
        ClientError::Transport(err) => format!("Server non raggiungibile: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(id: i64, cents: i64, category: &str) -> Expense {
        Expense {
            id: ExpenseId::Number(id),
            amount: Amount::new(cents),
            description: format!("spesa {id}"),
            category: category.to_string(),
            date: DateTime::parse_from_rfc3339("2026-08-05T10:00:00+02:00").unwrap(),
        }
    }

    fn state_with(items: Vec<Expense>) -> ExpensesState {
        let mut state = ExpensesState::new("http://127.0.0.1:3000/expenses".to_string());
        state.apply_loaded(items);
        state
    }

    #[test]
    fn filter_all_returns_everything_in_order() {
        let state = state_with(vec![
            expense(1, 1250, "Food"),
            expense(2, 4000, "Bills"),
            expense(3, 900, "Food"),
        ]);
        let visible: Vec<i64> = state
            .filtered()
            .iter()
            .map(|e| match &e.id {
                ExpenseId::Number(n) => *n,
                ExpenseId::Text(_) => unreachable!(),
            })
            .collect();
        assert_eq!(visible, vec![1, 2, 3]);
        assert_eq!(state.total(), Amount::new(6150));
    }

    #[test]
    fn filter_restricts_and_preserves_relative_order() {
        let mut state = state_with(vec![
            expense(1, 1250, "Food"),
            expense(2, 4000, "Bills"),
            expense(3, 900, "Food"),
        ]);
        state.set_filter(Filter::Category(Category::Food));

        let visible = state.filtered();
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].amount, Amount::new(1250));
        assert_eq!(visible[1].amount, Amount::new(900));
        assert_eq!(state.total(), Amount::new(2150));
    }

    #[test]
    fn total_is_zero_for_unmatched_category() {
        let mut state = state_with(vec![expense(1, 1250, "Food")]);
        state.set_filter(Filter::Category(Category::Health));
        assert!(state.filtered().is_empty());
        assert_eq!(state.total(), Amount::ZERO);
    }

    #[test]
    fn food_filter_scenario() {
        let mut state = state_with(vec![
            expense(1, 1250, "Food"),
            expense(2, 4000, "Bills"),
        ]);
        state.set_filter(Filter::Category(Category::Food));
        assert_eq!(state.filtered().len(), 1);
        assert_eq!(state.total(), Amount::new(1250));
        assert_eq!(state.total().to_string(), "12.50€");
    }

    #[test]
    fn draft_rejects_missing_fields() {
        let date = DateTime::parse_from_rfc3339("2026-08-05T10:00:00+02:00").unwrap();

        let mut form = AddForm::new();
        form.amount_input = "20".to_string();
        assert!(form.build(date).is_err());

        let mut form = AddForm::new();
        form.description_input = "Coffee".to_string();
        assert!(form.build(date).is_err());

        let mut form = AddForm::new();
        form.amount_input = "abc".to_string();
        form.description_input = "Coffee".to_string();
        assert!(form.build(date).is_err());
    }

    #[test]
    fn draft_builds_create_payload() {
        let date = DateTime::parse_from_rfc3339("2026-08-05T10:00:00+02:00").unwrap();
        let mut form = AddForm::new();
        form.amount_input = "20".to_string();
        form.description_input = "  Coffee  ".to_string();

        let draft = form.build(date).unwrap();
        assert_eq!(draft.amount, Amount::new(2000));
        assert_eq!(draft.description, "Coffee");
        assert_eq!(draft.category, Category::Food);
        assert_eq!(draft.date, date);
    }

    #[test]
    fn create_prepends_and_closes_form() {
        let mut state = state_with(vec![expense(1, 1250, "Food")]);
        state.open_form();

        state.apply_created(expense(9, 2000, "Food"));
        assert_eq!(state.items.len(), 2);
        assert_eq!(state.items[0].id, ExpenseId::Number(9));
        assert!(state.form.is_none());
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn delete_removes_only_the_matching_record() {
        let mut state = state_with(vec![
            expense(1, 1250, "Food"),
            expense(2, 4000, "Bills"),
            expense(3, 900, "Food"),
        ]);
        state.apply_deleted(&ExpenseId::Number(2));

        assert_eq!(state.items.len(), 2);
        assert!(state.items.iter().all(|e| e.id != ExpenseId::Number(2)));
    }

    #[test]
    fn delete_is_a_two_step_transition() {
        let mut state = state_with(vec![
            expense(1, 1250, "Food"),
            expense(2, 4000, "Bills"),
        ]);
        state.select_next();
        state.begin_delete();
        assert_eq!(state.pending_delete, Some(ExpenseId::Number(2)));

        // Cancelling leaves the list untouched.
        state.cancel_delete();
        assert!(state.pending_delete.is_none());
        assert_eq!(state.items.len(), 2);

        // Confirming removes exactly the pending record.
        state.begin_delete();
        let id = state.pending_delete.clone().unwrap();
        state.apply_deleted(&id);
        state.cancel_delete();
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].id, ExpenseId::Number(1));
    }

    #[test]
    fn selection_clamps_after_removal() {
        let mut state = state_with(vec![
            expense(1, 100, "Food"),
            expense(2, 200, "Food"),
        ]);
        state.select_next();
        assert_eq!(state.selected, 1);

        state.apply_deleted(&ExpenseId::Number(2));
        assert_eq!(state.selected, 0);

        state.apply_deleted(&ExpenseId::Number(1));
        assert_eq!(state.selected, 0);
        assert!(state.selected_expense().is_none());
    }

    #[test]
    fn icons_cover_every_category_with_a_default() {
        for category in Category::ALL {
            assert!(!icon_for(category.as_str()).is_empty());
        }
        assert_eq!(icon_for("Gadgets"), "📌");
        assert_eq!(icon_for(""), "📌");
    }

    #[test]
    fn filter_choices_cycle_and_wrap() {
        assert_eq!(Filter::All.next(), Filter::Category(Category::Food));
        assert_eq!(Filter::Category(Category::Other).next(), Filter::All);
        assert_eq!(Filter::All.prev(), Filter::Category(Category::Other));

        let mut filter = Filter::All;
        for _ in 0..Filter::CHOICES.len() {
            filter = filter.next();
        }
        assert_eq!(filter, Filter::All);
    }

    #[test]
    fn category_picker_cycles() {
        let mut form = AddForm::new();
        assert_eq!(form.category(), Category::Food);
        form.pick_prev();
        assert_eq!(form.category(), Category::Other);
        form.pick_next();
        assert_eq!(form.category(), Category::Food);
    }
}
