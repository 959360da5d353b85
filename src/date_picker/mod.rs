//! The modal calendar for picking a date.
//!
//! [DatePicker] owns which month is displayed, which day is selected and
//! whether the modal is open. Browser events are fed in as [PickerEvent]s and
//! [DatePicker::render] produces the modal for the current state.

mod calendar;
mod restrictions;

use std::{
    iter::successors,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use maud::{Markup, html};
use time::{Date, Month};

pub use calendar::{CalendarCell, month_grid};
pub use restrictions::{Restrictions, RestrictionsUpdate, YearOptions};

use crate::{format::format_date, timer::run_after};

/// The `id` of the modal element.
pub const MODAL_ID: &str = "datepicker-modal";

/// CSS selector htmx uses to swap the modal.
const MODAL_SELECTOR: &str = "#datepicker-modal";

/// The `id` of the element holding the day grid.
pub const GRID_ID: &str = "calendar-grid";

/// Delay between opening the modal and applying the shown state, so the CSS
/// transition starts from the settled closed state.
pub const OPEN_DELAY: Duration = Duration::from_millis(10);

/// How long the closing transition takes before the modal is hidden.
pub const CLOSE_DELAY: Duration = Duration::from_millis(300);

const WEEKDAY_LABELS: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

type SelectCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Where the modal is in its open/close cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Not displayed.
    Hidden,
    /// Displayed, waiting to apply the shown state.
    Opening,
    /// Fully shown.
    Shown,
    /// Playing the closing transition.
    Closing,
}

impl Visibility {
    fn as_str(self) -> &'static str {
        match self {
            Visibility::Hidden => "hidden",
            Visibility::Opening => "opening",
            Visibility::Shown => "shown",
            Visibility::Closing => "closing",
        }
    }
}

/// What the user did in the modal or to its trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerEvent {
    /// The trigger button was clicked.
    TriggerClicked,
    /// The previous month button was clicked.
    PreviousMonth,
    /// The next month button was clicked.
    NextMonth,
    /// A month was chosen in the month selector.
    MonthSelected(Month),
    /// A year was chosen in the year selector.
    YearSelected(i32),
    /// A day in the grid was clicked.
    DayClicked(Date),
    /// The confirm button was clicked.
    Confirm,
    /// The cancel button was clicked.
    Cancel,
    /// The backdrop around the modal was clicked.
    BackdropClicked,
}

/// Settings for [DatePicker::init].
#[derive(Clone, Default)]
pub struct DatePickerOptions {
    on_select: Option<SelectCallback>,
    current_year_only: bool,
    grid_endpoint: Option<String>,
    select_endpoint: Option<String>,
}

impl DatePickerOptions {
    /// Default options: no callback, no restrictions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `on_select` with the picked date as `YYYY-MM-DD` on confirm.
    pub fn on_select(mut self, on_select: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_select = Some(Arc::new(on_select));
        self
    }

    /// Only allow dates in the current year.
    pub fn current_year_only(mut self, current_year_only: bool) -> Self {
        self.current_year_only = current_year_only;
        self
    }

    /// Make navigation in the rendered modal load
    /// `endpoint?year=&month=&selected=` into the modal.
    pub fn grid_endpoint(mut self, endpoint: &str) -> Self {
        self.grid_endpoint = Some(endpoint.to_owned());
        self
    }

    /// Make the rendered confirm button load `endpoint?date=YYYY-MM-DD`.
    pub fn select_endpoint(mut self, endpoint: &str) -> Self {
        self.select_endpoint = Some(endpoint.to_owned());
        self
    }
}

impl std::fmt::Debug for DatePickerOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatePickerOptions")
            .field("on_select", &self.on_select.is_some())
            .field("current_year_only", &self.current_year_only)
            .field("grid_endpoint", &self.grid_endpoint)
            .field("select_endpoint", &self.select_endpoint)
            .finish()
    }
}

struct PickerState {
    today: Date,
    /// First day of the displayed month.
    view: Date,
    selected: Date,
    restrictions: Restrictions,
    year_options: YearOptions,
    visibility: Visibility,
    /// Bumped on every visibility change so stale transition timers are
    /// ignored.
    generation: u64,
    initialized: bool,
    on_select: Option<SelectCallback>,
    grid_endpoint: Option<String>,
    select_endpoint: Option<String>,
}

impl PickerState {
    fn this_year(&self) -> i32 {
        self.today.year()
    }

    fn show_month(&mut self, year: i32, month: Month) -> bool {
        if !self.restrictions.allows(year, self.this_year()) {
            tracing::debug!("Year {year} is outside the date picker's restrictions");
            return false;
        }

        match Date::from_calendar_date(year, month, 1) {
            Ok(view) => {
                self.view = view;
                self.expand_year_options();
                true
            }
            Err(error) => {
                tracing::warn!("Cannot show {year}-{month} in the date picker: {error}");
                false
            }
        }
    }

    fn expand_year_options(&mut self) {
        let this_year = self.this_year();
        self.year_options
            .expand_around(self.view.year(), &self.restrictions, this_year);
    }

    /// Fill the year selector and move the view into the allowed years.
    fn prepare_open(&mut self) {
        let this_year = self.this_year();

        let years = self.restrictions.initial_years(this_year);
        self.year_options.populate(years);

        let year = self.restrictions.clamp(self.view.year(), this_year);
        if year != self.view.year() {
            let month = self.view.month();
            self.show_month(year, month);
        }
        self.expand_year_options();
    }

    fn grid_link(&self, view: Date, selected: Date, open: bool) -> Option<String> {
        let endpoint = self.grid_endpoint.as_deref()?;
        let mut link = format!(
            "{endpoint}?year={}&month={}&selected={}",
            view.year(),
            u8::from(view.month()),
            format_date(Some(selected))
        );

        if !open {
            link.push_str("&open=false");
        }

        Some(link)
    }
}

/// A modal calendar.
///
/// Cloning the picker gives another handle to the same modal.
#[derive(Clone)]
pub struct DatePicker {
    state: Arc<Mutex<PickerState>>,
}

impl std::fmt::Debug for DatePicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("DatePicker")
            .field("view", &state.view)
            .field("selected", &state.selected)
            .field("visibility", &state.visibility)
            .finish_non_exhaustive()
    }
}

impl DatePicker {
    /// A hidden picker showing the month of `today` with `today` selected.
    pub fn new(today: Date) -> Self {
        let view = today.replace_day(1).unwrap_or(today);

        Self {
            state: Arc::new(Mutex::new(PickerState {
                today,
                view,
                selected: today,
                restrictions: Restrictions::default(),
                year_options: YearOptions::default(),
                visibility: Visibility::Hidden,
                generation: 0,
                initialized: false,
                on_select: None,
                grid_endpoint: None,
                select_endpoint: None,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PickerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `options` and reset the modal to hidden.
    ///
    /// Calling `init` again replaces the previous options.
    pub fn init(&self, options: DatePickerOptions) {
        let mut state = self.lock();

        if state.initialized {
            tracing::debug!("Replacing the existing date picker modal");
        }

        if options.current_year_only {
            state.restrictions = Restrictions::current_year(state.this_year());
        }

        state.on_select = options.on_select;
        state.grid_endpoint = options.grid_endpoint;
        state.select_endpoint = options.select_endpoint;
        state.visibility = Visibility::Hidden;
        state.generation += 1;
        state.initialized = true;
    }

    /// The button that opens the modal.
    pub fn trigger(&self, label: &str) -> Markup {
        let state = self.lock();
        let link = state.grid_link(state.view, state.selected, true);

        html! {
            button
                type="button"
                class="date-picker-btn"
                data-action="open-date-picker"
                hx-get=[link.as_deref()]
                hx-target=[link.as_ref().map(|_| MODAL_SELECTOR)]
                hx-swap=[link.as_ref().map(|_| "outerHTML")]
            {
                (label)
            }
        }
    }

    /// Open the modal.
    ///
    /// Fills the year selector and applies [Visibility::Shown] after
    /// [OPEN_DELAY]. Must be called from within a Tokio runtime for the
    /// shown state to be applied.
    pub fn show(&self) {
        let generation = {
            let mut state = self.lock();
            state.prepare_open();
            state.visibility = Visibility::Opening;
            state.generation += 1;
            state.generation
        };

        let picker = self.clone();
        run_after(OPEN_DELAY, move || {
            picker.finish_transition(generation, Visibility::Shown)
        });
    }

    /// Open the modal straight into [Visibility::Shown] without the opening
    /// transition, for a modal that is rendered only once.
    pub fn open_now(&self) {
        let mut state = self.lock();
        state.prepare_open();
        state.visibility = Visibility::Shown;
        state.generation += 1;
    }

    /// Close the modal. It becomes [Visibility::Hidden] after [CLOSE_DELAY].
    ///
    /// Does nothing if the modal is already hidden or closing.
    pub fn hide(&self) {
        let generation = {
            let mut state = self.lock();

            if matches!(state.visibility, Visibility::Hidden | Visibility::Closing) {
                return;
            }

            state.visibility = Visibility::Closing;
            state.generation += 1;
            state.generation
        };

        let picker = self.clone();
        run_after(CLOSE_DELAY, move || {
            picker.finish_transition(generation, Visibility::Hidden)
        });
    }

    fn finish_transition(&self, generation: u64, visibility: Visibility) {
        let mut state = self.lock();

        if state.generation == generation {
            state.visibility = visibility;
        }
    }

    /// React to a browser event.
    pub fn handle(&self, event: PickerEvent) {
        match event {
            PickerEvent::TriggerClicked => self.show(),
            PickerEvent::PreviousMonth => self.shift_month(false),
            PickerEvent::NextMonth => self.shift_month(true),
            PickerEvent::MonthSelected(month) => {
                let mut state = self.lock();
                let year = state.view.year();
                state.show_month(year, month);
            }
            PickerEvent::YearSelected(year) => {
                let mut state = self.lock();
                let month = state.view.month();
                state.show_month(year, month);
            }
            PickerEvent::DayClicked(date) => self.select_day(date),
            PickerEvent::Confirm => self.confirm(),
            PickerEvent::Cancel | PickerEvent::BackdropClicked => self.hide(),
        }
    }

    fn shift_month(&self, forward: bool) {
        let mut state = self.lock();
        let (year, month) = (state.view.year(), state.view.month());

        let (year, month) = match (forward, month) {
            (true, Month::December) => (year + 1, Month::January),
            (true, month) => (year, month.next()),
            (false, Month::January) => (year - 1, Month::December),
            (false, month) => (year, month.previous()),
        };

        state.show_month(year, month);
    }

    fn select_day(&self, date: Date) {
        let mut state = self.lock();

        if date.month() != state.view.month() || date.year() != state.view.year() {
            tracing::debug!("Ignoring click on {date}, it is outside the displayed month");
            return;
        }

        state.selected = date;
    }

    /// Pass the selected date to the `on_select` callback and close the modal.
    pub fn confirm(&self) {
        let (on_select, selected) = {
            let state = self.lock();
            (state.on_select.clone(), format_date(Some(state.selected)))
        };

        match on_select {
            Some(on_select) => on_select(&selected),
            None => tracing::debug!("Date picker confirmed {selected} without a callback"),
        }

        self.hide();
    }

    /// Overwrite the restrictions that `update` sets. Takes effect the next
    /// time the modal is opened or navigated.
    pub fn set_restrictions(&self, update: RestrictionsUpdate) {
        self.lock().restrictions.merge(update);
    }

    /// Select `date` and display its month.
    ///
    /// A date in a year the restrictions do not allow is ignored.
    pub fn set_selected_date(&self, date: Date) {
        let mut state = self.lock();

        if state.show_month(date.year(), date.month()) {
            state.selected = date;
        } else {
            tracing::debug!("Not selecting {date}, it is outside the date picker's restrictions");
        }
    }

    /// The current restrictions.
    pub fn restrictions(&self) -> Restrictions {
        self.lock().restrictions
    }

    /// Where the modal is in its open/close cycle.
    pub fn visibility(&self) -> Visibility {
        self.lock().visibility
    }

    /// The selected date.
    pub fn selected_date(&self) -> Date {
        self.lock().selected
    }

    /// The year and month displayed.
    pub fn view_month(&self) -> (i32, Month) {
        let state = self.lock();
        (state.view.year(), state.view.month())
    }

    /// The years in the year selector, ascending.
    pub fn year_options(&self) -> Vec<i32> {
        self.lock().year_options.to_vec()
    }

    /// The day grid of the displayed month.
    pub fn cells(&self) -> Vec<CalendarCell> {
        let state = self.lock();
        month_grid(state.view, state.today, Some(state.selected))
    }

    /// The modal for the current state.
    pub fn render(&self) -> Markup {
        let state = self.lock();
        let cells = month_grid(state.view, state.today, Some(state.selected));
        let previous = state
            .view
            .previous_day()
            .and_then(|last_of_previous| last_of_previous.replace_day(1).ok());
        let next = state
            .view
            .replace_day(state.view.month().length(state.view.year()))
            .ok()
            .and_then(|last| last.next_day());

        let shown = state.visibility == Visibility::Shown;
        let open = state.visibility != Visibility::Hidden;
        let allowed = |date: Option<Date>| {
            date.filter(|date| state.restrictions.allows(date.year(), state.this_year()))
        };
        let previous_link =
            allowed(previous).and_then(|view| state.grid_link(view, state.selected, true));
        let next_link = allowed(next).and_then(|view| state.grid_link(view, state.selected, true));
        let close_link = state.grid_link(state.view, state.selected, false);
        let confirm_link = state
            .select_endpoint
            .as_deref()
            .map(|endpoint| format!("{endpoint}?date={}", format_date(Some(state.selected))));

        html! {
            div
                id=(MODAL_ID)
                class=(if shown { "datepicker-modal show" } else { "datepicker-modal" })
                data-state=(state.visibility.as_str())
                style=[(!open).then_some("display: none")]
            {
                div
                    class="datepicker-backdrop"
                    data-action="cancel"
                    hx-get=[close_link.as_deref()]
                    hx-target=[close_link.as_ref().map(|_| MODAL_SELECTOR)]
                    hx-swap=[close_link.as_ref().map(|_| "outerHTML")]
                {}
                div class="datepicker-content" {
                    form
                        class="datepicker-header"
                        hx-get=[state.grid_endpoint.as_deref()]
                        hx-trigger=[state.grid_endpoint.as_ref().map(|_| "change")]
                        hx-target=[state.grid_endpoint.as_ref().map(|_| MODAL_SELECTOR)]
                        hx-swap=[state.grid_endpoint.as_ref().map(|_| "outerHTML")]
                    {
                        input type="hidden" name="selected" value=(format_date(Some(state.selected)));
                        button
                            type="button"
                            id="datepicker-prev"
                            class="datepicker-nav"
                            data-action="prev-month"
                            hx-get=[previous_link.as_deref()]
                            hx-target=[previous_link.as_ref().map(|_| MODAL_SELECTOR)]
                            hx-swap=[previous_link.as_ref().map(|_| "outerHTML")]
                        {
                            "◀"
                        }
                        select id="datepicker-month" name="month" {
                            @for month in successors(Some(Month::January), |month| Some(month.next())).take(12) {
                                option
                                    value=(u8::from(month))
                                    selected[month == state.view.month()]
                                {
                                    (u8::from(month)) "월"
                                }
                            }
                        }
                        select id="datepicker-year" name="year" {
                            @for year in state.year_options.iter() {
                                option value=(year) selected[year == state.view.year()] {
                                    (year) "년"
                                }
                            }
                        }
                        button
                            type="button"
                            id="datepicker-next"
                            class="datepicker-nav"
                            data-action="next-month"
                            hx-get=[next_link.as_deref()]
                            hx-target=[next_link.as_ref().map(|_| MODAL_SELECTOR)]
                            hx-swap=[next_link.as_ref().map(|_| "outerHTML")]
                        {
                            "▶"
                        }
                    }
                    div class="datepicker-weekdays" {
                        @for label in WEEKDAY_LABELS {
                            div class="datepicker-weekday" { (label) }
                        }
                    }
                    div id=(GRID_ID) class="datepicker-grid" {
                        @for week in cells.chunks(7) {
                            div class="datepicker-week" {
                                @for cell in week {
                                    @let day_link = (!cell.is_other_month)
                                        .then(|| state.grid_link(state.view, cell.date, true))
                                        .flatten();
                                    div
                                        class=(cell.class())
                                        data-date=(format_date(Some(cell.date)))
                                        hx-get=[day_link.as_deref()]
                                        hx-target=[day_link.as_ref().map(|_| MODAL_SELECTOR)]
                                        hx-swap=[day_link.as_ref().map(|_| "outerHTML")]
                                    {
                                        (cell.date.day())
                                    }
                                }
                            }
                        }
                    }
                    div class="datepicker-footer" {
                        button
                            type="button"
                            id="datepicker-cancel"
                            hx-get=[close_link.as_deref()]
                            hx-target=[close_link.as_ref().map(|_| MODAL_SELECTOR)]
                            hx-swap=[close_link.as_ref().map(|_| "outerHTML")]
                        {
                            "취소"
                        }
                        button
                            type="button"
                            id="datepicker-confirm"
                            hx-get=[confirm_link.as_deref()]
                            hx-target=[confirm_link.as_ref().map(|_| "body")]
                            hx-push-url=[confirm_link.as_ref().map(|_| "true")]
                        {
                            "확인"
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod date_picker_tests {
    use std::{
        sync::{Arc, Mutex},
        time::Duration,
    };

    use time::{Month, macros::date};

    use crate::test_utils::{has_class, must_select, parse_markup, select_all};

    use super::{
        CLOSE_DELAY, DatePicker, DatePickerOptions, OPEN_DELAY, PickerEvent, RestrictionsUpdate,
        Visibility,
    };

    fn picker() -> DatePicker {
        let picker = DatePicker::new(date!(2026 - 03 - 14));
        picker.init(DatePickerOptions::new());
        picker
    }

    #[tokio::test(start_paused = true)]
    async fn show_applies_shown_state_after_delay() {
        let picker = picker();
        assert_eq!(picker.visibility(), Visibility::Hidden);

        picker.handle(PickerEvent::TriggerClicked);
        assert_eq!(picker.visibility(), Visibility::Opening);

        tokio::time::sleep(OPEN_DELAY + Duration::from_millis(1)).await;
        assert_eq!(picker.visibility(), Visibility::Shown);
    }

    #[tokio::test(start_paused = true)]
    async fn hide_becomes_hidden_after_close_delay() {
        let picker = picker();
        picker.show();
        tokio::time::sleep(OPEN_DELAY * 2).await;

        picker.handle(PickerEvent::Cancel);
        assert_eq!(picker.visibility(), Visibility::Closing);

        tokio::time::sleep(CLOSE_DELAY - Duration::from_millis(50)).await;
        assert_eq!(picker.visibility(), Visibility::Closing);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(picker.visibility(), Visibility::Hidden);
    }

    #[tokio::test(start_paused = true)]
    async fn reopening_while_closing_ignores_stale_timer() {
        let picker = picker();
        picker.show();
        tokio::time::sleep(OPEN_DELAY * 2).await;

        picker.handle(PickerEvent::BackdropClicked);
        tokio::time::sleep(Duration::from_millis(100)).await;
        picker.show();
        tokio::time::sleep(CLOSE_DELAY).await;

        assert_eq!(picker.visibility(), Visibility::Shown);
    }

    #[tokio::test(start_paused = true)]
    async fn year_options_default_to_ten_years_either_side() {
        let picker = picker();

        picker.show();

        assert_eq!(picker.year_options(), (2016..=2036).collect::<Vec<_>>());
    }

    #[tokio::test(start_paused = true)]
    async fn navigating_expands_year_options_in_order() {
        let picker = DatePicker::new(date!(2026 - 03 - 14));
        picker.init(DatePickerOptions::new());
        picker.set_restrictions(RestrictionsUpdate::new().min_year(2025).max_year(2026));
        picker.show();
        assert_eq!(picker.year_options(), [2025, 2026]);

        picker.set_restrictions(RestrictionsUpdate::new().clear_year_bounds());
        picker.handle(PickerEvent::YearSelected(2027));

        assert_eq!(picker.year_options(), [2025, 2026, 2027, 2028, 2029]);
        assert_eq!(picker.view_month(), (2027, Month::March));
    }

    #[tokio::test(start_paused = true)]
    async fn current_year_only_pins_navigation() {
        let picker = DatePicker::new(date!(2026 - 12 - 01));
        picker.init(DatePickerOptions::new().current_year_only(true));
        picker.show();

        picker.handle(PickerEvent::NextMonth);
        picker.handle(PickerEvent::YearSelected(2025));

        assert_eq!(picker.year_options(), [2026]);
        assert_eq!(picker.view_month(), (2026, Month::December));

        picker.handle(PickerEvent::PreviousMonth);
        assert_eq!(picker.view_month(), (2026, Month::November));
    }

    #[test]
    fn month_navigation_wraps_years_and_keeps_selection() {
        let picker = DatePicker::new(date!(2026 - 01 - 20));

        picker.handle(PickerEvent::PreviousMonth);
        assert_eq!(picker.view_month(), (2025, Month::December));
        picker.handle(PickerEvent::NextMonth);
        picker.handle(PickerEvent::NextMonth);
        assert_eq!(picker.view_month(), (2026, Month::February));
        picker.handle(PickerEvent::MonthSelected(Month::July));
        assert_eq!(picker.view_month(), (2026, Month::July));

        assert_eq!(picker.selected_date(), date!(2026 - 01 - 20));
    }

    #[test]
    fn clicking_a_day_moves_the_selection() {
        let picker = DatePicker::new(date!(2026 - 03 - 14));

        picker.handle(PickerEvent::DayClicked(date!(2026 - 03 - 03)));

        assert_eq!(picker.selected_date(), date!(2026 - 03 - 03));
        let html = parse_markup(picker.render());
        let selected = select_all(&html, ".datepicker-day.selected");
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].value().attr("data-date"), Some("2026-03-03"));
    }

    #[test]
    fn clicking_a_day_from_another_month_is_ignored() {
        let picker = DatePicker::new(date!(2026 - 03 - 14));

        picker.handle(PickerEvent::DayClicked(date!(2026 - 02 - 28)));
        picker.handle(PickerEvent::DayClicked(date!(2026 - 04 - 01)));

        assert_eq!(picker.selected_date(), date!(2026 - 03 - 14));
    }

    #[tokio::test(start_paused = true)]
    async fn confirm_passes_selected_date_and_closes() {
        let picked = Arc::new(Mutex::new(Vec::new()));
        let sink = picked.clone();
        let picker = DatePicker::new(date!(2026 - 03 - 14));
        picker.init(
            DatePickerOptions::new().on_select(move |date| sink.lock().unwrap().push(date.to_owned())),
        );
        picker.show();
        tokio::time::sleep(OPEN_DELAY * 2).await;

        picker.handle(PickerEvent::DayClicked(date!(2026 - 03 - 05)));
        picker.handle(PickerEvent::Confirm);

        assert_eq!(*picked.lock().unwrap(), ["2026-03-05"]);
        assert_eq!(picker.visibility(), Visibility::Closing);
    }

    #[test]
    fn set_restrictions_merges_fields() {
        let picker = DatePicker::new(date!(2026 - 03 - 14));
        picker.init(DatePickerOptions::new().current_year_only(true));

        picker.set_restrictions(RestrictionsUpdate::new().current_year_only(false).max_year(2030));

        let restrictions = picker.restrictions();
        assert!(!restrictions.current_year_only);
        assert_eq!(restrictions.min_year, Some(2026));
        assert_eq!(restrictions.max_year, Some(2030));
    }

    #[test]
    fn hidden_modal_renders_with_display_none() {
        let picker = picker();

        let html = parse_markup(picker.render());

        let modal = must_select(&html, "#datepicker-modal");
        assert_eq!(modal.value().attr("style"), Some("display: none"));
        assert!(!has_class(&modal, "show"));
    }

    #[tokio::test(start_paused = true)]
    async fn shown_modal_renders_selectors_and_grid() {
        let picker = DatePicker::new(date!(2026 - 03 - 14));
        picker.init(DatePickerOptions::new().grid_endpoint("/api/date-picker"));
        picker.show();
        tokio::time::sleep(OPEN_DELAY * 2).await;

        let html = parse_markup(picker.render());

        let modal = must_select(&html, "#datepicker-modal");
        assert!(has_class(&modal, "show"));
        assert_eq!(modal.value().attr("style"), None);
        assert_eq!(select_all(&html, "#datepicker-month option").len(), 12);
        assert_eq!(
            must_select(&html, "#datepicker-month option[selected]")
                .text()
                .collect::<String>(),
            "3월"
        );
        assert_eq!(
            must_select(&html, "#datepicker-year option[selected]")
                .text()
                .collect::<String>(),
            "2026년"
        );
        assert_eq!(select_all(&html, "#calendar-grid .datepicker-week").len(), 6);
        assert_eq!(select_all(&html, "#calendar-grid .datepicker-day").len(), 42);
        assert_eq!(
            must_select(&html, "#datepicker-prev").value().attr("hx-get"),
            Some("/api/date-picker?year=2026&month=2&selected=2026-03-14")
        );
        assert_eq!(
            must_select(&html, "#datepicker-cancel").value().attr("hx-get"),
            Some("/api/date-picker?year=2026&month=3&selected=2026-03-14&open=false")
        );
        assert_eq!(
            must_select(&html, "form.datepicker-header").value().attr("hx-trigger"),
            Some("change")
        );
        assert!(
            select_all(&html, ".datepicker-day.other-month")
                .iter()
                .all(|cell| cell.value().attr("hx-get").is_none())
        );
    }
    #[test]
    fn open_now_is_shown_immediately() {
        let picker = DatePicker::new(date!(2026 - 03 - 14));
        picker.init(DatePickerOptions::new().grid_endpoint("/api/date-picker"));

        picker.open_now();

        assert_eq!(picker.visibility(), Visibility::Shown);
        assert_eq!(picker.year_options(), (2016..=2036).collect::<Vec<_>>());
        let html = parse_markup(picker.render());
        let modal = must_select(&html, "#datepicker-modal");
        assert!(has_class(&modal, "show"));
        assert_eq!(modal.value().attr("data-state"), Some("shown"));
        assert_eq!(modal.value().attr("style"), None);
    }

    #[test]
    fn selected_date_outside_current_year_is_ignored() {
        let picker = DatePicker::new(date!(2026 - 03 - 14));
        picker.init(DatePickerOptions::new().current_year_only(true));

        picker.set_selected_date(date!(2020 - 05 - 05));

        assert_eq!(picker.view_month(), (2026, Month::March));
        assert_eq!(picker.selected_date(), date!(2026 - 03 - 14));
        picker.open_now();
        assert_eq!(picker.year_options(), [2026]);
    }

    #[test]
    fn selected_date_far_from_today_gets_a_year_option() {
        let picker = picker();

        picker.set_selected_date(date!(2045 - 05 - 05));

        assert_eq!(picker.view_month(), (2045, Month::May));
        assert!(picker.year_options().contains(&2045));

        picker.open_now();
        let html = parse_markup(picker.render());
        assert_eq!(
            must_select(&html, "#datepicker-year option[selected]")
                .text()
                .collect::<String>(),
            "2045년"
        );
        assert_eq!(
            must_select(&html, ".datepicker-day.selected").value().attr("data-date"),
            Some("2045-05-05")
        );
    }

    #[test]
    fn modal_without_endpoints_has_no_htmx_wiring() {
        let picker = picker();
        picker.open_now();

        let html = parse_markup(picker.render());

        let header = must_select(&html, "form.datepicker-header");
        for attribute in ["hx-get", "hx-trigger", "hx-target", "hx-swap"] {
            assert_eq!(header.value().attr(attribute), None, "{attribute}");
        }
        for selector in ["#datepicker-prev", "#datepicker-cancel", "#datepicker-confirm"] {
            let element = must_select(&html, selector);
            assert_eq!(element.value().attr("hx-target"), None, "{selector}");
        }
    }
}
