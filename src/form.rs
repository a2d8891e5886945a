use crate::types::Month;
use crate::validate::{ErrorKind, TodayRef, validate};
use crate::{CivilDate, DateStyle};

/// What a field shows beneath itself: its hint, or a validation error once
/// one is visible. A closed set, so a view layer can exhaustively match on
/// the tone to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMessage {
    Hint(&'static str),
    Error(ErrorKind),
}

/// Where an entry field is in its submission lifecycle.
///
/// Validation errors stay hidden while `Pristine`; the first submit attempt
/// moves to `Attempted` and only an explicit reset moves back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Pristine,
    Attempted,
}

/// Per-instance submission state shared by both field patterns.
///
/// `confirmed` holds the parsed date accepted at the last submit. Because it
/// stores the parse result rather than raw input, a present value was
/// necessarily valid at the moment it was set; it is never re-validated
/// against a later "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Submission {
    phase: Phase,
    confirmed: Option<CivilDate>,
}

impl Submission {
    pub const fn new() -> Self {
        Self {
            phase: Phase::Pristine,
            confirmed: None,
        }
    }

    /// Records a submit attempt: the phase becomes `Attempted` either way,
    /// and the confirmed value is replaced by the outcome
    pub fn record(&mut self, outcome: Result<CivilDate, ErrorKind>) {
        self.phase = Phase::Attempted;
        self.confirmed = outcome.ok();
    }

    /// Back to a fresh instance
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub const fn confirmed(&self) -> Option<CivilDate> {
        self.confirmed
    }
}

/// Combines month, day and year entry values into an ISO `YYYY-MM-DD`
/// string, or an empty string while any of the three is still empty.
///
/// The month is taken as given (month selectors submit two-digit codes
/// already); day and year are free-form numeric text, zero-padded here to 2
/// and 4 digits. No bounds checking happens at this stage; validation
/// catches nonsense when it parses the combined string.
pub fn combine(month: &str, day: &str, year: &str) -> String {
    if month.is_empty() || day.is_empty() || year.is_empty() {
        return String::new();
    }
    format!("{year:0>4}-{month}-{day:0>2}")
}

/// Date-of-birth entry through a single native date control.
///
/// Owns its raw value and submission state; every check recomputes from the
/// current value, so callers can query after any keystroke.
#[derive(Debug, Clone, Default)]
pub struct DateField {
    value: String,
    submission: Submission,
}

impl DateField {
    /// Hint shown when no error is visible. The single-control pattern
    /// needs none; its picker widget explains the format itself.
    pub const HINT: &'static str = "";

    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the raw value, as on each change event. Does not touch the
    /// submission state.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Current validation outcome, visible or not
    pub fn error(&self, today: TodayRef) -> Option<ErrorKind> {
        validate(&self.value, today).err()
    }

    /// The validation outcome the user should see: errors are suppressed
    /// until the first submit attempt
    pub fn visible_error(&self, today: TodayRef) -> Option<ErrorKind> {
        match self.submission.phase() {
            Phase::Attempted => self.error(today),
            Phase::Pristine => None,
        }
    }

    /// The below-field message in its current tone
    pub fn message(&self, today: TodayRef) -> FieldMessage {
        self.visible_error(today)
            .map_or(FieldMessage::Hint(Self::HINT), FieldMessage::Error)
    }

    /// A submit attempt against the current value
    pub fn submit(&mut self, today: TodayRef) {
        self.submission.record(validate(&self.value, today));
    }

    /// Whether the reset control should be offered at all
    pub fn can_reset(&self) -> bool {
        !self.value.is_empty()
    }

    /// Clears the raw value and all submission state
    pub fn reset(&mut self) {
        self.value.clear();
        self.submission.reset();
    }

    pub const fn phase(&self) -> Phase {
        self.submission.phase()
    }

    pub const fn confirmed(&self) -> Option<CivilDate> {
        self.submission.confirmed()
    }

    /// The confirmation line for the last accepted value, if any
    pub fn confirmation(&self, style: DateStyle) -> Option<String> {
        self.confirmed().map(|date| date.format(style))
    }
}

/// Date-of-birth entry through three separate controls: a closed month
/// selector plus free-form day and year text.
///
/// Structurally parallel to [`DateField`]; the only difference is that the
/// value under validation is the combined string, empty until all three
/// parts are filled in.
#[derive(Debug, Clone, Default)]
pub struct SegmentedDateField {
    month: Option<Month>,
    day: String,
    year: String,
    submission: Submission,
}

impl SegmentedDateField {
    /// Hint shown when no error is visible
    pub const HINT: &'static str = "For example: January 1, 1990";

    pub fn new() -> Self {
        Self::default()
    }

    /// Selects or clears the month
    pub fn set_month(&mut self, month: Option<Month>) {
        self.month = month;
    }

    /// Replaces the day entry text
    pub fn set_day(&mut self, day: impl Into<String>) {
        self.day = day.into();
    }

    /// Replaces the year entry text
    pub fn set_year(&mut self, year: impl Into<String>) {
        self.year = year.into();
    }

    pub const fn month(&self) -> Option<Month> {
        self.month
    }

    pub fn day(&self) -> &str {
        &self.day
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    /// The combined ISO value, empty until month, day and year are all
    /// non-empty
    pub fn combined(&self) -> String {
        let month = self.month.map_or("", Month::code);
        combine(month, &self.day, &self.year)
    }

    /// Current validation outcome against the combined value
    pub fn error(&self, today: TodayRef) -> Option<ErrorKind> {
        validate(&self.combined(), today).err()
    }

    /// The validation outcome the user should see: errors are suppressed
    /// until the first submit attempt
    pub fn visible_error(&self, today: TodayRef) -> Option<ErrorKind> {
        match self.submission.phase() {
            Phase::Attempted => self.error(today),
            Phase::Pristine => None,
        }
    }

    /// The below-field message in its current tone
    pub fn message(&self, today: TodayRef) -> FieldMessage {
        self.visible_error(today)
            .map_or(FieldMessage::Hint(Self::HINT), FieldMessage::Error)
    }

    /// A submit attempt against the combined value
    pub fn submit(&mut self, today: TodayRef) {
        self.submission.record(validate(&self.combined(), today));
    }

    /// Whether the reset control should be offered at all
    pub fn can_reset(&self) -> bool {
        self.month.is_some() || !self.day.is_empty() || !self.year.is_empty()
    }

    /// Clears all three entry values and the submission state
    pub fn reset(&mut self) {
        self.month = None;
        self.day.clear();
        self.year.clear();
        self.submission.reset();
    }

    pub const fn phase(&self) -> Phase {
        self.submission.phase()
    }

    pub const fn confirmed(&self) -> Option<CivilDate> {
        self.submission.confirmed()
    }

    /// The confirmation line for the last accepted value, if any
    pub fn confirmation(&self, style: DateStyle) -> Option<String> {
        self.confirmed().map(|date| date.format(style))
    }
}
