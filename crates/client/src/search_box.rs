//! Debounced search input with a keyboard-navigable suggestion list.
//!
//! The box owns no timers and performs no I/O. The host feeds it events with
//! the current [`Instant`], calls [`SearchBox::poll`] to learn when a request
//! is due, runs the returned [`SearchCommand`], and hands the outcome back
//! through [`SearchBox::on_results`] tagged with the command's token.

use std::time::{Duration, Instant};

use exam_results_core::{MIN_SUGGEST_CHARS, SEARCH_DEBOUNCE_MS, SearchSuggestion};

/// Identifies one issued request. Responses carrying any other token are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub(crate) const fn new(n: u64) -> Self {
        Self(n)
    }
}

/// A search the host should perform now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCommand {
    pub token: RequestToken,
    pub phrase: String,
    pub expanded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Enter,
}

/// What the suggestion area should show. At most one state at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchView<'a> {
    Hidden,
    Loading,
    Error(&'a str),
    Empty,
    Results { items: &'a [SearchSuggestion], highlighted: Option<usize> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Fetch {
    Idle,
    Loading(RequestToken),
    Failed(String),
    Loaded,
}

#[derive(Debug)]
pub struct SearchBox {
    phrase: String,
    expanded: bool,
    visible: bool,
    debounce: Duration,
    due_at: Option<Instant>,
    fetch: Fetch,
    suggestions: Vec<SearchSuggestion>,
    highlighted: Option<usize>,
    next_token: u64,
    last_command: Option<SearchCommand>,
}

impl Default for SearchBox {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchBox {
    #[must_use]
    pub fn new() -> Self {
        Self::with_debounce(Duration::from_millis(SEARCH_DEBOUNCE_MS))
    }

    #[must_use]
    pub fn with_debounce(debounce: Duration) -> Self {
        Self {
            phrase: String::new(),
            expanded: false,
            visible: false,
            debounce,
            due_at: None,
            fetch: Fetch::Idle,
            suggestions: Vec::new(),
            highlighted: None,
            next_token: 0,
            last_command: None,
        }
    }

    #[must_use]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    #[must_use]
    pub const fn is_expanded(&self) -> bool {
        self.expanded
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    fn long_enough(&self) -> bool {
        self.phrase.trim().chars().count() >= MIN_SUGGEST_CHARS
    }

    /// Text changed. Restarts the debounce window and leaves expanded mode.
    pub fn on_input(&mut self, text: &str, now: Instant) {
        self.phrase = text.to_owned();
        self.expanded = false;
        self.highlighted = None;
        if matches!(self.fetch, Fetch::Loading(_)) {
            self.fetch = Fetch::Idle;
        }
        if self.long_enough() {
            self.due_at = Some(now + self.debounce);
        } else {
            self.due_at = None;
            self.visible = false;
            self.fetch = Fetch::Idle;
            self.suggestions.clear();
        }
    }

    /// Issue the debounced search once its window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<SearchCommand> {
        let due_at = self.due_at?;
        if now < due_at {
            return None;
        }
        self.due_at = None;
        if !self.long_enough() {
            return None;
        }
        self.visible = true;
        Some(self.issue())
    }

    /// Explicit submit: search now in expanded mode.
    pub fn on_submit(&mut self) -> Option<SearchCommand> {
        if !self.long_enough() {
            return None;
        }
        self.due_at = None;
        self.expanded = true;
        self.visible = true;
        Some(self.issue())
    }

    pub fn on_clear(&mut self) {
        self.phrase.clear();
        self.expanded = false;
        self.visible = false;
        self.due_at = None;
        self.fetch = Fetch::Idle;
        self.suggestions.clear();
        self.highlighted = None;
    }

    /// Dismiss the list. The phrase is kept.
    pub fn on_outside_click(&mut self) {
        self.visible = false;
        self.highlighted = None;
    }

    /// Deliver the outcome of a command. Returns `false` when the token is
    /// stale and the response was dropped.
    pub fn on_results(
        &mut self,
        token: RequestToken,
        outcome: Result<Vec<SearchSuggestion>, String>,
    ) -> bool {
        if self.fetch != Fetch::Loading(token) {
            tracing::debug!(?token, "dropping stale search response");
            return false;
        }
        self.highlighted = None;
        match outcome {
            Ok(results) => {
                self.suggestions = results;
                self.fetch = Fetch::Loaded;
            },
            Err(message) => {
                self.suggestions.clear();
                self.fetch = Fetch::Failed(message);
            },
        }
        true
    }

    /// Re-run the last search after a failure.
    pub fn retry(&mut self) -> Option<SearchCommand> {
        if !matches!(self.fetch, Fetch::Failed(_)) {
            return None;
        }
        let last = self.last_command.as_ref()?;
        if last.phrase != self.phrase.trim() || last.expanded != self.expanded {
            return None;
        }
        self.visible = true;
        Some(self.issue())
    }

    /// Arrow keys move the highlight circularly; Enter selects it.
    pub fn on_key(&mut self, key: Key) -> Option<SearchSuggestion> {
        if !self.visible
            || self.due_at.is_some()
            || self.fetch != Fetch::Loaded
            || self.suggestions.is_empty()
        {
            return None;
        }
        let len = self.suggestions.len();
        match key {
            Key::Down => {
                self.highlighted = Some(self.highlighted.map_or(0, |i| (i + 1) % len));
                None
            },
            Key::Up => {
                self.highlighted = Some(self.highlighted.map_or(len - 1, |i| (i + len - 1) % len));
                None
            },
            Key::Enter => self.highlighted.and_then(|i| self.select(i)),
        }
    }

    /// Pick a suggestion: the phrase becomes its name and the list hides.
    /// The host then loads the detail record for the returned index number.
    pub fn select(&mut self, position: usize) -> Option<SearchSuggestion> {
        let chosen = self.suggestions.get(position)?.clone();
        self.phrase.clone_from(&chosen.name);
        self.visible = false;
        self.highlighted = None;
        self.due_at = None;
        Some(chosen)
    }

    /// Precedence: loading, then error, then empty, then results. A pending
    /// debounced search counts as loading.
    #[must_use]
    pub fn view(&self) -> SearchView<'_> {
        if !self.visible {
            return SearchView::Hidden;
        }
        if self.due_at.is_some() {
            return SearchView::Loading;
        }
        match &self.fetch {
            Fetch::Loading(_) => SearchView::Loading,
            Fetch::Failed(message) => SearchView::Error(message),
            Fetch::Idle => SearchView::Hidden,
            Fetch::Loaded if self.suggestions.is_empty() => SearchView::Empty,
            Fetch::Loaded => SearchView::Results {
                items: &self.suggestions,
                highlighted: self.highlighted,
            },
        }
    }

    fn issue(&mut self) -> SearchCommand {
        self.next_token += 1;
        let token = RequestToken::new(self.next_token);
        self.fetch = Fetch::Loading(token);
        self.highlighted = None;
        let command =
            SearchCommand { token, phrase: self.phrase.trim().to_owned(), expanded: self.expanded };
        self.last_command = Some(command.clone());
        command
    }
}
