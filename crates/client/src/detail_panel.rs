//! Full-record panel shown after a suggestion is selected.

use exam_results_core::StudentRecord;

use crate::search_box::RequestToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView<'a> {
    Idle,
    Loading,
    Loaded(&'a StudentRecord),
    NotFound,
    Failed(&'a str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Idle,
    Loading(RequestToken),
    Loaded(StudentRecord),
    NotFound,
    Failed(String),
}

/// Outcome of a detail fetch as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailOutcome {
    Found(StudentRecord),
    Missing,
    Error(String),
}

#[derive(Debug)]
pub struct DetailPanel {
    index_number: Option<String>,
    state: State,
    next_token: u64,
}

impl Default for DetailPanel {
    fn default() -> Self {
        Self { index_number: None, state: State::Idle, next_token: 0 }
    }
}

impl DetailPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn index_number(&self) -> Option<&str> {
        self.index_number.as_deref()
    }

    /// Start loading `index_number`. Any in-flight fetch becomes stale.
    pub fn open(&mut self, index_number: &str) -> RequestToken {
        self.index_number = Some(index_number.to_owned());
        self.begin()
    }

    /// Manual retry after a failure. No automatic retries exist.
    pub fn retry(&mut self) -> Option<RequestToken> {
        if !matches!(self.state, State::Failed(_)) {
            return None;
        }
        Some(self.begin())
    }

    /// Returns `false` when `token` is stale and the outcome was dropped.
    pub fn on_loaded(&mut self, token: RequestToken, outcome: DetailOutcome) -> bool {
        if self.state != State::Loading(token) {
            return false;
        }
        self.state = match outcome {
            DetailOutcome::Found(record) => State::Loaded(record),
            DetailOutcome::Missing => State::NotFound,
            DetailOutcome::Error(message) => State::Failed(message),
        };
        true
    }

    pub fn close(&mut self) {
        self.index_number = None;
        self.state = State::Idle;
    }

    #[must_use]
    pub fn view(&self) -> DetailView<'_> {
        match &self.state {
            State::Idle => DetailView::Idle,
            State::Loading(_) => DetailView::Loading,
            State::Loaded(record) => DetailView::Loaded(record),
            State::NotFound => DetailView::NotFound,
            State::Failed(message) => DetailView::Failed(message),
        }
    }

    fn begin(&mut self) -> RequestToken {
        self.next_token += 1;
        let token = RequestToken::new(self.next_token);
        self.state = State::Loading(token);
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_results_core::{NewStudent, Subjects};

    fn record(index: &str) -> StudentRecord {
        NewStudent {
            index_number: index.to_owned(),
            name: "MOHOMED RISHVAN FATHIMA RUMANA".to_owned(),
            z_score: "1.0128".to_owned(),
            district_rank: "1968".to_owned(),
            island_rank: "10177".to_owned(),
            nic_number: "200564002042".to_owned(),
            subjects: Subjects::from([("ECONOMICS".to_owned(), "B".to_owned())]),
        }
        .into_record(1)
    }

    #[test]
    fn test_open_load_and_close() {
        let mut panel = DetailPanel::new();
        assert_eq!(panel.view(), DetailView::Idle);

        let token = panel.open("1000012");
        assert_eq!(panel.view(), DetailView::Loading);
        assert!(panel.on_loaded(token, DetailOutcome::Found(record("1000012"))));
        assert!(matches!(panel.view(), DetailView::Loaded(r) if r.subjects["ECONOMICS"] == "B"));

        panel.close();
        assert_eq!(panel.view(), DetailView::Idle);
        assert_eq!(panel.index_number(), None);
    }

    #[test]
    fn test_switching_selection_drops_late_response() {
        let mut panel = DetailPanel::new();
        let first = panel.open("1");
        let second = panel.open("2");
        assert!(!panel.on_loaded(first, DetailOutcome::Found(record("1"))));
        assert_eq!(panel.view(), DetailView::Loading);
        assert!(panel.on_loaded(second, DetailOutcome::Found(record("2"))));
        assert!(matches!(panel.view(), DetailView::Loaded(r) if r.index_number == "2"));
    }

    #[test]
    fn test_failure_then_manual_retry() {
        let mut panel = DetailPanel::new();
        assert_eq!(panel.retry(), None);

        let token = panel.open("1000012");
        panel.on_loaded(token, DetailOutcome::Error("Failed to fetch student details".to_owned()));
        assert_eq!(panel.view(), DetailView::Failed("Failed to fetch student details"));

        let retry = panel.retry().unwrap();
        assert_ne!(retry, token);
        assert_eq!(panel.index_number(), Some("1000012"));
        panel.on_loaded(retry, DetailOutcome::Missing);
        assert_eq!(panel.view(), DetailView::NotFound);
        assert_eq!(panel.retry(), None);
    }
}
