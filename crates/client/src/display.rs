use exam_results_core::{Grade, StudentRecord};

/// Avatar initials: first letters of the first and last words, uppercased.
#[must_use]
pub fn initials(name: &str) -> String {
    let mut words = name.split_whitespace();
    let Some(first) = words.next() else {
        return String::new();
    };
    let first = first.chars().next();
    let last = words.last().and_then(|w| w.chars().next());
    first.into_iter().chain(last).flat_map(char::to_uppercase).collect()
}

/// `(subject, grade code, classification)` in subject-name order.
#[must_use]
pub fn subject_rows(record: &StudentRecord) -> Vec<(&str, &str, Grade)> {
    record
        .subjects
        .iter()
        .map(|(subject, grade)| (subject.as_str(), grade.as_str(), Grade::from_code(grade)))
        .collect()
}
