//! JSON-lines importer.
//!
//! Every non-blank line is one student record. Malformed lines and failed
//! writes are logged and counted; they never abort the run. Only a read
//! failure on the input itself does.

use std::path::Path;
use std::sync::Arc;

use exam_results_core::{
    DEFAULT_IMPORT_PROGRESS_EVERY, ImportLine, RowImportError, sample_students,
};
use exam_results_storage::StudentRepository;
use tokio::io::{AsyncBufRead, AsyncBufReadExt as _, BufReader};

use crate::ServiceError;

/// Outcome of one import run. Blank lines are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub total: u64,
    pub imported: u64,
    pub failed: u64,
}

pub struct BatchLoader {
    students: Arc<dyn StudentRepository>,
    progress_every: u64,
}

impl BatchLoader {
    #[must_use]
    pub fn new(students: Arc<dyn StudentRepository>) -> Self {
        Self { students, progress_every: DEFAULT_IMPORT_PROGRESS_EVERY }
    }

    /// Log progress every `n` processed lines. Zero disables progress logs.
    #[must_use]
    pub fn with_progress_every(mut self, n: u64) -> Self {
        self.progress_every = n;
        self
    }

    pub async fn load_file(&self, path: &Path) -> Result<ImportReport, ServiceError> {
        let file = tokio::fs::File::open(path).await?;
        tracing::info!(path = %path.display(), "importing student records");
        self.load(BufReader::new(file)).await
    }

    pub async fn load<R>(&self, reader: R) -> Result<ImportReport, ServiceError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut report = ImportReport::default();
        let mut lines = reader.split(b'\n');
        let mut line_no: u64 = 0;

        while let Some(raw) = lines.next_segment().await? {
            line_no += 1;
            let raw = raw.strip_suffix(b"\r").unwrap_or(&raw);
            if raw.trim_ascii().is_empty() {
                continue;
            }
            report.total += 1;

            if self.import_line(line_no, raw).await {
                report.imported += 1;
            } else {
                report.failed += 1;
            }

            if self.progress_every > 0 && report.total % self.progress_every == 0 {
                tracing::info!(
                    processed = report.total,
                    imported = report.imported,
                    failed = report.failed,
                    "import progress"
                );
            }
        }

        tracing::info!(
            total = report.total,
            imported = report.imported,
            failed = report.failed,
            "import finished"
        );
        Ok(report)
    }

    /// Parse and store one line. Failures are logged and reported as `false`.
    async fn import_line(&self, line_no: u64, raw: &[u8]) -> bool {
        let parsed = String::from_utf8(raw.to_vec())
            .map_err(RowImportError::from)
            .and_then(|line| ImportLine::parse(&line))
            .and_then(ImportLine::into_new_student);
        let student = match parsed {
            Ok(student) => student,
            Err(e) => {
                tracing::warn!(line = line_no, error = %e, "skipping malformed import line");
                return false;
            },
        };

        match self.students.upsert_student(&student).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(
                    line = line_no,
                    index_number = %student.index_number,
                    error = %e,
                    "failed to store import line"
                );
                false
            },
        }
    }

    /// Upsert the built-in sample records in one transaction.
    pub async fn seed_sample(&self) -> Result<usize, ServiceError> {
        let written = self.students.upsert_students(&sample_students()).await?;
        tracing::info!(written, "sample records seeded");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingRepository, MemoryRepository, sqlite_storage};
    use exam_results_core::{SearchPhrase, sample_students};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing::field::{Field, Visit};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt as _};
    use tracing_subscriber::registry;

    const RISHVAN: &str = r#"{"Index Number":"1000012","Name":"MOHOMED RISHVAN FATHIMA RUMANA","Z-Score":"1.0128","District Rank":"1968","Island Rank":"10177","NIC Number":"200564002042","Subjects":{"ECONOMICS":"B","BUSINESS STUDIES":"C","ACCOUNTING":"S"}}"#;

    #[tokio::test]
    async fn test_load_counts_and_skips_blank_lines() {
        let repo = Arc::new(MemoryRepository::default());
        let loader = BatchLoader::new(repo.clone());
        let input = format!(
            "{RISHVAN}\n\n   \n{}\nnot json\n{}\n",
            r#"{"Index Number":1000020,"Name":"AHAMED LEBBE","Z-Score":null}"#,
            r#"{"Name":"NO INDEX"}"#,
        );

        let report = loader.load(input.as_bytes()).await.unwrap();
        assert_eq!(report, ImportReport { total: 4, imported: 2, failed: 2 });

        let lebbe = repo.get("1000020").unwrap();
        assert_eq!(lebbe.z_score, "-");
        assert_eq!(lebbe.district_rank, "-");
        assert!(lebbe.subjects.is_empty());
    }

    #[tokio::test]
    async fn test_reimport_is_idempotent_with_latest_values() {
        let repo = Arc::new(MemoryRepository::default());
        let loader = BatchLoader::new(repo.clone());
        let updated = RISHVAN.replace("\"ECONOMICS\":\"B\"", "\"ECONOMICS\":\"A\"");
        let input = format!("{RISHVAN}\n{updated}\n");

        let report = loader.load(input.as_bytes()).await.unwrap();
        assert_eq!(report.imported, 2);
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.get("1000012").unwrap().subjects["ECONOMICS"], "A");
    }

    #[tokio::test]
    async fn test_store_failures_are_counted_not_fatal() {
        let loader = BatchLoader::new(Arc::new(FailingRepository));
        let input = format!("{RISHVAN}\n{RISHVAN}\n");
        let report = loader.load(input.as_bytes()).await.unwrap();
        assert_eq!(report, ImportReport { total: 2, imported: 0, failed: 2 });
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_is_counted_and_skipped() {
        let repo = Arc::new(MemoryRepository::default());
        let loader = BatchLoader::new(repo.clone());
        let mut input = br#"{"Index Number":"1","Name":"BAD "#.to_vec();
        input.extend_from_slice(b"\xff NAME\"}\n");
        input.extend_from_slice(br#"{"Index Number":"2","Name":"GOOD NAME"}"#);
        input.extend_from_slice(b"\r\n");

        let report = loader.load(input.as_slice()).await.unwrap();
        assert_eq!(report, ImportReport { total: 2, imported: 1, failed: 1 });
        assert!(repo.get("1").is_none());
        assert_eq!(repo.get("2").unwrap().name, "GOOD NAME");
    }

    #[derive(Clone, Default)]
    struct ProgressCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for ProgressCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            struct IsProgress(bool);
            impl Visit for IsProgress {
                fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
                    if field.name() == "message" && format!("{value:?}") == "import progress" {
                        self.0 = true;
                    }
                }
            }
            let mut visitor = IsProgress(false);
            event.record(&mut visitor);
            if visitor.0 {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[tokio::test]
    async fn test_progress_is_logged_on_failed_lines_too() {
        let counter = ProgressCounter::default();
        let _guard = tracing::subscriber::set_default(registry().with(counter.clone()));

        let loader = BatchLoader::new(Arc::new(MemoryRepository::default())).with_progress_every(2);
        let input = format!("{RISHVAN}\nnot json\n{RISHVAN}\n{{\"Name\":\"NO INDEX\"}}\n");
        let report = loader.load(input.as_bytes()).await.unwrap();

        assert_eq!(report, ImportReport { total: 4, imported: 2, failed: 2 });
        assert_eq!(counter.0.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let loader = BatchLoader::new(Arc::new(MemoryRepository::default()));
        let err = loader.load_file(Path::new("/nonexistent/students.jsonl")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Io(_)));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_import_then_search_end_to_end() {
        let (storage, dir) = sqlite_storage();
        let storage = Arc::new(storage);
        let path = dir.path().join("students.jsonl");
        tokio::fs::write(&path, format!("{RISHVAN}\n")).await.unwrap();

        let report = BatchLoader::new(storage.clone()).load_file(&path).await.unwrap();
        assert_eq!(report.imported, 1);

        let phrase = SearchPhrase::parse("RISHVAN").unwrap();
        let hits = storage.search_students_by_name(&phrase, 20).unwrap();
        assert_eq!(hits[0].index_number, "1000012");
        let record = storage.get_student_by_index("1000012").unwrap().unwrap();
        assert_eq!(record.subjects["ECONOMICS"], "B");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_seed_sample_is_repeatable() {
        let (storage, _dir) = sqlite_storage();
        let storage = Arc::new(storage);
        let loader = BatchLoader::new(storage.clone());

        let expected = sample_students().len();
        assert_eq!(loader.seed_sample().await.unwrap(), expected);
        assert_eq!(loader.seed_sample().await.unwrap(), expected);
        assert_eq!(storage.count_students().unwrap(), expected as u64);
    }
}
