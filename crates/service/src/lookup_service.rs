use std::sync::Arc;

use exam_results_core::{SearchPhrase, SearchSuggestion, StudentRecord};
use exam_results_storage::StudentRepository;

use crate::{SearchRequest, ServiceError};

/// Read-only search and lookup over student records.
#[derive(Clone)]
pub struct LookupService {
    students: Arc<dyn StudentRepository>,
}

impl LookupService {
    #[must_use]
    pub fn new(students: Arc<dyn StudentRepository>) -> Self {
        Self { students }
    }

    /// Validate raw parameters, then search.
    pub async fn search(
        &self,
        q: Option<&str>,
        limit: Option<&str>,
        expanded: bool,
    ) -> Result<Vec<SearchSuggestion>, ServiceError> {
        let request = SearchRequest::parse(q, limit, expanded)?;
        self.search_request(&request).await
    }

    pub async fn search_request(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<SearchSuggestion>, ServiceError> {
        self.search_by_name(&request.phrase, request.limit).await
    }

    pub async fn search_by_name(
        &self,
        phrase: &SearchPhrase,
        limit: usize,
    ) -> Result<Vec<SearchSuggestion>, ServiceError> {
        let results = self.students.search_students_by_name(phrase, limit).await?;
        tracing::debug!(phrase = %phrase, limit, hits = results.len(), "student search");
        Ok(results)
    }

    /// Exact-match lookup. An unknown or empty index number is `NotFound`.
    pub async fn get_by_index_number(
        &self,
        index_number: &str,
    ) -> Result<StudentRecord, ServiceError> {
        if index_number.is_empty() {
            return Err(ServiceError::NotFound(String::new()));
        }
        self.students
            .get_student_by_index(index_number)
            .await?
            .ok_or_else(|| ServiceError::NotFound(index_number.to_owned()))
    }

    pub async fn count(&self) -> Result<u64, ServiceError> {
        Ok(self.students.count_students().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingRepository, MemoryRepository, student};

    fn service_with(records: &[(&str, &str)]) -> LookupService {
        let repo = MemoryRepository::default();
        for (index, name) in records {
            repo.insert(student(index, name));
        }
        LookupService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_search_case_insensitive_multi_token() {
        let service = service_with(&[("1", "John Smith"), ("2", "Jane Doe")]);
        for q in ["john", "SMITH", "john smith", "smith JOHN"] {
            let results = service.search(Some(q), None, false).await.unwrap();
            assert_eq!(results.len(), 1, "query {q:?}");
            assert_eq!(results[0].index_number, "1");
        }
        assert!(service.search(Some("john doe"), None, false).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_no_match_is_empty_not_error() {
        let service = service_with(&[("1", "John Smith")]);
        assert!(service.search(Some("zzzznomatch"), None, false).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_validation_errors() {
        let service = service_with(&[]);
        for q in [None, Some(""), Some(" ")] {
            let err = service.search(q, None, false).await.unwrap_err();
            assert!(err.is_validation(), "q {q:?} gave {err:?}");
        }
        let long = "x".repeat(101);
        assert!(service.search(Some(&long), None, false).await.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn test_limit_and_expanded_mode() {
        let names: Vec<_> = (0..30).map(|i| (i.to_string(), format!("STUDENT A{i}"))).collect();
        let records: Vec<_> = names.iter().map(|(i, n)| (i.as_str(), n.as_str())).collect();
        let service = service_with(&records);

        assert_eq!(service.search(Some("a"), Some("3"), false).await.unwrap().len(), 3);
        assert_eq!(service.search(Some("a"), None, false).await.unwrap().len(), 20);
        assert_eq!(service.search(Some("a"), None, true).await.unwrap().len(), 30);
    }

    #[tokio::test]
    async fn test_get_by_index_number() {
        let service = service_with(&[("1000012", "MOHOMED RISHVAN FATHIMA RUMANA")]);
        let record = service.get_by_index_number("1000012").await.unwrap();
        assert_eq!(record.index_number, "1000012");

        assert!(service.get_by_index_number("1000013").await.unwrap_err().is_not_found());
        assert!(service.get_by_index_number("").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_backend_failure_is_storage_error() {
        let service = LookupService::new(Arc::new(FailingRepository));
        let err = service.search(Some("john"), None, false).await.unwrap_err();
        assert!(matches!(err, ServiceError::Storage(_)));
        let err = service.get_by_index_number("1").await.unwrap_err();
        assert!(matches!(err, ServiceError::Storage(_)));
    }
}
