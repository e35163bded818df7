use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Subject name → grade code. Keys vary per record.
pub type Subjects = BTreeMap<String, String>;

/// A stored examination result.
///
/// `z_score`, `district_rank` and `island_rank` stay textual because the
/// source data marks missing values with [`crate::NOT_APPLICABLE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: i64,
    pub index_number: String,
    pub name: String,
    pub z_score: String,
    pub district_rank: String,
    pub island_rank: String,
    pub nic_number: String,
    pub subjects: Subjects,
}

/// Insert shape of [`StudentRecord`]; the store assigns `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub index_number: String,
    pub name: String,
    pub z_score: String,
    pub district_rank: String,
    pub island_rank: String,
    pub nic_number: String,
    pub subjects: Subjects,
}

impl NewStudent {
    #[must_use]
    pub fn into_record(self, id: i64) -> StudentRecord {
        StudentRecord {
            id,
            index_number: self.index_number,
            name: self.name,
            z_score: self.z_score,
            district_rank: self.district_rank,
            island_rank: self.island_rank,
            nic_number: self.nic_number,
            subjects: self.subjects,
        }
    }
}

/// Minimal projection returned by name search.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchSuggestion {
    pub index_number: String,
    pub name: String,
}

impl From<&StudentRecord> for SearchSuggestion {
    fn from(record: &StudentRecord) -> Self {
        Self { index_number: record.index_number.clone(), name: record.name.clone() }
    }
}

/// Grade classification used when rendering subject results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grade {
    A,
    B,
    C,
    S,
    F,
    Other,
}

impl Grade {
    /// Classify a stored grade code. Unknown codes map to [`Grade::Other`].
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "A" => Self::A,
            "B" => Self::B,
            "C" => Self::C,
            "S" => Self::S,
            "F" => Self::F,
            _ => Self::Other,
        }
    }
}
