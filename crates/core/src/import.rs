//! JSON-lines batch input format.
//!
//! Each line is one object keyed by the source dataset's column titles:
//! `"Index Number"`, `"Name"`, `"Z-Score"`, `"District Rank"`, `"Island Rank"`,
//! `"NIC Number"` and `"Subjects"`.

use serde::Deserialize;
use serde_json::Value;

use crate::{NOT_APPLICABLE, NewStudent, RowImportError, Subjects};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportLine {
    #[serde(rename = "Index Number", default)]
    pub index_number: Option<Value>,
    #[serde(rename = "Name", default)]
    pub name: Option<Value>,
    #[serde(rename = "Z-Score", default)]
    pub z_score: Option<Value>,
    #[serde(rename = "District Rank", default)]
    pub district_rank: Option<Value>,
    #[serde(rename = "Island Rank", default)]
    pub island_rank: Option<Value>,
    #[serde(rename = "NIC Number", default)]
    pub nic_number: Option<Value>,
    #[serde(rename = "Subjects", default)]
    pub subjects: Option<Value>,
}

impl ImportLine {
    pub fn parse(line: &str) -> Result<Self, RowImportError> {
        Ok(serde_json::from_str(line)?)
    }

    /// Normalize into an insert record.
    ///
    /// Absent, null or empty optional fields become `"-"`, absent subjects
    /// become an empty map. Index number and name are required.
    pub fn into_new_student(self) -> Result<NewStudent, RowImportError> {
        Ok(NewStudent {
            index_number: required("Index Number", self.index_number)?,
            name: required("Name", self.name)?,
            z_score: or_sentinel("Z-Score", self.z_score)?,
            district_rank: or_sentinel("District Rank", self.district_rank)?,
            island_rank: or_sentinel("Island Rank", self.island_rank)?,
            nic_number: or_sentinel("NIC Number", self.nic_number)?,
            subjects: subjects(self.subjects)?,
        })
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn text(field: &'static str, value: Option<Value>) -> Result<Option<String>, RowImportError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(RowImportError::UnsupportedValue { field, kind: kind_of(&other) }),
    }
}

fn required(field: &'static str, value: Option<Value>) -> Result<String, RowImportError> {
    text(field, value)?
        .filter(|s| !s.trim().is_empty())
        .ok_or(RowImportError::MissingField(field))
}

fn or_sentinel(field: &'static str, value: Option<Value>) -> Result<String, RowImportError> {
    Ok(text(field, value)?.filter(|s| !s.is_empty()).unwrap_or_else(|| NOT_APPLICABLE.to_owned()))
}

fn subjects(value: Option<Value>) -> Result<Subjects, RowImportError> {
    match value {
        None | Some(Value::Null) => Ok(Subjects::new()),
        Some(Value::Object(map)) => {
            let mut subjects = Subjects::new();
            for (subject, grade) in map {
                if let Some(grade) = text("Subjects", Some(grade))? {
                    subjects.insert(subject, grade);
                }
            }
            Ok(subjects)
        },
        Some(other) => {
            Err(RowImportError::UnsupportedValue { field: "Subjects", kind: kind_of(&other) })
        },
    }
}

fn sample(
    index_number: &str,
    name: &str,
    z_score: &str,
    district_rank: &str,
    island_rank: &str,
    nic_number: &str,
    subjects: &[(&str, &str)],
) -> NewStudent {
    NewStudent {
        index_number: index_number.to_owned(),
        name: name.to_owned(),
        z_score: z_score.to_owned(),
        district_rank: district_rank.to_owned(),
        island_rank: island_rank.to_owned(),
        nic_number: nic_number.to_owned(),
        subjects: subjects.iter().map(|(s, g)| ((*s).to_owned(), (*g).to_owned())).collect(),
    }
}

/// Built-in demo records loaded by `seed-sample`.
#[must_use]
pub fn sample_students() -> Vec<NewStudent> {
    const COMMERCE: [&str; 4] = ["ECONOMICS", "BUSINESS STUDIES", "ACCOUNTING", "GENERAL ENGLISH"];
    const ARTS: [&str; 4] = ["GEOGRAPHY", "COMMUNI. & MEDIA STUDIES", "SINHALA", "GENERAL ENGLISH"];
    let graded = |names: [&'static str; 4], grades: [&'static str; 4]| {
        names.into_iter().zip(grades).collect::<Vec<_>>()
    };

    vec![
        sample(
            "1000012",
            "MOHOMED RISHVAN FATHIMA RUMANA",
            "1.0128",
            "1968",
            "10177",
            "200564002042",
            &graded(COMMERCE, ["B", "C", "A", "A"]),
        ),
        sample(
            "1000020",
            "MOHOMED HUSSAIN FATHIMA HAMRA",
            "0.4756",
            "3428",
            "19336",
            "200567501829",
            &graded(COMMERCE, ["B", "C", "C", "C"]),
        ),
        sample(
            "1000039",
            "MOHAMED FAIROOZ ZAINAB",
            "-0.4218",
            "6045",
            "36073",
            "200572400453",
            &graded(COMMERCE, ["S", "S", "S", "C"]),
        ),
        sample(
            "1000047",
            "UDAYACHANDRAN SHIVONI",
            NOT_APPLICABLE,
            NOT_APPLICABLE,
            NOT_APPLICABLE,
            "200575602841",
            &graded(COMMERCE, ["F", "F", "F", "S"]),
        ),
        sample(
            "1000055",
            "MOHOMMED ISMAIL FATHIMA SUMAIYA",
            "0.5801",
            "1610",
            "27233",
            "200577400456",
            &graded(ARTS, ["C", "C", "B", "S"]),
        ),
        sample(
            "1000101",
            "MANOKARAN LALANI",
            "-0.6127",
            NOT_APPLICABLE,
            NOT_APPLICABLE,
            "200568400317",
            &graded(ARTS, ["S", "S", "F", "F"]),
        ),
        sample(
            "1000098",
            "ALAWATHUGE PABODHI BUDDHINI KARUNARATHNA",
            "0.1837",
            "2403",
            "39920",
            "200572203753",
            &graded(ARTS, ["C", "S", "C", "S"]),
        ),
    ]
}
