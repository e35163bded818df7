//! Migration v1: students table

pub(super) const SQL: &str = "
CREATE TABLE IF NOT EXISTS students (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    index_number TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    z_score TEXT NOT NULL,
    district_rank TEXT NOT NULL,
    island_rank TEXT NOT NULL,
    nic_number TEXT NOT NULL,
    subjects TEXT NOT NULL DEFAULT '{}'
);

CREATE INDEX IF NOT EXISTS idx_students_name ON students(name);
";
