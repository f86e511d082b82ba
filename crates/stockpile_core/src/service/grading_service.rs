//! Student result files: parsing, grading and report output.
//!
//! # Responsibility
//! - Parse `id, full name, score` rows into a `Student` repository.
//! - Write a graded report with grade distribution and average score.
//!
//! # Invariants
//! - Line numbers in errors are 1-based and count blank lines.
//! - The first malformed row aborts the read; no partial repository is
//!   returned.
//! - Out-of-range scores are accepted and only logged.

use crate::model::entity::EntityId;
use crate::model::student::{Grade, Student};
use crate::repo::typed_repo::{EntityRepository, InMemoryRepository, RepoError};
use chrono::NaiveDateTime;
use log::{info, warn};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

const FIELD_COUNT: usize = 3;

pub type GradeResult<T> = Result<T, GradeError>;

#[derive(Debug)]
pub enum GradeError {
    /// Row does not have exactly three non-empty fields.
    MissingField { line: usize, details: String },
    /// Id or score is not an integer.
    InvalidScoreFormat { line: usize, details: String },
    /// Input or report file could not be read or written.
    Io { path: PathBuf, source: io::Error },
    /// Rows repeat a student id.
    Repo { line: usize, source: RepoError },
}

impl Display for GradeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { line, details } => write!(f, "line {line}: {details}"),
            Self::InvalidScoreFormat { line, details } => write!(f, "line {line}: {details}"),
            Self::Io { path, source } => write!(f, "`{}`: {source}", path.display()),
            Self::Repo { line, source } => write!(f, "line {line}: {source}"),
        }
    }
}

impl Error for GradeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Repo { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Reads every student row from `path`.
///
/// # Errors
/// - `Io` when the file cannot be opened or read.
/// - `MissingField` / `InvalidScoreFormat` for the first malformed row.
/// - `Repo` when a student id repeats.
pub fn read_students(path: impl AsRef<Path>) -> GradeResult<InMemoryRepository<Student>> {
    let path = path.as_ref();
    let io_err = |source: io::Error| GradeError::Io {
        path: path.to_path_buf(),
        source,
    };

    let reader = BufReader::new(File::open(path).map_err(io_err)?);
    let mut students = InMemoryRepository::new();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(io_err)?;
        let Some(student) = parse_student_line(line_no, &line)? else {
            continue;
        };
        students
            .add(student)
            .map_err(|source| GradeError::Repo {
                line: line_no,
                source,
            })?;
    }

    info!(
        "event=grades_read module=service status=ok count={}",
        students.len()
    );
    Ok(students)
}

/// Parses one row; `Ok(None)` for blank lines.
pub fn parse_student_line(line_no: usize, line: &str) -> GradeResult<Option<Student>> {
    if line.trim().is_empty() {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != FIELD_COUNT {
        return Err(GradeError::MissingField {
            line: line_no,
            details: format!(
                "expected {FIELD_COUNT} fields (id, name, score) but found {} in `{line}`",
                fields.len()
            ),
        });
    }
    if fields.iter().any(|field| field.is_empty()) {
        return Err(GradeError::MissingField {
            line: line_no,
            details: format!("one or more fields are empty in `{line}`"),
        });
    }

    let id: EntityId = fields[0]
        .parse()
        .map_err(|_| GradeError::InvalidScoreFormat {
            line: line_no,
            details: format!("student id `{}` is not a valid integer", fields[0]),
        })?;
    let score: i32 = fields[2]
        .parse()
        .map_err(|_| GradeError::InvalidScoreFormat {
            line: line_no,
            details: format!("score `{}` is not a valid integer", fields[2]),
        })?;

    if !(0..=100).contains(&score) {
        warn!("event=grades_read module=service status=warn line={line_no} score={score} error_code=score_out_of_range");
    }

    Ok(Some(Student::new(id, fields[1], score)))
}

/// Count of students per grade; every grade A..F is present, zero included.
pub fn grade_distribution(students: &[Student]) -> BTreeMap<Grade, usize> {
    let mut distribution: BTreeMap<Grade, usize> = Grade::ALL.iter().map(|g| (*g, 0)).collect();
    for student in students {
        *distribution.entry(student.grade()).or_insert(0) += 1;
    }
    distribution
}

/// Mean score, or `0.0` for an empty list.
pub fn average_score(students: &[Student]) -> f64 {
    if students.is_empty() {
        return 0.0;
    }
    let total: i64 = students.iter().map(|s| i64::from(s.score)).sum();
    total as f64 / students.len() as f64
}

/// Renders the full report text: header, results, distribution, average.
pub fn render_report(students: &[Student], generated_at: NaiveDateTime) -> String {
    let mut out = String::new();
    out.push_str("=== STUDENT GRADE REPORT ===\n");
    out.push_str(&format!(
        "Generated on: {}\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str(&format!("Total Students: {}\n\n", students.len()));

    out.push_str("STUDENT RESULTS:\n");
    out.push_str(&"=".repeat(50));
    out.push('\n');
    for student in students {
        out.push_str(&format!("{student}\n"));
    }

    out.push_str("\nGRADE DISTRIBUTION:\n");
    out.push_str(&"=".repeat(20));
    out.push('\n');
    for (grade, count) in grade_distribution(students) {
        out.push_str(&format!("Grade {grade}: {count} students\n"));
    }

    out.push_str(&format!(
        "\nAverage Score: {:.2}\n",
        average_score(students)
    ));
    out
}

/// Writes the report for `students` to `path`; returns the student count.
pub fn write_report(
    students: &[Student],
    path: impl AsRef<Path>,
    generated_at: NaiveDateTime,
) -> GradeResult<usize> {
    let path = path.as_ref();
    let io_err = |source: io::Error| GradeError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    writer
        .write_all(render_report(students, generated_at).as_bytes())
        .map_err(io_err)?;
    writer.flush().map_err(io_err)?;

    info!(
        "event=grades_report module=service status=ok count={}",
        students.len()
    );
    Ok(students.len())
}
