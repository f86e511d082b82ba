use stockpile_core::service::grading_service::{read_students, write_report};
use stockpile_core::{EntityRepository, GradeError, Grade};
use chrono::{NaiveDate, NaiveDateTime};
use std::fs;

#[test]
fn read_students_parses_rows_and_skips_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    fs::write(&input, "1, Alice Smith, 84\n\n2, Bob Jones, 67\n3,Carol White,45\n").unwrap();

    let students = read_students(&input).unwrap();

    assert_eq!(students.len(), 3);
    assert_eq!(students.get_by_id(1).unwrap().grade(), Grade::A);
    assert_eq!(students.get_by_id(2).unwrap().grade(), Grade::C);
    assert_eq!(students.get_by_id(3).unwrap().grade(), Grade::F);
}

#[test]
fn malformed_row_reports_its_line_number() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    fs::write(&input, "1, Alice Smith, 84\n\n2, Bob Jones\n").unwrap();

    let err = read_students(&input).unwrap_err();
    assert!(matches!(err, GradeError::MissingField { line: 3, .. }));
}

#[test]
fn invalid_score_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    fs::write(&input, "1, Alice Smith, eighty\n").unwrap();

    let err = read_students(&input).unwrap_err();
    assert!(matches!(err, GradeError::InvalidScoreFormat { line: 1, .. }));
}

#[test]
fn duplicate_student_id_is_reported_as_repo_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    fs::write(&input, "1, Alice Smith, 84\n1, Alice Again, 90\n").unwrap();

    let err = read_students(&input).unwrap_err();
    assert!(matches!(err, GradeError::Repo { line: 2, .. }));
}

#[test]
fn missing_input_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = read_students(dir.path().join("nope.txt")).unwrap_err();
    assert!(matches!(err, GradeError::Io { .. }));
}

fn generated_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 10)
        .unwrap()
        .and_hms_opt(14, 5, 0)
        .unwrap()
}

#[test]
fn report_lists_students_distribution_and_average() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let report = dir.path().join("report.txt");
    fs::write(&input, "1, Alice Smith, 84\n2, Bob Jones, 72\n3, Carol White, 45\n").unwrap();

    let students = read_students(&input).unwrap().get_all();
    assert_eq!(write_report(&students, &report, generated_at()).unwrap(), 3);

    let text = fs::read_to_string(&report).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "=== STUDENT GRADE REPORT ===");
    assert_eq!(lines[1], "Generated on: 2024-06-10 14:05:00");
    assert_eq!(lines[2], "Total Students: 3");
    assert!(lines.contains(&"Alice Smith (ID: 1): Score = 84, Grade = A"));
    assert!(lines.contains(&"Bob Jones (ID: 2): Score = 72, Grade = B"));

    let distribution_start = lines
        .iter()
        .position(|line| *line == "GRADE DISTRIBUTION:")
        .unwrap();
    assert_eq!(
        &lines[distribution_start + 2..distribution_start + 7],
        &[
            "Grade A: 1 students",
            "Grade B: 1 students",
            "Grade C: 0 students",
            "Grade D: 0 students",
            "Grade F: 1 students",
        ]
    );
    assert_eq!(lines.last().copied(), Some("Average Score: 67.00"));
}

#[test]
fn empty_report_has_zero_counts_and_zero_average() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("report.txt");

    assert_eq!(write_report(&[], &report, generated_at()).unwrap(), 0);

    let text = fs::read_to_string(&report).unwrap();
    assert!(text.contains("Total Students: 0\n"));
    for grade in ["A", "B", "C", "D", "F"] {
        assert!(text.contains(&format!("Grade {grade}: 0 students\n")));
    }
    assert!(text.ends_with("Average Score: 0.00\n"));
}
