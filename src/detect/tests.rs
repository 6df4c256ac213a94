use super::*;
use crate::classify::BlankLineClassifier;
use std::cell::RefCell;

fn indented(widths: &[usize]) -> Vec<String> {
    widths
        .iter()
        .map(|&w| format!("{}x = 1", " ".repeat(w)))
        .collect()
}

fn detect(lines: &[String]) -> Inference {
    infer_detailed(lines, &BlankLineClassifier)
}

#[test]
fn test_empty_document_is_unknown() {
    let lines: Vec<String> = Vec::new();
    assert_eq!(infer(&lines, &BlankLineClassifier), Verdict::Unknown);
}

#[test]
fn test_no_code_lines_is_unknown() {
    let lines = vec!["", "   ", "\t", "", "    "];
    let result = infer_detailed(&lines, &BlankLineClassifier);
    assert_eq!(result.verdict, Verdict::Unknown);
    assert_eq!(result.lines_scanned, 0);
    assert!(result.histogram.is_empty());
}

#[test]
fn test_rejecting_classifier_is_unknown() {
    let lines = indented(&[0, 4, 8, 4, 0]);
    let never = |_: usize, _: &str| false;
    assert_eq!(infer(&lines, &never), Verdict::Unknown);
}

#[test]
fn test_steady_four_space_nesting() {
    let result = detect(&indented(&[0, 4, 8, 4, 0]));
    assert_eq!(result.verdict, Verdict::Spaces(4));
    assert_eq!(result.histogram.buckets(), &[Bucket { step: 4, count: 4 }]);
}

#[test]
fn test_strict_majority_wins() {
    let result = detect(&indented(&[0, 2, 0, 2, 0, 3, 0, 3]));
    assert_eq!(result.verdict, Verdict::Spaces(2));
    assert_eq!(result.histogram.count(2), 4);
    assert_eq!(result.histogram.count(3), 3);
}

#[test]
fn test_tie_goes_to_first_bucket_to_reach_count() {
    // diffs 2, 2, 4, 4
    let result = detect(&indented(&[0, 2, 0, 4, 0]));
    assert_eq!(result.histogram.count(2), 2);
    assert_eq!(result.histogram.count(4), 2);
    assert_eq!(result.verdict, Verdict::Spaces(2));
}

#[test]
fn test_tie_does_not_follow_insertion_or_numeric_order() {
    // 2 is created first, but 4 reaches two votes first (via the repeated line)
    let result = detect(&indented(&[0, 2, 6, 6, 4]));
    assert_eq!(result.histogram.count(2), 2);
    assert_eq!(result.histogram.count(4), 2);
    assert_eq!(result.histogram.buckets()[0].step, 2);
    assert_eq!(result.verdict, Verdict::Spaces(4));
}

#[test]
fn test_dedent_counts_like_indent() {
    let result = detect(&indented(&[0, 8, 0]));
    assert_eq!(result.histogram.count(8), 2);
    assert_eq!(result.verdict, Verdict::Spaces(8));
}

#[test]
fn test_flat_file_never_records_zero() {
    let result = detect(&indented(&[0, 0, 0, 0]));
    assert_eq!(result.verdict, Verdict::Unknown);
    assert_eq!(result.histogram.count(0), 0);
    assert!(result.histogram.is_empty());
    assert_eq!(result.lines_scanned, 4);
}

#[test]
fn test_same_indent_reinforces_last_step() {
    let result = detect(&indented(&[0, 4, 4, 4]));
    assert_eq!(result.histogram.count(4), 3);
}

#[test]
fn test_width_is_not_validated() {
    assert_eq!(detect(&indented(&[0, 5, 0])).verdict, Verdict::Spaces(5));
}

#[test]
fn test_tab_line_short_circuits() {
    let mut lines = indented(&[0, 4, 8, 4, 0, 4, 8]);
    lines.push("\tx = 1".to_string());
    lines.extend(indented(&[0, 2, 0, 2, 0, 2]));

    let result = detect(&lines);
    assert_eq!(result.verdict, Verdict::Tabs);
    assert_eq!(result.lines_scanned, 8);
}

#[test]
fn test_tab_on_first_code_line_wins() {
    let mut lines = vec!["\tfoo()".to_string()];
    lines.extend(indented(&[0, 4, 0, 4, 0, 4]));
    assert_eq!(infer(&lines, &BlankLineClassifier), Verdict::Tabs);
}

#[test]
fn test_tab_in_non_code_line_is_ignored() {
    let lines = vec!["x", "\t// comment", "    y", "x"];
    let not_comment = |_: usize, text: &str| !text.trim_start().starts_with("//");
    assert_eq!(infer(&lines, &not_comment), Verdict::Spaces(4));
}

#[test]
fn test_space_then_tab_measures_spaces() {
    let lines = vec!["x", "  \ty", "x"];
    assert_eq!(infer(&lines, &BlankLineClassifier), Verdict::Spaces(2));
}

#[test]
fn test_blank_lines_do_not_touch_state() {
    let lines = vec!["a", "", "    b", "   ", "        c"];
    let result = infer_detailed(&lines, &BlankLineClassifier);
    assert_eq!(result.lines_scanned, 3);
    assert_eq!(result.histogram.buckets(), &[Bucket { step: 4, count: 2 }]);
}

#[test]
fn test_lines_past_sample_are_ignored() {
    let widths: Vec<usize> = (0..SAMPLE_LINES).map(|i| (i % 2) * 2).collect();
    let prefix = indented(&widths);
    let before = detect(&prefix);

    let mut extended = prefix.clone();
    extended.push("\tTAB".to_string());
    extended.extend(indented(&[0, 4, 0, 4, 0, 4, 0, 4]));
    let after = detect(&extended);

    assert_eq!(before.verdict, Verdict::Spaces(2));
    assert_eq!(after, before);
}

#[test]
fn test_classifier_sees_document_rows() {
    let lines = vec!["a", "", "  b", "", "", "c"];
    let seen = RefCell::new(Vec::new());
    let recording = |row: usize, text: &str| {
        seen.borrow_mut().push(row);
        !text.trim().is_empty()
    };
    infer(&lines, &recording);
    assert_eq!(*seen.borrow(), vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_classifier_called_at_most_sample_times() {
    let lines = vec!["x"; SAMPLE_LINES * 3];
    let calls = RefCell::new(0usize);
    let counting = |_: usize, _: &str| {
        *calls.borrow_mut() += 1;
        true
    };
    infer(&lines, &counting);
    assert_eq!(*calls.borrow(), SAMPLE_LINES);
}

#[test]
fn test_infer_is_idempotent() {
    let lines = indented(&[0, 3, 6, 3, 0, 3, 3, 0]);
    let first = detect(&lines);
    let second = detect(&lines);
    assert_eq!(first, second);
    assert_eq!(first.verdict, Verdict::Spaces(3));
}

#[test]
fn test_measure() {
    assert_eq!(measure(""), IndentMeasurement::Spaces(0));
    assert_eq!(measure("foo"), IndentMeasurement::Spaces(0));
    assert_eq!(measure("   foo"), IndentMeasurement::Spaces(3));
    assert_eq!(measure("\t\tfoo"), IndentMeasurement::Tab);
    assert_eq!(measure("  \tfoo"), IndentMeasurement::Spaces(2));
}

#[test]
fn test_histogram_ignores_zero() {
    let mut histogram = DiffHistogram::new();
    histogram.record(0);
    assert!(histogram.is_empty());
    assert_eq!(histogram.winner(), None);
}

#[test]
fn test_verdict_display() {
    assert_eq!(Verdict::Tabs.to_string(), "Tabs");
    assert_eq!(Verdict::Spaces(4).to_string(), "4 Spaces");
    assert_eq!(Verdict::Unknown.to_string(), "Unknown");
}

#[test]
fn test_verdict_json() {
    assert_eq!(serde_json::to_string(&Verdict::Tabs).unwrap(), "\"tabs\"");
    assert_eq!(
        serde_json::to_string(&Verdict::Spaces(2)).unwrap(),
        r#"{"spaces":2}"#
    );
    let back: Verdict = serde_json::from_str(r#"{"spaces":8}"#).unwrap();
    assert_eq!(back, Verdict::Spaces(8));
}
