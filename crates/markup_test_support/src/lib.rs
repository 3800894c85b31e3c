pub mod fixtures;

#[cfg(feature = "markup")]
pub mod runner;

/// Renders a readable report of the first differing line between two
/// snapshots, with two lines of context on each side.
pub fn diff_lines(expected: &[String], actual: &[String]) -> String {
    use std::fmt::Write;

    const MISSING: &str = "<missing>";
    let max = expected.len().max(actual.len());
    let line_at = |lines: &[String], i: usize| -> String {
        lines.get(i).cloned().unwrap_or_else(|| MISSING.to_string())
    };
    let mut out = String::new();

    let first = (0..max).find(|&i| line_at(expected, i) != line_at(actual, i));
    match first {
        Some(i) => {
            let start = i.saturating_sub(2);
            let end = (i + 3).min(max);
            let _ = writeln!(
                &mut out,
                "first mismatch at line {} (showing {}..={}):",
                i + 1,
                start + 1,
                end
            );
            for line_idx in start..end {
                let marker = if line_idx == i { ">" } else { " " };
                let _ = writeln!(
                    &mut out,
                    "{marker} {:>4}  expected: {}",
                    line_idx + 1,
                    line_at(expected, line_idx)
                );
                let _ = writeln!(
                    &mut out,
                    "{marker} {:>4}    actual: {}",
                    line_idx + 1,
                    line_at(actual, line_idx)
                );
            }
        }
        None if expected.len() != actual.len() => {
            let _ = writeln!(&mut out, "prefix matched but lengths differ");
        }
        None => {}
    }
    let _ = writeln!(
        &mut out,
        "expected {} lines, actual {} lines",
        expected.len(),
        actual.len()
    );
    out
}

/// Splits a multi-line expectation block into snapshot lines. Trailing
/// whitespace and blank lines are ignored; indentation is kept.
pub fn expectation_lines(block: &str) -> Vec<String> {
    block
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
