//! TOML golden fixture files.
//!
//! Each file holds a `format` header and a list of `[[case]]` tables:
//!
//! ```toml
//! format = "markup-fixtures-v1"
//!
//! [[case]]
//! name = "anchor"
//! template = '<a href="${href}">${label}</a>'
//! holes = { href = "/x", label = "go" }
//! expected = '''
//! <a href="/x">
//!   "go"
//! '''
//! ```
//!
//! `errors` lists the rendered diagnostics in the order they are recorded.

use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

pub const FIXTURE_FORMAT_V1: &str = "markup-fixtures-v1";

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FixtureFile {
    format: String,
    #[serde(default, rename = "case")]
    cases: Vec<FixtureCase>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FixtureCase {
    pub name: String,
    /// Markup with `${name}` placeholders.
    pub template: String,
    /// Values for the placeholders, by name.
    #[serde(default)]
    pub holes: BTreeMap<String, serde_json::Value>,
    pub expected: String,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub check_close_tags: bool,
    #[serde(default)]
    pub max_depth: Option<usize>,
    /// Known failure; the case must keep failing until the marker is removed.
    #[serde(default)]
    pub xfail: Option<String>,
}

/// A case together with the file it came from.
#[derive(Clone, Debug)]
pub struct LoadedCase {
    pub path: PathBuf,
    pub case: FixtureCase,
}

/// Loads every `*.toml` file in `dir`, in file name order.
///
/// Panics on unreadable files, bad headers, or duplicate case names; a
/// broken fixture set should fail loudly.
pub fn load_fixture_dir(dir: &Path) -> Vec<LoadedCase> {
    let entries = fs::read_dir(dir)
        .unwrap_or_else(|err| panic!("failed to read fixture dir {dir:?}: {err}"));
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();

    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for path in paths {
        for case in load_fixture_file(&path) {
            assert!(
                seen.insert(case.name.clone()),
                "duplicate fixture name '{}' in {path:?}",
                case.name
            );
            out.push(LoadedCase {
                path: path.clone(),
                case,
            });
        }
    }
    out
}

pub fn load_fixture_file(path: &Path) -> Vec<FixtureCase> {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read fixture file {path:?}: {err}"));
    parse_fixture_file(&content)
        .unwrap_or_else(|err| panic!("invalid fixture file {path:?}: {err}"))
}

pub fn parse_fixture_file(content: &str) -> Result<Vec<FixtureCase>, String> {
    let file: FixtureFile = toml::from_str(content).map_err(|err| err.to_string())?;
    if file.format != FIXTURE_FORMAT_V1 {
        return Err(format!("unsupported format '{}'", file.format));
    }
    for case in &file.cases {
        if case.name.trim().is_empty() {
            return Err("fixture case with empty name".to_string());
        }
        if let Some(reason) = &case.xfail
            && reason.trim().is_empty()
        {
            return Err(format!("xfail for '{}' needs a reason", case.name));
        }
    }
    Ok(file.cases)
}

/// Substring filter over case names, read from `HYPERTAG_FIXTURE_FILTER`.
#[derive(Clone, Debug, Default)]
pub struct FixtureFilter {
    needle: Option<String>,
}

impl FixtureFilter {
    pub fn from_env() -> Self {
        let needle = std::env::var("HYPERTAG_FIXTURE_FILTER")
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty());
        Self { needle }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.needle
            .as_deref()
            .is_none_or(|needle| name.contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cases_with_defaults() {
        let cases = parse_fixture_file(
            r#"
format = "markup-fixtures-v1"

[[case]]
name = "plain"
template = "<p>hi</p>"
expected = "<p>"

[[case]]
name = "holes"
template = "<b>${x}</b>"
holes = { x = 3 }
expected = "<b>"
errors = ["nope"]
check_close_tags = true
"#,
        )
        .expect("valid fixture file");
        assert_eq!(cases.len(), 2);
        assert!(cases[0].holes.is_empty());
        assert!(!cases[0].check_close_tags);
        assert_eq!(cases[1].holes.get("x"), Some(&serde_json::json!(3)));
        assert_eq!(cases[1].errors, vec!["nope"]);
    }

    #[test]
    fn rejects_unknown_format_and_fields() {
        let bad_format = "format = \"v0\"\n";
        assert!(parse_fixture_file(bad_format).is_err());
        let unknown_field = "format = \"markup-fixtures-v1\"\n[[case]]\nname = \"a\"\ntemplate = \"\"\nexpected = \"\"\nbogus = 1\n";
        assert!(parse_fixture_file(unknown_field).is_err());
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = FixtureFilter::default();
        assert!(filter.matches("anything"));
        let filter = FixtureFilter {
            needle: Some("spread".to_string()),
        };
        assert!(filter.matches("spread_override"));
        assert!(!filter.matches("anchor"));
    }
}
