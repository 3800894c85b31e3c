use crate::fixtures::FixtureCase;
use crate::{diff_lines, expectation_lines};
use markup::json::value_from_json;
use markup::snapshot::TreeSnapshot;
use markup::{Element, ElementFactory, ParseContext, ParserConfig, Template, TemplateParser, Value};

/// Output of one fixture run.
#[derive(Debug)]
pub struct CaseOutput {
    pub lines: Vec<String>,
    pub errors: Vec<String>,
}

pub fn parser_config(case: &FixtureCase) -> ParserConfig {
    let defaults = ParserConfig::default();
    ParserConfig {
        max_depth: case.max_depth.unwrap_or(defaults.max_depth),
        check_close_tags: case.check_close_tags,
    }
}

/// Parses the case template with its holes and renders the snapshot.
///
/// Fails when the template names a placeholder the case does not define.
pub fn run_case(case: &FixtureCase) -> Result<CaseOutput, String> {
    let mut unknown = Vec::new();
    let template: Template<Element> = Template::from_placeholders(&case.template, |name| {
        match case.holes.get(name) {
            Some(json) => value_from_json(json.clone()),
            None => {
                unknown.push(name.to_string());
                Value::Null
            }
        }
    });
    if !unknown.is_empty() {
        return Err(format!("undefined placeholders: {}", unknown.join(", ")));
    }

    let mut ctx = ParseContext::new();
    let value = TemplateParser::new(parser_config(case)).parse(template, &mut ElementFactory, &mut ctx);
    Ok(CaseOutput {
        lines: TreeSnapshot::new(&value).into_lines(),
        errors: ctx.errors.iter().map(|err| err.code.to_string()).collect(),
    })
}

/// Runs the case and compares against its expectations; the `Err` carries a
/// readable report.
pub fn check_case(case: &FixtureCase) -> Result<(), String> {
    let output = run_case(case)?;
    let expected = expectation_lines(&case.expected);
    if output.lines != expected {
        return Err(format!(
            "snapshot mismatch\n{}",
            diff_lines(&expected, &output.lines)
        ));
    }
    if output.errors != case.errors {
        return Err(format!(
            "diagnostics mismatch\n{}",
            diff_lines(&case.errors, &output.errors)
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::parse_fixture_file;

    fn single_case(body: &str) -> FixtureCase {
        let source = format!("format = \"markup-fixtures-v1\"\n[[case]]\n{body}");
        parse_fixture_file(&source)
            .expect("valid fixture")
            .remove(0)
    }

    #[test]
    fn passing_case_checks_ok() {
        let case = single_case(
            "name = \"p\"\ntemplate = \"<p>${x}</p>\"\nholes = { x = \"hi\" }\nexpected = '''\n<p>\n  \"hi\"\n'''\n",
        );
        assert_eq!(check_case(&case), Ok(()));
    }

    #[test]
    fn undefined_placeholder_is_reported() {
        let case = single_case("name = \"p\"\ntemplate = \"<p>${x}</p>\"\nexpected = \"<p>\"\n");
        let err = run_case(&case).expect_err("x is undefined");
        assert_eq!(err, "undefined placeholders: x");
    }

    #[test]
    fn diagnostics_are_compared_in_order() {
        let case = single_case("name = \"open\"\ntemplate = \"<div>\"\nexpected = \"<div>\"\n");
        let err = check_case(&case).expect_err("unclosed div is not listed");
        assert!(err.starts_with("diagnostics mismatch"), "{err}");
    }
}
