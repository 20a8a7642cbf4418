//! Human-friendly text output formatting
//!
//! Used when --format text is specified.

use super::types::*;

/// Format BuildResult as human-readable text
pub fn format_build_result(result: &BuildResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expression: {}\n", result.display));
    output.push_str(&format!("Pattern:    {}\n", result.pattern));
    output.push_str(&format!("Flags:      {}\n", result.flags));
    if result.open_captures > 0 {
        output.push_str(&format!("Unclosed:   {} capture group(s)\n", result.open_captures));
    }
    output.push('\n');

    match (&result.engine, &result.error) {
        (Some(engine), _) => output.push_str(&format!("Compiles with {}\n", engine)),
        (None, Some(error)) => output.push_str(&format!("Invalid: {}\n", error)),
        (None, None) => {}
    }

    output
}

/// Format TestResult as human-readable text
pub fn format_test_result(result: &TestResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Pattern: /{}/{}\n", result.pattern, result.flags));
    output.push_str(&format!(
        "Engine:  {} ({})\n",
        result.engine,
        if result.engine == "regex" {
            "linear time"
        } else {
            "backtracking"
        }
    ));
    output.push('\n');

    if result.matched {
        for (i, m) in result.matches.iter().enumerate() {
            output.push_str(&format!(
                "Match {}: \"{}\" [{}..{}]\n",
                i + 1,
                m.text,
                m.index,
                m.end()
            ));

            for (group, text) in m.groups.iter().enumerate().skip(1) {
                match text {
                    Some(text) => output.push_str(&format!("  Group {}: \"{}\"\n", group, text)),
                    None => output.push_str(&format!("  Group {}: (unmatched)\n", group)),
                }
            }
        }
        output.push('\n');
        output.push_str(&format!(
            "{} match{} found\n",
            result.match_count,
            if result.match_count == 1 { "" } else { "es" },
        ));
    } else {
        output.push_str("No matches found\n");
    }

    output
}

/// Format ReplaceResult as human-readable text
pub fn format_replace_result(result: &ReplaceResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Pattern:     /{}/{}\n", result.pattern, result.flags));
    output.push_str(&format!("Replacement: {}\n", result.replacement));
    output.push('\n');
    output.push_str(&format!("Original: {}\n", result.original));
    output.push_str(&format!("Result:   {}\n", result.result));
    output.push('\n');
    output.push_str(&format!(
        "{} replacement{} made ({})\n",
        result.replacements_made,
        if result.replacements_made == 1 {
            ""
        } else {
            "s"
        },
        if result.global {
            "every match"
        } else {
            "first match only"
        }
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use verex::Match;

    #[test]
    fn test_format_test_result_lists_groups() {
        let result = TestResult {
            pattern: "(?:a)(b)?".to_string(),
            flags: "gm".to_string(),
            engine: "regex".to_string(),
            input_length: 1,
            matched: true,
            match_count: 1,
            matches: vec![Match {
                index: 0,
                text: "a".to_string(),
                groups: vec![Some("a".to_string()), None],
            }],
        };

        let text = format_test_result(&result);
        assert!(text.contains("Pattern: /(?:a)(b)?/gm"));
        assert!(text.contains("Match 1: \"a\" [0..1]"));
        assert!(text.contains("Group 1: (unmatched)"));
        assert!(text.contains("1 match found"));
    }

    #[test]
    fn test_format_build_result_reports_error() {
        let result = BuildResult {
            pattern: "(".to_string(),
            prefix: String::new(),
            source: "(".to_string(),
            suffix: String::new(),
            flags: "gm".to_string(),
            display: "/(/gm".to_string(),
            open_captures: 1,
            valid: false,
            engine: None,
            error: Some("unclosed group".to_string()),
        };

        let text = format_build_result(&result);
        assert!(text.contains("Unclosed:   1 capture group(s)"));
        assert!(text.contains("Invalid: unclosed group"));
    }

    #[test]
    fn test_format_replace_result_counts_replacements() {
        let result = ReplaceResult {
            pattern: "foo".to_string(),
            flags: "gm".to_string(),
            replacement: "bar".to_string(),
            original: "foofoo".to_string(),
            result: "barbar".to_string(),
            global: true,
            replacements_made: 2,
        };

        let text = format_replace_result(&result);
        assert!(text.contains("Result:   barbar"));
        assert!(text.contains("2 replacements made (every match)"));
    }
}
