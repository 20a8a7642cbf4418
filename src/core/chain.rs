//! Serializable chains
//!
//! A chain is a list of [`Step`]s, one per builder call, so expressions can
//! be described as JSON and replayed:
//!
//! ```json
//! [{"op": "start_of_line"}, {"op": "then", "value": "abc"}, {"op": "or", "value": "def"}]
//! ```

use serde::{Deserialize, Serialize};

use super::expression::Expression;
use super::sanitize::{CharSet, Literal};

/// A literal argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Number(f64),
}

impl Value {
    fn literal(&self) -> Literal<'_> {
        match self {
            Value::Text(text) => Literal::from(text),
            Value::Number(n) => Literal::Number(*n),
        }
    }
}

/// Character class members
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Chars {
    Text(String),
    List(Vec<String>),
}

impl Chars {
    fn char_set(&self) -> CharSet<'_> {
        match self {
            Chars::Text(text) => CharSet::from(text),
            Chars::List(members) => CharSet::List(members.iter().map(Literal::from).collect()),
        }
    }
}

fn enabled() -> bool {
    true
}

/// One builder call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Add {
        value: Value,
    },
    AddRaw {
        value: String,
    },
    StartOfLine {
        #[serde(default = "enabled")]
        enable: bool,
    },
    EndOfLine {
        #[serde(default = "enabled")]
        enable: bool,
    },
    Then {
        value: Value,
    },
    Find {
        value: Value,
    },
    Maybe {
        value: Value,
    },
    Or {
        #[serde(default)]
        value: Option<Value>,
    },
    Anything,
    AnythingBut {
        value: Chars,
    },
    Something,
    SomethingBut {
        value: Chars,
    },
    AnyOf {
        value: Chars,
    },
    Any {
        value: Chars,
    },
    Not {
        value: Value,
    },
    Range {
        bounds: Vec<Value>,
    },
    LineBreak,
    Br,
    Tab,
    Word,
    Digit,
    Whitespace,
    AddModifier {
        letter: char,
    },
    RemoveModifier {
        letter: char,
    },
    WithAnyCase {
        #[serde(default = "enabled")]
        enable: bool,
    },
    StopAtFirst {
        #[serde(default = "enabled")]
        enable: bool,
    },
    SearchOneLine {
        #[serde(default = "enabled")]
        enable: bool,
    },
    OneOrMore,
    Multiple {
        #[serde(default)]
        value: Option<Value>,
        #[serde(default)]
        lower: Option<usize>,
        #[serde(default)]
        upper: Option<usize>,
    },
    RepeatPrevious {
        #[serde(default)]
        bounds: Vec<usize>,
    },
    BeginCapture,
    EndCapture,
}

impl Step {
    /// Performs the call on `expression`
    pub fn apply(&self, expression: &mut Expression) {
        match self {
            Step::Add { value } => expression.add(value.literal()),
            Step::AddRaw { value } => expression.add_raw(value),
            Step::StartOfLine { enable } => expression.start_of_line_if(*enable),
            Step::EndOfLine { enable } => expression.end_of_line_if(*enable),
            Step::Then { value } => expression.then(value.literal()),
            Step::Find { value } => expression.find(value.literal()),
            Step::Maybe { value } => expression.maybe(value.literal()),
            Step::Or { value: None } => expression.or(),
            Step::Or { value: Some(value) } => expression.or_then(value.literal()),
            Step::Anything => expression.anything(),
            Step::AnythingBut { value } => expression.anything_but(value.char_set()),
            Step::Something => expression.something(),
            Step::SomethingBut { value } => expression.something_but(value.char_set()),
            Step::AnyOf { value } => expression.any_of(value.char_set()),
            Step::Any { value } => expression.any(value.char_set()),
            Step::Not { value } => expression.not(value.literal()),
            Step::Range { bounds } => expression.range(bounds.iter().map(Value::literal)),
            Step::LineBreak => expression.line_break(),
            Step::Br => expression.br(),
            Step::Tab => expression.tab(),
            Step::Word => expression.word(),
            Step::Digit => expression.digit(),
            Step::Whitespace => expression.whitespace(),
            Step::AddModifier { letter } => expression.add_modifier(*letter),
            Step::RemoveModifier { letter } => expression.remove_modifier(*letter),
            Step::WithAnyCase { enable } => expression.with_any_case_if(*enable),
            Step::StopAtFirst { enable } => expression.stop_at_first_if(*enable),
            Step::SearchOneLine { enable } => expression.search_one_line_if(*enable),
            Step::OneOrMore => expression.one_or_more(),
            Step::Multiple {
                value,
                lower,
                upper,
            } => expression.multiple_with(value.as_ref().map(Value::literal), *lower, *upper),
            Step::RepeatPrevious { bounds } => expression.repeat_previous(bounds),
            Step::BeginCapture => expression.begin_capture(),
            Step::EndCapture => expression.end_capture(),
        };
    }
}

/// Parse a JSON chain
pub fn parse_chain(json: &str) -> Result<Vec<Step>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Replay `steps` on a fresh expression
pub fn build(steps: &[Step]) -> Expression {
    let mut expression = Expression::new();
    for step in steps {
        tracing::trace!(?step, "applying step");
        step.apply(&mut expression);
    }
    expression
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::expression::verex;

    #[test]
    fn test_parse_and_build() {
        let steps = parse_chain(
            r#"[
                {"op": "start_of_line"},
                {"op": "then", "value": "abc"},
                {"op": "or", "value": "def"},
                {"op": "end_of_line", "enable": false}
            ]"#,
        )
        .unwrap();

        let mut expected = verex();
        expected.start_of_line().then("abc").or_then("def");
        assert_eq!(build(&steps), expected);
    }

    #[test]
    fn test_value_forms() {
        let steps = parse_chain(
            r#"[
                {"op": "range", "bounds": ["a", "z", 0, 9]},
                {"op": "any_of", "value": ["x", "y"]},
                {"op": "anything_but", "value": "br"},
                {"op": "multiple", "value": "foo", "lower": 2},
                {"op": "repeat_previous", "bounds": [1, 2]},
                {"op": "add_modifier", "letter": "i"}
            ]"#,
        )
        .unwrap();

        let ex = build(&steps);
        assert_eq!(
            ex.pattern(),
            "[a-z0-9](?:[xy])(?:[^br]*)(?:foo){2,}{1,2}"
        );
        assert_eq!(ex.flags().to_string(), "gim");
    }

    #[test]
    fn test_unknown_op_is_error() {
        assert!(parse_chain(r#"[{"op": "teleport"}]"#).is_err());
    }
}
