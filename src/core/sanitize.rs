//! Literal escaping
//!
//! Values inserted into an expression go through [`sanitize`], which turns
//! text into a pattern that matches it literally.

use std::borrow::Cow;

/// Characters that are escaped with a backslash by [`sanitize`]
pub const SPECIAL_CHARACTERS: &[char] = &[
    '\\', '^', '$', '.', '|', '?', '*', '+', '(', ')', '[', ']', '{', '}', ':', '=',
];

/// A value that can be inserted into an expression
#[derive(Debug, Clone, PartialEq)]
pub enum Literal<'a> {
    /// Plain text, escaped on insertion
    Text(Cow<'a, str>),
    /// An integer, inserted in decimal form
    Integer(i128),
    /// A floating-point number, inserted in decimal form
    Number(f64),
    /// Source of an existing pattern, inserted as-is
    Source(Cow<'a, str>),
}

impl Literal<'_> {
    /// Converts into the pattern fragment that is inserted
    pub fn sanitize(&self) -> String {
        match self {
            Literal::Text(text) => escape(text),
            Literal::Integer(n) => n.to_string(),
            Literal::Number(n) => format_number(*n),
            Literal::Source(source) => source.to_string(),
        }
    }
}

/// Escapes or converts `value` into a pattern fragment.
///
/// Text has every character in [`SPECIAL_CHARACTERS`] prefixed with a
/// backslash. Numbers are written in decimal. Pattern sources pass through
/// unescaped.
pub fn sanitize<'a>(value: impl Into<Literal<'a>>) -> String {
    value.into().sanitize()
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if SPECIAL_CHARACTERS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn format_number(n: f64) -> String {
    if n.is_infinite() {
        if n.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

impl<'a> From<&'a str> for Literal<'a> {
    fn from(text: &'a str) -> Self {
        Literal::Text(Cow::Borrowed(text))
    }
}

impl<'a> From<&'a String> for Literal<'a> {
    fn from(text: &'a String) -> Self {
        Literal::Text(Cow::Borrowed(text.as_str()))
    }
}

impl From<String> for Literal<'_> {
    fn from(text: String) -> Self {
        Literal::Text(Cow::Owned(text))
    }
}

impl From<char> for Literal<'_> {
    fn from(c: char) -> Self {
        Literal::Text(Cow::Owned(c.to_string()))
    }
}

macro_rules! literal_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Literal<'_> {
                fn from(n: $t) -> Self {
                    Literal::Integer(n as i128)
                }
            }
        )*
    };
}

literal_from_integer!(i8, i16, i32, i64, i128, u8, u16, u32, u64, usize, isize);

impl From<f32> for Literal<'_> {
    fn from(n: f32) -> Self {
        Literal::Number(f64::from(n))
    }
}

impl From<f64> for Literal<'_> {
    fn from(n: f64) -> Self {
        Literal::Number(n)
    }
}

impl<'a> From<&'a regex::Regex> for Literal<'a> {
    fn from(re: &'a regex::Regex) -> Self {
        Literal::Source(Cow::Borrowed(re.as_str()))
    }
}

impl<'a> From<&'a fancy_regex::Regex> for Literal<'a> {
    fn from(re: &'a fancy_regex::Regex) -> Self {
        Literal::Source(Cow::Borrowed(re.as_str()))
    }
}

/// Members of a character class, given as text or as a list of characters
#[derive(Debug, Clone, PartialEq)]
pub enum CharSet<'a> {
    /// Every character of the text is a member
    Text(Literal<'a>),
    /// Each entry contributes its characters
    List(Vec<Literal<'a>>),
}

impl CharSet<'_> {
    /// Sanitized class body, without the surrounding brackets
    pub fn sanitize(&self) -> String {
        match self {
            CharSet::Text(literal) => literal.sanitize(),
            CharSet::List(members) => members.iter().map(Literal::sanitize).collect(),
        }
    }
}

impl<'a> From<&'a str> for CharSet<'a> {
    fn from(text: &'a str) -> Self {
        CharSet::Text(text.into())
    }
}

impl From<String> for CharSet<'_> {
    fn from(text: String) -> Self {
        CharSet::Text(text.into())
    }
}

impl<'a> From<&'a String> for CharSet<'a> {
    fn from(text: &'a String) -> Self {
        CharSet::Text(text.into())
    }
}

impl<'a> From<&[&'a str]> for CharSet<'a> {
    fn from(members: &[&'a str]) -> Self {
        CharSet::List(members.iter().map(|m| Literal::from(*m)).collect())
    }
}

impl<'a, const N: usize> From<[&'a str; N]> for CharSet<'a> {
    fn from(members: [&'a str; N]) -> Self {
        CharSet::List(members.into_iter().map(Literal::from).collect())
    }
}

impl<'a> From<Vec<&'a str>> for CharSet<'a> {
    fn from(members: Vec<&'a str>) -> Self {
        CharSet::List(members.into_iter().map(Literal::from).collect())
    }
}

impl From<Vec<String>> for CharSet<'_> {
    fn from(members: Vec<String>) -> Self {
        CharSet::List(members.into_iter().map(Literal::from).collect())
    }
}

impl From<&[char]> for CharSet<'_> {
    fn from(members: &[char]) -> Self {
        CharSet::List(members.iter().map(|c| Literal::from(*c)).collect())
    }
}

impl<const N: usize> From<[char; N]> for CharSet<'_> {
    fn from(members: [char; N]) -> Self {
        CharSet::List(members.into_iter().map(Literal::from).collect())
    }
}

impl From<Vec<char>> for CharSet<'_> {
    fn from(members: Vec<char>) -> Self {
        CharSet::List(members.into_iter().map(Literal::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_every_special_character() {
        let input = r"$a^b\c|d(e)f[g]h{i}j.k*l+m?n:o=p";
        let expected = r"\$a\^b\\c\|d\(e\)f\[g\]h\{i\}j\.k\*l\+m\?n\:o\=p";
        assert_eq!(sanitize(input), expected);
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(sanitize("hello world_-#"), "hello world_-#");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_numbers() {
        assert_eq!(sanitize(42), "42");
        assert_eq!(sanitize(-7i64), "-7");
        assert_eq!(sanitize(1.5), "1.5");
        assert_eq!(sanitize(0.0), "0");
        assert_eq!(sanitize(u64::MAX), "18446744073709551615");
        assert_eq!(sanitize(i128::MIN), i128::MIN.to_string());
    }

    #[test]
    fn test_pattern_source_is_not_escaped() {
        let re = regex::Regex::new(r"fo+\.").unwrap();
        assert_eq!(sanitize(&re), r"fo+\.");

        let fancy = fancy_regex::Regex::new("foo").unwrap();
        assert_eq!(sanitize(&fancy), "foo");
    }

    #[test]
    fn test_escaped_text_matches_itself() {
        let input = r"a.b*c(d)[e]{f}|g?h+i^j$k\l:m=n";
        let re = regex::Regex::new(&format!("^{}$", sanitize(input))).unwrap();
        assert!(re.is_match(input));
        assert!(!re.is_match("aXb*c(d)[e]{f}|g?h+i^j$k\\l:m=n"));
    }

    #[test]
    fn test_char_set_forms_agree() {
        assert_eq!(CharSet::from("b]r").sanitize(), r"b\]r");
        assert_eq!(CharSet::from(["b", "]", "r"]).sanitize(), r"b\]r");
        assert_eq!(CharSet::from(['b', ']', 'r']).sanitize(), r"b\]r");
    }
}
