//! Regex engine selection and compilation
//!
//! Automatically chooses between `regex` (fast, linear time) and
//! `fancy-regex` (full features, backtracking) based on pattern analysis.
//! Expressions reach the engines only through the [`Engine`] and
//! [`CompiledPattern`] traits.

use std::sync::LazyLock;

use serde::Serialize;
use thiserror::Error;

use super::flags::Flags;

static BACKREFERENCE_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"\\[1-9]").expect("BUG: backreference detection pattern is invalid")
});

/// Engine types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineType {
    /// Standard regex crate (linear time guaranteed)
    Regex,
    /// Fancy-regex (supports lookahead, lookbehind, backreferences)
    FancyRegex,
}

impl std::fmt::Display for EngineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineType::Regex => write!(f, "regex"),
            EngineType::FancyRegex => write!(f, "fancy-regex"),
        }
    }
}

/// Errors raised by the engines, passed through unchanged
#[allow(clippy::result_large_err)]
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Regex(#[from] regex::Error),

    #[error(transparent)]
    FancyRegex(#[from] fancy_regex::Error),
}

/// Features detected in a pattern that require fancy-regex
#[derive(Debug, Default)]
pub struct FancyFeatures {
    pub lookahead: bool,
    pub lookbehind: bool,
    pub backreference: bool,
    pub atomic_group: bool,
}

impl FancyFeatures {
    /// Returns true if any fancy feature is detected
    pub fn needs_fancy(&self) -> bool {
        self.lookahead || self.lookbehind || self.backreference || self.atomic_group
    }
}

/// Detect which engine features are used in a pattern
pub fn detect_fancy_features(pattern: &str) -> FancyFeatures {
    FancyFeatures {
        lookahead: pattern.contains("(?=") || pattern.contains("(?!"),
        lookbehind: pattern.contains("(?<=") || pattern.contains("(?<!"),
        backreference: BACKREFERENCE_RE.is_match(pattern),
        atomic_group: pattern.contains("(?>"),
    }
}

/// Select the appropriate engine for a pattern
pub fn select_engine(pattern: &str) -> (EngineType, FancyFeatures) {
    let features = detect_fancy_features(pattern);
    let engine = if features.needs_fancy() {
        EngineType::FancyRegex
    } else {
        EngineType::Regex
    };
    (engine, features)
}

/// Pattern text handed to the engines: inline flags, plus a start anchor
/// when the sticky flag is set.
pub fn effective_pattern(source: &str, flags: &Flags) -> String {
    let inline = flags.inline_prefix();
    if flags.is_sticky() {
        format!(r"{}\A(?:{})", inline, source)
    } else {
        format!("{}{}", inline, source)
    }
}

/// One match with its numbered groups
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    /// Byte offset of the match in the input
    pub index: usize,
    /// Matched text
    pub text: String,
    /// `groups[0]` is the whole match; unmatched groups are `None`
    pub groups: Vec<Option<String>>,
}

impl Match {
    /// Text of group `i`, if it took part in the match
    pub fn group(&self, i: usize) -> Option<&str> {
        self.groups.get(i).and_then(|g| g.as_deref())
    }

    /// Byte offset just past the match
    pub fn end(&self) -> usize {
        self.index + self.text.len()
    }

    fn from_regex(caps: &regex::Captures) -> Self {
        let whole = caps.get(0);
        Match {
            index: whole.map_or(0, |m| m.start()),
            text: whole.map(|m| m.as_str().to_string()).unwrap_or_default(),
            groups: caps
                .iter()
                .map(|g| g.map(|m| m.as_str().to_string()))
                .collect(),
        }
    }

    fn from_fancy(caps: &fancy_regex::Captures) -> Self {
        let whole = caps.get(0);
        Match {
            index: whole.map_or(0, |m| m.start()),
            text: whole.map(|m| m.as_str().to_string()).unwrap_or_default(),
            groups: (0..caps.len())
                .map(|i| caps.get(i).map(|m| m.as_str().to_string()))
                .collect(),
        }
    }
}

/// A compiler from pattern text and flags to something that can match
pub trait Engine {
    type Compiled: CompiledPattern;

    fn compile(&self, pattern: &str, flags: &Flags) -> Result<Self::Compiled, EngineError>;
}

/// Matching operations on a compiled pattern
pub trait CompiledPattern {
    /// Check if the pattern matches anywhere in the text
    fn is_match(&self, input: &str) -> Result<bool, EngineError>;

    /// First match with its groups
    fn exec(&self, input: &str) -> Result<Option<Match>, EngineError>;

    /// Every non-overlapping match, left to right
    fn find_all(&self, input: &str) -> Result<Vec<Match>, EngineError>;

    /// Replace the first match, or every match when `global` is set.
    /// `$1`, `${name}` and `$$` are expanded in `replacement`.
    fn replace(&self, input: &str, replacement: &str, global: bool)
        -> Result<String, EngineError>;

    /// Name of the engine that compiled the pattern
    fn engine_name(&self) -> String {
        "custom".to_string()
    }
}

/// Compiles with automatic engine selection
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoEngine;

impl Engine for AutoEngine {
    type Compiled = CompiledRegex;

    fn compile(&self, pattern: &str, flags: &Flags) -> Result<CompiledRegex, EngineError> {
        log_unknown_flags(flags);
        let effective = effective_pattern(pattern, flags);
        let (compiled, engine) = CompiledRegex::new(&effective)?;
        tracing::debug!(pattern = %effective, %flags, %engine, "compiled expression");
        Ok(compiled)
    }
}

/// Compiles with one engine, no fallback
#[derive(Debug, Clone, Copy)]
pub struct ForcedEngine(pub EngineType);

impl Engine for ForcedEngine {
    type Compiled = CompiledRegex;

    fn compile(&self, pattern: &str, flags: &Flags) -> Result<CompiledRegex, EngineError> {
        log_unknown_flags(flags);
        let effective = effective_pattern(pattern, flags);
        let compiled = CompiledRegex::with_engine(&effective, self.0)?;
        tracing::debug!(pattern = %effective, %flags, engine = %self.0, "compiled expression");
        Ok(compiled)
    }
}

fn log_unknown_flags(flags: &Flags) {
    for letter in flags.unknown() {
        tracing::debug!(flag = %letter, "ignoring unsupported modifier");
    }
}

/// A compiled regex that can use either engine
#[derive(Debug)]
pub enum CompiledRegex {
    Regex(regex::Regex),
    FancyRegex(fancy_regex::Regex),
}

#[allow(clippy::result_large_err)]
impl CompiledRegex {
    /// Compile a pattern with automatic engine selection
    pub fn new(pattern: &str) -> Result<(Self, EngineType), EngineError> {
        let (engine, _features) = select_engine(pattern);

        match engine {
            EngineType::Regex => match regex::Regex::new(pattern) {
                Ok(re) => Ok((CompiledRegex::Regex(re), EngineType::Regex)),
                Err(e) => {
                    tracing::debug!(error = %e, "regex crate rejected pattern, trying fancy-regex");
                    let re = fancy_regex::Regex::new(pattern)?;
                    Ok((CompiledRegex::FancyRegex(re), EngineType::FancyRegex))
                }
            },
            EngineType::FancyRegex => {
                let re = fancy_regex::Regex::new(pattern)?;
                Ok((CompiledRegex::FancyRegex(re), EngineType::FancyRegex))
            }
        }
    }

    /// Compile with a specific engine
    pub fn with_engine(pattern: &str, engine: EngineType) -> Result<Self, EngineError> {
        match engine {
            EngineType::Regex => Ok(CompiledRegex::Regex(regex::Regex::new(pattern)?)),
            EngineType::FancyRegex => Ok(CompiledRegex::FancyRegex(fancy_regex::Regex::new(
                pattern,
            )?)),
        }
    }

    /// Get the engine type
    pub fn engine_type(&self) -> EngineType {
        match self {
            CompiledRegex::Regex(_) => EngineType::Regex,
            CompiledRegex::FancyRegex(_) => EngineType::FancyRegex,
        }
    }
}

impl CompiledPattern for CompiledRegex {
    fn is_match(&self, input: &str) -> Result<bool, EngineError> {
        match self {
            CompiledRegex::Regex(re) => Ok(re.is_match(input)),
            CompiledRegex::FancyRegex(re) => re.is_match(input).map_err(EngineError::from),
        }
    }

    fn exec(&self, input: &str) -> Result<Option<Match>, EngineError> {
        match self {
            CompiledRegex::Regex(re) => Ok(re.captures(input).map(|c| Match::from_regex(&c))),
            CompiledRegex::FancyRegex(re) => Ok(re.captures(input)?.map(|c| Match::from_fancy(&c))),
        }
    }

    fn find_all(&self, input: &str) -> Result<Vec<Match>, EngineError> {
        match self {
            CompiledRegex::Regex(re) => Ok(re
                .captures_iter(input)
                .map(|c| Match::from_regex(&c))
                .collect()),
            CompiledRegex::FancyRegex(re) => {
                let mut matches = Vec::new();
                let mut pos = 0;

                while pos <= input.len() {
                    let Some(caps) = re.captures_from_pos(input, pos)? else {
                        break;
                    };
                    let Some(whole) = caps.get(0) else {
                        break;
                    };
                    pos = advance(input, whole.start(), whole.end());
                    matches.push(Match::from_fancy(&caps));
                }

                Ok(matches)
            }
        }
    }

    fn replace(
        &self,
        input: &str,
        replacement: &str,
        global: bool,
    ) -> Result<String, EngineError> {
        match self {
            CompiledRegex::Regex(re) => {
                let result = if global {
                    re.replace_all(input, replacement)
                } else {
                    re.replace(input, replacement)
                };
                Ok(result.into_owned())
            }
            CompiledRegex::FancyRegex(re) => {
                let mut result = String::with_capacity(input.len());
                let mut last_end = 0;
                let mut pos = 0;

                while pos <= input.len() {
                    let Some(caps) = re.captures_from_pos(input, pos)? else {
                        break;
                    };
                    let Some(whole) = caps.get(0) else {
                        break;
                    };
                    result.push_str(&input[last_end..whole.start()]);
                    result.push_str(&expand_replacement(replacement, &caps));
                    last_end = whole.end();

                    if !global {
                        break;
                    }
                    pos = advance(input, whole.start(), whole.end());
                }

                result.push_str(&input[last_end..]);
                Ok(result)
            }
        }
    }

    fn engine_name(&self) -> String {
        self.engine_type().to_string()
    }
}

/// Next search position after a match; empty matches step over one character
fn advance(input: &str, start: usize, end: usize) -> usize {
    if start == end {
        end + input[end..].chars().next().map_or(1, char::len_utf8)
    } else {
        end
    }
}

/// Expand `$1`, `$name`, `${name}` and `$$` against fancy-regex captures,
/// the same template syntax the regex crate uses.
fn expand_replacement(replacement: &str, caps: &fancy_regex::Captures) -> String {
    let mut result = String::new();
    let mut chars = replacement.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let name = match chars.peek() {
            Some(&'$') => {
                chars.next();
                result.push('$');
                continue;
            }
            Some(&'{') => {
                chars.next();
                let mut name = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }
                if !closed {
                    result.push_str("${");
                    result.push_str(&name);
                    continue;
                }
                name
            }
            Some(&d) if d == '_' || d.is_ascii_alphanumeric() => {
                let mut name = String::new();
                while let Some(&c) = chars.peek() {
                    if c == '_' || c.is_ascii_alphanumeric() {
                        name.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                name
            }
            _ => {
                result.push('$');
                continue;
            }
        };

        let group = match name.parse::<usize>() {
            Ok(num) => caps.get(num),
            Err(_) => caps.name(&name),
        };
        if let Some(m) = group {
            result.push_str(m.as_str());
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_pattern_uses_regex() {
        let (engine, _) = select_engine(r"\d+");
        assert_eq!(engine, EngineType::Regex);
    }

    #[test]
    fn test_lookahead_uses_fancy() {
        let (engine, features) = select_engine(r"^(?:(?!foo).*)");
        assert_eq!(engine, EngineType::FancyRegex);
        assert!(features.lookahead);
    }

    #[test]
    fn test_backreference_uses_fancy() {
        let (engine, features) = select_engine(r"(\w+)\s+\1");
        assert_eq!(engine, EngineType::FancyRegex);
        assert!(features.backreference);
    }

    #[test]
    fn test_effective_pattern_applies_flags() {
        assert_eq!(effective_pattern("a", &Flags::from("g")), "a");
        assert_eq!(effective_pattern("a", &Flags::from("gim")), "(?im)a");
        assert_eq!(effective_pattern("a|b", &Flags::from("y")), r"\A(?:a|b)");
    }

    #[test]
    fn test_auto_engine_selects_by_feature() {
        let plain = AutoEngine.compile(r"\d+", &Flags::default()).unwrap();
        assert_eq!(plain.engine_type(), EngineType::Regex);

        let fancy = AutoEngine.compile("foo(?=bar)", &Flags::default()).unwrap();
        assert_eq!(fancy.engine_type(), EngineType::FancyRegex);
        assert!(fancy.is_match("foobar").unwrap());
        assert!(!fancy.is_match("foobaz").unwrap());
    }

    #[test]
    fn test_forced_engine_reports_native_error() {
        let err = ForcedEngine(EngineType::Regex)
            .compile("foo(?=bar)", &Flags::default())
            .unwrap_err();
        assert!(matches!(err, EngineError::Regex(_)));
    }

    #[test]
    fn test_invalid_pattern_is_error() {
        assert!(AutoEngine.compile("(foo", &Flags::default()).is_err());
    }

    #[test]
    fn test_exec_groups() {
        let re = AutoEngine.compile("a(b)?(c)", &Flags::empty()).unwrap();
        let m = re.exec("xac").unwrap().unwrap();
        assert_eq!(m.index, 1);
        assert_eq!(m.text, "ac");
        assert_eq!(m.groups, vec![Some("ac".into()), None, Some("c".into())]);
    }

    #[test]
    fn test_fancy_find_all_and_replace() {
        let re = CompiledRegex::with_engine("o(?=o)", EngineType::FancyRegex).unwrap();
        assert_eq!(re.find_all("foooo").unwrap().len(), 3);
        assert_eq!(re.replace("foooo", "0", true).unwrap(), "f000o");
        assert_eq!(re.replace("foooo", "0", false).unwrap(), "f0ooo");
    }

    #[test]
    fn test_fancy_expands_groups() {
        let re = CompiledRegex::with_engine(r"(?<w>\w)(?=!)", EngineType::FancyRegex).unwrap();
        assert_eq!(re.replace("a! b!", "[$1${w}$$]", true).unwrap(), "[aa$]! [bb$]!");
    }

    #[test]
    fn test_fancy_empty_matches_step_over_multibyte() {
        let re = CompiledRegex::with_engine("(?=x)|", EngineType::FancyRegex).unwrap();
        assert_eq!(re.find_all("é").unwrap().len(), 2);
    }
}
