//! Turning conditional directives into tracker events.
//!
//! A preprocessing front end reports each conditional directive together
//! with its controlling expression text and evaluated value. This module
//! decides, for one tracked symbol, which [`Event`] that directive is.
//! No lexing happens here.

use crate::config::ElifPolicy;
use crate::core::Event;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The conditional directives the tracker cares about.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Directive {
    If,
    Ifdef,
    Ifndef,
    Elif,
    Else,
    Endif,
}

impl Directive {
    /// Parse a directive keyword such as `ifdef`, `#ifdef` or `# ifdef`.
    ///
    /// Returns `None` for directives that are not conditionals (`define`,
    /// `include`, ...).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let keyword = keyword.trim().trim_start_matches('#').trim_start();
        match keyword {
            "if" => Some(Self::If),
            "ifdef" => Some(Self::Ifdef),
            "ifndef" => Some(Self::Ifndef),
            "elif" => Some(Self::Elif),
            "else" => Some(Self::Else),
            "endif" => Some(Self::Endif),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::If => "if",
            Self::Ifdef => "ifdef",
            Self::Ifndef => "ifndef",
            Self::Elif => "elif",
            Self::Else => "else",
            Self::Endif => "endif",
        }
    }

    /// True for `#if`, `#ifdef` and `#ifndef`.
    pub fn starts_conditional(&self) -> bool {
        matches!(self, Self::If | Self::Ifdef | Self::Ifndef)
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.keyword())
    }
}

/// Classifies directives relative to one tracked symbol.
///
/// `value` is what the front end evaluated the controlling expression to:
/// whether the symbol is defined for `#ifdef`/`#ifndef`, the expression's
/// truth for `#if`. A directive on the tracked symbol yields `MatchTrue`
/// when its own block is the one taken, `MatchFalse` otherwise.
///
/// # Example
///
/// ```rust
/// use pp_region::classify::{Directive, EventClassifier};
/// use pp_region::core::Event;
///
/// let classifier = EventClassifier::new("TEST_PP_CONDITIONAL");
///
/// assert_eq!(
///     classifier.classify(Directive::Ifdef, "TEST_PP_CONDITIONAL", true),
///     Some(Event::MatchTrue)
/// );
/// assert_eq!(
///     classifier.classify(Directive::Ifndef, "TEST_PP_CONDITIONAL", true),
///     Some(Event::MatchFalse)
/// );
/// assert_eq!(
///     classifier.classify(Directive::Ifdef, "SOME_UNKNOWN_MACRO", false),
///     Some(Event::Open)
/// );
/// assert_eq!(classifier.classify(Directive::Endif, "", false), Some(Event::Close));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventClassifier {
    symbol: String,
    elif_policy: ElifPolicy,
}

impl EventClassifier {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            elif_policy: ElifPolicy::default(),
        }
    }

    pub fn with_elif_policy(mut self, policy: ElifPolicy) -> Self {
        self.elif_policy = policy;
        self
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn elif_policy(&self) -> ElifPolicy {
        self.elif_policy
    }

    /// True when the expression is exactly the tracked symbol, ignoring
    /// surrounding whitespace. `defined(SYM)` and compound expressions do
    /// not match.
    pub fn matches_symbol(&self, expression: &str) -> bool {
        expression.trim() == self.symbol
    }

    /// Classify one conditional directive.
    pub fn classify(&self, directive: Directive, expression: &str, value: bool) -> Option<Event> {
        match directive {
            Directive::If | Directive::Ifdef | Directive::Ifndef => {
                if !self.matches_symbol(expression) {
                    return Some(Event::Open);
                }
                let taken = match directive {
                    Directive::Ifndef => !value,
                    _ => value,
                };
                Some(if taken {
                    Event::MatchTrue
                } else {
                    Event::MatchFalse
                })
            }
            Directive::Elif => match self.elif_policy {
                ElifPolicy::AsOpen => Some(Event::Open),
                ElifPolicy::Ignore => None,
            },
            Directive::Else => Some(Event::Else),
            Directive::Endif => Some(Event::Close),
        }
    }

    /// Classify a directive given by keyword. Non-conditional directives
    /// yield `None`.
    pub fn classify_keyword(&self, keyword: &str, expression: &str, value: bool) -> Option<Event> {
        Directive::from_keyword(keyword).and_then(|d| self.classify(d, expression, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYMBOL: &str = "TEST_PP_CONDITIONAL";

    #[test]
    fn keywords_parse_with_or_without_hash() {
        assert_eq!(Directive::from_keyword("ifdef"), Some(Directive::Ifdef));
        assert_eq!(Directive::from_keyword("#ifndef"), Some(Directive::Ifndef));
        assert_eq!(Directive::from_keyword("#  endif"), Some(Directive::Endif));
        assert_eq!(Directive::from_keyword(" else "), Some(Directive::Else));
        assert_eq!(Directive::from_keyword("define"), None);
        assert_eq!(Directive::from_keyword("#include"), None);
    }

    #[test]
    fn keyword_round_trips_for_every_directive() {
        for directive in [
            Directive::If,
            Directive::Ifdef,
            Directive::Ifndef,
            Directive::Elif,
            Directive::Else,
            Directive::Endif,
        ] {
            assert_eq!(Directive::from_keyword(directive.keyword()), Some(directive));
        }
    }

    #[test]
    fn ifdef_polarity_follows_value() {
        let classifier = EventClassifier::new(SYMBOL);
        assert_eq!(
            classifier.classify(Directive::Ifdef, SYMBOL, true),
            Some(Event::MatchTrue)
        );
        assert_eq!(
            classifier.classify(Directive::Ifdef, SYMBOL, false),
            Some(Event::MatchFalse)
        );
    }

    #[test]
    fn ifndef_polarity_is_inverted() {
        let classifier = EventClassifier::new(SYMBOL);
        assert_eq!(
            classifier.classify(Directive::Ifndef, SYMBOL, false),
            Some(Event::MatchTrue)
        );
        assert_eq!(
            classifier.classify(Directive::Ifndef, SYMBOL, true),
            Some(Event::MatchFalse)
        );
    }

    #[test]
    fn plain_if_on_symbol_follows_value() {
        let classifier = EventClassifier::new(SYMBOL);
        assert_eq!(
            classifier.classify(Directive::If, "  TEST_PP_CONDITIONAL ", true),
            Some(Event::MatchTrue)
        );
    }

    #[test]
    fn compound_expressions_are_unrelated() {
        let classifier = EventClassifier::new(SYMBOL);
        assert_eq!(
            classifier.classify(Directive::If, "defined(TEST_PP_CONDITIONAL)", true),
            Some(Event::Open)
        );
        assert_eq!(
            classifier.classify(Directive::If, "TEST_PP_CONDITIONAL && X", true),
            Some(Event::Open)
        );
    }

    #[test]
    fn elif_follows_policy() {
        let as_open = EventClassifier::new(SYMBOL);
        assert_eq!(
            as_open.classify(Directive::Elif, SYMBOL, true),
            Some(Event::Open)
        );

        let ignore = EventClassifier::new(SYMBOL).with_elif_policy(ElifPolicy::Ignore);
        assert_eq!(ignore.classify(Directive::Elif, SYMBOL, true), None);
    }

    #[test]
    fn classify_keyword_skips_other_directives() {
        let classifier = EventClassifier::new(SYMBOL);
        assert_eq!(classifier.classify_keyword("#define", SYMBOL, true), None);
        assert_eq!(
            classifier.classify_keyword("#else", "", false),
            Some(Event::Else)
        );
    }

    #[test]
    fn directive_display_has_hash() {
        assert_eq!(Directive::Ifndef.to_string(), "#ifndef");
        assert!(Directive::If.starts_conditional());
        assert!(!Directive::Elif.starts_conditional());
    }
}
