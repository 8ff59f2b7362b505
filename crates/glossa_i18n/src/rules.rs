//! Compiled plural rule sets.
//!
//! A plural template is a `|`-separated list of fragments. Fragments with an
//! explicit [`Condition`] are checked first, in declaration order; the
//! remaining fragments are matched by plural category, numbered `0, 1, 2…`
//! in declaration order. There is no escape for a literal `|` inside a
//! fragment; messages insert one through the built-in `I` parameter.

use std::fmt;

use tracing::{debug, trace};

use crate::error::IntervalError;
use crate::interval::{parse_condition, Condition};
use crate::plural::Pluralization;

/// Separates plural variants in a template.
pub const VARIANT_SEPARATOR: char = '|';

/// How a rule decides whether it applies to a number.
#[derive(Clone, Debug, PartialEq)]
pub enum RuleKind {
    /// Matches when the locale's plural category equals this position.
    Standard(usize),
    /// Matches when the explicit condition holds.
    Explicit(Condition),
}

#[derive(Clone, Debug, PartialEq)]
pub struct PluralRule {
    pub kind: RuleKind,
    pub text: String,
}

impl PluralRule {
    fn matches(&self, number: f64, category: impl FnOnce() -> usize) -> bool {
        match &self.kind {
            RuleKind::Standard(position) => category() == *position,
            RuleKind::Explicit(condition) => condition.matches(number),
        }
    }
}

impl fmt::Display for PluralRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            RuleKind::Standard(position) => write!(f, "#{position} {}", self.text),
            RuleKind::Explicit(condition) => write!(f, "{condition} {}", self.text),
        }
    }
}

/// Ordered plural rules for one message key.
///
/// Explicit rules always precede standard ones. Among explicit rules the
/// first declared wins, so `{0}a|[0,5]b` renders `a` for zero.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleSet {
    rules: Vec<PluralRule>,
}

impl RuleSet {
    /// Compile a `|`-separated template.
    pub fn compile(template: &str) -> Self {
        let mut explicit = Vec::new();
        let mut standard = Vec::new();

        for fragment in template.split(VARIANT_SEPARATOR) {
            match parse_condition(fragment) {
                Ok((condition, text)) => explicit.push(PluralRule {
                    kind: RuleKind::Explicit(condition),
                    text: text.to_string(),
                }),
                Err(err) => {
                    if let IntervalError::Malformed { .. } = err {
                        debug!(fragment, error = %err, "treating malformed plural rule as text");
                    }
                    standard.push(PluralRule {
                        kind: RuleKind::Standard(standard.len()),
                        text: fragment.to_string(),
                    });
                }
            }
        }

        explicit.append(&mut standard);
        Self { rules: explicit }
    }

    /// Text of the first rule matching `number` in `locale`.
    ///
    /// Standard rules compare against the plural category of `number`
    /// truncated toward zero.
    pub fn select(
        &self,
        number: f64,
        locale: &str,
        pluralization: &dyn Pluralization,
    ) -> Option<&str> {
        let mut category = None;
        let rule = self.rules.iter().find(|rule| {
            rule.matches(number, || {
                *category.get_or_insert_with(|| pluralization.position(number as i64, locale))
            })
        })?;
        trace!(number, locale, rule = %rule, "selected plural rule");
        Some(rule.text.as_str())
    }

    pub fn rules(&self) -> &[PluralRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
