//! Explicit plural rule prefixes.
//!
//! A plural fragment may start with a numeric condition:
//!
//! - `{0}` / `{1, 2.5, -3}`: an enumerated set of values.
//! - `[1,5]`, `]0,10[`, `[-Inf,0[`, `[11,+Inf]`: a bounded interval.
//!
//! Interval delimiters follow the convention used by existing translation
//! catalogs, not ISO 31-11: `[` on the left and `]` on the right include the
//! bound, `]` on the left and `[` on the right exclude it. So `]0,10[` is
//! the open interval (0, 10) and `[11,Inf]` is [11, +inf].
//!
//! Whitespace is allowed around delimiters, separators and before the
//! message text. A right bound that is not a number reads as `+Inf`.

use std::fmt;

use crate::error::IntervalError;

/// A numeric range with per-side inclusivity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    pub from: f64,
    pub to: f64,
    pub left_inclusive: bool,
    pub right_inclusive: bool,
}

impl Interval {
    pub fn contains(&self, n: f64) -> bool {
        let after_left = if self.left_inclusive {
            n >= self.from
        } else {
            n > self.from
        };
        let before_right = if self.right_inclusive {
            n <= self.to
        } else {
            n < self.to
        };
        after_left && before_right
    }
}

/// The numeric condition an explicit fragment carries.
#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    Values(Vec<f64>),
    Interval(Interval),
}

impl Condition {
    pub fn matches(&self, n: f64) -> bool {
        match self {
            Condition::Values(values) => values.iter().any(|v| *v == n),
            Condition::Interval(interval) => interval.contains(n),
        }
    }
}

fn fmt_bound(f: &mut fmt::Formatter<'_>, bound: f64) -> fmt::Result {
    if bound == f64::NEG_INFINITY {
        f.write_str("-Inf")
    } else if bound == f64::INFINITY {
        f.write_str("+Inf")
    } else {
        write!(f, "{bound}")
    }
}

/// Renders the condition back in template notation.
impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Values(values) => {
                f.write_str("{")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str("}")
            }
            Condition::Interval(interval) => {
                f.write_str(if interval.left_inclusive { "[" } else { "]" })?;
                fmt_bound(f, interval.from)?;
                f.write_str(",")?;
                fmt_bound(f, interval.to)?;
                f.write_str(if interval.right_inclusive { "]" } else { "[" })
            }
        }
    }
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_str(&mut self, s: &str) -> bool {
        if self.rest().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, b: u8, msg: &'static str) -> Result<(), IntervalError> {
        if self.eat(b) {
            Ok(())
        } else {
            Err(self.malformed(msg))
        }
    }

    fn malformed(&self, msg: &'static str) -> IntervalError {
        IntervalError::Malformed {
            offset: self.pos,
            msg,
        }
    }

    fn digits(&mut self) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// `-?\d+(\.\d+)?`
    fn number(&mut self) -> Result<f64, IntervalError> {
        let start = self.pos;
        self.eat(b'-');
        if self.digits() == 0 {
            self.pos = start;
            return Err(self.malformed("expected a number"));
        }
        let before_fraction = self.pos;
        if self.eat(b'.') && self.digits() == 0 {
            self.pos = before_fraction;
        }
        self.src[start..self.pos]
            .parse()
            .map_err(|_| self.malformed("number out of range"))
    }

    fn values(&mut self) -> Result<Condition, IntervalError> {
        let mut values = Vec::new();
        loop {
            self.skip_ws();
            values.push(self.number()?);
            self.skip_ws();
            if !self.eat(b',') {
                break;
            }
        }
        self.expect(b'}', "expected `}`")?;
        Ok(Condition::Values(values))
    }

    fn interval(&mut self, left_inclusive: bool) -> Result<Condition, IntervalError> {
        self.skip_ws();
        let from = if self.eat_str("-Inf") {
            f64::NEG_INFINITY
        } else {
            self.number()?
        };
        self.skip_ws();
        self.expect(b',', "expected `,` between bounds")?;
        self.skip_ws();
        let to = if self.eat_str("+Inf") || self.eat_str("Inf") {
            f64::INFINITY
        } else {
            self.number()?
        };
        self.skip_ws();
        let right_inclusive = match self.peek() {
            Some(b']') => true,
            Some(b'[') => false,
            _ => return Err(self.malformed("expected `[` or `]` after right bound")),
        };
        self.pos += 1;
        Ok(Condition::Interval(Interval {
            from,
            to,
            left_inclusive,
            right_inclusive,
        }))
    }
}

/// Split an explicit condition off the front of a plural fragment.
///
/// Returns the condition and the message text that follows it. Fragments
/// without a prefix yield [`IntervalError::NoPrefix`]; prefixes that start
/// like a condition but do not complete yield [`IntervalError::Malformed`].
pub fn parse_condition(fragment: &str) -> Result<(Condition, &str), IntervalError> {
    let mut cur = Cursor::new(fragment);
    cur.skip_ws();
    let condition = match cur.peek() {
        Some(b'{') => {
            cur.pos += 1;
            cur.values()?
        }
        Some(delim @ (b'[' | b']')) => {
            cur.pos += 1;
            cur.interval(delim == b'[')?
        }
        _ => return Err(IntervalError::NoPrefix),
    };
    cur.skip_ws();
    Ok((condition, cur.rest()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn interval(from: f64, to: f64, left_inclusive: bool, right_inclusive: bool) -> Condition {
        Condition::Interval(Interval {
            from,
            to,
            left_inclusive,
            right_inclusive,
        })
    }

    #[test]
    fn parses_value_sets() {
        assert_eq!(
            parse_condition("{0}No comments"),
            Ok((Condition::Values(vec![0.0]), "No comments"))
        );
        assert_eq!(
            parse_condition("{ 1 , 2.5,-3 }  several"),
            Ok((Condition::Values(vec![1.0, 2.5, -3.0]), "several"))
        );
    }

    #[test]
    fn bracket_direction_sets_inclusivity() {
        assert_eq!(
            parse_condition("[1,5]closed"),
            Ok((interval(1.0, 5.0, true, true), "closed"))
        );
        assert_eq!(
            parse_condition("]0,10[open"),
            Ok((interval(0.0, 10.0, false, false), "open"))
        );
        assert_eq!(
            parse_condition("[-Inf,0[negative"),
            Ok((interval(f64::NEG_INFINITY, 0.0, true, false), "negative"))
        );
        assert_eq!(
            parse_condition(" ] 1.5 , +Inf ] many"),
            Ok((interval(1.5, f64::INFINITY, false, true), "many"))
        );
        assert_eq!(
            parse_condition("[11,Inf]a lot of"),
            Ok((interval(11.0, f64::INFINITY, true, true), "a lot of"))
        );
    }

    #[test]
    fn open_interval_excludes_its_bounds() {
        let (open, _) = parse_condition("]0,10[").unwrap();
        assert!(!open.matches(0.0));
        assert!(open.matches(0.5));
        assert!(open.matches(9.99));
        assert!(!open.matches(10.0));

        let (unbounded, _) = parse_condition("[11,Inf]").unwrap();
        assert!(!unbounded.matches(10.9));
        assert!(unbounded.matches(11.0));
        assert!(unbounded.matches(1e300));
        assert!(unbounded.matches(f64::INFINITY));

        let (zero, _) = parse_condition("{0}").unwrap();
        assert!(zero.matches(0.0));
        assert!(!zero.matches(0.1));
        assert!(!zero.matches(1.0));
    }

    #[test]
    fn message_keeps_trailing_whitespace() {
        assert_eq!(
            parse_condition("{1}  one item \n"),
            Ok((Condition::Values(vec![1.0]), "one item \n"))
        );
        assert_eq!(parse_condition("{1}"), Ok((Condition::Values(vec![1.0]), "")));
    }

    #[test]
    fn plain_text_has_no_prefix() {
        assert_eq!(parse_condition("%count% comments"), Err(IntervalError::NoPrefix));
        assert_eq!(parse_condition(""), Err(IntervalError::NoPrefix));
    }

    #[test]
    fn incomplete_prefixes_are_malformed() {
        for fragment in [
            "{}empty",
            "{1,}x",
            "{1 2}x",
            "{1",
            "[1,5",
            "[1;5]x",
            "[a,5]x",
            "]1.,5]x",
            "[-Infinity,0]x",
            "[ ,]",
        ] {
            assert!(
                matches!(
                    parse_condition(fragment),
                    Err(IntervalError::Malformed { .. })
                ),
                "{fragment:?}"
            );
        }
    }

    #[test]
    fn display_uses_template_notation() {
        let (c, _) = parse_condition("]-Inf, 2.5]").unwrap();
        assert_eq!(c.to_string(), "]-Inf,2.5]");
        let (c, _) = parse_condition("{0, 1}").unwrap();
        assert_eq!(c.to_string(), "{0,1}");
        let (c, _) = parse_condition("[1,Inf[").unwrap();
        assert_eq!(c.to_string(), "[1,+Inf[");
    }
}
