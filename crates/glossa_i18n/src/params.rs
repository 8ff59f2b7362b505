use std::collections::HashMap;
use std::str::FromStr;

/// Turns a parameter name into the placeholder token it replaces.
pub trait ParameterWrapper: Send + Sync {
    fn wrap(&self, name: &str) -> String;
}

impl<F> ParameterWrapper for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn wrap(&self, name: &str) -> String {
        self(name)
    }
}

/// Built-in placeholder conventions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WrapStyle {
    /// `%name%`
    #[default]
    Percent,
    /// `:name`
    Colon,
}

impl ParameterWrapper for WrapStyle {
    fn wrap(&self, name: &str) -> String {
        match self {
            WrapStyle::Percent => format!("%{name}%"),
            WrapStyle::Colon => format!(":{name}"),
        }
    }
}

impl FromStr for WrapStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "percent" | "symfony" => Ok(WrapStyle::Percent),
            "colon" | "laravel" => Ok(WrapStyle::Colon),
            other => Err(format!(
                "unknown wrap style `{other}` (expected `percent` or `colon`)"
            )),
        }
    }
}

/// Replace every token in `replacements` with its value in one pass.
///
/// At each position the longest matching token wins. Replaced text is not
/// scanned again, so values containing tokens stay literal.
pub fn substitute(template: &str, replacements: &HashMap<String, String>) -> String {
    let mut tokens: Vec<(&str, &str)> = replacements
        .iter()
        .filter(|(token, _)| !token.is_empty())
        .map(|(token, value)| (token.as_str(), value.as_str()))
        .collect();
    if tokens.is_empty() {
        return template.to_string();
    }
    tokens.sort_unstable_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    'scan: while let Some(c) = rest.chars().next() {
        for (token, value) in &tokens {
            if rest.starts_with(token) {
                out.push_str(value);
                rest = &rest[token.len()..];
                continue 'scan;
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}
