//! Plural category selection.
//!
//! Maps a cardinal number to the index of the grammatical form a locale
//! uses for it. The tables follow the classic (2010) CLDR rule set, grouped
//! by language family. Indices are positional: implicit plural fragments in
//! a template are numbered in the same order (`0` is usually the singular).
//!
//! # Invariants
//!
//! 1. Pure: the same `(number, locale)` always yields the same index.
//! 2. Every index is in `0..category_count(locale)`.
//! 3. Unknown locales never fail; they have a single category, `0`.

use crate::locale::plural_language;

/// Strategy that picks a plural category for a number in a locale.
pub trait Pluralization: Send + Sync {
    fn position(&self, number: i64, locale: &str) -> usize;
}

/// The built-in CLDR table.
#[derive(Clone, Copy, Debug, Default)]
pub struct CldrPluralization;

impl Pluralization for CldrPluralization {
    fn position(&self, number: i64, locale: &str) -> usize {
        plural_category(number, locale)
    }
}

impl<F> Pluralization for F
where
    F: Fn(i64, &str) -> usize + Send + Sync,
{
    fn position(&self, number: i64, locale: &str) -> usize {
        self(number, locale)
    }
}

/// Language families sharing one plural predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Family {
    /// `one` for exactly 1.
    OneOther,
    /// `one` for 0 and 1.
    ZeroOneOther,
    /// East Slavic and most South Slavic languages.
    Slavic,
    /// Czech and Slovak.
    CzechSlovak,
    Irish,
    Lithuanian,
    Slovenian,
    Macedonian,
    Maltese,
    Latvian,
    Polish,
    Welsh,
    Romanian,
    Arabic,
    Single,
}

fn family(language: &str) -> Family {
    match language {
        "af" | "bn" | "bg" | "ca" | "da" | "de" | "el" | "en" | "eo" | "es" | "et" | "eu"
        | "fa" | "fi" | "fo" | "fur" | "fy" | "gl" | "gu" | "ha" | "he" | "hu" | "is" | "it"
        | "ku" | "lb" | "ml" | "mn" | "mr" | "nah" | "nb" | "ne" | "nl" | "nn" | "no" | "oc"
        | "om" | "or" | "pa" | "pap" | "ps" | "pt" | "so" | "sq" | "sv" | "sw" | "ta" | "te"
        | "tk" | "ur" | "zu" => Family::OneOther,

        "am" | "bh" | "fil" | "fr" | "gun" | "hi" | "hy" | "ln" | "mg" | "nso" | "pt_BR"
        | "ti" | "wa" => Family::ZeroOneOther,

        "be" | "bs" | "hr" | "ru" | "sh" | "sr" | "uk" => Family::Slavic,
        "cs" | "sk" => Family::CzechSlovak,
        "ga" => Family::Irish,
        "lt" => Family::Lithuanian,
        "sl" => Family::Slovenian,
        "mk" => Family::Macedonian,
        "mt" => Family::Maltese,
        "lv" => Family::Latvian,
        "pl" => Family::Polish,
        "cy" => Family::Welsh,
        "ro" => Family::Romanian,
        "ar" => Family::Arabic,
        _ => Family::Single,
    }
}

impl Family {
    fn count(self) -> usize {
        match self {
            Family::Single => 1,
            Family::OneOther | Family::ZeroOneOther | Family::Macedonian => 2,
            Family::Slavic
            | Family::CzechSlovak
            | Family::Irish
            | Family::Lithuanian
            | Family::Latvian
            | Family::Polish
            | Family::Romanian => 3,
            Family::Slovenian | Family::Maltese | Family::Welsh => 4,
            Family::Arabic => 6,
        }
    }

    fn category(self, n: i64) -> usize {
        let n10 = n % 10;
        let n100 = n % 100;
        match self {
            Family::OneOther => usize::from(n != 1),
            Family::ZeroOneOther => usize::from(n != 0 && n != 1),
            Family::Slavic => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if (2..=4).contains(&n10) && !(10..20).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            Family::CzechSlovak => match n {
                1 => 0,
                2..=4 => 1,
                _ => 2,
            },
            Family::Irish => match n {
                1 => 0,
                2 => 1,
                _ => 2,
            },
            Family::Lithuanian => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if n10 >= 2 && !(10..20).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            Family::Slovenian => match n100 {
                1 => 0,
                2 => 1,
                3 | 4 => 2,
                _ => 3,
            },
            Family::Macedonian => usize::from(n10 != 1),
            Family::Maltese => {
                if n == 1 {
                    0
                } else if n == 0 || (2..=10).contains(&n100) {
                    1
                } else if (11..=19).contains(&n100) {
                    2
                } else {
                    3
                }
            }
            Family::Latvian => {
                if n == 0 {
                    0
                } else if n10 == 1 && n100 != 11 {
                    1
                } else {
                    2
                }
            }
            Family::Polish => {
                if n == 1 {
                    0
                } else if (2..=4).contains(&n10) && !(12..=14).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            Family::Welsh => match n {
                1 => 0,
                2 => 1,
                8 | 11 => 2,
                _ => 3,
            },
            Family::Romanian => {
                if n == 1 {
                    0
                } else if n == 0 || (1..20).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            Family::Arabic => match n {
                0..=2 => n as usize,
                _ if (3..=10).contains(&n100) => 3,
                _ if (11..=99).contains(&n100) => 4,
                _ => 5,
            },
            Family::Single => 0,
        }
    }
}

/// Plural category index of `number` in `locale`.
///
/// `locale` is an `_`-separated tag; regional variants share their
/// language's rules except `pt_BR`. Unknown locales return `0`.
pub fn plural_category(number: i64, locale: &str) -> usize {
    family(plural_language(locale)).category(number)
}

/// Number of plural categories `locale` distinguishes.
pub fn category_count(locale: &str) -> usize {
    family(plural_language(locale)).count()
}
