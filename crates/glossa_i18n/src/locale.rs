/// Normalize locale identifiers to the `_`-separated form catalogs are keyed by.
///
/// - Converts `-` to `_` (browsers and BCP 47 tags use `en-US`).
/// - Trims whitespace.
pub fn normalize_locale(s: &str) -> String {
    s.trim().replace('-', "_")
}

/// The tag a locale's plural rules are looked up under.
///
/// Regional tags collapse to their language code (`ru_RU` -> `ru`,
/// `sr_Latn_RS` -> `sr_Latn`). `pt_BR` keeps its region because Brazilian
/// Portuguese counts zero as singular.
pub fn plural_language(locale: &str) -> &str {
    if locale == "pt_BR" {
        return locale;
    }
    match locale.rfind('_') {
        Some(idx) => &locale[..idx],
        None => locale,
    }
}
