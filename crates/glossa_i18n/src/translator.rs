use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tracing::{debug, trace};

use crate::locale::normalize_locale;
use crate::message::{ArgValue, Message};
use crate::params::{substitute, ParameterWrapper, WrapStyle};
use crate::provider::TranslationProvider;

/// Domain used when an identifier has no `domain:` prefix.
pub const DEFAULT_DOMAIN: &str = "default";

/// Argument whose numeric value selects plural variants.
pub const COUNT_PARAMETER: &str = "count";

/// Built-in argument that renders the variant separator `|`.
pub const SEPARATOR_PARAMETER: &str = "I";

/// Application-facing translation entry point.
///
/// Missing keys never fail: the identifier itself is rendered instead, with
/// arguments substituted into it.
pub struct Translator {
    locale: RwLock<String>,
    provider: Box<dyn TranslationProvider>,
    wrapper: Box<dyn ParameterWrapper>,
}

impl Translator {
    /// A translator using `%name%` placeholders.
    pub fn new(default_locale: &str, provider: impl TranslationProvider + 'static) -> Self {
        Self::with_wrapper(default_locale, provider, WrapStyle::default())
    }

    pub fn with_wrapper(
        default_locale: &str,
        provider: impl TranslationProvider + 'static,
        wrapper: impl ParameterWrapper + 'static,
    ) -> Self {
        Self {
            locale: RwLock::new(normalize_locale(default_locale)),
            provider: Box::new(provider),
            wrapper: Box::new(wrapper),
        }
    }

    pub fn default_locale(&self) -> String {
        self.locale
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Change the locale used when a call does not name one.
    ///
    /// Blank locales are ignored.
    pub fn set_default_locale(&self, locale: &str) {
        let loc = normalize_locale(locale);
        if loc.is_empty() {
            return;
        }
        let mut cur = self.locale.write().unwrap_or_else(PoisonError::into_inner);
        if *cur != loc {
            debug!("Translator::set_default_locale: {} -> {}", *cur, loc);
            *cur = loc;
        }
    }

    /// Translate `identifier` (`domain:key` or `key`) with `args`.
    pub fn translate(
        &self,
        identifier: &str,
        args: &[(&str, ArgValue)],
        locale: Option<&str>,
    ) -> String {
        self.render(identifier, args.iter().map(|(k, v)| (*k, v)), locale)
    }

    /// Translate a [`Message`] in the default locale.
    pub fn tr(&self, msg: &Message) -> String {
        self.tr_in(msg, None)
    }

    pub fn tr_in(&self, msg: &Message, locale: Option<&str>) -> String {
        self.render(&msg.id, msg.args.iter().map(|(k, v)| (&**k, v)), locale)
    }

    fn render<'a>(
        &self,
        identifier: &str,
        args: impl Iterator<Item = (&'a str, &'a ArgValue)> + Clone,
        locale: Option<&str>,
    ) -> String {
        let locale = match locale.map(normalize_locale) {
            Some(loc) if !loc.is_empty() => loc,
            _ => self.default_locale(),
        };
        let (domain, key) = split_identifier(identifier);
        let number = args
            .clone()
            .filter(|(name, _)| *name == COUNT_PARAMETER)
            .last()
            .and_then(|(_, value)| value.as_number());

        let template = match self.provider.get(key, domain, &locale, number) {
            Some(template) => template,
            None => {
                trace!(identifier, locale = %locale, "no translation, rendering identifier");
                identifier.to_string()
            }
        };

        let mut replacements = HashMap::new();
        replacements.insert(self.wrapper.wrap(SEPARATOR_PARAMETER), "|".to_string());
        for (name, value) in args {
            replacements.insert(self.wrapper.wrap(name), value.to_string());
        }
        substitute(&template, &replacements)
    }
}

/// Split `domain:key` on the first `:`. Bare keys live in [`DEFAULT_DOMAIN`].
pub fn split_identifier(identifier: &str) -> (&str, &str) {
    identifier
        .split_once(':')
        .unwrap_or((DEFAULT_DOMAIN, identifier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::loader::MemoryLoader;
    use crate::provider::CatalogProvider;
    use pretty_assertions::assert_eq;

    fn translator() -> Translator {
        let en: Catalog = [
            ("hello", "Hello, %user%!"),
            ("comments", "%count% comment|%count% comments|{0}No comments"),
            ("pipe", "a %I% b"),
        ]
        .into_iter()
        .collect();
        let ru: Catalog = [("hello", "Привет, %user%!")].into_iter().collect();
        let loader = MemoryLoader::new()
            .with("app", "en_US", en)
            .with("app", "ru_RU", ru)
            .with("default", "en_US", Catalog::from_iter([("test", "it is %package% package")]));
        Translator::new("en_US", CatalogProvider::new(loader))
    }

    #[test]
    fn splits_identifiers_on_first_colon() {
        assert_eq!(split_identifier("app:text.hello"), ("app", "text.hello"));
        assert_eq!(split_identifier("app:a:b"), ("app", "a:b"));
        assert_eq!(split_identifier("text.hello"), ("default", "text.hello"));
        assert_eq!(split_identifier(":key"), ("", "key"));
    }

    #[test]
    fn translates_with_domain_and_default_domain() {
        let t = translator();
        assert_eq!(
            t.translate("app:hello", &[("user", "Ada".into())], None),
            "Hello, Ada!"
        );
        assert_eq!(
            t.translate("test", &[("package", "glossa".into())], None),
            "it is glossa package"
        );
        assert_eq!(
            t.translate("app:hello", &[("user", "Ада".into())], Some("ru-RU")),
            "Привет, Ада!"
        );
    }

    #[test]
    fn count_selects_variants() {
        let t = translator();
        for (count, expected) in [(0, "No comments"), (1, "1 comment"), (5, "5 comments")] {
            assert_eq!(
                t.translate("app:comments", &[("count", count.into())], None),
                expected
            );
        }
        assert_eq!(
            t.translate("app:comments", &[("count", "1".into())], None),
            "1 comment"
        );
        // Non-numeric count: no plural selection, raw template.
        assert_eq!(
            t.translate("app:comments", &[("count", "many".into())], None),
            "many comment|many comments|{0}No comments"
        );
    }

    #[test]
    fn missing_keys_render_the_identifier() {
        let t = translator();
        assert_eq!(
            t.translate("Undefined %string%", &[("string", "key".into())], None),
            "Undefined key"
        );
        assert_eq!(t.translate("Undefined %string%", &[], None), "Undefined %string%");
        assert_eq!(
            t.translate("app:hello", &[("user", "x".into())], Some("fr_FR")),
            "app:hello"
        );
    }

    #[test]
    fn separator_parameter() {
        let t = translator();
        assert_eq!(t.translate("text with %I% separator", &[], None), "text with | separator");
        assert_eq!(t.translate("app:pipe", &[], None), "a | b");
        assert_eq!(t.translate("app:pipe", &[("I", "/".into())], None), "a / b");
    }

    #[test]
    fn default_locale_round_trip() {
        let t = translator();
        assert_eq!(t.default_locale(), "en_US");
        t.set_default_locale("ru-RU");
        assert_eq!(t.default_locale(), "ru_RU");
        t.set_default_locale("  ");
        assert_eq!(t.default_locale(), "ru_RU");
        assert_eq!(
            t.tr(&Message::new("app:hello").arg("user", "Ада")),
            "Привет, Ада!"
        );
    }

    #[test]
    fn colon_wrapper() {
        let loader = MemoryLoader::new().with(
            "default",
            "en",
            Catalog::from_iter([("files", ":count file|:count files")]),
        );
        let t = Translator::with_wrapper("en", CatalogProvider::new(loader), WrapStyle::Colon);
        assert_eq!(t.translate("files", &[("count", 3.into())], None), "3 files");
        assert_eq!(t.translate("files", &[("count", 1.into())], None), "1 file");
    }
}
