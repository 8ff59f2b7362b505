use std::path::PathBuf;
use std::sync::Arc;

use glossa_i18n::{
    t, ArgValue, CachedLoader, CatalogError, CatalogProvider, DomainLoader, FileLoader,
    MemoryCache, MultiLoader, Translator, WrapStyle,
};
use pretty_assertions::assert_eq;

fn fixtures(dir: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(dir)
}

fn translator() -> Translator {
    Translator::new(
        "en_US",
        CatalogProvider::new(FileLoader::new(fixtures("i18n"))),
    )
}

#[test]
fn translates_fixture_catalogs() {
    #[rustfmt::skip]
    let cases: Vec<(Option<&str>, &str, Vec<(&str, ArgValue)>, &str)> = vec![
        (Some("en_US"), "default:test", vec![("package", "glossa".into())], "it is glossa package"),
        (Some("en_US"), "phpunit:text.hello", vec![("user", "PHPUnit".into())], "Hello, PHPUnit!"),
        (Some("en_US"), "phpunit:text.bye", vec![("user", "PHPUnit".into())], "Bye!"),
        (Some("en_US"), "phpunit:text.bye", vec![], "Bye!"),
        (Some("en_US"), "phpunit:number.comments", vec![("count", 0.into())], "No comments"),
        (Some("en_US"), "phpunit:number.comments", vec![("count", 1.into())], "1 comment"),
        (Some("en_US"), "phpunit:number.comments", vec![("count", 2.into())], "2 comments"),
        (Some("en_US"), "phpunit:number.comments", vec![("count", 5.into())], "5 comments"),
        (Some("en_US"), "phpunit:interval.quantity", vec![("count", f64::NEG_INFINITY.into())], "error"),
        (Some("en_US"), "phpunit:interval.quantity", vec![("count", (-1).into())], "error"),
        (Some("en_US"), "phpunit:interval.quantity", vec![("count", 0.into())], "empty"),
        (Some("en_US"), "phpunit:interval.quantity", vec![("count", 2.into())], "less than 10"),
        (Some("en_US"), "phpunit:interval.quantity", vec![("count", 11.into())], "a lot of"),
        (Some("en_US"), "phpunit:interval.quantity", vec![("count", f64::INFINITY.into())], "a lot of"),
        (Some("ru_RU"), "default:test", vec![("package", "glossa".into())], "это пакет glossa"),
        (Some("ru_RU"), "phpunit:text.hello", vec![("user", "PHPUnit".into())], "Привет, PHPUnit!"),
        (Some("ru_RU"), "phpunit:number.comments", vec![("count", 0.into())], "Комментариев нет"),
        (Some("ru_RU"), "phpunit:number.comments", vec![("count", 1.into())], "1 комментарий"),
        (Some("ru_RU"), "phpunit:number.comments", vec![("count", 2.into())], "2 комментария"),
        (Some("ru_RU"), "phpunit:number.comments", vec![("count", 5.into())], "5 комментариев"),
        (Some("ru_RU"), "phpunit:number.comments", vec![("count", 10.into())], "10 комментариев"),
        (Some("ru_RU"), "phpunit:number.comments", vec![("count", 11.into())], "11 комментариев"),
        (Some("ru_RU"), "phpunit:number.comments", vec![("count", 21.into())], "21 комментарий"),
        (Some("ru_RU"), "phpunit:number.comments", vec![("count", 105.into())], "105 комментариев"),
        (Some("ru_RU"), "phpunit:interval.quantity", vec![("count", f64::NEG_INFINITY.into())], "ошибка"),
        (Some("ru_RU"), "phpunit:interval.quantity", vec![("count", (-1).into())], "ошибка"),
        (Some("ru_RU"), "phpunit:interval.quantity", vec![("count", 0.into())], "отсутствует"),
        (Some("ru_RU"), "phpunit:interval.quantity", vec![("count", 2.into())], "менее 10"),
        (Some("ru_RU"), "phpunit:interval.quantity", vec![("count", 11.into())], "много"),
        (Some("ru_RU"), "phpunit:interval.quantity", vec![("count", f64::INFINITY.into())], "много"),
        (Some("fr_FR"), "phpunit:text.hello", vec![("user", "PHPUnit".into())], "phpunit:text.hello"),
        (None, "Undefined %string%", vec![("string", "key".into())], "Undefined key"),
        (None, "Undefined %string%", vec![], "Undefined %string%"),
        (None, "phpunit:text.hello", vec![("user", "PHPUnit".into())], "Hello, PHPUnit!"),
        (None, "text with %I% separator", vec![], "text with | separator"),
    ];

    let translator = translator();
    for (locale, id, args, expected) in cases {
        assert_eq!(
            translator.translate(id, &args, locale),
            expected,
            "{id} {locale:?} {args:?}"
        );
    }
}

#[test]
fn repeated_lookups_are_stable() {
    let translator = translator();
    let msg = t!("phpunit:number.comments", { count: 21 });
    let first = translator.tr_in(&msg, Some("ru_RU"));
    let second = translator.tr_in(&msg, Some("ru_RU"));
    assert_eq!(first, "21 комментарий");
    assert_eq!(first, second);
}

#[test]
fn file_loader_reports_presence() {
    let loader = FileLoader::new(fixtures("i18n"));
    assert!(!loader.load("phpunit", "en_US").unwrap().is_empty());
    assert!(!loader.load("phpunit", "ru_RU").unwrap().is_empty());
    assert!(loader.load("phpunit", "fr_FR").unwrap().is_empty());

    let missing = FileLoader::new(fixtures("not-existent"));
    assert!(missing.load("phpunit", "en_US").unwrap().is_empty());
    assert!(missing.load("phpunit", "ru_RU").unwrap().is_empty());
}

#[test]
fn broken_catalog_files_error_but_never_break_translation() {
    let loader = FileLoader::new(fixtures("i18n"));
    assert!(matches!(
        loader.load("phpunit", "de_DE"),
        Err(CatalogError::Yaml { .. })
    ));

    let translator = translator();
    assert_eq!(
        translator.translate("phpunit:text.bye", &[], Some("de_DE")),
        "phpunit:text.bye"
    );
}

#[test]
fn json_catalogs_with_sequences() {
    let translator = Translator::new(
        "en_US",
        CatalogProvider::new(FileLoader::with_extension(fixtures("json"), ".json")),
    );
    assert_eq!(
        translator.translate("phpunit:text.hello", &[("user", "Ada".into())], None),
        "Hello, Ada!"
    );
    assert_eq!(
        translator.translate("phpunit:files.0", &[("count", 3.into())], None),
        "3 files"
    );
    assert_eq!(
        translator.translate("phpunit:files.1", &[("count", 0.into())], None),
        "nothing here"
    );
    assert_eq!(
        translator.translate("phpunit:files.1", &[("count", 1.into())], None),
        "one file"
    );
}

#[test]
fn layered_and_cached_loaders() {
    let yaml: Arc<dyn DomainLoader> = Arc::new(FileLoader::new(fixtures("i18n")));
    let json: Arc<dyn DomainLoader> =
        Arc::new(FileLoader::with_extension(fixtures("json"), ".json"));
    let mut layers = MultiLoader::new(yaml);
    layers.add_loader(json);

    let cached = CachedLoader::new(layers, Arc::new(MemoryCache::new(16))).with_prefix("glossa:");
    let translator = Translator::with_wrapper(
        "en_US",
        CatalogProvider::new(cached),
        WrapStyle::Percent,
    );

    // `text` is replaced wholesale by the JSON layer; `number` survives from YAML.
    assert_eq!(
        translator.translate("phpunit:text.hello", &[("user", "Ada".into())], None),
        "Hello, Ada!"
    );
    assert_eq!(translator.translate("phpunit:text.bye", &[], None), "phpunit:text.bye");
    assert_eq!(
        translator.translate("phpunit:number.comments", &[("count", 0.into())], None),
        "No comments"
    );
}

#[test]
fn long_sentence_keys_do_not_empty_the_catalog() {
    const SENTENCE: &str = "Your order has been received and will be shipped to the \
                            delivery address you entered as soon as the card payment \
                            is confirmed by the bank";
    assert!(SENTENCE.len() > 128);

    let translator = translator();
    assert_eq!(translator.translate("sentences:hello", &[], None), "Hello");
    assert_eq!(
        translator.translate(&format!("sentences:{SENTENCE}"), &[("user", "Ada".into())], None),
        "Thanks, Ada! Your order is on its way."
    );
}
