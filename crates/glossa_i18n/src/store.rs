use std::collections::HashMap;

use crate::catalog::Catalog;
use crate::plural::Pluralization;
use crate::rules::{RuleSet, VARIANT_SEPARATOR};

/// Flattened messages of one `(domain, locale)` pair, with plural rules
/// compiled for every template that contains the variant separator.
#[derive(Clone, Debug, Default)]
pub struct DomainMessages {
    messages: HashMap<String, String>,
    plural: HashMap<String, RuleSet>,
}

impl DomainMessages {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        // Later pairs may overwrite a dotted key, so rules follow the final templates.
        let messages: HashMap<String, String> = catalog.flatten().into_iter().collect();
        let plural = messages
            .iter()
            .filter(|(_, template)| template.contains(VARIANT_SEPARATOR))
            .map(|(key, template)| (key.clone(), RuleSet::compile(template)))
            .collect();
        Self { messages, plural }
    }

    /// Template for `key`, choosing a plural variant when `number` is given.
    ///
    /// Falls back to the raw template when no plural rule matches.
    pub fn get(
        &self,
        key: &str,
        number: Option<f64>,
        locale: &str,
        pluralization: &dyn Pluralization,
    ) -> Option<&str> {
        if let Some(number) = number {
            if let Some(text) = self
                .plural
                .get(key)
                .and_then(|rules| rules.select(number, locale, pluralization))
            {
                return Some(text);
            }
        }
        self.messages.get(key).map(String::as_str)
    }

    pub fn message(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    pub fn rules(&self, key: &str) -> Option<&RuleSet> {
        self.plural.get(key)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
