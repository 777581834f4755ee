//! Index settings. Every field is optional; only the fields that are set are
//! sent, so an update leaves the other settings untouched.

use serde::{Deserialize, Serialize};

/// Assigns locales to the attributes matching a set of patterns.
///
/// Locales are ISO-639-3 codes or their ISO-639-1 equivalents. Patterns may
/// start or end with a `*` wildcard (`en_*`, `*-ar`), and `*` alone matches
/// every attribute. Neither is checked client-side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedAttribute {
    #[serde(default)]
    pub locales: Vec<String>,
    #[serde(default)]
    pub attribute_patterns: Vec<String>,
}

impl LocalizedAttribute {
    pub fn new<L, P, S, T>(locales: L, attribute_patterns: P) -> Self
    where
        L: IntoIterator<Item = S>,
        P: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            locales: locales.into_iter().map(Into::into).collect(),
            attribute_patterns: attribute_patterns.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub displayed_attributes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub searchable_attributes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filterable_attributes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sortable_attributes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranking_rules: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_words: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distinct_attribute: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localized_attributes: Option<Vec<LocalizedAttribute>>,
}

fn strings<I, S>(items: I) -> Option<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Some(items.into_iter().map(Into::into).collect())
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_displayed_attributes<I, S>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.displayed_attributes = strings(attrs);
        self
    }

    pub fn with_searchable_attributes<I, S>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.searchable_attributes = strings(attrs);
        self
    }

    pub fn with_filterable_attributes<I, S>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filterable_attributes = strings(attrs);
        self
    }

    pub fn with_sortable_attributes<I, S>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sortable_attributes = strings(attrs);
        self
    }

    pub fn with_ranking_rules<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ranking_rules = strings(rules);
        self
    }

    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = strings(words);
        self
    }

    pub fn with_distinct_attribute(mut self, attr: impl Into<String>) -> Self {
        self.distinct_attribute = Some(attr.into());
        self
    }

    pub fn with_localized_attributes(mut self, attrs: Vec<LocalizedAttribute>) -> Self {
        self.localized_attributes = Some(attrs);
        self
    }
}

impl std::fmt::Display for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&serde_json::to_string_pretty(self).map_err(|_| std::fmt::Error)?)
    }
}
