//! Grammar for the hydrographic free-text description field.
//!
//! ```text
//! description = fragment *( ";" fragment )
//! fragment    = *ws ( pair / flag / "" ) *ws
//! pair        = key *ws ":" *ws value     ; split at the first ':'
//! flag        = key                       ; e.g. the object class BCNCAR
//! key         = 1*( any char except ws, ':' and ';' )
//! ```
//!
//! Keys and values are trimmed. Empty fragments are skipped. Anything else
//! (an empty key, a key with inner whitespace) is kept verbatim as a
//! malformed fragment instead of being silently dropped.

use std::collections::BTreeMap;

/// Parsed `KEY : VALUE` attributes of a description string.
///
/// # Examples
/// ```
/// use seamark_data::Description;
///
/// let description = Description::parse("BCNCAR;CATCAM : 1;HEIGHT : 3.5");
/// assert_eq!(description.object_class(), Some("BCNCAR"));
/// assert_eq!(description.get("CATCAM"), Some("1"));
/// assert_eq!(description.get("HEIGHT"), Some("3.5"));
/// assert!(description.malformed().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Description {
    attributes: BTreeMap<String, String>,
    object_class: Option<String>,
    malformed: Vec<String>,
}

impl Description {
    /// Parse a semicolon-separated description.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut description = Self::default();
        for raw in text.split(';') {
            let fragment = raw.trim();
            if fragment.is_empty() {
                continue;
            }
            match fragment.split_once(':') {
                Some((key, value)) => description.insert(fragment, key.trim(), value.trim()),
                None => {
                    if is_key(fragment) && description.object_class.is_none() {
                        description.object_class = Some(fragment.to_owned());
                    }
                    description.insert(fragment, fragment, "");
                }
            }
        }
        description
    }

    fn insert(&mut self, fragment: &str, key: &str, value: &str) {
        if is_key(key) {
            self.attributes.insert(key.to_owned(), value.to_owned());
        } else {
            self.malformed.push(fragment.to_owned());
        }
    }

    /// Value of `key`; bare flags yield an empty string.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Value of `key`, treating an empty value as absent.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }

    /// Whether `key` appears as a pair or a flag.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// First bare flag, conventionally the S-57 object class.
    #[must_use]
    pub fn object_class(&self) -> Option<&str> {
        self.object_class.as_deref()
    }

    /// Fragments that did not follow the grammar.
    #[must_use]
    pub fn malformed(&self) -> &[String] {
        &self.malformed
    }

    /// Iterate over attributes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

fn is_key(candidate: &str) -> bool {
    !candidate.is_empty() && !candidate.chars().any(char::is_whitespace)
}
