use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct Label(String);

crate::impl_string_newtype!(Label);

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LabelError {
    #[error("Label must not be empty")]
    Empty,
    #[error("Label '{0}' is already on the wheel")]
    Duplicate(Label),
    #[error("Label {0:?} contains control characters")]
    ControlCharacter(String),
}

/// Ordered list of distinct, trimmed, non-empty labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<String>")]
pub struct LabelSet(Vec<Label>);

impl From<Vec<String>> for LabelSet {
    fn from(names: Vec<String>) -> Self {
        Self::from_names(names)
    }
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set keeping the first occurrence of every usable name.
    pub fn from_names<I, T>(names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut set = Self::new();
        for name in names {
            if let Err(e) = set.insert(name.as_ref()) {
                log::warn!("Skipping label {:?}: {}", name.as_ref(), e);
            }
        }
        set
    }

    pub fn insert(&mut self, raw: &str) -> Result<&Label, LabelError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LabelError::Empty);
        }
        if trimmed.chars().any(char::is_control) {
            return Err(LabelError::ControlCharacter(trimmed.to_string()));
        }
        if self.contains(trimmed) {
            return Err(LabelError::Duplicate(Label::new(trimmed)));
        }
        self.0.push(Label::new(trimmed));
        Ok(&self.0[self.0.len() - 1])
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let name = name.trim();
        match self.0.iter().position(|l| l.as_str() == name) {
            Some(idx) => {
                self.0.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|l| l.as_str() == name)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Label> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Label] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a LabelSet {
    type Item = &'a Label;
    type IntoIter = std::slice::Iter<'a, Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_trims_and_keeps_order() {
        let mut set = LabelSet::new();
        set.insert("  Alice ").unwrap();
        set.insert("Bob").unwrap();

        let names: Vec<&str> = set.iter().map(|l| l.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_insert_rejects_empty_and_duplicates() {
        let mut set = LabelSet::new();
        set.insert("Alice").unwrap();

        assert_eq!(set.insert("   "), Err(LabelError::Empty));
        assert_eq!(
            set.insert(" Alice"),
            Err(LabelError::Duplicate(Label::from("Alice")))
        );
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_insert_rejects_control_characters() {
        let mut set = LabelSet::new();
        assert_eq!(
            set.insert("Ann\nclear"),
            Err(LabelError::ControlCharacter("Ann\nclear".to_string()))
        );
        assert!(set.insert("Ann\tLee").is_err());
        assert!(set.is_empty());

        let loaded = LabelSet::from_names(["Ann\r\nBob", "Carol"]);
        assert_eq!(loaded.as_slice(), &[Label::from("Carol")]);
    }

    #[test]
    fn test_remove_shifts_later_labels() {
        let mut set = LabelSet::from_names(["A", "B", "C"]);

        assert!(set.remove("B"));
        assert!(!set.remove("B"));
        assert_eq!(set.as_slice(), &[Label::from("A"), Label::from("C")]);
    }

    #[test]
    fn test_from_names_skips_unusable_entries() {
        let set = LabelSet::from_names(vec!["Carol", "", "Carol", " Dave "]);
        assert_eq!(set.as_slice(), &[Label::from("Carol"), Label::from("Dave")]);
    }

    #[test]
    fn test_label_set_deserializes_from_list() {
        let set: LabelSet = serde_json::from_str(r#"["Alice", "Bob", "Alice"]"#).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("Bob"));
    }
}
