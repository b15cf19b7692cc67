use serde::{Deserialize, Serialize};

use crate::model::ids::TopicKey;

/// Title shown for a topic key the catalog does not know.
pub const FALLBACK_TITLE: &str = "Quiz";

/// A navigable entry in the topic catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicKey,
    pub title: String,
}

impl Topic {
    #[must_use]
    pub fn new(id: TopicKey, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// Ordered list of topics shown on the home page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicCatalog {
    topics: Vec<Topic>,
}

impl TopicCatalog {
    /// Build a catalog, dropping later duplicates of the same key.
    #[must_use]
    pub fn new(topics: impl IntoIterator<Item = Topic>) -> Self {
        let mut unique: Vec<Topic> = Vec::new();
        for topic in topics {
            if !unique.iter().any(|t| t.id == topic.id) {
                unique.push(topic);
            }
        }
        Self { topics: unique }
    }

    #[must_use]
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &TopicKey) -> Option<&Topic> {
        self.topics.iter().find(|t| &t.id == key)
    }

    /// Display title for a topic; unknown keys get [`FALLBACK_TITLE`].
    #[must_use]
    pub fn title_for(&self, key: &TopicKey) -> &str {
        self.get(key).map_or(FALLBACK_TITLE, |t| t.title.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(id: &str, title: &str) -> Topic {
        Topic::new(TopicKey::new(id).unwrap(), title)
    }

    #[test]
    fn title_lookup_falls_back_to_generic_title() {
        let catalog = TopicCatalog::new(vec![topic("657", "657 Sayılı Kanun")]);
        let known = TopicKey::new("657").unwrap();
        let unknown = TopicKey::new("5018").unwrap();
        assert_eq!(catalog.title_for(&known), "657 Sayılı Kanun");
        assert_eq!(catalog.title_for(&unknown), FALLBACK_TITLE);
        assert_eq!(FALLBACK_TITLE, "Quiz");
    }

    #[test]
    fn duplicates_keep_first_entry() {
        let catalog = TopicCatalog::new(vec![topic("a", "First"), topic("a", "Second")]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.topics()[0].title, "First");
    }
}
