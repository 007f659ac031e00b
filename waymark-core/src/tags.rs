//! Free-form key/value tags attached to entities.
//!
//! Tags are stored as an ordered list rather than a map: encoders emit
//! them in exactly the order they were recorded, and that order is part
//! of the wire contract.

/// A single key/value tag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tag {
    /// Tag key.
    pub key: String,
    /// Tag value.
    pub value: String,
}

impl Tag {
    /// Construct a tag from a key and a value.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// An ordered collection of [`Tag`]s.
///
/// # Examples
/// ```
/// use waymark_core::TagCollection;
///
/// let tags = TagCollection::from_pairs([("highway", "residential")]);
/// assert_eq!(tags.get("highway"), Some("residential"));
/// assert_eq!(tags.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagCollection(Vec<Tag>);

impl TagCollection {
    /// Construct an empty collection.
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Build a collection from `(key, value)` pairs, preserving order.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(key, value)| Tag::new(key, value))
                .collect(),
        )
    }

    /// Append a tag.
    pub fn push(&mut self, tag: Tag) {
        self.0.push(tag);
    }

    /// Look up the value recorded for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|tag| tag.key == key)
            .map(|tag| tag.value.as_str())
    }

    /// Number of tags in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when no tags are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the tags in recorded order.
    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.0.iter()
    }
}

impl FromIterator<Tag> for TagCollection {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TagCollection {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
