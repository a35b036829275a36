use std::{fmt, ops::Index};

use crate::error::QuizError;

/// Smallest vocabulary that still has a wrong answer to offer.
pub const MIN_TAGS: usize = 2;

/// Ordered, de-duplicated set of tags. Indices never change after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagVocabulary {
    tags: Vec<String>,
}

impl TagVocabulary {
    /// Builds a vocabulary keeping the first occurrence of every tag.
    /// Surrounding whitespace is trimmed and blank entries are skipped.
    pub fn new<I, S>(tags: I) -> Result<Self, QuizError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();
        for tag in tags {
            let tag = tag.as_ref().trim();
            if tag.is_empty() || unique.iter().any(|known| known == tag) {
                continue;
            }
            unique.push(tag.to_owned());
        }

        if unique.len() < MIN_TAGS {
            return Err(QuizError::InsufficientVocabulary {
                required: MIN_TAGS,
                available: unique.len(),
            });
        }

        Ok(Self { tags: unique })
    }

    /// Parses the comma separated form used by the `TAGS` variable.
    pub fn parse(raw: &str) -> Result<Self, QuizError> {
        Self::new(raw.split(','))
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.tags.get(index).map(String::as_str)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|known| known == tag)
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl Index<usize> for TagVocabulary {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.tags[index]
    }
}

impl fmt::Display for TagVocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tags.join(","))
    }
}
