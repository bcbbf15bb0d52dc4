use std::fmt;

use serde::{Deserialize, Serialize};

/// Chapter or verse number as it appears in the dataset. Most records carry a
/// plain number, some carry text such as `"16-17"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RefPart {
    Number(u32),
    Text(String),
}

impl fmt::Display for RefPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub id: u32,
    pub text: String,
    pub book: String,
    pub chapter: RefPart,
    pub verse: RefPart,
    #[serde(default)]
    pub topic: Vec<String>,
    #[serde(rename = "ageGroup")]
    pub age_group: String,
}

impl Verse {
    /// `Book chapter:verse`, e.g. `John 3:16`.
    pub fn reference(&self) -> String {
        format!("{} {}:{}", self.book, self.chapter, self.verse)
    }

    pub fn has_topic(&self, topic: &str) -> bool {
        self.topic.iter().any(|t| t == topic)
    }
}
