//! Turn data: one question and its answer content.

use std::fmt;

use serde::Deserialize;

use crate::error::PayloadError;

/// Session-unique turn identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TurnId(String);

impl TurnId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TurnId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// The three overview paragraphs of an answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Overview {
    pub gene: String,
    pub qtl: String,
    pub relation: String,
}

/// A literature reference cited by an answer.
///
/// Ids are 1-based and follow render order within their turn.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Citation {
    pub id: u32,
    pub title: String,
    pub authors: String,
    pub journal: String,
    pub pmid: String,
}

/// Answer content as supplied by an answer service or payload file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnContent {
    #[serde(rename = "aiOverview")]
    pub overview: Overview,
    #[serde(default)]
    pub citations: Vec<Citation>,
    #[serde(default)]
    pub follow_up_questions: Vec<String>,
}

impl TurnContent {
    /// Check that citation ids count up from 1 in render order.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::CitationOrder`] for the first citation out of sequence.
    pub fn validate(&self) -> Result<(), PayloadError> {
        for (position, citation) in self.citations.iter().enumerate() {
            let expected = u32::try_from(position + 1).unwrap_or(u32::MAX);
            if citation.id != expected {
                return Err(PayloadError::CitationOrder {
                    position,
                    expected,
                    found: citation.id,
                });
            }
        }
        Ok(())
    }

    pub fn has_citation(&self, id: u32) -> bool {
        self.citations.iter().any(|c| c.id == id)
    }
}

/// One question-and-answer exchange. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    id: TurnId,
    query: String,
    content: TurnContent,
}

impl Turn {
    pub fn new(id: TurnId, query: impl Into<String>, content: TurnContent) -> Self {
        Self {
            id,
            query: query.into(),
            content,
        }
    }

    pub const fn id(&self) -> &TurnId {
        &self.id
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub const fn overview(&self) -> &Overview {
        &self.content.overview
    }

    pub fn citations(&self) -> &[Citation] {
        &self.content.citations
    }

    pub fn follow_up_questions(&self) -> &[String] {
        &self.content.follow_up_questions
    }

    pub const fn content(&self) -> &TurnContent {
        &self.content
    }
}
