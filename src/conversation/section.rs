//! The fixed set of sub-views every turn is split into.

use std::fmt;
use std::str::FromStr;

use crate::error::ViewError;

/// One of the four sub-views of a turn.
///
/// The declaration order is the document order. Scroll resolution tests
/// sections in exactly this order, so it must not be rearranged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionId {
    #[default]
    AiOverview,
    Visualizations,
    Evidence,
    FollowUp,
}

impl SectionId {
    /// All sections in document order.
    pub const ALL: [Self; 4] = [
        Self::AiOverview,
        Self::Visualizations,
        Self::Evidence,
        Self::FollowUp,
    ];

    /// Stable identifier, as used in payloads and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AiOverview => "ai-overview",
            Self::Visualizations => "visualizations",
            Self::Evidence => "evidence",
            Self::FollowUp => "follow-up",
        }
    }

    /// Sidebar / section header label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::AiOverview => "AI OVERVIEW",
            Self::Visualizations => "VISUALIZATIONS",
            Self::Evidence => "EVIDENCE",
            Self::FollowUp => "FOLLOW UP",
        }
    }

    /// Position within [`SectionId::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn next(self) -> Option<Self> {
        match self {
            Self::AiOverview => Some(Self::Visualizations),
            Self::Visualizations => Some(Self::Evidence),
            Self::Evidence => Some(Self::FollowUp),
            Self::FollowUp => None,
        }
    }

    pub const fn prev(self) -> Option<Self> {
        match self {
            Self::AiOverview => None,
            Self::Visualizations => Some(Self::AiOverview),
            Self::Evidence => Some(Self::Visualizations),
            Self::FollowUp => Some(Self::Evidence),
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionId {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| ViewError::UnknownSection(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_document_order() {
        for (idx, section) in SectionId::ALL.iter().enumerate() {
            assert_eq!(section.index(), idx);
        }
    }

    #[test]
    fn test_parse_known_ids() {
        assert_eq!("ai-overview".parse::<SectionId>().unwrap(), SectionId::AiOverview);
        assert_eq!("follow-up".parse::<SectionId>().unwrap(), SectionId::FollowUp);
    }

    #[test]
    fn test_parse_unknown_id_is_rejected() {
        let err = "summary".parse::<SectionId>().unwrap_err();
        assert_eq!(err, ViewError::UnknownSection("summary".to_string()));
    }

    #[test]
    fn test_next_and_prev_walk_the_fixed_order() {
        assert_eq!(SectionId::AiOverview.next(), Some(SectionId::Visualizations));
        assert_eq!(SectionId::FollowUp.next(), None);
        assert_eq!(SectionId::AiOverview.prev(), None);
        assert_eq!(SectionId::FollowUp.prev(), Some(SectionId::Evidence));
    }
}
