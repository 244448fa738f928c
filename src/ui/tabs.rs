//! Per-turn content tabs of the visualization and evidence sections.

use std::collections::HashMap;

use crate::conversation::TurnId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VisualTab {
    #[default]
    KnowledgeGraph,
    EmpiricalEvidence,
}

impl VisualTab {
    pub const ALL: [Self; 2] = [Self::KnowledgeGraph, Self::EmpiricalEvidence];

    pub const fn label(self) -> &'static str {
        match self {
            Self::KnowledgeGraph => "Knowledge Graph",
            Self::EmpiricalEvidence => "Empirical Evidence",
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::KnowledgeGraph => Self::EmpiricalEvidence,
            Self::EmpiricalEvidence => Self::KnowledgeGraph,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EvidenceTab {
    #[default]
    Reference,
    Provenance,
    PankbaseLinks,
    ExternalLinks,
}

impl EvidenceTab {
    pub const ALL: [Self; 4] = [
        Self::Reference,
        Self::Provenance,
        Self::PankbaseLinks,
        Self::ExternalLinks,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Reference => "Reference",
            Self::Provenance => "Provenance",
            Self::PankbaseLinks => "PanKbase Links",
            Self::ExternalLinks => "External Links",
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::Reference => Self::Provenance,
            Self::Provenance => Self::PankbaseLinks,
            Self::PankbaseLinks => Self::ExternalLinks,
            Self::ExternalLinks => Self::Reference,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnTabs {
    pub visual: VisualTab,
    pub evidence: EvidenceTab,
}

/// Tab selection for every turn; turns never touched use the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabState {
    tabs: HashMap<TurnId, TurnTabs>,
}

impl TabState {
    pub fn get(&self, turn: &TurnId) -> TurnTabs {
        self.tabs.get(turn).copied().unwrap_or_default()
    }

    pub fn cycle_visual(&mut self, turn: &TurnId) -> VisualTab {
        let tabs = self.tabs.entry(turn.clone()).or_default();
        tabs.visual = tabs.visual.next();
        tabs.visual
    }

    pub fn cycle_evidence(&mut self, turn: &TurnId) -> EvidenceTab {
        let tabs = self.tabs.entry(turn.clone()).or_default();
        tabs.evidence = tabs.evidence.next();
        tabs.evidence
    }
}
