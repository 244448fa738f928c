//! Lays turns out as terminal lines and measures section extents.
//!
//! This is the measurement pass: every call produces the full line list and
//! the extent of every (turn, section), which the model then writes into the
//! [`SectionRegistry`](crate::layout::SectionRegistry).

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::conversation::payload::PROVENANCE;
use crate::conversation::{SectionId, Turn, TurnId, TurnStore};
use crate::layout::SectionExtent;

use super::tabs::{EvidenceTab, TabState, VisualTab};

/// Semantic kind of a laid-out line; drives styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    CardTop,
    CardBottom,
    Query,
    SectionRule,
    Subheading,
    Body,
    TabBar,
    GraphNode,
    GraphEdge,
    Placeholder,
    CitationTitle,
    CitationMeta,
    LinkTitle,
    LinkDetail,
    FollowUp,
}

/// What activating (clicking) a line does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineAction {
    Ask(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutLine {
    pub kind: LineKind,
    pub text: String,
    pub action: Option<LineAction>,
    /// Inside a turn card, drawn with the card gutter
    pub framed: bool,
}

impl LayoutLine {
    fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            action: None,
            framed: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentLayout {
    lines: Vec<LayoutLine>,
    extents: Vec<(TurnId, SectionId, SectionExtent)>,
}

impl DocumentLayout {
    pub fn lines(&self) -> &[LayoutLine] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line_at(&self, idx: usize) -> Option<&LayoutLine> {
        self.lines.get(idx)
    }

    /// Lines in `offset..offset + height`, clamped to the document.
    pub fn visible(&self, offset: usize, height: usize) -> &[LayoutLine] {
        let start = offset.min(self.lines.len());
        let end = offset.saturating_add(height).min(self.lines.len());
        &self.lines[start..end]
    }

    /// Measured extents in document order.
    pub fn extents(&self) -> &[(TurnId, SectionId, SectionExtent)] {
        &self.extents
    }
}

const GRAPH_TISSUE: &str = "Pancreas";
const GRAPH_SNP: &str = "rs2402203";
const GRAPH_GENE: &str = "CFTR";

/// Lay out every turn at the given text width.
pub fn layout_turns(store: &TurnStore, tabs: &TabState, width: u16) -> DocumentLayout {
    let mut builder = Builder {
        width: usize::from(width).max(8),
        layout: DocumentLayout::default(),
    };
    for (idx, turn) in store.iter().enumerate() {
        builder.turn(idx, turn, tabs);
    }
    builder.layout
}

struct Builder {
    width: usize,
    layout: DocumentLayout,
}

impl Builder {
    fn push(&mut self, kind: LineKind, text: impl Into<String>) {
        self.layout.lines.push(LayoutLine::new(kind, text));
    }

    fn blank(&mut self) {
        self.push(LineKind::Blank, "");
    }

    fn wrapped(&mut self, kind: LineKind, indent: usize, text: &str) {
        let pad = " ".repeat(indent);
        for line in wrap_words(text, self.width.saturating_sub(indent)) {
            self.push(kind, format!("{pad}{line}"));
        }
    }

    fn turn(&mut self, idx: usize, turn: &Turn, tabs: &TabState) {
        let card_top = self.layout.lines.len();
        self.push(LineKind::CardTop, format!("QUESTION {}", idx + 1));
        self.wrapped(LineKind::Query, 0, turn.query());
        self.blank();

        let turn_tabs = tabs.get(turn.id());
        for section in SectionId::ALL {
            let top = self.layout.lines.len();
            self.push(LineKind::SectionRule, section.label());
            match section {
                SectionId::AiOverview => self.overview(turn),
                SectionId::Visualizations => self.visualizations(turn_tabs.visual),
                SectionId::Evidence => self.evidence(turn, turn_tabs.evidence),
                SectionId::FollowUp => self.follow_up(turn),
            }
            self.blank();
            let height = self.layout.lines.len() - top;
            self.layout
                .extents
                .push((turn.id().clone(), section, SectionExtent::new(top, height)));
        }

        for line in &mut self.layout.lines[card_top + 1..] {
            line.framed = true;
        }
        self.push(LineKind::CardBottom, "");
        self.blank();
    }

    fn overview(&mut self, turn: &Turn) {
        let overview = turn.overview();
        let paragraphs = [
            ("GENE OVERVIEW:", overview.gene.as_str(), 1),
            ("QTL OVERVIEW:", overview.qtl.as_str(), 1),
            (
                "SPECIFIC RELATION TO TYPE 1 DIABETES:",
                overview.relation.as_str(),
                2,
            ),
        ];
        for (i, (heading, text, citation)) in paragraphs.into_iter().enumerate() {
            if i > 0 {
                self.blank();
            }
            self.push(LineKind::Subheading, heading);
            let marker = if turn.content().has_citation(citation) {
                format!(" [{citation}]")
            } else {
                String::new()
            };
            self.wrapped(LineKind::Body, 0, &format!("{text}{marker}"));
        }
    }

    fn visualizations(&mut self, active: VisualTab) {
        let labels: Vec<_> = VisualTab::ALL
            .iter()
            .map(|tab| (tab.label(), *tab == active))
            .collect();
        self.tab_bar(&labels);
        match active {
            VisualTab::KnowledgeGraph => {
                self.push(LineKind::GraphNode, format!("  ○ {GRAPH_TISSUE}"));
                self.push(LineKind::GraphEdge, "      ╲");
                self.push(LineKind::GraphNode, format!("       ◉ {GRAPH_GENE}"));
                self.push(LineKind::GraphEdge, "      ╱");
                self.push(LineKind::GraphNode, format!("  ○ {GRAPH_SNP}"));
            }
            VisualTab::EmpiricalEvidence => {
                self.wrapped(
                    LineKind::Placeholder,
                    2,
                    "Empirical evidence plots are not available for this answer yet.",
                );
            }
        }
    }

    fn evidence(&mut self, turn: &Turn, active: EvidenceTab) {
        let labels: Vec<_> = EvidenceTab::ALL
            .iter()
            .map(|tab| (tab.label(), *tab == active))
            .collect();
        self.tab_bar(&labels);
        match active {
            EvidenceTab::Reference => {
                if turn.citations().is_empty() {
                    self.push(LineKind::Placeholder, "  No references for this answer.");
                }
                for citation in turn.citations() {
                    self.wrapped(
                        LineKind::CitationTitle,
                        0,
                        &format!("{}. {}", citation.id, citation.title),
                    );
                    self.wrapped(LineKind::CitationMeta, 4, &citation.authors);
                    self.wrapped(
                        LineKind::CitationMeta,
                        4,
                        &format!("{}  PMID: {}", citation.journal, citation.pmid),
                    );
                }
            }
            EvidenceTab::Provenance => self.wrapped(LineKind::Body, 0, PROVENANCE),
            EvidenceTab::PankbaseLinks => {
                self.push(LineKind::LinkTitle, format!("→ Gene Detail: {GRAPH_GENE}"));
                self.push(LineKind::LinkDetail, "    Internal Genomics Data");
                self.push(LineKind::LinkTitle, format!("→ Locus: {GRAPH_SNP}"));
                self.push(LineKind::LinkDetail, "    PanKbase Variant Info");
            }
            EvidenceTab::ExternalLinks => {
                self.push(LineKind::LinkTitle, format!("↗ GTEx Portal ({GRAPH_GENE})"));
                self.push(LineKind::LinkDetail, "    https://gtexportal.org");
                self.push(LineKind::LinkTitle, "↗ PubMed Central");
                self.push(LineKind::LinkDetail, "    https://pubmed.ncbi.nlm.nih.gov");
            }
        }
    }

    fn follow_up(&mut self, turn: &Turn) {
        if turn.follow_up_questions().is_empty() {
            self.push(LineKind::Placeholder, "  No suggested follow-ups.");
        }
        for (n, question) in turn.follow_up_questions().iter().enumerate() {
            let first = self.layout.lines.len();
            self.wrapped(LineKind::FollowUp, 0, &format!("{}. {question} →", n + 1));
            for line in &mut self.layout.lines[first..] {
                line.action = Some(LineAction::Ask(question.clone()));
            }
        }
    }

    /// Tab labels packed greedily into as few lines as fit; the active one in brackets.
    fn tab_bar(&mut self, labels: &[(&str, bool)]) {
        let mut line = String::new();
        for (label, active) in labels {
            let item = if *active {
                format!("[{label}]")
            } else {
                format!(" {label} ")
            };
            if !line.is_empty() && line.width() + 1 + item.width() > self.width {
                self.push(LineKind::TabBar, std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(&item);
        }
        if !line.is_empty() {
            self.push(LineKind::TabBar, line);
        }
    }
}

/// Greedy word wrap by display width. Words wider than `width` are split.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();
        if current_width > 0 && current_width + 1 + word_width > width {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        if current_width > 0 {
            current.push(' ');
            current_width += 1;
        }
        if word_width <= width {
            current.push_str(word);
            current_width += word_width;
            continue;
        }
        for ch in word.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if current_width > 0 && current_width + ch_width > width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(ch);
            current_width += ch_width;
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::payload::{sample_content, seed_turn};
    use crate::conversation::{TurnContent, TurnId};

    fn two_turn_store() -> TurnStore {
        let mut store = TurnStore::new(seed_turn(sample_content()));
        store.append(Turn::new(
            TurnId::from("turn-2"),
            "What is CFTR?",
            sample_content(),
        ));
        store
    }

    #[test]
    fn test_wrap_words_respects_width() {
        let lines = wrap_words("the quick brown fox jumps over the lazy dog", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps over", "the lazy", "dog"]);
        assert!(lines.iter().all(|l| l.width() <= 10));
    }

    #[test]
    fn test_wrap_words_splits_long_words() {
        let lines = wrap_words("ENSG0000001626", 5);
        assert_eq!(lines, vec!["ENSG0", "00000", "1626"]);
    }

    #[test]
    fn test_wrap_empty_text_yields_one_empty_line() {
        assert_eq!(wrap_words("   ", 10), vec![String::new()]);
    }

    #[test]
    fn test_every_section_of_every_turn_is_measured_in_order() {
        let store = two_turn_store();
        let layout = layout_turns(&store, &TabState::default(), 60);
        let keys: Vec<_> = layout
            .extents()
            .iter()
            .map(|(turn, section, _)| (turn.as_str().to_string(), *section))
            .collect();
        let expected: Vec<_> = ["turn-1", "turn-2"]
            .iter()
            .flat_map(|t| SectionId::ALL.map(|s| ((*t).to_string(), s)))
            .collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_sections_of_a_turn_are_contiguous_and_disjoint() {
        let store = two_turn_store();
        let layout = layout_turns(&store, &TabState::default(), 60);
        for window in layout.extents().windows(2) {
            let (turn_a, _, a) = &window[0];
            let (turn_b, _, b) = &window[1];
            assert!(a.bottom() <= b.top, "extents overlap: {a:?} {b:?}");
            if turn_a == turn_b {
                assert_eq!(a.bottom(), b.top);
            }
        }
        for (_, section, extent) in layout.extents() {
            let line = layout.line_at(extent.top).unwrap();
            assert_eq!(line.kind, LineKind::SectionRule);
            assert_eq!(line.text, section.label());
        }
    }

    #[test]
    fn test_switching_evidence_tab_changes_height() {
        let store = two_turn_store();
        let turn = TurnId::from("turn-1");
        let evidence_height = |tabs: &TabState| {
            layout_turns(&store, tabs, 60)
                .extents()
                .iter()
                .find(|(t, s, _)| *t == turn && *s == SectionId::Evidence)
                .map(|(_, _, e)| e.height)
                .unwrap()
        };
        let mut tabs = TabState::default();
        let reference = evidence_height(&tabs);
        tabs.cycle_evidence(&turn);
        let provenance = evidence_height(&tabs);
        assert_ne!(reference, provenance);
    }

    #[test]
    fn test_follow_up_lines_carry_ask_action() {
        let store = TurnStore::new(seed_turn(sample_content()));
        let layout = layout_turns(&store, &TabState::default(), 60);
        let asks: Vec<_> = layout
            .lines()
            .iter()
            .filter_map(|l| match &l.action {
                Some(LineAction::Ask(q)) => Some(q.as_str()),
                None => None,
            })
            .collect();
        assert!(asks.contains(&"What are the target cells for CFTR in the pancreas?"));
    }

    #[test]
    fn test_citation_markers_skip_missing_citations() {
        let store = TurnStore::new(seed_turn(TurnContent::default()));
        let layout = layout_turns(&store, &TabState::default(), 60);
        assert!(layout.lines().iter().all(|l| !l.text.contains("[1]")));
        assert!(layout
            .lines()
            .iter()
            .any(|l| l.text.contains("No references for this answer.")));
    }

    #[test]
    fn test_card_interior_is_framed() {
        let store = TurnStore::new(seed_turn(sample_content()));
        let layout = layout_turns(&store, &TabState::default(), 60);
        let lines = layout.lines();
        assert_eq!(lines[0].kind, LineKind::CardTop);
        assert!(!lines[0].framed);
        let bottom = lines
            .iter()
            .position(|l| l.kind == LineKind::CardBottom)
            .unwrap();
        assert!(lines[1..bottom].iter().all(|l| l.framed));
        assert!(!lines[bottom].framed);
    }

    #[test]
    fn test_visible_clamps_to_document() {
        let store = TurnStore::new(seed_turn(sample_content()));
        let layout = layout_turns(&store, &TabState::default(), 60);
        let total = layout.line_count();
        assert_eq!(layout.visible(total - 2, 10).len(), 2);
        assert!(layout.visible(total + 5, 10).is_empty());
    }
}
