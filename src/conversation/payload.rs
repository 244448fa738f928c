//! Built-in sample content and JSON payload loading.
//!
//! The sample stands in for a real answer backend: every simulated answer
//! reuses it with the submitted query text.

use std::path::Path;

use super::turn::{Citation, Overview, Turn, TurnContent, TurnId};
use crate::error::PayloadError;

/// Id of the seed turn shown on startup.
pub const SEED_TURN_ID: &str = "turn-1";

pub const SEED_QUERY: &str = "How does the SNP rs2402203 influence the expression of CFTR in Pancreas tissue, as reported by GTEx?";

const GENE_OVERVIEW: &str = "The gene CFTR (ENSG0000001626) encodes the cystic fibrosis transmembrane conductance regulator protein, which plays a crucial role in ion transport and is implicated in immune regulation. It is associated with type 1 diabetes (MONDO_0005147), indicating its potential role in autoimmune processes. CFTR is involved in regulatory pathways, interacting with other proteins such as CSK (ENSG00000103653) and ITGB7 (ENSG00000139626), which are also linked to immune functions. Notably, the SNP rs2402203 is related to CFTR and shows significant association with gene expression regulation in pancreatic tissues, highlighting its relevance in diabetes";

const QTL_OVERVIEW: &str = "The SNP rs2402203 is associated with the gene CFTR (ENSG0000001626) in the pancreas. The effect allele is C, with a slope of -2.36, indicating a negative association with gene expression. The posterior inclusion probability (PIP) is 0.70, suggesting a strong likelihood that this SNP is a causal variant. The nominal p-value is extremely low (4.84 x 10^-17), indicating high statistical significance for its association with CFTR expression in this tissue. There is no mention of a lead SNP different from rs2402203 in the provided data. This relationship is relevant to type 1 diabetes (MONDO_0005147)";

const RELATION_OVERVIEW: &str = "The gene CFTR (ENSG0000001626) is associated with Type 1 diabetes (MONDO_0005147) as an effector gene, indicating its potential role in the disease's pathogenesis. Evidence includes the identification of genetic variants, such as the SNP rs2402203, which is linked to CFTR and shows significant association with Type 1 diabetes (nominal p-value of 4.84e-17). Additionally, CFTR's expression is influenced by colocalized eQTLs, suggesting that variations in this gene may affect its expression and contribute to the disease";

/// Data-source statement shown under the Provenance evidence tab.
pub const PROVENANCE: &str = "Data synthesized from high-quality sources including GTEx Project V8 (expression and QTL data), NCBI RefSeq, and peer-reviewed literature indexed in PubMed. Statistical thresholds and causal variants were validated using fine-mapping pipelines.";

/// The built-in answer content.
pub fn sample_content() -> TurnContent {
    TurnContent {
        overview: Overview {
            gene: GENE_OVERVIEW.to_string(),
            qtl: QTL_OVERVIEW.to_string(),
            relation: RELATION_OVERVIEW.to_string(),
        },
        citations: vec![
            Citation {
                id: 1,
                title: "Fine-mapping, trans-ancestral and genomic analyses identify causal variants..."
                    .to_string(),
                authors: "Robertson CC, ..., Rich SS".to_string(),
                journal: "NATURE GENETICS. 2021;53(7):962-971.".to_string(),
                pmid: "34127860".to_string(),
            },
            Citation {
                id: 2,
                title: "Interpreting type 1 diabetes risk with genetics and single-cell epigenomics."
                    .to_string(),
                authors: "Chiou J, ..., Gaulton KJ".to_string(),
                journal: "NATURE. 2021;538(7838):252-257.".to_string(),
                pmid: "34012112".to_string(),
            },
        ],
        follow_up_questions: vec![
            "What are the target cells for CFTR in the pancreas?".to_string(),
            "Are there other SNPs in the same locus linked to T1D?".to_string(),
            "How does CFTR interact with CSK in autoimmune processes?".to_string(),
        ],
    }
}

/// The turn every session starts with.
pub fn seed_turn(content: TurnContent) -> Turn {
    Turn::new(TurnId::from(SEED_TURN_ID), SEED_QUERY, content)
}

/// Load and validate turn content from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON for the
/// content schema, or has citation ids out of sequence.
pub fn load_content(path: &Path) -> Result<TurnContent, PayloadError> {
    let raw = std::fs::read_to_string(path).map_err(|source| PayloadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_content(&raw)
}

/// Parse and validate turn content from JSON text.
///
/// # Errors
///
/// Returns an error for malformed JSON or out-of-sequence citation ids.
pub fn parse_content(raw: &str) -> Result<TurnContent, PayloadError> {
    let content: TurnContent = serde_json::from_str(raw)?;
    content.validate()?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_sample_content_is_valid() {
        let content = sample_content();
        assert!(content.validate().is_ok());
        assert_eq!(content.citations.len(), 2);
        assert_eq!(content.follow_up_questions.len(), 3);
    }

    #[test]
    fn test_seed_turn_uses_fixed_id_and_query() {
        let turn = seed_turn(sample_content());
        assert_eq!(turn.id().as_str(), "turn-1");
        assert!(turn.query().contains("rs2402203"));
    }

    #[test]
    fn test_load_content_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"aiOverview": {{"gene": "G", "qtl": "Q", "relation": "R"}},
                "citations": [],
                "followUpQuestions": ["Next?"]}}"#
        )
        .unwrap();
        let content = load_content(file.path()).unwrap();
        assert_eq!(content.overview.gene, "G");
        assert_eq!(content.follow_up_questions.len(), 1);
    }

    #[test]
    fn test_load_content_missing_file_is_io_error() {
        let err = load_content(Path::new("/nonexistent/payload.json")).unwrap_err();
        assert!(matches!(err, PayloadError::Io { .. }));
    }

    #[test]
    fn test_parse_content_rejects_bad_citation_order() {
        let raw = r#"{"aiOverview": {"gene": "", "qtl": "", "relation": ""},
            "citations": [{"id": 2, "title": "", "authors": "", "journal": "", "pmid": ""}]}"#;
        let err = parse_content(raw).unwrap_err();
        assert!(matches!(err, PayloadError::CitationOrder { found: 2, .. }));
    }
}
