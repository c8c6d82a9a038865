//! Authored case studies and the validated case catalog.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::RiskLevel;

/// An authored historical example with structured risk metadata.
///
/// Records are display-only: `amount` and `date` are free-form strings and are
/// never parsed. `risk_indicators` and `override_path` keep their authored order;
/// the override path is a causal sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    pub id: String,
    pub title: String,
    pub sector: String,
    pub amount: String,
    pub date: String,
    pub status: String,
    pub risk_level: RiskLevel,
    pub typology: String,
    pub description: String,
    pub original_clause: String,
    #[serde(default)]
    pub risk_indicators: Vec<String>,
    #[serde(default)]
    pub override_path: Vec<String>,
    pub outcome: String,
    pub preventable: bool,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("case catalog must contain at least one case")]
    Empty,
    #[error("duplicate case id: {0}")]
    DuplicateId(String),
    #[error("invalid case library: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Ordered, non-empty list of case records with unique ids.
///
/// The list is fixed at construction; there is no insert or remove.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseCatalog {
    cases: Vec<CaseRecord>,
}

impl CaseCatalog {
    pub fn new(cases: Vec<CaseRecord>) -> Result<Self, CatalogError> {
        if cases.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::with_capacity(cases.len());
        for case in &cases {
            if !seen.insert(case.id.as_str()) {
                return Err(CatalogError::DuplicateId(case.id.clone()));
            }
        }
        Ok(Self { cases })
    }

    /// Parse a JSON array of case records (camelCase keys) and validate it.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let cases: Vec<CaseRecord> = serde_json::from_str(json)?;
        Self::new(cases)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CaseRecord> {
        self.cases.get(index)
    }

    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.cases.iter().position(|case| case.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CaseRecord> {
        self.cases.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[CaseRecord] {
        &self.cases
    }

    /// Fraction of cases flagged as preventable, in `[0.0, 1.0]`.
    #[must_use]
    pub fn preventable_share(&self) -> f64 {
        let preventable = self.cases.iter().filter(|c| c.preventable).count();
        preventable as f64 / self.cases.len() as f64
    }
}

impl<'a> IntoIterator for &'a CaseCatalog {
    type Item = &'a CaseRecord;
    type IntoIter = std::slice::Iter<'a, CaseRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.cases.iter()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

fn risk(value: f64) -> RiskLevel {
    RiskLevel::new(value).expect("authored risk levels are within bounds")
}

/// The built-in library of structural retrospectives.
#[must_use]
pub fn case_library() -> CaseCatalog {
    let cases = vec![
        CaseRecord {
            id: "L002".into(),
            title: "Article 72 Procurement Override".into(),
            sector: "Public Infrastructure".into(),
            amount: "€847M".into(),
            date: "2019-2022".into(),
            status: "Structural Bypass Detected".into(),
            risk_level: risk(0.91),
            typology: "DG + RT".into(),
            description: "Emergency procurement clause allowed systematic bypass of competitive \
                          bidding through temporal administrative compression."
                .into(),
            original_clause: "\"In cases of urgent operational necessity, the contracting \
                              authority may proceed with direct procurement procedures, subject \
                              to post-hoc administrative review.\""
                .into(),
            risk_indicators: strings(&[
                "Unbounded emergency definition",
                "Post-hoc review mechanism",
                "Direct procurement pathway",
                "Administrative self-determination",
            ]),
            override_path: strings(&[
                "Emergency declaration",
                "Direct procurement activation",
                "Administrative review bypass",
                "Structural completion",
            ]),
            outcome: "€847M in contracts awarded without competition. Administrative review \
                      never conducted. Structural override became institutional norm."
                .into(),
            preventable: true,
        },
        CaseRecord {
            id: "L017".into(),
            title: "Discretionary Grant Allocation".into(),
            sector: "Regional Development".into(),
            amount: "€312M".into(),
            date: "2020-2021".into(),
            status: "Timeline Compression".into(),
            risk_level: risk(0.74),
            typology: "DG + CI".into(),
            description: "Grant eligibility criteria contained semantic contradictions enabling \
                          administrative discretion expansion."
                .into(),
            original_clause: "\"Grant recipients must demonstrate both innovation capacity and \
                              established operational history, with final determination at \
                              administrative discretion.\""
                .into(),
            risk_indicators: strings(&[
                "Contradictory qualification requirements",
                "Administrative discretion clause",
                "Undefined determination criteria",
                "Temporal pressure mechanisms",
            ]),
            override_path: strings(&[
                "Contradiction exploitation",
                "Discretion amplification",
                "Criteria nullification",
                "Selective application",
            ]),
            outcome: "€312M allocated to predetermined recipients. Contradiction used to justify \
                      any decision. Eligibility became meaningless."
                .into(),
            preventable: true,
        },
        CaseRecord {
            id: "L023".into(),
            title: "Regulatory Exemption Cascade".into(),
            sector: "Financial Services".into(),
            amount: "€1.2B".into(),
            date: "2018-2020".into(),
            status: "Clause Interference".into(),
            risk_level: risk(0.88),
            typology: "RT + SB".into(),
            description: "Regulatory exemption for 'innovative financial products' created \
                          systematic oversight bypass through definitional ambiguity."
                .into(),
            original_clause: "\"Innovative financial products may be exempted from standard \
                              regulatory requirements pending comprehensive assessment, with \
                              interim operational approval.\""
                .into(),
            risk_indicators: strings(&[
                "Innovation definition ambiguity",
                "Pending assessment loophole",
                "Interim approval mechanism",
                "Standard requirement bypass",
            ]),
            override_path: strings(&[
                "Innovation claim",
                "Interim approval",
                "Assessment delay",
                "Exemption normalization",
            ]),
            outcome: "€1.2B in products operated without oversight. Assessment perpetually \
                      delayed. Exemption became permanent operational state."
                .into(),
            preventable: true,
        },
    ];

    CaseCatalog::new(cases).expect("authored case library is non-empty with unique ids")
}
