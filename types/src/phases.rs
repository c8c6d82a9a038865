//! Clause-logic phases shown on the landing view.

use serde::{Deserialize, Serialize};

/// Accent color family for a phase title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    Blue,
    Yellow,
    Orange,
    Red,
}

/// How strongly an active phase stands out from its dimmed neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    Raised,
    Scaled,
    Pulse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayStyle {
    pub accent: Accent,
    pub emphasis: Emphasis,
}

/// One step of the cyclic display narrative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseRecord {
    pub title: String,
    pub description: String,
    pub style: DisplayStyle,
}

/// Fixed, non-empty, ordered set of phases addressed by index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseSet {
    phases: Vec<PhaseRecord>,
}

impl PhaseSet {
    /// Returns `None` for an empty list.
    #[must_use]
    pub fn new(phases: Vec<PhaseRecord>) -> Option<Self> {
        if phases.is_empty() {
            None
        } else {
            Some(Self { phases })
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PhaseRecord> {
        self.phases.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PhaseRecord> {
        self.phases.iter()
    }
}

fn phase(title: &str, description: &str, accent: Accent, emphasis: Emphasis) -> PhaseRecord {
    PhaseRecord {
        title: title.to_owned(),
        description: description.to_owned(),
        style: DisplayStyle { accent, emphasis },
    }
}

/// The four authored clause-logic phases, in narrative order.
#[must_use]
pub fn clause_phases() -> PhaseSet {
    PhaseSet {
        phases: vec![
            phase(
                "System Intent",
                "Legal structures encode intent through design",
                Accent::Blue,
                Emphasis::Raised,
            ),
            phase(
                "Embedded Risk",
                "Discretionary exposure accumulates in clause vectors",
                Accent::Yellow,
                Emphasis::Scaled,
            ),
            phase(
                "Structural Override",
                "Pre-compliant design enables semantic decoherence",
                Accent::Orange,
                Emphasis::Scaled,
            ),
            phase(
                "Test the System",
                "Simulate legal behavior through clause analysis",
                Accent::Red,
                Emphasis::Pulse,
            ),
        ],
    }
}
