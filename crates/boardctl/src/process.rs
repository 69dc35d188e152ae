//! The local sprint-process description (`data/sprint_process.json`) and the
//! card text assembled from it.
//!
//! Card descriptions are built deterministically: fixed section headers
//! concatenated with the phase's fields in a fixed order, so re-running a
//! bootstrap always produces the same text.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// The whole process document: ordered phases plus named spec templates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SprintProcess {
    #[serde(default)]
    pub phases: Vec<Phase>,
    #[serde(default)]
    pub templates: Templates,
}

/// One phase of the operating cycle.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    /// Ordinal phase number
    pub num: u32,
    /// Phase title
    pub title: String,
    /// Week tag ("A" or "B")
    #[serde(default = "default_week")]
    pub week: String,
    /// Timebox string (e.g., "Days 1–2")
    #[serde(default)]
    pub timebox: String,
    /// What the phase is for
    pub purpose: String,
    /// Required outputs
    #[serde(default)]
    pub outputs: Vec<String>,
    /// Exit criteria
    #[serde(default)]
    pub exit_criteria: Vec<String>,
    /// Checklist items (plain strings or `{label}` objects)
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
}

fn default_week() -> String {
    "A".to_string()
}

/// A checklist item, either a bare string or an object with a `label` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ChecklistItem {
    Text(String),
    Labelled { label: String },
}

impl ChecklistItem {
    /// The display label of the item.
    pub fn label(&self) -> &str {
        match self {
            Self::Text(s) => s,
            Self::Labelled { label } => label,
        }
    }
}

/// Named spec templates attached to specific phases.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Templates {
    #[serde(default)]
    pub problem_spec: Option<SpecTemplate>,
    #[serde(default)]
    pub solution_spec: Option<SpecTemplate>,
    #[serde(default)]
    pub release_post: Option<SpecTemplate>,
}

/// A free-text template with a checklist of fields to fill in.
#[derive(Debug, Clone, Deserialize)]
pub struct SpecTemplate {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fields: Vec<String>,
}

impl SprintProcess {
    /// Load the process document from a JSON file.
    ///
    /// # Errors
    /// Returns error when the file is missing or malformed; callers treat
    /// this as a precondition failure.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read process data from {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse process data in {}", path.display()))
    }
}

impl Phase {
    /// List/card display name: `"{num}. {title} ({timebox})"`.
    pub fn display_name(&self) -> String {
        format!("{}. {} ({})", self.num, self.title, self.timebox)
    }

    /// Description for a phase placeholder card: purpose, outputs, and exit
    /// criteria (the checklist goes on the card as a real checklist).
    pub fn placeholder_desc(&self) -> String {
        let mut lines = vec![format!("**Purpose:** {}", self.purpose), String::new()];
        lines.push("**Outputs:**".to_string());
        for o in &self.outputs {
            lines.push(format!("- {o}"));
        }
        lines.push(String::new());
        lines.push("**Exit criteria:**".to_string());
        for e in &self.exit_criteria {
            lines.push(format!("- {e}"));
        }
        lines.join("\n")
    }

    /// Description for a phase template card: like the placeholder text but
    /// with the checklist rendered inline as unchecked boxes.
    pub fn template_desc(&self) -> String {
        let mut lines = vec![format!("**Purpose:** {}", self.purpose), String::new()];
        lines.push("**Required outputs:**".to_string());
        for o in &self.outputs {
            lines.push(format!("- {o}"));
        }
        lines.push(String::new());
        lines.push("**Exit criteria:**".to_string());
        for e in &self.exit_criteria {
            lines.push(format!("- {e}"));
        }
        lines.push(String::new());
        lines.push("**Checklist (use card checklist):**".to_string());
        for c in &self.checklist {
            lines.push(format!("- [ ] {}", c.label()));
        }
        lines.join("\n")
    }
}

impl SpecTemplate {
    /// Description for a spec template card: free text plus its fields as
    /// unchecked boxes.
    pub fn card_desc(&self) -> String {
        let mut lines = vec![self.description.clone(), String::new()];
        lines.push("**Fields:**".to_string());
        for f in &self.fields {
            lines.push(format!("- [ ] {f}"));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_and_object_checklist_items() {
        let json = r#"{
            "phases": [{
                "num": 1,
                "title": "LLM Research & Problem Narrowing",
                "week": "A",
                "timebox": "Days 1-2",
                "purpose": "Identify problems.",
                "outputs": ["Defined segment"],
                "exitCriteria": ["Problems are testable"],
                "checklist": ["Plain item", { "id": "c2", "label": "Labelled item" }]
            }]
        }"#;
        let process: SprintProcess = serde_json::from_str(json).unwrap();
        let phase = &process.phases[0];
        let labels: Vec<_> = phase.checklist.iter().map(ChecklistItem::label).collect();
        assert_eq!(labels, vec!["Plain item", "Labelled item"]);
        assert_eq!(phase.display_name(), "1. LLM Research & Problem Narrowing (Days 1-2)");
    }

    #[test]
    fn week_defaults_to_a() {
        let json = r#"{ "phases": [{ "num": 1, "title": "T", "purpose": "P" }] }"#;
        let process: SprintProcess = serde_json::from_str(json).unwrap();
        assert_eq!(process.phases[0].week, "A");
    }

    #[test]
    fn placeholder_desc_is_deterministic() {
        let phase = Phase {
            num: 3,
            title: "Ground Truth Validation".to_string(),
            week: "A".to_string(),
            timebox: "Days 4-5".to_string(),
            purpose: "Confirm the problem exists.".to_string(),
            outputs: vec!["Operator notes".to_string()],
            exit_criteria: vec!["One operator confirms the pain".to_string()],
            checklist: vec![],
        };
        assert_eq!(
            phase.placeholder_desc(),
            "**Purpose:** Confirm the problem exists.\n\
             \n\
             **Outputs:**\n\
             - Operator notes\n\
             \n\
             **Exit criteria:**\n\
             - One operator confirms the pain"
        );
    }

    #[test]
    fn template_desc_renders_checklist_boxes() {
        let phase = Phase {
            num: 1,
            title: "T".to_string(),
            week: "A".to_string(),
            timebox: "Days 1-2".to_string(),
            purpose: "P".to_string(),
            outputs: vec![],
            exit_criteria: vec![],
            checklist: vec![ChecklistItem::Text("Do the thing".to_string())],
        };
        assert!(phase.template_desc().contains("- [ ] Do the thing"));
        assert!(phase.template_desc().contains("**Required outputs:**"));
    }

    #[test]
    fn spec_template_desc_lists_fields() {
        let template = SpecTemplate {
            title: "Problem Spec (1 page)".to_string(),
            description: "Used in Phase 1 (draft) and Phase 4 (final).".to_string(),
            fields: vec!["Segment".to_string(), "Persona".to_string()],
        };
        assert_eq!(
            template.card_desc(),
            "Used in Phase 1 (draft) and Phase 4 (final).\n\n**Fields:**\n- [ ] Segment\n- [ ] Persona"
        );
    }
}
