//! Action plan produced by a scope session

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::job::StructuredOutput;

/// Ordered, non-empty list of trimmed steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionPlan(Vec<String>);

impl ActionPlan {
    /// Extracts and normalizes the `action_plan` field of a scope result.
    ///
    /// Returns `None` when the field is missing, is not an array, or holds no
    /// non-blank steps.
    pub fn from_structured_output(output: &StructuredOutput) -> Option<Self> {
        let steps = output.get("action_plan")?.as_array()?;
        Self::normalize(steps)
    }

    /// Trims every step and drops the blank ones. Non-string steps keep their JSON text.
    pub fn normalize(steps: &[Value]) -> Option<Self> {
        let steps: Vec<String> = steps
            .iter()
            .map(|step| match step {
                Value::String(s) => s.trim().to_string(),
                other => other.to_string().trim().to_string(),
            })
            .filter(|step| !step.is_empty())
            .collect();

        (!steps.is_empty()).then_some(Self(steps))
    }

    pub fn steps(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Renders the plan as `- step` lines
    pub fn to_bullets(&self) -> String {
        self.0
            .iter()
            .map(|step| format!("- {}", step))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
