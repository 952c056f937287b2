use super::example::Example;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Progress marker of a single step. A step without a status is treated as pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    #[default]
    Pending,
    Active,
    Completed,
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepStatus::Pending => write!(f, "pending"),
            StepStatus::Active => write!(f, "active"),
            StepStatus::Completed => write!(f, "completed"),
        }
    }
}

/// The kind of diagram a UI should draw for a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualizationType {
    Flow,
    Matrix,
    Graph,
    Sequence,
    Tree,
}

/// Display hint attached to a step. The model carries it around but never interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visualization {
    #[serde(rename = "type")]
    pub kind: VisualizationType,
    pub interactive: bool,
    /// Free-form renderer settings.
    #[serde(
        default,
        rename = "d3Config",
        alias = "config",
        skip_serializing_if = "Map::is_empty"
    )]
    pub config: Map<String, Value>,
}

impl Visualization {
    pub fn new(kind: VisualizationType) -> Self {
        Self {
            kind,
            interactive: true,
            config: Map::new(),
        }
    }
}

/// A partial `Visualization`, used to override selected fields of a base hint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualizationOverride {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<VisualizationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactive: Option<bool>,
    #[serde(
        default,
        rename = "d3Config",
        alias = "config",
        skip_serializing_if = "Map::is_empty"
    )]
    pub config: Map<String, Value>,
}

/// One stage of the simulated pipeline, possibly with nested sub-stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: String,
    pub title: String,
    pub description: String,
    pub order: u32,
    /// Doubles as the "is expanded" toggle driven by `expand_step`/`collapse_step`.
    pub expandable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_steps: Option<Vec<Step>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StepStatus>,
    /// Illustrative cost in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visualization: Option<Visualization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_data_example: Option<Example>,
}

impl Step {
    /// Creates a leaf step with no status, duration or display hint.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        order: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            order,
            expandable: false,
            sub_steps: None,
            status: None,
            duration: None,
            visualization: None,
            real_data_example: None,
        }
    }

    pub fn with_sub_steps(mut self, sub_steps: Vec<Step>) -> Self {
        self.sub_steps = Some(sub_steps);
        self
    }

    pub fn with_expandable(mut self, expandable: bool) -> Self {
        self.expandable = expandable;
        self
    }

    pub fn with_status(mut self, status: StepStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_visualization(mut self, kind: VisualizationType) -> Self {
        self.visualization = Some(Visualization::new(kind));
        self
    }

    /// The effective status, falling back to `Pending` when none is set.
    pub fn effective_status(&self) -> StepStatus {
        self.status.unwrap_or_default()
    }

    /// The direct children of this step, empty for a leaf.
    pub fn children(&self) -> &[Step] {
        self.sub_steps.as_deref().unwrap_or(&[])
    }
}
