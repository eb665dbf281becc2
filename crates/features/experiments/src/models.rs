use ihub_derive::api_model;

/// An A/B experiment definition.
#[api_model]
pub struct Experiment {
    /// Record ID
    pub id: String,
    /// Unique experiment name (used in the variant endpoint)
    pub name: String,
    /// What the experiment tests
    pub description: Option<String>,
    /// Variant labels, at least two
    pub variants: Vec<String>,
    /// Whether assignment is currently served
    pub active: bool,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

/// Payload for defining an experiment.
#[api_model]
pub struct CreateExperiment {
    pub name: String,
    pub description: Option<String>,
    pub variants: Vec<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

/// Partial update for an experiment.
#[api_model]
pub struct UpdateExperiment {
    pub description: Option<String>,
    pub variants: Option<Vec<String>>,
    pub active: Option<bool>,
}

/// The variant assigned to one visitor.
#[api_model]
pub struct VariantAssignment {
    /// Experiment name
    pub experiment: String,
    /// Assigned variant label
    pub variant: String,
}
