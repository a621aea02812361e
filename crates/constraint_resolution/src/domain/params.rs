use serde::{Deserialize, Serialize};

fn default_preserve() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionParams {
    pub input_structure: String,
    pub output_structure: String,
    #[serde(default = "default_preserve")]
    pub preserve_non_matching: bool,
    /// Opaque; only used to correlate unknown-structure events.
    #[serde(default)]
    pub problem_id: String,
}

impl ResolutionParams {
    pub fn new(input_structure: impl Into<String>, output_structure: impl Into<String>) -> Self {
        Self {
            input_structure: input_structure.into(),
            output_structure: output_structure.into(),
            preserve_non_matching: true,
            problem_id: String::new(),
        }
    }

    pub fn with_problem_id(mut self, problem_id: impl Into<String>) -> Self {
        self.problem_id = problem_id.into();
        self
    }

    pub fn clearing_non_matching(mut self) -> Self {
        self.preserve_non_matching = false;
        self
    }
}
