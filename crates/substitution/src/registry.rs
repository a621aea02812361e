use std::collections::HashMap;

use structure_identification::operators;

use crate::operator::SubstitutionOperator;
use crate::operators::{Erase, ExtractByBoundary, FillBoundingBox, Preserve, Recolor, Shift};

#[derive(Default)]
pub struct OperatorRegistry {
    operators: HashMap<String, Box<dyn SubstitutionOperator>>,
}

impl OperatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in operator. [`operators::GENERIC`] is deliberately absent.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(Recolor));
        registry.register(Box::new(Preserve));
        registry.register(Box::new(ExtractByBoundary));
        registry.register(Box::new(FillBoundingBox));
        registry.register(Box::new(Erase));
        registry.register(Box::new(Shift));
        debug_assert!(!registry.contains(operators::GENERIC));
        registry
    }

    pub fn register(
        &mut self,
        operator: Box<dyn SubstitutionOperator>,
    ) -> Option<Box<dyn SubstitutionOperator>> {
        self.operators.insert(operator.name().to_string(), operator)
    }

    pub fn get(&self, name: &str) -> Option<&dyn SubstitutionOperator> {
        self.operators.get(name).map(Box::as_ref)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operators.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.operators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
