//! Flat parameter state snapshots.
//!
//! Snapshots live inside a [`StateNode`] tree, the crate's minimal stand-in
//! for whatever container the embedding framework persists (plugin chunk,
//! preset file, session document). [`save_parameter_state`] writes every
//! parameter's normalized value into a child node named `params` under
//! attributes `param1..paramN`; [`load_parameter_state`] reads them back.
//!
//! The format is positional: attribute `param(i+1)` belongs to the
//! parameter at index `i` of the list passed in. There is no version
//! field; reordering the parameter list between save and load silently
//! remaps values. Keeping list order stable is the caller's contract.

use serde::{Deserialize, Serialize};

use crate::parameter::Parameter;

/// A named tree node holding float attributes, the unit of persisted
/// plugin state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateNode {
    name: String,
    #[serde(default)]
    attributes: Vec<(String, f64)>,
    #[serde(default)]
    children: Vec<StateNode>,
}

impl StateNode {
    /// Create an empty node.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Node name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append an empty child and return it for population.
    pub fn create_child(&mut self, name: impl Into<String>) -> &mut StateNode {
        self.children.push(StateNode::new(name));
        self.children.last_mut().unwrap()
    }

    /// First child with the given name, if any.
    pub fn child_by_name(&self, name: &str) -> Option<&StateNode> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Set an attribute, replacing any previous value under that name.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Attribute value, or `fallback` when absent.
    pub fn attribute_or(&self, name: &str, fallback: f64) -> f64 {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| *value)
            .unwrap_or(fallback)
    }
}

/// Write the current normalized value of every parameter into a `params`
/// child of `root`, keyed `param1..paramN` in list order.
pub fn save_parameter_state(root: &mut StateNode, parameters: &[Parameter]) {
    let params = root.create_child("params");
    for (i, parameter) in parameters.iter().enumerate() {
        params.set_attribute(format!("param{}", i + 1), parameter.get_normalized() as f64);
    }
}

/// Restore parameter values from a `params` child of `root`.
///
/// Each parameter reads `param(i+1)`, falling back to its current value
/// when the attribute is absent, and applies it through its normalized
/// setter (so discrete parameters re-quantize). A missing `params` node
/// leaves everything untouched.
pub fn load_parameter_state(root: &StateNode, parameters: &mut [Parameter]) {
    let Some(params) = root.child_by_name("params") else {
        return;
    };
    for (i, parameter) in parameters.iter_mut().enumerate() {
        let fallback = parameter.get_normalized() as f64;
        let value = params.attribute_or(&format!("param{}", i + 1), fallback);
        parameter.set_normalized(value as f32);
    }
}
