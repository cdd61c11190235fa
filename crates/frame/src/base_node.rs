// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Reference to the upstream relation a series reads its columns from.
///
/// The relation itself (its SQL, its dependencies) is owned by the model
/// builder; here it is only an identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseNode {
	name: String,
	generation: u32,
}

impl BaseNode {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			generation: 0,
		}
	}

	/// A new relation derived from this one, e.g. after materialization.
	pub fn derive(&self) -> Self {
		Self {
			name: self.name.clone(),
			generation: self.generation + 1,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn generation(&self) -> u32 {
		self.generation
	}
}

impl Display for BaseNode {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}#{}", self.name, self.generation)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_derived_node_differs() {
		let node = BaseNode::new("events");
		let derived = node.derive();
		assert_ne!(node, derived);
		assert_eq!(derived.name(), "events");
		assert_eq!(derived.generation(), 1);
		assert_eq!(derived.to_string(), "events#1");
	}
}
