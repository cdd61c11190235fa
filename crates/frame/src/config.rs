// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use bach_expression::Dialect;
use bach_type::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Window, WindowFrame, error::FrameError};

/// Settings shared by every frame derived from the same source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	/// Dialect the generated SQL is rendered for.
	///
	/// Default: postgresql
	pub dialect: Dialect,

	/// Frame used by `DataFrame::window` when no frame is given.
	///
	/// Default: RANGE BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW
	pub window: WindowFrame,
}

impl Settings {
	pub fn new() -> Self {
		Self::default()
	}

	/// Reads settings from JSON. Missing fields take their default, the window
	/// frame is validated.
	pub fn from_json(json: &str) -> Result<Self> {
		let settings: Settings = serde_json::from_str(json).map_err(|err| FrameError::InvalidSettings {
			reason: err.to_string(),
		})?;
		Window::new(vec![], vec![], settings.window, None)?;
		debug!(dialect = %settings.dialect, "loaded settings");
		Ok(settings)
	}

	pub fn dialect(mut self, dialect: Dialect) -> Self {
		self.dialect = dialect;
		self
	}

	pub fn window(mut self, window: WindowFrame) -> Self {
		self.window = window;
		self
	}
}
