//! Console configuration.

use bevy::prelude::*;

/// Settings for the console orchestrator and its renderers.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "persist", serde(default))]
pub struct ConsoleConfig {
    /// How many output lines a renderer shows, newest first.
    pub visible_lines: usize,
    /// Drawn before the typed line.
    pub prompt: String,
    /// Prepended to the echo of every submitted line.
    pub echo_prefix: String,
    /// Output line for a submission no command resolves.
    pub not_found_message: String,
    /// First output line, if any.
    pub banner: Option<String>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            visible_lines: 10,
            prompt: "> ".to_string(),
            echo_prefix: " >> ".to_string(),
            not_found_message: " -- Command not found -- ".to_string(),
            banner: Some(" ----------- Console -----------".to_string()),
        }
    }
}
