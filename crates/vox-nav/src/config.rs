//! Navigation Configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::math::MathWalkerKind;
use crate::walker::Granularity;

/// Iteration ceiling for any search loop
pub const MAX_STEPS: usize = 1000;

/// What happens when a move runs off the start or end of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapPolicy {
    /// Stay on the last node
    Stop,
    /// Jump to the other end straight away
    Wrap,
    /// Announce the edge first, wrap on the next attempt
    #[default]
    WrapAfterBoundary,
}

/// How much context is spoken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verbosity {
    Brief,
    #[default]
    Verbose,
}

/// Navigation configuration options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Iteration ceiling for traversal and find
    pub max_steps: usize,

    /// Flattened text limit of a group
    pub group_max_chars: usize,

    /// Soft wrap width for line navigation
    pub line_width: usize,

    pub wrap_policy: WrapPolicy,

    pub verbosity: Verbosity,

    /// Speak the line text before the unit on sentence, word and character moves
    pub speak_text_prefix: bool,

    /// Granularity used until the user picks another
    pub default_granularity: Granularity,

    /// Walker used when entering math
    pub math_walker: MathWalkerKind,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            max_steps: MAX_STEPS,
            group_max_chars: vox_a11y::DEFAULT_GROUP_MAX_CHARS,
            line_width: 80,
            wrap_policy: WrapPolicy::default(),
            verbosity: Verbosity::default(),
            speak_text_prefix: true,
            default_granularity: Granularity::Object,
            math_walker: MathWalkerKind::Tree,
        }
    }
}

impl NavConfig {
    /// Load from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        tracing::debug!("loaded navigation config: {:?}", config);
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
