//! Planner configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Search strategy used by the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Algorithm {
    /// Breadth-first search returning the first plan found.
    Exhaustive,
    /// Best-first search on accumulated cost plus heuristic.
    #[default]
    BestFirst,
}

impl Algorithm {
    /// Parse an optional property value.
    ///
    /// A missing value yields the default; an unrecognized one is an error.
    pub fn from_property(value: Option<&str>) -> Result<Self, ConfigError> {
        value.map_or(Ok(Self::default()), str::parse)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Exhaustive => "bfs",
            Algorithm::BestFirst => "astar",
        }
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bfs" | "exhaustive" | "breadth-first" => Ok(Algorithm::Exhaustive),
            "astar" | "a*" | "best-first" | "bestfirst" => Ok(Algorithm::BestFirst),
            _ => Err(ConfigError::UnknownAlgorithm(value.to_string())),
        }
    }
}

impl TryFrom<String> for Algorithm {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Algorithm> for String {
    fn from(algorithm: Algorithm) -> Self {
        algorithm.as_str().to_string()
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bounds on a single planning call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchLimits {
    /// Maximum number of transitions expanded before giving up.
    pub max_expansions: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub algorithm: Algorithm,
    pub limits: SearchLimits,
}

impl PlannerConfig {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            limits: SearchLimits::default(),
        }
    }

    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.limits.max_expansions = Some(limit);
        self
    }
}
