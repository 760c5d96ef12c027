//! Topology configuration.

use serde::{Deserialize, Serialize};

/// Defines when the delay and bandwidth matrices are recomputed after the graph changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regeneration {
    /// Matrices are recomputed inside each mutating call.
    #[default]
    Eager,
    /// Mutating calls only invalidate the matrices, they are recomputed by the next query.
    Lazy,
}

/// Holds raw topology config parsed from YAML.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
struct RawTopologyConfig {
    pub directed_delay: Option<bool>,
    pub directed_bandwidth: Option<bool>,
    pub regeneration: Option<Regeneration>,
}

/// Represents topology configuration.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy, Default)]
pub struct TopologyConfig {
    /// Whether links are one-way when computing delays.
    pub directed_delay: bool,
    /// Whether links are one-way when computing bandwidths.
    pub directed_bandwidth: bool,
    /// Matrix regeneration policy.
    pub regeneration: Regeneration,
}

impl TopologyConfig {
    /// Parses config from YAML string (uses default values if some parameters are absent).
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        let default = Self::default();
        if yaml.trim().is_empty() {
            return Ok(default);
        }
        let raw: RawTopologyConfig = serde_yaml::from_str(yaml)?;
        Ok(Self {
            directed_delay: raw.directed_delay.unwrap_or(default.directed_delay),
            directed_bandwidth: raw.directed_bandwidth.unwrap_or(default.directed_bandwidth),
            regeneration: raw.regeneration.unwrap_or(default.regeneration),
        })
    }

    /// Creates topology config by reading parameter values from YAML file
    /// (uses default values if some parameters are absent).
    pub fn from_file(file_name: &str) -> Self {
        Self::from_yaml_str(
            &std::fs::read_to_string(file_name).unwrap_or_else(|_| panic!("Can't read file {}", file_name)),
        )
        .unwrap_or_else(|_| panic!("Can't parse YAML from file {}", file_name))
    }
}
