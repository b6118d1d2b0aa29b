use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where generated text comes from during an evaluation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Read previously captured outputs from disk.
    #[default]
    Mock,
    /// Call the article generator for every sample.
    Live,
}

impl RunMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RunMode::Mock => "mock",
            RunMode::Live => "live",
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mock" | "cached" => Ok(RunMode::Mock),
            "live" => Ok(RunMode::Live),
            other => Err(format!("Mode must be 'mock' or 'live', got '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_cached_alias() {
        assert_eq!("cached".parse::<RunMode>().unwrap(), RunMode::Mock);
        assert_eq!("MOCK".parse::<RunMode>().unwrap(), RunMode::Mock);
        assert_eq!("live".parse::<RunMode>().unwrap(), RunMode::Live);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("replay".parse::<RunMode>().is_err());
    }

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RunMode::Live).unwrap(), "\"live\"");
    }
}
