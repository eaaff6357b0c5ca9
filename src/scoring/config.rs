use serde::{Deserialize, Serialize};

/// Points for first place; each place below scores one fewer.
pub const MAX_POINTS: u32 = 25;

/// Most races that count toward a season total.
pub const TOTAL_RACES: usize = 6;

/// Championship scoring rules.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   max_points: 25
///   total_races: 6
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Points for first place, both by time and by age grade (default: 25)
    #[serde(default)]
    pub max_points: Option<u32>,

    /// Cap on races counted per athlete, including the best 5k and best
    /// marathon (default: 6)
    #[serde(default)]
    pub total_races: Option<usize>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_points: Some(MAX_POINTS),
            total_races: Some(TOTAL_RACES),
        }
    }
}

impl ScoringConfig {
    pub fn max_points(&self) -> u32 {
        self.max_points.unwrap_or(MAX_POINTS)
    }

    pub fn total_races(&self) -> usize {
        self.total_races.unwrap_or(TOTAL_RACES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scoring_config() {
        let config = ScoringConfig::default();

        assert_eq!(config.max_points, Some(25));
        assert_eq!(config.total_races, Some(6));
    }

    #[test]
    fn test_scoring_config_serde_roundtrip() {
        let config = ScoringConfig::default();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: ScoringConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_scoring_config_parse() {
        let yaml = r#"
max_points: 30
"#;
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.max_points(), 30);
        assert!(config.total_races.is_none());
        assert_eq!(config.total_races(), TOTAL_RACES);
    }

    #[test]
    fn test_empty_scoring_config_parse() {
        let yaml = "{}";
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        assert!(config.max_points.is_none());
        assert_eq!(config.max_points(), MAX_POINTS);
        assert_eq!(config.total_races(), TOTAL_RACES);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "bonus_points: 5";
        let result: Result<ScoringConfig, _> = serde_saphyr::from_str(yaml);
        assert!(result.is_err());
    }
}
