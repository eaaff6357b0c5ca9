use super::config::ScoringConfig;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(max_points) = config.max_points {
        if max_points == 0 {
            errors.push("scoring.max_points: must be at least 1".to_string());
        }
    }

    // The stronger of best 5k / best marathon always takes one place.
    if let Some(total_races) = config.total_races {
        if total_races == 0 {
            errors.push("scoring.total_races: must be at least 1".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = ScoringConfig {
            max_points: Some(25),
            total_races: Some(6),
        };
        assert!(validate_scoring(&config).is_ok());
    }

    #[test]
    fn test_default_config_valid() {
        assert!(validate_scoring(&ScoringConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_config_valid() {
        let config = ScoringConfig {
            max_points: None,
            total_races: None,
        };
        assert!(validate_scoring(&config).is_ok());
    }

    #[test]
    fn test_zero_max_points() {
        let config = ScoringConfig {
            max_points: Some(0),
            total_races: None,
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("max_points"));
    }

    #[test]
    fn test_multiple_errors_collected() {
        let config = ScoringConfig {
            max_points: Some(0),
            total_races: Some(0),
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[1].contains("total_races"));
    }
}
