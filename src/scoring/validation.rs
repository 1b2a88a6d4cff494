use super::scenario::ScenarioParams;

/// Validate scenario parameters at the boundary.
/// Returns all validation errors at once (not just the first).
pub fn validate_params(params: &ScenarioParams) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if !(0.5..=2.0).contains(&params.ai_adoption) {
        errors.push(format!(
            "scenario.ai_adoption: must be between 0.5 and 2.0 (got {})",
            params.ai_adoption
        ));
    }
    if !(0.0..=1.0).contains(&params.regulation) {
        errors.push(format!(
            "scenario.regulation: must be between 0.0 and 1.0 (got {})",
            params.regulation
        ));
    }
    if !(0.0..=1.0).contains(&params.education_investment) {
        errors.push(format!(
            "scenario.education_investment: must be between 0.0 and 1.0 (got {})",
            params.education_investment
        ));
    }
    if !(0.0..=1.0).contains(&params.corporate_incentives) {
        errors.push(format!(
            "scenario.corporate_incentives: must be between 0.0 and 1.0 (got {})",
            params.corporate_incentives
        ));
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
    fn test_default_params_valid() {
        assert!(validate_params(&ScenarioParams::default()).is_ok());
    }

    #[test]
    fn test_boundary_values_valid() {
        let params = ScenarioParams {
            ai_adoption: 2.0,
            regulation: 1.0,
            education_investment: 0.0,
            corporate_incentives: 1.0,
        };
        assert!(validate_params(&params).is_ok());
    }

    #[test]
    fn test_adoption_out_of_range() {
        let params = ScenarioParams {
            ai_adoption: 2.5,
            ..Default::default()
        };
        let errors = validate_params(&params).unwrap_err();
        assert!(errors[0].contains("ai_adoption"));
    }

    #[test]
    fn test_nan_rejected() {
        let params = ScenarioParams {
            regulation: f64::NAN,
            ..Default::default()
        };
        let errors = validate_params(&params).unwrap_err();
        assert!(errors[0].contains("regulation"));
    }

    #[test]
    fn test_collects_all_errors() {
        let params = ScenarioParams {
            ai_adoption: 0.0,          // Error 1
            regulation: -0.1,          // Error 2
            education_investment: 1.5, // Error 3
            corporate_incentives: 0.5,
        };
        let errors = validate_params(&params).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
