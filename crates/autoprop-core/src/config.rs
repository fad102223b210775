//! Rule configuration
//!
//! Hosts hand configuration in as TOML text; there is no file discovery
//! here. Each rule can be disabled or have its severity overridden:
//!
//! ```toml
//! [rules."simplification/use-auto-property"]
//! enabled = true
//! severity = "warning"
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::diagnostics::Severity;
use crate::error::AutopropError;
use crate::result::Result;

/// Per-rule settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Overrides the rule's default severity when set
    #[serde(default)]
    pub severity: Option<Severity>,
}

fn default_enabled() -> bool {
    true
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: None,
        }
    }
}

/// Configuration for the whole lint run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LintConfig {
    #[serde(default)]
    pub rules: HashMap<String, RuleSettings>,
}

impl LintConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| AutopropError::config(e.to_string()))
    }

    /// The severity a rule should report with, or `None` when disabled
    pub fn effective_severity(&self, rule_id: &str, default: Severity) -> Option<Severity> {
        match self.rules.get(rule_id) {
            Some(settings) if !settings.enabled => None,
            Some(settings) => Some(settings.severity.unwrap_or(default)),
            None => Some(default),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_rule_is_not_mentioned() {
        let config = LintConfig::default();
        assert_eq!(
            config.effective_severity("simplification/use-auto-property", Severity::Info),
            Some(Severity::Info)
        );
    }

    #[test]
    fn severity_override_is_parsed() {
        let config = LintConfig::from_toml_str(
            r#"
            [rules."simplification/use-auto-property"]
            severity = "warning"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.effective_severity("simplification/use-auto-property", Severity::Info),
            Some(Severity::Warning)
        );
    }

    #[test]
    fn disabled_rule_reports_nothing() {
        let config = LintConfig::from_toml_str(
            r#"
            [rules."simplification/use-auto-property"]
            enabled = false
            "#,
        )
        .unwrap();
        assert_eq!(
            config.effective_severity("simplification/use-auto-property", Severity::Info),
            None
        );
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let error = LintConfig::from_toml_str("rules = 3").unwrap_err();
        assert!(matches!(error, AutopropError::Config { .. }));
    }
}
