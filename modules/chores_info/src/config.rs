use serde::{Deserialize, Serialize};

/// Configuration for the chores_info module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChoresInfoConfig {
    #[serde(default = "default_color")]
    pub default_color: String,
    #[serde(default)]
    pub error_status: ErrorStatusPolicy,
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,
    #[serde(default = "default_max_description_length")]
    pub max_description_length: usize,
}

/// How domain failures are turned into HTTP statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorStatusPolicy {
    /// 400 / 404 / 409 / 500 by error kind.
    #[default]
    Typed,
    /// Every failure is a 500 carrying the message.
    Legacy,
}

impl Default for ChoresInfoConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            error_status: ErrorStatusPolicy::default(),
            max_name_length: default_max_name_length(),
            max_description_length: default_max_description_length(),
        }
    }
}

fn default_color() -> String {
    "#3B82F6".to_string()
}

fn default_max_name_length() -> usize {
    100
}

fn default_max_description_length() -> usize {
    500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_fields() {
        let cfg: ChoresInfoConfig =
            serde_json::from_value(serde_json::json!({"error_status": "legacy"})).unwrap();
        assert_eq!(cfg.default_color, "#3B82F6");
        assert_eq!(cfg.error_status, ErrorStatusPolicy::Legacy);
        assert_eq!(cfg.max_name_length, 100);
        assert_eq!(cfg.max_description_length, 500);
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let res: Result<ChoresInfoConfig, _> =
            serde_json::from_value(serde_json::json!({"error_status": "strict"}));
        assert!(res.is_err());
    }
}
