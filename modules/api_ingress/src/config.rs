use serde::{Deserialize, Serialize};

/// HTTP host settings, read from `modules.api_ingress`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiIngressConfig {
    /// `host:port`; empty means "use server.host/server.port".
    #[serde(default)]
    pub bind_addr: String,
    #[serde(default = "default_base_path")]
    pub base_path: String,
    #[serde(default = "default_enable_docs")]
    pub enable_docs: bool,
    #[serde(default)]
    pub cors_enabled: bool,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

fn default_base_path() -> String {
    "/api/v1".to_string()
}

fn default_enable_docs() -> bool {
    true
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_body_limit_bytes() -> usize {
    1024 * 1024
}

impl Default for ApiIngressConfig {
    fn default() -> Self {
        Self {
            bind_addr: String::new(),
            base_path: default_base_path(),
            enable_docs: default_enable_docs(),
            cors_enabled: false,
            request_timeout_secs: default_request_timeout_secs(),
            body_limit_bytes: default_body_limit_bytes(),
        }
    }
}

impl ApiIngressConfig {
    /// Fill `bind_addr` from the server section when it was left empty.
    pub fn with_server_defaults(mut self, host: &str, port: u16) -> Self {
        if self.bind_addr.trim().is_empty() {
            self.bind_addr = format!("{host}:{port}");
        }
        self
    }

    /// Base path without a trailing slash; `""` when APIs live at the root.
    pub fn normalized_base_path(&self) -> String {
        let trimmed = self.base_path.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_section_uses_defaults() {
        let cfg: ApiIngressConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(cfg.base_path, "/api/v1");
        assert!(cfg.enable_docs);
        assert!(!cfg.cors_enabled);
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.body_limit_bytes, 1024 * 1024);
    }

    #[test]
    fn bind_addr_derived_from_server() {
        let cfg = ApiIngressConfig::default().with_server_defaults("0.0.0.0", 9000);
        assert_eq!(cfg.bind_addr, "0.0.0.0:9000");

        let explicit = ApiIngressConfig {
            bind_addr: "127.0.0.1:1".into(),
            ..Default::default()
        }
        .with_server_defaults("0.0.0.0", 9000);
        assert_eq!(explicit.bind_addr, "127.0.0.1:1");
    }

    #[test]
    fn base_path_normalization() {
        let mk = |p: &str| ApiIngressConfig {
            base_path: p.into(),
            ..Default::default()
        };
        assert_eq!(mk("/api/v1/").normalized_base_path(), "/api/v1");
        assert_eq!(mk("api").normalized_base_path(), "/api");
        assert_eq!(mk("/").normalized_base_path(), "");
    }

    #[test]
    fn unknown_fields_rejected() {
        let res: Result<ApiIngressConfig, _> =
            serde_json::from_value(serde_json::json!({"bind": "x"}));
        assert!(res.is_err());
    }
}
