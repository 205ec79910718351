use sea_orm::DatabaseConnection;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Provider of module-specific configuration (raw JSON sections only).
pub trait ConfigProvider: Send + Sync {
    /// Returns raw JSON section for the module, if any.
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value>;
}

/// Everything a module may read while initializing.
#[derive(Clone)]
pub struct ModuleCtx {
    db: Option<DatabaseConnection>,
    config_provider: Option<Arc<dyn ConfigProvider>>,
    cancellation_token: CancellationToken,
    module_name: Option<Arc<str>>,
}

pub struct ModuleCtxBuilder {
    inner: ModuleCtx,
}

impl ModuleCtxBuilder {
    pub fn new(token: CancellationToken) -> Self {
        Self {
            inner: ModuleCtx {
                db: None,
                config_provider: None,
                cancellation_token: token,
                module_name: None,
            },
        }
    }

    pub fn with_db(mut self, db: DatabaseConnection) -> Self {
        self.inner.db = Some(db);
        self
    }

    pub fn with_config_provider(mut self, p: Arc<dyn ConfigProvider>) -> Self {
        self.inner.config_provider = Some(p);
        self
    }

    pub fn build(self) -> ModuleCtx {
        self.inner
    }
}

impl ModuleCtx {
    /// Scope context to a specific module name.
    pub fn for_module(&self, name: &str) -> Self {
        let mut scoped = self.clone();
        scoped.module_name = Some(Arc::<str>::from(name));
        scoped
    }

    /// SeaORM connection handle (cheap to clone).
    pub fn db(&self) -> Option<DatabaseConnection> {
        self.db.clone()
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation_token
    }

    pub fn current_module(&self) -> Option<&str> {
        self.module_name.as_deref()
    }

    /// Deserialize the module's config section into `T`.
    ///
    /// A missing section yields `T::default()`; a present but malformed section
    /// is an error naming the module.
    pub fn module_config<T: DeserializeOwned + Default>(&self) -> anyhow::Result<T> {
        let (Some(name), Some(p)) = (&self.module_name, &self.config_provider) else {
            return Ok(T::default());
        };
        match p.get_module_config(name) {
            Some(v) => serde_json::from_value::<T>(v.clone())
                .map_err(|e| anyhow::anyhow!("invalid {name} config: {e}")),
            None => Ok(T::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(deny_unknown_fields)]
    struct DemoCfg {
        #[serde(default)]
        flag: bool,
    }

    struct MapProvider(HashMap<String, serde_json::Value>);

    impl ConfigProvider for MapProvider {
        fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value> {
            self.0.get(module_name)
        }
    }

    fn ctx_with(entries: &[(&str, serde_json::Value)]) -> ModuleCtx {
        let map = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        ModuleCtxBuilder::new(CancellationToken::new())
            .with_config_provider(Arc::new(MapProvider(map)))
            .build()
    }

    #[test]
    fn missing_section_falls_back_to_default() {
        let ctx = ctx_with(&[]).for_module("demo");
        let cfg: DemoCfg = ctx.module_config().unwrap();
        assert_eq!(cfg, DemoCfg::default());
    }

    #[test]
    fn present_section_is_parsed() {
        let ctx = ctx_with(&[("demo", serde_json::json!({"flag": true}))]).for_module("demo");
        let cfg: DemoCfg = ctx.module_config().unwrap();
        assert!(cfg.flag);
        assert_eq!(ctx.current_module(), Some("demo"));
    }

    #[test]
    fn malformed_section_is_an_error() {
        let ctx = ctx_with(&[("demo", serde_json::json!({"unknown": 1}))]).for_module("demo");
        let err = ctx.module_config::<DemoCfg>().unwrap_err();
        assert!(err.to_string().contains("invalid demo config"));
    }
}
