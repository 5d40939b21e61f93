use indexmap::IndexMap;

use crate::domain::ResourceSet;
use crate::infrastructure::config::AppFileConfig;

/// Maps app ids to the resources they own. Lookups never fail: unknown ids
/// resolve to an empty set.
#[derive(Debug, Clone, Default)]
pub struct ResourceResolver {
    apps: IndexMap<String, ResourceSet>,
}

impl ResourceResolver {
    pub fn new(apps: IndexMap<String, ResourceSet>) -> Self {
        Self { apps }
    }

    pub fn from_config(apps: &IndexMap<String, AppFileConfig>) -> Self {
        let apps = apps
            .iter()
            .map(|(app_id, app)| {
                let resources = ResourceSet {
                    lambda_functions: app.lambda_functions.clone(),
                    dynamodb_tables: app.dynamodb_tables.clone(),
                    api_gateway: non_empty(app.api_gateway.as_deref()),
                    app_store_id: non_empty(app.app_store_id.as_deref()),
                    cost_tag: non_empty(app.cost_tag.as_deref()).or_else(|| Some(app_id.clone())),
                };
                (app_id.clone(), resources)
            })
            .collect();

        Self { apps }
    }

    pub fn resolve(&self, app_id: &str) -> ResourceSet {
        self.apps.get(app_id).cloned().unwrap_or_default()
    }

    pub fn lambda_functions(&self, app_id: &str) -> Vec<String> {
        self.apps
            .get(app_id)
            .map(|r| r.lambda_functions.clone())
            .unwrap_or_default()
    }

    pub fn dynamodb_tables(&self, app_id: &str) -> Vec<String> {
        self.apps
            .get(app_id)
            .map(|r| r.dynamodb_tables.clone())
            .unwrap_or_default()
    }

    pub fn api_gateway(&self, app_id: &str) -> Option<String> {
        self.apps.get(app_id).and_then(|r| r.api_gateway.clone())
    }

    pub fn app_store_id(&self, app_id: &str) -> Option<String> {
        self.apps.get(app_id).and_then(|r| r.app_store_id.clone())
    }

    pub fn app_ids(&self) -> impl Iterator<Item = &str> {
        self.apps.keys().map(String::as_str)
    }

    pub fn apps(&self) -> &IndexMap<String, ResourceSet> {
        &self.apps
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
