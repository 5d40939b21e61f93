use serde::{
    Deserialize,
    Serialize,
};

/// AWS and App Store resources owned by one app
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSet {
    pub lambda_functions: Vec<String>,
    pub dynamodb_tables: Vec<String>,
    pub api_gateway: Option<String>,
    pub app_store_id: Option<String>,
    pub cost_tag: Option<String>,
}

impl ResourceSet {
    pub fn is_empty(&self) -> bool {
        self.lambda_functions.is_empty()
            && self.dynamodb_tables.is_empty()
            && self.api_gateway.is_none()
            && self.app_store_id.is_none()
            && self.cost_tag.is_none()
    }
}
