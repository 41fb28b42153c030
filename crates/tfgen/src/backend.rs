//! S3 backend configuration
use crate::input::ModuleProvisionData;

/// Profile name the runner image configures for state access
pub const STATE_PROFILE: &str = "external-resources-state";

/// Where terraform keeps the state of one module instance
#[derive(Debug, Clone, PartialEq, Eq, derive_new::new)]
pub struct BackendConfig {
    #[new(into)]
    pub bucket: String,
    #[new(into)]
    pub key: String,
    #[new(into)]
    pub region: String,
    #[new(into)]
    pub dynamodb_table: String,
}

impl BackendConfig {
    pub fn emit(&self) -> String {
        emit_backend_config(&self.bucket, &self.key, &self.region, &self.dynamodb_table)
    }
}

impl From<&ModuleProvisionData> for BackendConfig {
    fn from(value: &ModuleProvisionData) -> Self {
        Self {
            bucket: value.tf_state_bucket.clone(),
            key: value.tf_state_key.clone(),
            region: value.tf_state_region.clone(),
            dynamodb_table: value.tf_state_dynamodb_table.clone(),
        }
    }
}

/// Fill in the backend template
///
/// Values are substituted as they are, nothing gets escaped. They must not contain `"`.
pub fn emit_backend_config(bucket: &str, key: &str, region: &str, dynamodb_table: &str) -> String {
    format!(
        r#"terraform {{
  backend "s3" {{
    bucket         = "{bucket}"
    key            = "{key}"
    region         = "{region}"
    dynamodb_table = "{dynamodb_table}"
    profile        = "{STATE_PROFILE}"
  }}
}}
"#
    )
}
