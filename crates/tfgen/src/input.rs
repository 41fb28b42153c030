//! provisioning input
//!
//! The runner receives one document per module instance:
//!
//! ```json
//! {
//!   "data": { "...": "module specific" },
//!   "provision": {
//!     "provision_provider": "aws",
//!     "...": "...",
//!     "module_provision_data": { "tf_state_bucket": "...", "...": "..." }
//!   }
//! }
//! ```
//!
//! `data` is typed by the module itself, everything else is fixed.
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppInterfaceInput<D> {
    pub data: D,
    pub provision: AppInterfaceProvision,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInterfaceProvision {
    pub provision_provider: String,
    pub provisioner: String,
    pub provider: String,
    pub identifier: String,
    pub target_cluster: String,
    pub target_namespace: String,
    pub target_secret_name: String,
    pub module_provision_data: ModuleProvisionData,
}

/// terraform state location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleProvisionData {
    pub tf_state_bucket: String,
    pub tf_state_region: String,
    pub tf_state_dynamodb_table: String,
    pub tf_state_key: String,
}

#[derive(thiserror::Error, Debug)]
pub enum InputError {
    #[error("unable to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON input")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML input")]
    Yaml(#[from] serde_yaml::Error),
}

/// Build a typed model from already decoded JSON
pub fn parse_model<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, InputError> {
    Ok(serde_json::from_value(value)?)
}

/// Load an input file
///
/// `*.yaml`/`*.yml` files are read as YAML, anything else as JSON.
pub fn load_input<D: DeserializeOwned>(path: &Path) -> Result<AppInterfaceInput<D>, InputError> {
    tracing::info!(path=%path.display(), "loading input");

    let contents = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_owned(),
        source,
    })?;

    let is_yaml = path
        .extension()
        .is_some_and(|ext| ext == "yaml" || ext == "yml");

    if is_yaml {
        Ok(serde_yaml::from_str(&contents)?)
    } else {
        Ok(serde_json::from_str(&contents)?)
    }
}
