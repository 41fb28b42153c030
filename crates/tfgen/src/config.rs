//! runner configuration
//!
//! Every setting can be given as long option or through an environment variable named after the
//! setting in upper case (`dry_run` → `DRY_RUN`). Options win over the environment.
use clap::{builder::BoolishValueParser, ArgAction, Parser, ValueEnum};
use std::fmt::Formatter;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, PartialEq)]
pub struct Config {
    /// What `execute` does with the module
    #[arg(long, env, value_enum, ignore_case = true, default_value_t)]
    pub action: Action,

    /// Skip every terraform invocation that could change something
    #[arg(long, env, default_value_t = true, action = ArgAction::Set, value_parser = BoolishValueParser::new())]
    pub dry_run: bool,

    #[arg(long, env, default_value = "INFO")]
    pub log_level: String,

    /// Provisioning input document (JSON or YAML)
    #[arg(long, env, default_value = "/inputs/input.json")]
    pub input_file: PathBuf,

    #[arg(long, env, default_value = "module/backend.tf")]
    pub backend_tf_file: PathBuf,

    /// Where `execute` stores `terraform output -json`
    #[arg(long, env, default_value = "tmp/outputs.json")]
    pub outputs_file: PathBuf,

    /// Where `plan` stores `terraform show -json`
    #[arg(long, env, default_value = "tmp/plan.json")]
    pub plan_file_json: PathBuf,

    /// terraform compatible executable
    #[arg(long, env, default_value = "terraform")]
    pub terraform_cmd: String,

    #[arg(long, env, default_value = "module/tfvars.json")]
    pub tf_vars_file: PathBuf,

    #[arg(long, env, default_value = "module/variables.tf")]
    pub variables_tf_file: PathBuf,
}

impl Config {
    /// Environment and defaults only
    pub fn from_env() -> Result<Self, clap::Error> {
        Self::try_parse_from([env!("CARGO_PKG_NAME")])
    }

    /// `log_level` as tracing filter, unknown levels fall back to `info`
    pub fn env_filter(&self) -> tracing_subscriber::EnvFilter {
        tracing_subscriber::EnvFilter::try_new(self.log_level.to_lowercase())
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    }
}

#[derive(ValueEnum, Clone, Copy, Default, Debug, PartialEq, Eq)]
pub enum Action {
    #[default]
    Apply,
    Destroy,
}

impl Action {
    /// terraform arguments carrying out the action
    pub fn terraform_args(&self) -> [&'static str; 2] {
        match self {
            Action::Apply => ["apply", "-auto-approve"],
            Action::Destroy => ["destroy", "-auto-approve"],
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Apply => f.write_str("apply"),
            Action::Destroy => f.write_str("destroy"),
        }
    }
}
