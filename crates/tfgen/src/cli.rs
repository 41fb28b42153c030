//! command line interface
//!
//! Module images ship their own binary, typed with the data model of the module:
//!
//! ```no_run
//! # use tfgen::schema::{ObjectSchema, Schema};
//! #[derive(serde::Serialize, serde::Deserialize)]
//! struct Data {}
//!
//! impl Schema for Data {
//!     fn schema() -> ObjectSchema {
//!         ObjectSchema::new()
//!     }
//! }
//!
//! fn main() -> std::process::ExitCode {
//!     tfgen::cli::main::<Data>()
//! }
//! ```
use crate::config::Config;
use crate::input::{load_input, AppInterfaceInput};
use crate::schema::Schema;
use crate::terraform::Terraform;
use crate::variables::VariablesFormat;
use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[clap(flatten)]
    pub config: Config,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write variable declarations for the data model
    GenerateVariablesTf(VariablesArgs),

    /// Write variable declarations in terraform JSON syntax
    ///
    /// Defaults to the configured variables file with `.json` appended
    GenerateVariablesTfJson(OutputArgs),

    /// Write the S3 backend configuration from the provisioning input
    GenerateBackendTf(InputArgs),

    /// Write tfvars JSON from the `data` part of the provisioning input
    GenerateTfVarsJson(InputArgs),

    /// Pass arguments through to terraform
    ///
    /// Skipped when dry run is enabled
    Run(RunArgs),

    /// Init and plan the module, store the plan as JSON
    Plan(ModuleArgs),

    /// Init the module, then apply or destroy it according to the configured action
    ///
    /// With dry run enabled no terraform process is started
    Execute(ModuleArgs),
}

#[derive(Parser, Debug)]
pub struct VariablesArgs {
    #[clap(flatten)]
    pub output: OutputArgs,

    /// Defaults to the file extension of the output path
    #[arg(short = 'F', long = "format", value_enum)]
    pub format: Option<VariablesFormat>,
}

#[derive(Parser, Debug)]
pub struct OutputArgs {
    /// Output file, defaults to the configured path
    #[clap(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct InputArgs {
    /// Provisioning input, defaults to the configured input file
    pub input: Option<PathBuf>,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct ModuleArgs {
    /// Directory containing the terraform module
    #[clap(short = 'm', long = "module-dir", default_value = "module")]
    pub module_dir: PathBuf,
}

/// Entry point for module binaries
pub fn main<D>() -> std::process::ExitCode
where
    D: Schema + DeserializeOwned + Serialize,
{
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(cli.config.env_filter())
        .with_writer(std::io::stderr)
        .init();

    match execute::<D>(cli) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            for error in e.chain() {
                eprintln!("{error}")
            }
            std::process::ExitCode::FAILURE
        }
    }
}

pub fn execute<D>(cli: Cli) -> anyhow::Result<()>
where
    D: Schema + DeserializeOwned + Serialize,
{
    let config = &cli.config;
    tracing::debug!(?config, "configuration");

    match cli.command {
        Command::GenerateVariablesTf(args) => {
            let path = args.output.path_or(&config.variables_tf_file);
            crate::generate::create_variables_tf_file(&D::schema(), &path, args.format)
                .with_context(|| format!("generating {}", path.display()))
        }
        Command::GenerateVariablesTfJson(args) => {
            let path = args.path_or(&json_path(&config.variables_tf_file));
            crate::generate::create_variables_tf_file(
                &D::schema(),
                &path,
                Some(VariablesFormat::Json),
            )
            .with_context(|| format!("generating {}", path.display()))
        }
        Command::GenerateBackendTf(args) => {
            let input = load::<D>(&args, config)?;
            let path = args.output.path_or(&config.backend_tf_file);
            crate::generate::create_backend_tf_file(
                &(&input.provision.module_provision_data).into(),
                &path,
            )
            .with_context(|| format!("generating {}", path.display()))
        }
        Command::GenerateTfVarsJson(args) => {
            let input = load::<D>(&args, config)?;
            let path = args.output.path_or(&config.tf_vars_file);
            crate::generate::create_tf_vars_json(&input.data, &path)
                .with_context(|| format!("generating {}", path.display()))
        }
        Command::Run(args) => {
            let output = Terraform::from(config).run(&args.args, config.dry_run)?;
            print!("{output}");
            Ok(())
        }
        Command::Plan(args) => plan(config, &args.module_dir),
        Command::Execute(args) => run_action(config, &args.module_dir),
    }
}

impl OutputArgs {
    fn path_or(&self, configured: &Path) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| configured.to_owned())
    }
}

fn json_path(path: &Path) -> PathBuf {
    let mut json = path.as_os_str().to_owned();
    json.push(".json");
    json.into()
}

fn load<D: DeserializeOwned>(
    args: &InputArgs,
    config: &Config,
) -> anyhow::Result<AppInterfaceInput<D>> {
    let path = args.input.as_deref().unwrap_or(&config.input_file);
    load_input(path).with_context(|| format!("loading input {}", path.display()))
}

fn plan(config: &Config, module_dir: &Path) -> anyhow::Result<()> {
    let terraform = Terraform::from(config);
    terraform.init(module_dir)?;

    // planning changes nothing, dry run does not apply
    let chdir = format!("-chdir={}", module_dir.display());
    terraform.run([chdir.as_str(), "plan", "-input=false", "-out=plan.tfplan"], false)?;
    let plan_json = terraform.run([chdir.as_str(), "show", "-json", "plan.tfplan"], false)?;

    write_scratch(&config.plan_file_json, &plan_json)
}

fn run_action(config: &Config, module_dir: &Path) -> anyhow::Result<()> {
    let terraform = Terraform::from(config);
    let chdir = format!("-chdir={}", module_dir.display());
    let [action, approve] = config.action.terraform_args();
    tracing::info!(action = %config.action, dry_run = config.dry_run, "executing");

    terraform.run(
        [chdir.as_str(), "init", "-input=false", "-no-color"],
        config.dry_run,
    )?;
    terraform.run([chdir.as_str(), action, approve], config.dry_run)?;

    if config.dry_run {
        return Ok(());
    }

    let outputs = terraform.output_json(module_dir)?;
    write_scratch(&config.outputs_file, &outputs)
}

fn write_scratch(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
}
