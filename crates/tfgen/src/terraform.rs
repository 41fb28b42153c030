//! terraform executable bridge
//!
//! All calls block until the process exits. Standard output is returned as text, a non-zero exit
//! becomes [TerraformError::Failed] with the captured standard error.
use std::ffi::OsStr;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

#[derive(thiserror::Error, Debug)]
pub enum TerraformError {
    #[error("unable to start {command}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{command} failed with exit code {code:?}: {stderr}")]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
    #[error("{command} produced non UTF-8 output")]
    Utf8 {
        command: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

#[derive(Debug, Clone, derive_new::new)]
pub struct Terraform {
    #[new(into)]
    cmd: String,
}

impl Default for Terraform {
    fn default() -> Self {
        Self::new("terraform")
    }
}

impl From<&crate::config::Config> for Terraform {
    fn from(value: &crate::config::Config) -> Self {
        Self::new(value.terraform_cmd.clone())
    }
}

impl Terraform {
    /// Whether the executable can be started at all
    pub fn available(&self) -> bool {
        let status = Command::new(&self.cmd)
            .arg("version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(status) => status.success(),
            Err(e) => {
                tracing::debug!(cmd = %self.cmd, error = %e, "terraform not available");
                false
            }
        }
    }

    /// Canonical formatting of HCL text (`fmt -`)
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn fmt(&self, text: &str) -> Result<String, TerraformError> {
        let command = self.describe(["fmt", "-"]);

        let mut child = Command::new(&self.cmd)
            .args(["fmt", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| TerraformError::Spawn {
                command: command.clone(),
                source,
            })?;

        // feed stdin while the output is collected, large inputs would block otherwise
        let mut stdin = child.stdin.take();
        let output = std::thread::scope(|scope| {
            scope.spawn(move || {
                if let Some(stdin) = stdin.as_mut() {
                    if let Err(e) = stdin.write_all(text.as_bytes()) {
                        tracing::debug!(error = %e, "writing to fmt stdin failed");
                    }
                }
            });
            child.wait_with_output()
        })
        .map_err(|source| TerraformError::Spawn {
            command: command.clone(),
            source,
        })?;

        stdout_of(command, output)
    }

    /// `-chdir=<dir> init -input=false`
    pub fn init(&self, dir: &Path) -> Result<String, TerraformError> {
        self.execute([chdir(dir).as_str(), "init", "-input=false", "-no-color"])
    }

    /// `-chdir=<dir> validate`
    pub fn validate(&self, dir: &Path) -> Result<String, TerraformError> {
        self.execute([chdir(dir).as_str(), "validate", "-no-color"])
    }

    /// `-chdir=<dir> output -json`
    pub fn output_json(&self, dir: &Path) -> Result<String, TerraformError> {
        self.execute([chdir(dir).as_str(), "output", "-json"])
    }

    /// Pass-through invocation
    ///
    /// With `dry_run` nothing is started and the result is empty.
    pub fn run<I, S>(&self, args: I, dry_run: bool) -> Result<String, TerraformError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        if dry_run {
            let args: Vec<_> = args.into_iter().collect();
            tracing::info!(command = %self.describe(&args), "dry run, skipping");
            return Ok(String::new());
        }

        self.execute(args)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(cmd = %self.cmd))]
    fn execute<I, S>(&self, args: I) -> Result<String, TerraformError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<S> = args.into_iter().collect();
        let command = self.describe(&args);
        tracing::info!(%command, "running");

        let output = Command::new(&self.cmd)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| TerraformError::Spawn {
                command: command.clone(),
                source,
            })?;

        stdout_of(command, output)
    }

    fn describe<I, S>(&self, args: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        std::iter::once(self.cmd.clone())
            .chain(
                args.into_iter()
                    .map(|arg| arg.as_ref().to_string_lossy().into_owned()),
            )
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn chdir(dir: &Path) -> String {
    format!("-chdir={}", dir.display())
}

fn stdout_of(command: String, output: Output) -> Result<String, TerraformError> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim_end().to_string();
        tracing::debug!(%command, code = ?output.status.code(), %stderr, "command failed");
        return Err(TerraformError::Failed {
            command,
            code: output.status.code(),
            stderr,
        });
    }

    String::from_utf8(output.stdout).map_err(|source| TerraformError::Utf8 { command, source })
}
