//! Provision, configure, plan, then execute each invocation in order, stopping at the first failure

use std::io::Write;
use tracing::{debug, info, warn};

use super::error::{ExecutionError, Result};
use super::plan::ExecutionPlan;
use super::runner::{ProcessRunner, SystemRunner};
use crate::command::CommandBuilder;
use crate::provision::{provision_credentials, write_global_tool_config, StagingPaths};
use crate::types::{BuildInfo, Invocation, ProvisionConfig};

pub struct Provisioner<R = SystemRunner> {
    runner: R,
    paths: StagingPaths,
    program: String,
    trace: Box<dyn Write + Send>,
}

impl Provisioner<SystemRunner> {
    pub fn new(paths: StagingPaths, program: impl Into<String>) -> Self {
        Self::with_runner(SystemRunner, paths, program)
    }
}

impl<R: ProcessRunner> Provisioner<R> {
    /// Trace lines go to stdout unless replaced with [`Provisioner::with_trace`].
    pub fn with_runner(runner: R, paths: StagingPaths, program: impl Into<String>) -> Self {
        Self {
            runner,
            paths,
            program: program.into(),
            trace: Box::new(std::io::stdout()),
        }
    }

    pub fn with_trace(mut self, trace: impl Write + Send + 'static) -> Self {
        self.trace = Box::new(trace);
        self
    }

    pub fn command_builder(&self) -> CommandBuilder {
        CommandBuilder::new(self.program.clone(), self.paths.key_file())
    }

    pub fn plan(&self, build: &BuildInfo, config: &ProvisionConfig) -> ExecutionPlan {
        ExecutionPlan::build(&self.command_builder(), build, config)
    }

    /// Stage credentials and ansible config, then run the plan.
    pub async fn run(&mut self, build: &BuildInfo, config: &ProvisionConfig) -> Result<()> {
        provision_credentials(&config.ssh_private_key, &self.paths).await?;
        write_global_tool_config(&self.paths.tool_config).await?;

        let plan = self.plan(build, config);
        info!(
            "Planned {} invocations for commit {}",
            plan.len(),
            build.commit_sha
        );

        let inventories = plan.inventory_count();
        self.execute(plan).await?;

        info!("Provisioned {} inventories", inventories);
        Ok(())
    }

    /// Run each invocation to completion. The first launch failure or non-zero
    /// exit ends the run; later invocations never start.
    pub async fn execute(&mut self, plan: ExecutionPlan) -> Result<()> {
        for invocation in plan {
            self.trace(&invocation);

            match invocation.inventory() {
                Some(inventory) => info!("Provisioning inventory {}", inventory),
                None => debug!("Probing {}", invocation.program),
            }

            let status = self.runner.run(&invocation).await.map_err(|source| {
                ExecutionError::ProcessLaunch {
                    command: invocation.to_string(),
                    source,
                }
            })?;

            if !status.success() {
                return Err(ExecutionError::ProcessExit {
                    command: invocation.to_string(),
                    code: status.code,
                });
            }
        }

        Ok(())
    }

    fn trace(&mut self, invocation: &Invocation) {
        let written = writeln!(self.trace, "$ {invocation}").and_then(|_| self.trace.flush());
        if let Err(e) = written {
            warn!("Failed to write command trace: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::runner::ProcessStatus;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    struct ExitWith(i32);

    #[async_trait]
    impl ProcessRunner for ExitWith {
        async fn run(&self, _invocation: &Invocation) -> std::io::Result<ProcessStatus> {
            Ok(ProcessStatus::exited(self.0))
        }
    }

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn config() -> ProvisionConfig {
        ProvisionConfig {
            inventory_path: "inv".to_string(),
            inventories: vec!["prod".to_string()],
            playbook_path: "site.yml".to_string(),
            ssh_private_key: "KEY".to_string(),
        }
    }

    #[tokio::test]
    async fn test_trace_precedes_each_invocation() {
        let temp_dir = TempDir::new().unwrap();
        let buffer = Buffer::default();
        let mut provisioner = Provisioner::with_runner(
            ExitWith(0),
            StagingPaths::rooted_at(temp_dir.path()),
            "ansible-playbook",
        )
        .with_trace(buffer.clone());

        provisioner
            .run(&BuildInfo::new("/src", "abc123", ""), &config())
            .await
            .unwrap();

        let key = temp_dir.path().join(".ssh").join("id_rsa");
        let trace = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert_eq!(
            trace,
            format!(
                "$ ansible-playbook --version\n\
                 $ ansible-playbook -e ansible_ssh_private_key_file={} -e commit_sha=abc123 -i /src/inv/prod /src/site.yml\n",
                key.display()
            )
        );
    }

    #[tokio::test]
    async fn test_probe_failure_stops_run() {
        let temp_dir = TempDir::new().unwrap();
        let mut provisioner = Provisioner::with_runner(
            ExitWith(127),
            StagingPaths::rooted_at(temp_dir.path()),
            "ansible-playbook",
        )
        .with_trace(std::io::sink());

        let err = provisioner
            .run(&BuildInfo::new("/src", "abc123", ""), &config())
            .await
            .unwrap_err();

        match err {
            ExecutionError::ProcessExit { command, code } => {
                assert_eq!(command, "ansible-playbook --version");
                assert_eq!(code, Some(127));
            }
            other => panic!("Expected ProcessExit, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_any_write() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StagingPaths::rooted_at(temp_dir.path());
        let mut provisioner = Provisioner::with_runner(ExitWith(0), paths.clone(), "ansible-playbook")
            .with_trace(std::io::sink());

        let config = ProvisionConfig {
            ssh_private_key: String::new(),
            ..config()
        };
        let err = provisioner
            .run(&BuildInfo::new("/src", "abc123", ""), &config)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ExecutionError::Provision(crate::provision::ProvisionError::MissingCredential)
        ));
        assert!(!paths.ssh_dir.exists());
        assert!(!paths.tool_config.exists());
    }
}
