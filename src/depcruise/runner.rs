use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{ChildStderr, ChildStdin, ChildStdout, Command};
use tokio::time::Instant;

use super::types::{CommandLine, GraphArtifact, Pipeline};
use crate::cli::GraphFormat;
use crate::constants::defaults;
use crate::error::WebDepcruiserError;
use crate::settings::Settings;

/// Runs a [`Pipeline`] in the workspace root and captures its output in
/// memory. The layout stage reads the analysis output from stdin, so no
/// intermediate files are written.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    cwd: PathBuf,
    timeout: Duration,
    max_output_bytes: usize,
}

impl ProcessRunner {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            timeout: defaults::TIMEOUT,
            max_output_bytes: defaults::MAX_OUTPUT_BYTES,
        }
    }

    pub fn from_settings(cwd: impl Into<PathBuf>, settings: &Settings) -> Self {
        Self::new(cwd)
            .with_timeout(settings.timeout)
            .with_max_output_bytes(settings.max_output_bytes)
    }

    /// Deadline for a whole run, shared by all of its stages
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_output_bytes(mut self, limit: usize) -> Self {
        self.max_output_bytes = limit;
        self
    }

    /// Run every stage of `pipeline` and return the final output
    pub async fn run(
        &self,
        pipeline: &Pipeline,
        format: GraphFormat,
    ) -> Result<GraphArtifact, WebDepcruiserError> {
        let deadline = Instant::now() + self.timeout;
        let mut bytes = self.run_stage_until(&pipeline.cruise, None, deadline).await?;

        if let Some(layout) = &pipeline.layout {
            bytes = self.run_stage_until(layout, Some(bytes), deadline).await?;
        }

        if bytes.is_empty() {
            return Err(WebDepcruiserError::EmptyArtifact);
        }

        Ok(GraphArtifact { bytes, format })
    }

    /// Blocking wrapper around [`ProcessRunner::run`] on a current-thread
    /// runtime
    pub fn run_blocking(
        &self,
        pipeline: &Pipeline,
        format: GraphFormat,
    ) -> Result<GraphArtifact, WebDepcruiserError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.run(pipeline, format))
    }

    /// Run one command, feeding `input` to its stdin when given
    pub async fn run_stage(
        &self,
        command: &CommandLine,
        input: Option<Vec<u8>>,
    ) -> Result<Vec<u8>, WebDepcruiserError> {
        self.run_stage_until(command, input, Instant::now() + self.timeout).await
    }

    async fn run_stage_until(
        &self,
        command: &CommandLine,
        input: Option<Vec<u8>>,
        deadline: Instant,
    ) -> Result<Vec<u8>, WebDepcruiserError> {
        let program = command.program.clone();

        let mut child = Command::new(&command.program)
            .args(&command.args)
            .current_dir(&self.cwd)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| WebDepcruiserError::ProcessFailure {
                program: program.clone(),
                message: format!("Failed to start '{program}': {e}"),
            })?;

        let stdin = child.stdin.take();
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let limit = self.max_output_bytes;

        let work = async {
            let ((), stdout, stderr) = tokio::try_join!(
                feed_stdin(stdin, input),
                collect_stdout(stdout, limit, &program),
                collect_stderr(stderr, limit),
            )?;
            let status = child.wait().await?;
            Ok::<_, WebDepcruiserError>((status, stdout, stderr))
        };

        let outcome = tokio::time::timeout_at(deadline, work).await;

        let (status, stdout, stderr) = match outcome {
            Ok(Ok(finished)) => finished,
            Ok(Err(e)) => {
                let _ = child.start_kill();
                return Err(e);
            }
            Err(_) => {
                let _ = child.start_kill();
                return Err(WebDepcruiserError::Timeout {
                    program,
                    seconds: self.timeout.as_secs(),
                });
            }
        };

        if !status.success() {
            let captured = String::from_utf8_lossy(&stderr).trim().to_string();
            let message = if captured.is_empty() {
                format!("'{program}' failed with {status}")
            } else {
                captured
            };
            return Err(WebDepcruiserError::ProcessFailure { program, message });
        }

        Ok(stdout)
    }
}

async fn feed_stdin(
    stdin: Option<ChildStdin>,
    input: Option<Vec<u8>>,
) -> Result<(), WebDepcruiserError> {
    if let (Some(mut pipe), Some(data)) = (stdin, input) {
        // A consumer that exits early closes the pipe; its exit status is
        // what gets reported.
        let _ = pipe.write_all(&data).await;
        let _ = pipe.shutdown().await;
    }
    Ok(())
}

async fn collect_stdout(
    stdout: Option<ChildStdout>,
    limit: usize,
    program: &str,
) -> Result<Vec<u8>, WebDepcruiserError> {
    read_bounded(stdout, limit)
        .await?
        .ok_or_else(|| WebDepcruiserError::OutputTooLarge {
            program: program.to_string(),
            limit,
        })
}

async fn collect_stderr(
    stderr: Option<ChildStderr>,
    limit: usize,
) -> Result<Vec<u8>, WebDepcruiserError> {
    Ok(read_capped(stderr, limit).await?)
}

/// Read everything, or `None` as soon as more than `limit` bytes arrive
async fn read_bounded<R>(reader: Option<R>, limit: usize) -> std::io::Result<Option<Vec<u8>>>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    if let Some(reader) = reader {
        reader
            .take((limit as u64).saturating_add(1))
            .read_to_end(&mut buf).await?;
    }
    Ok((buf.len() <= limit).then_some(buf))
}

/// Keep the first `limit` bytes and drain the rest so the writer never blocks
async fn read_capped<R>(reader: Option<R>, limit: usize) -> std::io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut kept = Vec::new();
    let Some(mut reader) = reader else {
        return Ok(kept);
    };

    let mut chunk = [0u8; 8192];
    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        let room = limit.saturating_sub(kept.len());
        kept.extend_from_slice(&chunk[..n.min(room)]);
    }
    Ok(kept)
}
