//! Blocking execution of external tools with a timeout.
//!
//! Both ffprobe and ffmpeg run through [`run_with_timeout`]. The child's
//! stdout and stderr are drained on helper threads while the caller polls for
//! exit, so a child that writes more than a pipe buffer cannot stall. When the
//! deadline passes the child is killed and reaped.

use std::io::{self, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, error, warn};
use thiserror::Error;

/// Interval between exit checks while waiting on a child.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Minimum time allowed for reading output after the child exits.
const DRAIN_GRACE: Duration = Duration::from_millis(100);

/// Command execution errors
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("error waiting for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} timed out after {} seconds", timeout.as_secs_f64())]
    Timeout { program: String, timeout: Duration },
}

/// Output captured from a finished child process.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub status: ExitStatus,
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
}

impl CommandOutput {
    /// Stdout followed by stderr, the way a merged stream would read for
    /// tools that write to only one of them.
    pub fn combined(&self) -> String {
        let mut text = String::with_capacity(self.stdout.len() + self.stderr.len() + 1);
        text.push_str(&self.stdout);
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&self.stderr);
        text
    }

    /// Last non-empty line of stderr, for log messages.
    pub fn stderr_tail(&self) -> &str {
        self.stderr
            .lines()
            .rev()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or("")
    }
}

/// Logs the full command line at debug level.
pub fn log_command(cmd: &Command) {
    let program = cmd.get_program().to_string_lossy();
    let args: Vec<_> = cmd.get_args().map(|arg| arg.to_string_lossy()).collect();

    debug!("Executing command: {} {}", program, args.join(" "));
}

/// Runs `cmd` to completion, killing it if it outlives `timeout`.
///
/// Stdin is closed; stdout and stderr are captured. A non-zero exit status is
/// not an error here, callers decide what a failed run means to them.
///
/// Output is collected until both pipes close or the deadline passes. A
/// background process started by the tool can keep the pipes open after the
/// tool itself exits; in that case whatever was read by the deadline is
/// returned.
pub fn run_with_timeout(cmd: &mut Command, timeout: Duration) -> Result<CommandOutput, CommandError> {
    log_command(cmd);
    let program = cmd.get_program().to_string_lossy().into_owned();
    let deadline = Instant::now() + timeout;

    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| CommandError::Spawn {
            program: program.clone(),
            source,
        })?;

    let (tx, rx) = mpsc::channel();
    drain(child.stdout.take(), Stream::Stdout, tx.clone());
    drain(child.stderr.take(), Stream::Stderr, tx);

    let status = match wait_until(&mut child, deadline) {
        Ok(Some(status)) => status,
        Ok(None) => {
            error!("{} timed out after {:?}, killing it", program, timeout);
            let _ = child.kill();
            let _ = child.wait();
            return Err(CommandError::Timeout { program, timeout });
        }
        Err(source) => {
            let _ = child.kill();
            let _ = child.wait();
            return Err(CommandError::Wait { program, source });
        }
    };

    let (stdout, stderr) = collect_output(&rx, deadline.max(Instant::now() + DRAIN_GRACE), &program);
    debug!("{} exited with {}", program, status);

    Ok(CommandOutput {
        status,
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
    })
}

fn wait_until(child: &mut Child, deadline: Instant) -> io::Result<Option<ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL.min(remaining));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

enum Chunk {
    Data(Stream, Vec<u8>),
    Closed(Stream),
}

/// Forwards everything read from `reader` to `tx`, then reports the close.
fn drain<R: Read + Send + 'static>(reader: Option<R>, stream: Stream, tx: Sender<Chunk>) {
    let Some(mut reader) = reader else {
        let _ = tx.send(Chunk::Closed(stream));
        return;
    };

    thread::spawn(move || {
        let mut buf = [0u8; 8192];
        loop {
            match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    if tx.send(Chunk::Data(stream, buf[..n].to_vec())).is_err() {
                        return;
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(_) => break,
            }
        }
        let _ = tx.send(Chunk::Closed(stream));
    });
}

fn collect_output(rx: &Receiver<Chunk>, until: Instant, program: &str) -> (Vec<u8>, Vec<u8>) {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let mut open = 2;

    while open > 0 {
        let remaining = until.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok(Chunk::Data(Stream::Stdout, bytes)) => stdout.extend_from_slice(&bytes),
            Ok(Chunk::Data(Stream::Stderr, bytes)) => stderr.extend_from_slice(&bytes),
            Ok(Chunk::Closed(_)) => open -= 1,
            Err(RecvTimeoutError::Timeout) => {
                warn!("{} exited but its output is still held open, using what was read", program);
                break;
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    (stdout, stderr)
}
