//! Blocking external-command runner with an optional deadline.

use std::io::Read;
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use dankbar_core::provider::CollectError;

const POLL_STEP: Duration = Duration::from_millis(5);

/// Run `command args...` and return its stdout.
///
/// Without a `timeout` the call blocks until the child exits. With one, the
/// child is killed and reaped once the deadline passes, and output still
/// pending at the deadline is abandoned.
pub fn run(
    command: &str,
    args: &[String],
    timeout: Option<Duration>,
) -> Result<Vec<u8>, CollectError> {
    match timeout {
        None => run_blocking(command, args),
        Some(timeout) => run_with_deadline(command, args, timeout),
    }
}

fn run_blocking(command: &str, args: &[String]) -> Result<Vec<u8>, CollectError> {
    let output = Command::new(command)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .map_err(|err| CollectError::Command(format!("failed to run {command}: {err}")))?;

    if !output.status.success() {
        return Err(CollectError::CommandFailed {
            command: command.to_string(),
            code: output.status.code(),
        });
    }
    Ok(output.stdout)
}

fn run_with_deadline(
    command: &str,
    args: &[String],
    timeout: Duration,
) -> Result<Vec<u8>, CollectError> {
    let mut child = Command::new(command)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|err| CollectError::Command(format!("failed to spawn {command}: {err}")))?;

    // Drain stdout on the side so a chatty child cannot block on a full pipe.
    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| CollectError::Command(format!("{command} stdout unavailable")))?;
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut out = Vec::new();
        let _ = tx.send(stdout.read_to_end(&mut out).map(|_| out));
    });

    let start = Instant::now();
    let timed_out = || CollectError::CommandTimeout {
        command: command.to_string(),
        timeout_ms: timeout.as_millis() as u64,
    };
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if start.elapsed() >= timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(timed_out());
                }
                thread::sleep(POLL_STEP);
            }
            Err(err) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(CollectError::Command(format!(
                    "failed to poll {command}: {err}"
                )));
            }
        }
    };

    if !status.success() {
        return Err(CollectError::CommandFailed {
            command: command.to_string(),
            code: status.code(),
        });
    }

    // A process the child left behind can keep stdout open past its exit;
    // the deadline covers that wait too.
    match rx.recv_timeout(timeout.saturating_sub(start.elapsed())) {
        Ok(Ok(out)) => Ok(out),
        Ok(Err(err)) => Err(CollectError::Command(format!(
            "failed to read {command} output: {err}"
        ))),
        Err(RecvTimeoutError::Timeout) => Err(timed_out()),
        Err(RecvTimeoutError::Disconnected) => Err(CollectError::Command(format!(
            "{command} output reader panicked"
        ))),
    }
}
