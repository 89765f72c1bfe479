// In: src/invoke.rs

//! This module owns the boundary to the external frequency-domain compressor.
//!
//! The compressor is an opaque collaborator: an executable taking one
//! command-line argument (the frequency budget), reading a wire frame on stdin
//! and writing one on stdout. The [`Compressor`] trait captures that
//! capability so the harness can be driven by an in-memory fake in tests; the
//! [`SubprocessCompressor`] is the real, blocking, single-shot realization.

use std::io::{self, ErrorKind, Read, Write};
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::error::WavebenchError;

/// How often the child is polled when a deadline is armed.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

//==================================================================================
// 1. The Compressor Capability
//==================================================================================

/// A lossy frequency-domain compressor: hand it a request frame and a budget,
/// get back the reconstruction frame.
pub trait Compressor {
    fn compress(&self, frequency_budget: u32, request: &[u8]) -> Result<Vec<u8>, WavebenchError>;
}

//==================================================================================
// 2. Subprocess-Backed Realization
//==================================================================================

/// Runs the external compressor executable once per call, synchronously.
///
/// Without a timeout this blocks for as long as the child runs, the original
/// harness behavior. With one, the child is polled against a deadline and
/// killed on expiry.
pub struct SubprocessCompressor {
    executable: PathBuf,
    timeout: Option<Duration>,
}

impl SubprocessCompressor {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Waits for the child, honoring the configured deadline. Kills the child
    /// when the deadline passes.
    fn wait_with_deadline(&self, child: &mut Child) -> Result<ExitStatus, WavebenchError> {
        let Some(timeout) = self.timeout else {
            return Ok(child.wait()?);
        };
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                warn!(
                    "compressor '{}' exceeded {}s deadline, killing it",
                    self.executable.display(),
                    timeout.as_secs()
                );
                // Kill may race a natural exit; the wait below reaps either way.
                let _ = child.kill();
                let _ = child.wait();
                return Err(WavebenchError::Timeout(timeout.as_secs()));
            }
            thread::sleep(WAIT_POLL_INTERVAL);
        }
    }
}

impl Compressor for SubprocessCompressor {
    fn compress(&self, frequency_budget: u32, request: &[u8]) -> Result<Vec<u8>, WavebenchError> {
        debug!(
            "spawning '{}' with budget {} ({} request bytes)",
            self.executable.display(),
            frequency_budget,
            request.len()
        );

        let mut child = Command::new(&self.executable)
            .arg(frequency_budget.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| WavebenchError::ExternalProcess {
                exit_code: None,
                stderr: format!("failed to spawn '{}': {}", self.executable.display(), e),
            })?;

        // Drain stdout/stderr on their own threads so a chatty child cannot
        // deadlock against a full pipe while we hold its stdin.
        let stdout_reader = spawn_drain(child.stdout.take());
        let stderr_reader = spawn_drain(child.stderr.take());

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(request) {
                Ok(()) => {}
                // A child that exits without reading its input closes the
                // pipe; the exit status below is the interesting diagnosis.
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    debug!("compressor closed stdin early: {}", e);
                }
                Err(e) => return Err(e.into()),
            }
            // Dropping stdin delivers EOF.
        }

        let status = self.wait_with_deadline(&mut child)?;
        let stdout = join_drain(stdout_reader)?;
        let stderr = join_drain(stderr_reader)?;

        if !status.success() {
            return Err(WavebenchError::ExternalProcess {
                exit_code: status.code(),
                stderr: String::from_utf8_lossy(&stderr).into_owned(),
            });
        }

        debug!("compressor returned {} response bytes", stdout.len());
        Ok(stdout)
    }
}

/// Reads a child stream to EOF on a dedicated thread.
fn spawn_drain<R: Read + Send + 'static>(
    stream: Option<R>,
) -> Option<thread::JoinHandle<io::Result<Vec<u8>>>> {
    stream.map(|mut r| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            r.read_to_end(&mut buf)?;
            Ok(buf)
        })
    })
}

fn join_drain(
    handle: Option<thread::JoinHandle<io::Result<Vec<u8>>>>,
) -> Result<Vec<u8>, WavebenchError> {
    match handle {
        None => Ok(Vec::new()),
        Some(h) => {
            let bytes = h
                .join()
                .map_err(|_| io::Error::new(io::ErrorKind::Other, "stream reader panicked"))??;
            Ok(bytes)
        }
    }
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_executable_is_an_external_process_error() {
        let compressor = SubprocessCompressor::new("/nonexistent/compressor.exe");
        match compressor.compress(2, b"1\n0\n") {
            Err(WavebenchError::ExternalProcess { exit_code, stderr }) => {
                assert_eq!(exit_code, None);
                assert!(stderr.contains("failed to spawn"));
            }
            other => panic!("expected ExternalProcess, got {:?}", other),
        }
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use std::path::Path;

        fn write_script(dir: &Path, body: &str) -> std::path::PathBuf {
            let path = dir.join("fake_compressor.sh");
            fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        #[test]
        fn test_zero_exit_returns_stdout_verbatim() {
            let dir = tempfile::tempdir().unwrap();
            let script = write_script(dir.path(), "cat");
            let compressor = SubprocessCompressor::new(&script);
            let out = compressor.compress(4, b"2\n0.5 1.5\n").unwrap();
            assert_eq!(out, b"2\n0.5 1.5\n");
        }

        #[test]
        fn test_budget_is_passed_as_single_decimal_argument() {
            let dir = tempfile::tempdir().unwrap();
            let script = write_script(dir.path(), r#"printf '%s' "$*""#);
            let compressor = SubprocessCompressor::new(&script);
            let out = compressor.compress(17, b"").unwrap();
            assert_eq!(out, b"17");
        }

        #[test]
        fn test_nonzero_exit_surfaces_code_and_stderr() {
            let dir = tempfile::tempdir().unwrap();
            let script = write_script(dir.path(), "echo 'bad input' >&2; exit 3");
            let compressor = SubprocessCompressor::new(&script);
            match compressor.compress(2, b"1\n0\n") {
                Err(WavebenchError::ExternalProcess { exit_code, stderr }) => {
                    assert_eq!(exit_code, Some(3));
                    assert!(stderr.contains("bad input"));
                }
                other => panic!("expected ExternalProcess, got {:?}", other),
            }
        }

        #[test]
        fn test_deadline_kills_hung_compressor() {
            let dir = tempfile::tempdir().unwrap();
            let script = write_script(dir.path(), "sleep 30");
            let compressor = SubprocessCompressor::new(&script)
                .with_timeout(Some(Duration::from_millis(200)));
            let started = Instant::now();
            match compressor.compress(2, b"1\n0\n") {
                Err(WavebenchError::Timeout(_)) => {}
                other => panic!("expected Timeout, got {:?}", other),
            }
            assert!(started.elapsed() < Duration::from_secs(10));
        }

        #[test]
        fn test_fast_child_beats_the_deadline() {
            let dir = tempfile::tempdir().unwrap();
            let script = write_script(dir.path(), "cat");
            let compressor =
                SubprocessCompressor::new(&script).with_timeout(Some(Duration::from_secs(30)));
            let out = compressor.compress(2, b"1\n0\n").unwrap();
            assert_eq!(out, b"1\n0\n");
        }
    }
}
