//! Backend living in a child process, driven over a line protocol.
//!
//! ```text
//! perm <selector> <n> <re> <im> ...   ->  <re> <im>
//! unitary <n> <re> <im> ...           ->  ok
//! sample |1,1,0>                      ->  |0,2,0>
//! quit
//! ```
//!
//! Matrix entries are row-major. A reply starting with `err ` is a failure.

use crate::error::{BenchError, Result};
use crate::routine::{Algorithm, PermanentBackend, SamplingBackend};
use crate::state::BasicState;
use haar::{Unitary, C64};
use log::{debug, warn};
use std::fmt::Write as _;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// How long a worker gets to exit after `quit` before it is killed.
pub const QUIT_GRACE: Duration = Duration::from_secs(2);

pub struct WorkerProcess {
    child: Child,
    // None once `quit` has been sent and the pipe closed
    stdin: Option<BufWriter<ChildStdin>>,
    stdout: BufReader<ChildStdout>,
    line: String,
}

impl WorkerProcess {
    /// Spawns a whitespace-separated command line, e.g. `python3 worker.py`.
    pub fn spawn(command: &str) -> Result<Self> {
        let mut parts = command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| BenchError::Config("worker command is empty".into()))?;
        let args: Vec<&str> = parts.collect();
        Self::spawn_with(program, &args)
    }

    pub fn spawn_with(program: &str, args: &[&str]) -> Result<Self> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| BenchError::Worker("worker stdin unavailable".into()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| BenchError::Worker("worker stdout unavailable".into()))?;

        debug!("spawned worker {} {:?} (pid {})", program, args, child.id());
        Ok(Self {
            child,
            stdin: Some(BufWriter::new(stdin)),
            stdout: BufReader::new(stdout),
            line: String::new(),
        })
    }

    pub fn request(&mut self, request: &str) -> Result<&str> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| BenchError::Worker("worker already shut down".into()))?;
        writeln!(stdin, "{}", request)?;
        stdin.flush()?;

        self.line.clear();
        if self.stdout.read_line(&mut self.line)? == 0 {
            return Err(BenchError::Worker("worker closed its output".into()));
        }
        let reply = self.line.trim();
        if let Some(msg) = reply.strip_prefix("err ") {
            return Err(BenchError::Worker(msg.to_string()));
        }
        Ok(reply)
    }

    /// Sends `quit`, closes the pipe and waits up to `grace` for the worker
    /// to exit on its own. Killed past that.
    fn shutdown(&mut self, grace: Duration) {
        if let Some(mut stdin) = self.stdin.take() {
            let _ = writeln!(stdin, "quit");
            let _ = stdin.flush();
        }

        let deadline = Instant::now() + grace;
        loop {
            match self.child.try_wait() {
                Ok(Some(status)) => {
                    debug!("worker exited with {}", status);
                    return;
                }
                Ok(None) if Instant::now() < deadline => {
                    thread::sleep(Duration::from_millis(5));
                }
                Ok(None) => {
                    warn!("worker ignored quit for {:?}, killing it", grace);
                    break;
                }
                Err(e) => {
                    warn!("failed to poll worker: {}", e);
                    break;
                }
            }
        }

        if let Err(e) = self.child.kill() {
            warn!("failed to stop worker: {}", e);
        }
        let _ = self.child.wait();
    }
}

impl Drop for WorkerProcess {
    fn drop(&mut self) {
        self.shutdown(QUIT_GRACE);
    }
}

impl PermanentBackend for WorkerProcess {
    fn permanent(&mut self, u: &Unitary, algorithm: Algorithm) -> Result<C64> {
        let req = encode_permanent(u, algorithm);
        let reply = self.request(&req)?;
        parse_complex(reply)
    }
}

impl SamplingBackend for WorkerProcess {
    fn configure(&mut self, u: &Unitary) -> Result<()> {
        let req = encode_unitary(u);
        let reply = self.request(&req)?;
        parse_ack(reply)
    }

    fn sample(&mut self, input: &BasicState) -> Result<BasicState> {
        let req = format!("sample {}", input);
        let reply = self.request(&req)?;
        reply.parse()
    }
}

pub fn encode_permanent(u: &Unitary, algorithm: Algorithm) -> String {
    let mut s = format!("perm {} {}", algorithm.selector(), u.size());
    push_entries(&mut s, u);
    s
}

pub fn encode_unitary(u: &Unitary) -> String {
    let mut s = format!("unitary {}", u.size());
    push_entries(&mut s, u);
    s
}

fn push_entries(s: &mut String, u: &Unitary) {
    for z in u.row_major() {
        // shortest round-trip form
        let _ = write!(s, " {:e} {:e}", z.re, z.im);
    }
}

/// `<re> <im>`
pub fn parse_complex(reply: &str) -> Result<C64> {
    let mut it = reply.split_whitespace();
    let mut next = || -> Result<f64> {
        it.next()
            .and_then(|t| t.parse::<f64>().ok())
            .ok_or_else(|| BenchError::Worker(format!("expected `<re> <im>`, got {:?}", reply)))
    };
    let re = next()?;
    let im = next()?;
    if it.next().is_some() {
        return Err(BenchError::Worker(format!(
            "expected `<re> <im>`, got {:?}",
            reply
        )));
    }
    Ok(C64::new(re, im))
}

pub fn parse_ack(reply: &str) -> Result<()> {
    if reply == "ok" {
        Ok(())
    } else {
        Err(BenchError::Worker(format!("expected `ok`, got {:?}", reply)))
    }
}
