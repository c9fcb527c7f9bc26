use std::ffi::OsStr;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::process::{Command, Output};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Loopback HTTP server answering every request with a fixed status line.
pub struct TargetServer {
    pub url: String,
    hits: Arc<AtomicUsize>,
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl TargetServer {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for TargetServer {
    fn drop(&mut self) {
        drop(self.shutdown.send(()));
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawn the target server, or `None` when the sandbox forbids binding.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_target_or_skip(status_line: &'static str) -> Result<Option<TargetServer>, String> {
    match spawn_target(status_line) {
        Ok(server) => Ok(Some(server)),
        Err(err) if err.contains("Operation not permitted") => {
            eprintln!("Skipping e2e test: {}", err);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn spawn_target(status_line: &'static str) -> Result<TargetServer, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let hits = Arc::new(AtomicUsize::new(0));
    let server_hits = Arc::clone(&hits);
    let (shutdown_tx, shutdown_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    let hits = Arc::clone(&server_hits);
                    thread::spawn(move || answer(stream, status_line, &hits));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(5));
                }
                Err(_) => break,
            }
        }
    });

    Ok(TargetServer {
        url: format!("http://{}", addr),
        hits,
        shutdown: shutdown_tx,
        thread: Some(handle),
    })
}

fn answer(mut stream: TcpStream, status_line: &str, hits: &AtomicUsize) {
    if stream.set_nonblocking(false).is_err() {
        return;
    }
    let mut buffer = [0u8; 1024];
    if stream.read(&mut buffer).is_err() {
        return;
    }
    hits.fetch_add(1, Ordering::SeqCst);
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Length: 2\r\nConnection: close\r\n\r\nOK",
        status_line
    );
    if stream.write_all(response.as_bytes()).is_err() || stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

/// Run the `hpa-load` binary and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_hpa_load<I, S>(args: I, working_dir: &std::path::Path) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = hpa_load_bin()?;
    Command::new(bin)
        .args(args)
        .current_dir(working_dir)
        .env_remove("HPA_LOAD_LOG")
        .env("RUST_LOG", "error")
        .output()
        .map_err(|err| format!("run hpa-load failed: {}", err))
}

fn hpa_load_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_hpa-load").map_or_else(
        || Err("CARGO_BIN_EXE_hpa-load missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}
