//! Terminal spinner for long-running installer calls.
//!
//! A spinner owns one drawing thread. The thread redraws on a 100 ms tick
//! until told to stop, then clears its line and acknowledges. Once
//! [`Spinner::stop`] returns (or the spinner is dropped), nothing more is
//! written.

use std::io::Write;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::cursor::MoveToColumn;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use tokio::sync::oneshot;

/// Animation frames, drawn in order.
pub const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Delay between frames.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// A running activity indicator.
///
/// # Example
///
/// ```
/// use patty_core::progress::Spinner;
///
/// let spinner = Spinner::start("Installing lpeg", std::io::sink());
/// spinner.stop();
/// ```
#[derive(Debug)]
pub struct Spinner {
    stop_tx: Option<mpsc::Sender<()>>,
    ack_rx: Option<oneshot::Receiver<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    /// Start drawing `label` on `writer`.
    pub fn start<W>(label: impl Into<String>, mut writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        let label = label.into();
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let (ack_tx, ack_rx) = oneshot::channel::<()>();

        let handle = thread::spawn(move || {
            let mut frame = 0usize;
            loop {
                // Terminal write errors are not worth failing an install over.
                let _ = draw(&mut writer, FRAMES[frame % FRAMES.len()], &label);
                frame = frame.wrapping_add(1);

                match stop_rx.recv_timeout(FRAME_INTERVAL) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            let _ = clear(&mut writer);
            let _ = ack_tx.send(());
        });

        Self {
            stop_tx: Some(stop_tx),
            ack_rx: Some(ack_rx),
            handle: Some(handle),
        }
    }

    /// Stop drawing and clear the line. Blocks until the thread has exited.
    ///
    /// Must not be called from inside an async runtime.
    pub fn stop(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(rx) = self.ack_rx.take() {
            let _ = rx.blocking_recv();
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn draw<W: Write>(writer: &mut W, frame: &str, label: &str) -> std::io::Result<()> {
    crossterm::queue!(
        writer,
        MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        Print(format!("{frame} {label}"))
    )?;
    writer.flush()
}

fn clear<W: Write>(writer: &mut W) -> std::io::Result<()> {
    crossterm::queue!(writer, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
    writer.flush()
}
