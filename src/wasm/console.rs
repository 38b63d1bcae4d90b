//! Forward `tracing` output to the browser console

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;

/// Buffers one formatted event and emits it as a single console call
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self {
            level,
            buffer: Vec::with_capacity(128),
        }
    }

    fn emit(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buffer);
        let message = JsValue::from_str(line.trim_end());
        match ConsoleMethod::for_level(self.level) {
            ConsoleMethod::Error => web_sys::console::error_1(&message),
            ConsoleMethod::Warn => web_sys::console::warn_1(&message),
            ConsoleMethod::Log => web_sys::console::log_1(&message),
        }
        self.buffer.clear();
    }
}

/// Console call an event is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleMethod {
    Log,
    Warn,
    Error,
}

impl ConsoleMethod {
    pub fn for_level(level: Level) -> Self {
        if level == Level::ERROR {
            ConsoleMethod::Error
        } else if level == Level::WARN {
            ConsoleMethod::Warn
        } else {
            ConsoleMethod::Log
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.emit();
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        self.emit();
    }
}

/// [`MakeWriter`] choosing the console method from the event level
pub struct MakeConsoleWriter;

impl<'a> MakeWriter<'a> for MakeConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Install the console subscriber; later calls are no-ops
pub fn install() {
    // No clock on wasm32-unknown-unknown, so no timestamps
    let _ = tracing_subscriber::fmt()
        .with_writer(MakeConsoleWriter)
        .with_ansi(false)
        .without_time()
        .with_max_level(Level::INFO)
        .try_init();
}
