use std::any::type_name;
use std::io::{self, Result as IoResult, Stdout, Write};
use std::sync::Arc;

use parking_lot::Mutex as ParkingMutex;

use super::event::ProgressEvent;
use crate::telemetry::{PlainFormatter, TelemetryFormatter};

/// Abstraction over an output target that consumes full progress events.
///
/// Sinks are invoked synchronously, in registration order, from inside the
/// orchestrator's single-threaded run loop (spec §5: progress events for one
/// run are delivered in the exact order they were emitted). There is no
/// fan-out broadcasting here — a consumer that needs to replicate events to
/// multiple downstream targets should compose sinks, not rely on async
/// delivery ordering.
pub trait EventSink: Sync + Send {
    fn handle(&mut self, event: &ProgressEvent) -> IoResult<()>;

    fn name(&self) -> String {
        type_name::<Self>().to_string()
    }
}

/// Stdout sink with optional formatting.
pub struct StdOutSink<F: TelemetryFormatter = PlainFormatter> {
    handle: Stdout,
    formatter: F,
}

impl Default for StdOutSink {
    fn default() -> Self {
        Self {
            handle: io::stdout(),
            formatter: PlainFormatter::default(),
        }
    }
}

impl<F: TelemetryFormatter> StdOutSink<F> {
    pub fn with_formatter(formatter: F) -> Self {
        Self {
            handle: io::stdout(),
            formatter,
        }
    }
}

impl<F: TelemetryFormatter> EventSink for StdOutSink<F> {
    fn handle(&mut self, event: &ProgressEvent) -> IoResult<()> {
        let rendered = self.formatter.render_event(event).join_lines();
        self.handle.write_all(rendered.as_bytes())?;
        self.handle.flush()
    }
}

/// In-memory sink for testing and snapshots.
#[derive(Clone, Default)]
pub struct MemorySink {
    entries: Arc<ParkingMutex<Vec<ProgressEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a snapshot of all captured events, in emission order.
    pub fn snapshot(&self) -> Vec<ProgressEvent> {
        self.entries.lock().clone()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl EventSink for MemorySink {
    fn handle(&mut self, event: &ProgressEvent) -> IoResult<()> {
        self.entries.lock().push(event.clone());
        Ok(())
    }
}

/// Forwards events to an unbounded `flume` channel, for callers that want to
/// drive an external consumer (e.g. their own SSE bridge) off of a receiver
/// rather than a closure. Out of scope for the core: the HTTP/SSE front door
/// itself is not implemented here (spec §1), only this hand-off point.
pub struct ChannelSink {
    tx: flume::Sender<ProgressEvent>,
}

impl ChannelSink {
    pub fn new(tx: flume::Sender<ProgressEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelSink {
    fn handle(&mut self, event: &ProgressEvent) -> IoResult<()> {
        let _ = self.tx.send(event.clone());
        Ok(())
    }
}

/// Wraps a plain closure as a sink — the shape `run()`'s `onProgress`
/// callback (spec §6.1) is adapted into.
pub struct CallbackSink<F: FnMut(&ProgressEvent) + Send + Sync> {
    callback: F,
}

impl<F: FnMut(&ProgressEvent) + Send + Sync> CallbackSink<F> {
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F: FnMut(&ProgressEvent) + Send + Sync> EventSink for CallbackSink<F> {
    fn handle(&mut self, event: &ProgressEvent) -> IoResult<()> {
        (self.callback)(event);
        Ok(())
    }
}
