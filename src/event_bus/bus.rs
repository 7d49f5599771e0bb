use std::sync::Mutex;

use super::event::ProgressEvent;
use super::sink::EventSink;

/// Central dispatcher the orchestrator publishes progress events through.
///
/// `EventBus` owns an ordered list of sinks and calls `handle` on each, in
/// registration order, synchronously from the publishing call site. This
/// keeps the ordering guarantee in spec §5 trivially true: there is only one
/// publisher (the orchestrator's run loop) and no queueing between publish
/// and delivery.
#[derive(Default)]
pub struct EventBus {
    sinks: Mutex<Vec<Box<dyn EventSink>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink<T: EventSink + 'static>(sink: T) -> Self {
        Self::with_sinks(vec![Box::new(sink)])
    }

    pub fn with_sinks(sinks: Vec<Box<dyn EventSink>>) -> Self {
        Self {
            sinks: Mutex::new(sinks),
        }
    }

    pub fn add_sink<T: EventSink + 'static>(&self, sink: T) {
        self.add_boxed_sink(Box::new(sink));
    }

    pub fn add_boxed_sink(&self, sink: Box<dyn EventSink>) {
        self.sinks.lock().unwrap().push(sink);
    }

    /// Publish one event to every registered sink, in order. A sink I/O
    /// error is logged and does not stop delivery to the remaining sinks —
    /// a misbehaving consumer must never be able to stall the orchestrator.
    pub fn publish(&self, event: &ProgressEvent) {
        let mut sinks = self.sinks.lock().unwrap();
        for sink in sinks.iter_mut() {
            if let Err(err) = sink.handle(event) {
                tracing::warn!(sink = %sink.name(), %err, "event sink failed");
            }
        }
    }
}
