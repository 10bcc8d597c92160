use itinerary_core::ProgressSink;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// Forwards progress ticks over a channel back to the submitting context.
/// Sends are best-effort: a dropped receiver never errors the calculation.
pub struct ChannelProgress(UnboundedSender<u32>);

impl ChannelProgress {
    pub fn new(sender: UnboundedSender<u32>) -> Self {
        Self(sender)
    }
}

impl ProgressSink for ChannelProgress {
    fn report(&self, tick: u32) {
        // The consumer may have gone away; that is its prerogative.
        let _ = self.0.send(tick);
    }
}

/// Logs ticks instead of delivering them anywhere.
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn report(&self, tick: u32) {
        debug!("calculation progress: {tick}");
    }
}
