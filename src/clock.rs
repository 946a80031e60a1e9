use std::time::Duration;

use crate::sequencer::Clock;

/// Real-time clock backed by the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioClock;

impl Clock for TokioClock {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
