//! Tokio-backed clock

use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::outbound::ClockPort;

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl ClockPort for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
