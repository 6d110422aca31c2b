use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::models::TimerEvent;
use crate::services::game_engine::GameEngine;

pub type SharedEngine = Arc<Mutex<GameEngine>>;

/// Background countdown: calls [`GameEngine::tick`] once per period and
/// forwards whatever it emits.
pub struct TimerDriver {
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl TimerDriver {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            handle: None,
        }
    }

    /// Replaces any running loop. The loop ends on its own after a
    /// `TimeExpired` event, once the engine stops producing events, or when
    /// the receiver is dropped.
    pub fn start(&mut self, engine: SharedEngine, events: mpsc::UnboundedSender<TimerEvent>) {
        self.stop();

        let period = self.period;
        info!("Starting countdown (period {}ms)", period.as_millis());

        self.handle = Some(tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // first tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let event = engine.lock().await.tick();
                let Some(event) = event else {
                    debug!("Engine no longer active, countdown stopped");
                    break;
                };

                let expired = event.is_expired();
                if events.send(event).is_err() {
                    debug!("Timer event receiver dropped, countdown stopped");
                    break;
                }
                if expired {
                    info!("Countdown finished");
                    break;
                }
            }
        }));
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for TimerDriver {
    fn drop(&mut self) {
        self.stop();
    }
}
