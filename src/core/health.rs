use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::core::ports::api::HealthProbe;

const MIN_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Checking,
    Healthy,
    Unhealthy,
}

/// Polls a backend on a fixed interval until stopped or dropped.
pub struct HealthMonitor {
    status: watch::Receiver<HealthStatus>,
    task: Option<JoinHandle<()>>,
}

impl HealthMonitor {
    /// Probes immediately, then once per `every`, independently of any other in-flight call.
    /// A zero interval is raised to one second.
    pub fn start<P>(probe: Arc<P>, every: Duration) -> Self
    where
        P: HealthProbe + ?Sized + 'static,
    {
        let every = every.max(MIN_INTERVAL);
        let (tx, rx) = watch::channel(HealthStatus::Checking);
        let task = tokio::spawn(async move {
            let mut ticker = interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let status = match probe.check_health().await {
                    Ok(health) if health.is_healthy() => HealthStatus::Healthy,
                    Ok(health) => {
                        debug!("backend reported {}", health.status);
                        HealthStatus::Unhealthy
                    }
                    Err(e) => {
                        warn!("health check failed: {}", e);
                        HealthStatus::Unhealthy
                    }
                };
                if tx.send(status).is_err() {
                    break;
                }
            }
        });
        Self {
            status: rx,
            task: Some(task),
        }
    }

    pub fn status(&self) -> HealthStatus {
        *self.status.borrow()
    }

    /// Receiver that observes every status change.
    pub fn subscribe(&self) -> watch::Receiver<HealthStatus> {
        self.status.clone()
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().map_or(false, |t| !t.is_finished())
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}
