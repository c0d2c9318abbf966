//! Polling Scheduler - Fixed-Interval Task Runner
//!
//! Runs named tasks on independent fixed intervals: once immediately at
//! startup, then on every tick. Each task owns a tokio task, so a slow
//! or failing execution of one never delays another. Executions of the
//! same task are serialized and missed ticks are skipped, so at most
//! one execution per task is ever in flight.

use std::future::Future;
use std::time::Duration;

use futures_util::future::BoxFuture;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::info;

type TaskFn = Box<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// One registered polling unit.
struct PollTask {
  /// Task name for logging.
  name: String,
  /// Refresh period.
  every: Duration,
  /// Execution closure; swallows its own errors.
  run: TaskFn,
}

/// Fixed-interval scheduler for the dashboard's polling tasks.
pub struct PollingScheduler {
  tasks: Vec<PollTask>,
  shutdown_tx: broadcast::Sender<()>,
}

impl PollingScheduler {
  /// Create a scheduler wired to the process shutdown channel.
  pub fn new(shutdown_tx: broadcast::Sender<()>) -> Self {
    Self {
      tasks: Vec::new(),
      shutdown_tx,
    }
  }

  /// Register a named task to run immediately and then every `every`.
  ///
  /// The closure is invoked once per tick; it must handle its own
  /// failures and resolve to `()` so one task can never halt the
  /// scheduler or its peers.
  pub fn register<F, Fut>(&mut self, name: &str, every: Duration, task: F)
  where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
  {
    self.tasks.push(PollTask {
      name: name.to_string(),
      every,
      run: Box::new(move || Box::pin(task())),
    });
  }

  /// Number of registered tasks.
  pub fn task_count(&self) -> usize {
    self.tasks.len()
  }

  /// Spawn every registered task and return their join handles.
  ///
  /// Each task loops until the shutdown channel fires. The first tick
  /// of `tokio::time::interval` completes immediately, which gives the
  /// run-once-at-startup behavior.
  pub fn start(self) -> Vec<JoinHandle<()>> {
    let mut handles = Vec::with_capacity(self.tasks.len());

    for task in self.tasks {
      let mut shutdown_rx = self.shutdown_tx.subscribe();

      handles.push(tokio::spawn(async move {
        let mut ticker = interval(task.every);
        // A run longer than the interval skips to the next aligned
        // tick instead of queueing a burst of catch-up executions.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
          task = %task.name,
          interval_secs = task.every.as_secs_f64(),
          "Polling task started"
        );

        loop {
          tokio::select! {
            biased;
            _ = shutdown_rx.recv() => {
              info!(task = %task.name, "Polling task stopped");
              break;
            }
            _ = ticker.tick() => {
              (task.run)().await;
            }
          }
        }
      }));
    }

    info!(task_count = handles.len(), "Scheduler started");
    handles
  }
}
