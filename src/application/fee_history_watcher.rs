// Fee history watcher - owns the refresh state and drives it from one task
use crate::application::fee_history_repository::FeeHistoryRepository;
use crate::application::fee_history_state::{FeeHistoryState, FeeHistoryView};
use crate::application::ticker::Ticker;
use crate::domain::fee_history::{ChartDuration, FeeHistoryRaw};
use crate::error::WatcherStopped;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::Instant;

enum Command {
    Select {
        duration: ChartDuration,
        reply: oneshot::Sender<FeeHistoryView>,
    },
    Shutdown {
        done: oneshot::Sender<()>,
    },
}

type FetchOutcome = (ChartDuration, anyhow::Result<FeeHistoryRaw>);

/// Consumer handle to a running watcher. Cheap to clone; the watcher stops
/// when [`shutdown`](Self::shutdown) is called or every handle is dropped.
#[derive(Clone)]
pub struct FeeHistoryHandle {
    commands: mpsc::Sender<Command>,
    view: watch::Receiver<FeeHistoryView>,
}

impl FeeHistoryHandle {
    /// Make `duration` the active one and return the view it surfaces.
    ///
    /// Cached data for `duration` is part of the returned view; a refresh, if
    /// one is due, lands later through [`subscribe`](Self::subscribe).
    pub async fn select(&self, duration: ChartDuration) -> Result<FeeHistoryView, WatcherStopped> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(Command::Select { duration, reply })
            .await
            .map_err(|_| WatcherStopped)?;
        rx.await.map_err(|_| WatcherStopped)
    }

    pub fn current(&self) -> FeeHistoryView {
        self.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FeeHistoryView> {
        self.view.clone()
    }

    /// Stop the watcher and wait until it has exited. Subscriptions end once
    /// this returns; fetches still in flight are discarded when they resolve.
    pub async fn shutdown(&self) {
        let (done, stopped) = oneshot::channel();
        if self.commands.send(Command::Shutdown { done }).await.is_ok() {
            let _ = stopped.await;
        }
    }
}

pub struct FeeHistoryWatcher {
    repository: Arc<dyn FeeHistoryRepository>,
    state: FeeHistoryState,
    ticker: Ticker,
    commands: mpsc::Receiver<Command>,
    outcomes_tx: mpsc::Sender<FetchOutcome>,
    outcomes_rx: mpsc::Receiver<FetchOutcome>,
    view: watch::Sender<FeeHistoryView>,
}

impl FeeHistoryWatcher {
    /// Spawn a watcher task on the current runtime.
    pub fn spawn(
        repository: Arc<dyn FeeHistoryRepository>,
        initial: ChartDuration,
    ) -> FeeHistoryHandle {
        let state = FeeHistoryState::new(initial);
        let ticker = Ticker::new(state.interval().period());
        let (view_tx, view_rx) = watch::channel(state.view());
        let (commands_tx, commands_rx) = mpsc::channel(16);
        let (outcomes_tx, outcomes_rx) = mpsc::channel(16);

        let watcher = Self {
            repository,
            state,
            ticker,
            commands: commands_rx,
            outcomes_tx,
            outcomes_rx,
            view: view_tx,
        };
        tokio::spawn(watcher.run());

        FeeHistoryHandle {
            commands: commands_tx,
            view: view_rx,
        }
    }

    async fn run(mut self) {
        tracing::info!("Fee history watcher started for {}", self.state.active());
        self.ticker.start();
        self.refresh_if_due();

        let done = loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(Command::Select { duration, reply }) => {
                        if let Some(due) = self.state.select(duration, Instant::now()) {
                            self.spawn_fetch(due);
                        }
                        self.publish();
                        let _ = reply.send(self.state.view());
                    }
                    Some(Command::Shutdown { done }) => break Some(done),
                    None => break None,
                },
                _ = self.ticker.tick() => {
                    self.refresh_if_due();
                }
                Some((duration, result)) = self.outcomes_rx.recv() => {
                    if self.state.apply_outcome(duration, result, Instant::now()) {
                        self.ticker.reset(self.state.interval().period());
                    }
                    self.publish();
                }
            }
        };

        self.ticker.stop();
        tracing::info!("Fee history watcher stopped");
        // Closes the view channel before acknowledging
        drop(self);
        if let Some(done) = done {
            let _ = done.send(());
        }
    }

    fn refresh_if_due(&self) {
        if let Some(duration) = self.state.due(Instant::now()) {
            self.spawn_fetch(duration);
        }
    }

    fn spawn_fetch(&self, duration: ChartDuration) {
        tracing::debug!("Fetching fee history for {}", duration);
        let repository = self.repository.clone();
        let outcomes = self.outcomes_tx.clone();

        tokio::spawn(async move {
            let result = repository.fetch_fee_history(duration).await;
            // The watcher may have stopped while we were waiting
            let _ = outcomes.send((duration, result)).await;
        });
    }

    fn publish(&self) {
        let next = self.state.view();
        self.view.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
    }
}
