//! Timer-driven sync triggers.

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::agent::{SyncAgent, SyncReport, SyncTrigger};
use super::remote::QuoteRemote;
use crate::error::QuotebookError;

/// Send a [`SyncTrigger::Timer`] on `tx` every `period`, first one after one period.
///
/// The task ends when the receiver is dropped.
pub fn spawn_timer(period: Duration, tx: mpsc::Sender<SyncTrigger>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticks = interval_at(Instant::now() + period, period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticks.tick().await;
            if tx.send(SyncTrigger::Timer).await.is_err() {
                break;
            }
        }
    })
}

/// Sync every `period` until `shutdown` resolves, reporting each outcome.
///
/// With `on_start`, a first sync runs immediately. Returns the number of
/// syncs attempted.
pub async fn run_periodic<R, S, F>(
    agent: &SyncAgent<R>,
    period: Duration,
    on_start: bool,
    shutdown: S,
    mut on_result: F,
) -> usize
where
    R: QuoteRemote,
    S: Future<Output = ()>,
    F: FnMut(SyncTrigger, &Result<SyncReport, QuotebookError>),
{
    let mut attempts = 0;

    if on_start {
        let result = agent.sync_once(SyncTrigger::Startup).await;
        on_result(SyncTrigger::Startup, &result);
        attempts += 1;
    }

    let mut ticks = interval_at(Instant::now() + period, period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            () = &mut shutdown => break,
            _ = ticks.tick() => {
                let result = agent.sync_once(SyncTrigger::Timer).await;
                on_result(SyncTrigger::Timer, &result);
                attempts += 1;
            }
        }
    }

    attempts
}
