//! Rotor blades that keep the balls moving.
//!
//! Each blade is a long-lived task on a fixed-period timer. Every tick it
//! grabs a handful of balls and throws them back, which reshuffles the
//! pool so consecutive peeks see different balls.

use crate::config::{CageConfig, UnderflowPolicy};
use crate::pool::{Ball, BallPool};
use rand::seq::SliceRandom;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, trace, warn};

/// Outcome of one agitation round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    /// Values thrown back into the pool, in hit-slot order.
    pub hits: Vec<Ball>,
    /// Hit slots that found the pool empty.
    pub missed: usize,
}

/// Grab up to `num_hits` balls without waiting and throw them back.
///
/// The slots of the hit buffer are written in a random order. That order
/// does not change which balls get taken, only where they land in the
/// buffer and therefore the order they go back in.
///
/// A slot that finds the pool empty keeps ball `0` under
/// [`UnderflowPolicy::ZeroFill`], and that placeholder is reinserted like a
/// real ball. Under [`UnderflowPolicy::Skip`] it is dropped.
pub async fn agitate_once(pool: &BallPool, num_hits: usize, underflow: UnderflowPolicy) -> Round {
    let order = {
        let mut order: Vec<usize> = (0..num_hits).collect();
        order.shuffle(&mut rand::thread_rng());
        order
    };

    let mut slots: Vec<Option<Ball>> = vec![None; num_hits];
    for i in order {
        if let Some(ball) = pool.try_pop() {
            slots[i] = Some(ball);
        }
    }

    let missed = slots.iter().filter(|s| s.is_none()).count();
    let hits: Vec<Ball> = match underflow {
        UnderflowPolicy::ZeroFill => slots.into_iter().map(|s| s.unwrap_or(0)).collect(),
        UnderflowPolicy::Skip => slots.into_iter().flatten().collect(),
    };

    for &ball in &hits {
        pool.push(ball).await;
    }

    if missed > 0 {
        debug!(
            hits = hits.len(),
            missed,
            zero_filled = underflow == UnderflowPolicy::ZeroFill,
            "agitation round found the pool short"
        );
    } else {
        trace!(hits = hits.len(), "agitation round");
    }
    Round { hits, missed }
}

/// Handle on the blades agitating one cage.
#[derive(Debug)]
pub struct Agitator {
    stop: watch::Sender<bool>,
    blades: Vec<JoinHandle<()>>,
}

impl Agitator {
    /// Spawn `config.blades` blade tasks on the current Tokio runtime.
    pub fn start(pool: Arc<BallPool>, config: &CageConfig) -> Self {
        let (stop, stop_rx) = watch::channel(false);
        let period = config.hit_period();
        let num_hits = config.hits_per_round();

        let blades = (0..config.blades)
            .map(|blade| {
                tokio::spawn(run_blade(
                    blade,
                    Arc::clone(&pool),
                    period,
                    num_hits,
                    config.underflow,
                    stop_rx.clone(),
                ))
            })
            .collect();

        info!(
            capacity = config.capacity,
            blades = config.blades,
            period_ms = period.as_millis() as u64,
            num_hits,
            "rotor blades started"
        );
        Self { stop, blades }
    }

    pub fn blade_count(&self) -> usize {
        self.blades.len()
    }

    /// Stop every blade. A blade finishes the round it is in, so balls it
    /// holds go back into the pool. Blades still running after `grace` are
    /// aborted.
    pub async fn shutdown(self, grace: Duration) {
        let _ = self.stop.send(true);
        let deadline = tokio::time::Instant::now() + grace;
        for mut blade in self.blades {
            if tokio::time::timeout_at(deadline, &mut blade).await.is_err() {
                warn!("rotor blade did not stop in time, aborting");
                blade.abort();
            }
        }
        info!("rotor blades stopped");
    }
}

async fn run_blade(
    blade: usize,
    pool: Arc<BallPool>,
    period: Duration,
    num_hits: usize,
    underflow: UnderflowPolicy,
    mut stop: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                agitate_once(&pool, num_hits, underflow).await;
            }
            changed = stop.changed() => {
                if changed.is_err() || *stop.borrow() {
                    break;
                }
            }
        }
    }
    debug!(blade, "rotor blade exiting");
}
