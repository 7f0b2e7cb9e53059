//! A single ball cage.
//!
//! A cage starts empty. The first pick fills it with balls `0..capacity` and
//! starts the rotor blades; every later pick peeks at one ball: it takes a
//! ball out, notes how many are left, and puts it straight back.

use crate::agitator::Agitator;
use crate::config::CageConfig;
use crate::error::KenoResult;
use crate::pool::{Ball, BallPool};
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;
use tracing::{info, trace};

const UNINITIALIZED: u8 = 0;
const FILLING: u8 = 1;
const ACTIVE: u8 = 2;

/// How long `shutdown` lets blades finish their current round.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Lifecycle of a cage. Moves forward only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CageState {
    Uninitialized,
    Filling,
    Active,
}

/// What a pick reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    /// A ball was peeked at; `remaining` is the pool size while it was out.
    Ball { ball: Ball, remaining: usize },
    /// The cage was empty and this pick filled it.
    Inserting { capacity: usize },
}

impl fmt::Display for Pick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pick::Ball { ball, remaining } => write!(f, "Ball {} (~{} remain)", ball, remaining),
            Pick::Inserting { capacity } => write!(f, "Inserting {} balls", capacity),
        }
    }
}

#[derive(Debug)]
pub struct Cage {
    config: CageConfig,
    pool: Arc<BallPool>,
    state: AtomicU8,
    activated: Notify,
    agitator: Mutex<Option<Agitator>>,
}

impl Cage {
    pub fn new(config: CageConfig) -> KenoResult<Self> {
        config.validate()?;
        Ok(Self {
            pool: Arc::new(BallPool::new(config.capacity)),
            config,
            state: AtomicU8::new(UNINITIALIZED),
            activated: Notify::new(),
            agitator: Mutex::new(None),
        })
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    pub fn pool(&self) -> &BallPool {
        &self.pool
    }

    pub fn state(&self) -> CageState {
        match self.state.load(Ordering::Acquire) {
            UNINITIALIZED => CageState::Uninitialized,
            FILLING => CageState::Filling,
            _ => CageState::Active,
        }
    }

    /// Peek at a ball, or fill the cage if this is its first pick.
    ///
    /// Exactly one caller ever fills a cage. A caller that loses that race,
    /// or finds every ball in the hands of the blades, waits for the next
    /// ball to come back instead of refilling.
    pub async fn pick_or_init(&self) -> Pick {
        if let Some(ball) = self.pool.try_pop() {
            return self.peek(ball);
        }

        if self
            .state
            .compare_exchange(UNINITIALIZED, FILLING, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            self.activate();
            return Pick::Inserting {
                capacity: self.config.capacity,
            };
        }

        self.wait_active().await;
        let ball = self.pool.pop().await;
        self.peek(ball)
    }

    /// Pick and write the result as one line to `out`.
    pub async fn pick_or_init_into<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        let pick = self.pick_or_init().await;
        writeln!(out, "{}", pick)
    }

    /// Wait for any ball, throw it straight back and return it.
    pub async fn smack_ball(&self) -> Ball {
        let ball = self.pool.pop().await;
        self.pool.push(ball).await;
        ball
    }

    /// Stop the rotor blades. Picks keep working on the now still pool.
    pub async fn shutdown(&self) {
        let agitator = self
            .agitator
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(agitator) = agitator {
            agitator.shutdown(SHUTDOWN_GRACE).await;
        }
    }

    fn peek(&self, ball: Ball) -> Pick {
        let remaining = self.pool.len();
        if let Err(ball) = self.pool.try_push(ball) {
            // Zero-filled surplus took the freed slot; hand the ball to a
            // task instead of holding up the picker.
            let pool = Arc::clone(&self.pool);
            tokio::spawn(async move { pool.push(ball).await });
        }
        trace!(ball, remaining, "picked ball");
        Pick::Ball { ball, remaining }
    }

    /// Fill the pool and start the blades. Only the caller that moved the
    /// cage to `Filling` gets here.
    fn activate(&self) {
        info!(capacity = self.config.capacity, "inserting balls");
        for ball in 0..self.config.capacity as Ball {
            // The pool started empty and only this caller adds new balls,
            // so every push fits.
            let _ = self.pool.try_push(ball);
        }

        if self.config.agitation {
            let agitator = Agitator::start(Arc::clone(&self.pool), &self.config);
            *self.agitator.lock().unwrap_or_else(|e| e.into_inner()) = Some(agitator);
        }

        self.state.store(ACTIVE, Ordering::Release);
        self.activated.notify_waiters();
    }

    async fn wait_active(&self) {
        loop {
            let notified = self.activated.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if self.state.load(Ordering::Acquire) == ACTIVE {
                return;
            }
            notified.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UnderflowPolicy;

    fn still(capacity: usize) -> Cage {
        Cage::new(CageConfig {
            agitation: false,
            ..CageConfig::with_capacity(capacity)
        })
        .unwrap()
    }

    #[test]
    fn pick_renders_wire_lines() {
        assert_eq!(
            Pick::Ball {
                ball: 17,
                remaining: 99
            }
            .to_string(),
            "Ball 17 (~99 remain)"
        );
        assert_eq!(
            Pick::Inserting { capacity: 100 }.to_string(),
            "Inserting 100 balls"
        );
    }

    #[tokio::test]
    async fn first_pick_fills_the_cage() {
        let cage = still(100);
        assert_eq!(cage.state(), CageState::Uninitialized);

        let mut out = String::new();
        cage.pick_or_init_into(&mut out).await.unwrap();

        assert_eq!(out, "Inserting 100 balls\n");
        assert_eq!(cage.state(), CageState::Active);
        assert_eq!(cage.capacity(), 100);
        assert_eq!(cage.pool().len(), 100);
    }

    #[tokio::test]
    async fn fill_inserts_each_ball_once() {
        let cage = still(50);
        cage.pick_or_init().await;

        let mut drained: Vec<Ball> = std::iter::from_fn(|| cage.pool().try_pop()).collect();
        drained.sort_unstable();
        assert_eq!(drained, (0..50).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn later_picks_peek_without_consuming() {
        let cage = still(10);
        cage.pick_or_init().await;

        for _ in 0..25 {
            match cage.pick_or_init().await {
                Pick::Ball { ball, remaining } => {
                    assert!(ball < 10);
                    assert_eq!(remaining, 9);
                }
                other => panic!("expected a ball, got {:?}", other),
            }
            assert_eq!(cage.pool().len(), 10);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_first_picks_fill_once() {
        let cage = Arc::new(still(200));
        let picks: Vec<_> = (0..8)
            .map(|_| {
                let cage = Arc::clone(&cage);
                tokio::spawn(async move { cage.pick_or_init().await })
            })
            .collect();

        let mut inserting = 0;
        for pick in picks {
            if let Pick::Inserting { .. } = pick.await.unwrap() {
                inserting += 1;
            }
        }
        assert_eq!(inserting, 1);
        assert_eq!(cage.pool().len(), 200);
    }

    #[test]
    fn rejects_frequency_without_a_blade_period() {
        let err = Cage::new(CageConfig {
            hit_frequency: 2_000_000_000,
            ..CageConfig::with_capacity(10)
        })
        .unwrap_err();
        assert!(matches!(err, crate::KenoError::FrequencyTooHigh { .. }));
    }

    #[tokio::test]
    async fn put_back_into_a_full_pool_is_handed_to_a_task() {
        let cage = still(3);
        cage.pick_or_init().await;

        // A surplus zero takes the slot the picked ball left behind.
        let ball = cage.pool().try_pop().unwrap();
        assert_eq!(ball, 0);
        cage.pool().try_push(0).unwrap();

        assert_eq!(cage.peek(ball), Pick::Ball { ball, remaining: 3 });
        assert_eq!(cage.pool().len(), 3);

        assert_eq!(cage.pool().try_pop(), Some(1));
        tokio::time::timeout(Duration::from_secs(1), async {
            while cage.pool().len() < 3 {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("pending put-back should land once a slot frees up");

        let mut balls = cage.pool().snapshot();
        balls.sort_unstable();
        assert_eq!(balls, vec![0, 0, 2]);
    }

    #[tokio::test]
    async fn smack_ball_returns_a_ball_and_keeps_the_count() {
        let cage = still(5);
        cage.pick_or_init().await;

        let ball = cage.smack_ball().await;
        assert!(ball < 5);
        assert_eq!(cage.pool().len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn agitated_cage_keeps_its_balls_across_shutdown() {
        let cage = Cage::new(CageConfig {
            underflow: UnderflowPolicy::Skip,
            ..CageConfig::with_capacity(30)
        })
        .unwrap();
        cage.pick_or_init().await;

        tokio::time::sleep(Duration::from_secs(3)).await;
        for _ in 0..10 {
            assert!(matches!(cage.pick_or_init().await, Pick::Ball { ball, .. } if ball < 30));
        }
        cage.shutdown().await;

        let mut balls = cage.pool().snapshot();
        balls.sort_unstable();
        assert_eq!(balls, (0..30).collect::<Vec<_>>());
    }
}
