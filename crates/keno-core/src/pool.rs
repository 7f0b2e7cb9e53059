//! Bounded ball pool shared by pickers and rotor blades.
//!
//! The pool is a multiset: what matters is which balls it holds, not the
//! order they sit in. It has a fixed number of slots and is the only
//! synchronization between the tasks touching a cage. Non-blocking
//! operations (`try_pop`, `try_push`) never wait; `pop` and `push` suspend
//! the calling task until a ball or a free slot shows up.

use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::Notify;

/// A numbered ball.
pub type Ball = u32;

#[derive(Debug)]
pub struct BallPool {
    slots: Mutex<VecDeque<Ball>>,
    capacity: usize,
    /// Signalled when a slot frees up.
    space: Notify,
    /// Signalled when a ball lands in the pool.
    balls: Notify,
}

impl BallPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            space: Notify::new(),
            balls: Notify::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of balls currently at rest in the pool. Approximate as soon as
    /// it is read, since other tasks keep moving balls.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Remove a ball if one is available.
    pub fn try_pop(&self) -> Option<Ball> {
        let ball = self.lock().pop_front();
        if ball.is_some() {
            self.space.notify_one();
        }
        ball
    }

    /// Insert a ball if a slot is free; hands the ball back otherwise.
    pub fn try_push(&self, ball: Ball) -> Result<(), Ball> {
        {
            let mut slots = self.lock();
            if slots.len() >= self.capacity {
                return Err(ball);
            }
            slots.push_back(ball);
        }
        self.balls.notify_one();
        Ok(())
    }

    /// Wait for a free slot, then insert.
    pub async fn push(&self, mut ball: Ball) {
        loop {
            let notified = self.space.notified();
            tokio::pin!(notified);
            // Register before checking so a slot freed in between is not missed.
            notified.as_mut().enable();
            match self.try_push(ball) {
                Ok(()) => return,
                Err(back) => ball = back,
            }
            notified.await;
        }
    }

    /// Wait for a ball, then remove it.
    pub async fn pop(&self) -> Ball {
        loop {
            let notified = self.balls.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if let Some(ball) = self.try_pop() {
                return ball;
            }
            notified.await;
        }
    }

    /// Copy of the balls currently at rest.
    pub fn snapshot(&self) -> Vec<Ball> {
        self.lock().iter().copied().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Ball>> {
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }
}
