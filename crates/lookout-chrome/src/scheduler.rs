//! UI-thread deferral
//!
//! Handlers never block. Work that must happen later goes through a
//! [`Scheduler`]: either a one-shot timer, or a microtask that runs once the
//! current handler has returned and before any timer or external event.

use parking_lot::Mutex;
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

pub type Task = Box<dyn FnOnce() + Send + 'static>;

pub trait Scheduler: Send + Sync {
    /// Run `task` once after `delay`
    fn defer(&self, delay: Duration, task: Task);

    /// Run `task` after the current handler, ahead of timers and events
    fn queue_microtask(&self, task: Task);
}

#[derive(Default)]
struct Queue {
    now: Duration,
    seq: u64,
    microtasks: VecDeque<Task>,
    /// Keyed by (deadline, insertion order)
    timers: BTreeMap<(Duration, u64), Task>,
}

/// Deterministic scheduler on a virtual clock
///
/// Nothing runs until the embedder pumps it with [`run_microtasks`],
/// [`advance`] or [`run_until_idle`]. Tasks always run with the queue
/// unlocked, so they may schedule further work.
///
/// [`run_microtasks`]: ManualScheduler::run_microtasks
/// [`advance`]: ManualScheduler::advance
/// [`run_until_idle`]: ManualScheduler::run_until_idle
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Arc<Mutex<Queue>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued microtasks and timers
    pub fn pending(&self) -> usize {
        let queue = self.queue.lock();
        queue.microtasks.len() + queue.timers.len()
    }

    /// Drain the microtask queue, including microtasks queued while draining
    pub fn run_microtasks(&self) -> usize {
        let mut ran = 0;
        loop {
            let task = self.queue.lock().microtasks.pop_front();
            match task {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => return ran,
            }
        }
    }

    /// Move the clock forward, firing every timer that falls due in order.
    /// Microtasks are drained before the first timer and after each one.
    pub fn advance(&self, by: Duration) {
        let target = self.queue.lock().now + by;
        self.run_microtasks();

        loop {
            let task = {
                let mut queue = self.queue.lock();
                let due = match queue.timers.keys().next() {
                    Some(&key) if key.0 <= target => key,
                    _ => break,
                };
                queue.now = due.0;
                queue.timers.remove(&due)
            };

            if let Some(task) = task {
                task();
            }
            self.run_microtasks();
        }

        self.queue.lock().now = target;
    }

    /// Fire everything, jumping the clock to each deadline in turn
    pub fn run_until_idle(&self) {
        self.run_microtasks();
        loop {
            let next = {
                let queue = self.queue.lock();
                queue
                    .timers
                    .keys()
                    .next()
                    .map(|&(deadline, _)| deadline.saturating_sub(queue.now))
            };
            match next {
                Some(wait) => self.advance(wait),
                None => break,
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    fn defer(&self, delay: Duration, task: Task) {
        let mut queue = self.queue.lock();
        let key = (queue.now + delay, queue.seq);
        queue.seq += 1;
        queue.timers.insert(key, task);
    }

    fn queue_microtask(&self, task: Task) {
        self.queue.lock().microtasks.push_back(task);
    }
}

/// Scheduler backed by a tokio runtime
///
/// Meant for a current-thread runtime driving the UI loop, where spawned
/// tasks run in FIFO order once the running handler yields.
#[derive(Clone)]
pub struct TokioScheduler {
    handle: tokio::runtime::Handle,
}

impl TokioScheduler {
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }

    /// Bind to the runtime of the calling context. Panics outside a runtime.
    pub fn current() -> Self {
        Self::new(tokio::runtime::Handle::current())
    }
}

impl Scheduler for TokioScheduler {
    fn defer(&self, delay: Duration, task: Task) {
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
    }

    fn queue_microtask(&self, task: Task) {
        self.handle.spawn(async move { task() });
    }
}
