//! Scale animations for overlay views
//!
//! The platform animation engine is consumed through [`Animator`]. Starting
//! an animation on a view supersedes any animation still running on it: the
//! older one neither applies its final value nor runs its completion.

use std::sync::Arc;
use std::time::Duration;

use crate::menu::{Scale, SharedMenuView};
use crate::scheduler::{Scheduler, Task};

pub trait Animator: Send + Sync {
    /// Animate `view` from its current scale to `to`, then run `on_complete`
    fn animate_scale(
        &self,
        view: SharedMenuView,
        to: Scale,
        duration: Duration,
        on_complete: Option<Task>,
    );
}

/// Animator that jumps to the final value when the duration elapses
///
/// Intermediate frames are left to the renderer; only the end state and the
/// completion are observable.
pub struct ScheduledAnimator {
    scheduler: Arc<dyn Scheduler>,
}

impl ScheduledAnimator {
    pub fn new(scheduler: Arc<dyn Scheduler>) -> Self {
        Self { scheduler }
    }
}

impl Animator for ScheduledAnimator {
    fn animate_scale(
        &self,
        view: SharedMenuView,
        to: Scale,
        duration: Duration,
        on_complete: Option<Task>,
    ) {
        let generation = view.lock().begin_animation();

        self.scheduler.defer(
            duration,
            Box::new(move || {
                {
                    let mut view = view.lock();
                    if view.animation_generation() != generation {
                        tracing::trace!(view = %view.id(), generation, "Superseded animation dropped");
                        return;
                    }
                    view.set_scale(to);
                }

                if let Some(done) = on_complete {
                    done();
                }
            }),
        );
    }
}
