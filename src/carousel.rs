//! Auto-advancing carousel
//!
//! Items are rendered twice back-to-back so the strip always has something
//! to the right of the current card. `Carousel` is the pure index/scroll
//! state; `CarouselTimer` is the cancellable task that ticks it.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Default time between advances
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Fraction of a card the scroll moves per rendered frame
const ANIMATION_STEP: f32 = 0.25;

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Animated scroll to this index
    Advance(usize),
    /// Wrapped past the last item; jumped to the start without animation
    Reset,
}

/// Carousel position over `count` real items
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Carousel {
    pub index: usize,
    pub count: usize,
    pub paused: bool,
    /// Current scroll position in cards, trails `index` while animating
    pub offset: f32,
}

impl Carousel {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    /// Update the item count, clamping the position
    pub fn set_count(&mut self, count: usize) {
        self.count = count;
        if self.index >= count {
            self.index = 0;
            self.offset = 0.0;
        }
    }

    /// Advance one item unless paused or empty
    pub fn tick(&mut self) -> Option<Step> {
        if self.paused || self.count == 0 {
            return None;
        }
        let next = (self.index + 1) % self.count;
        self.index = next;
        if next == 0 {
            self.offset = 0.0;
            Some(Step::Reset)
        } else {
            Some(Step::Advance(next))
        }
    }

    /// Move the scroll offset one animation step toward the index
    pub fn on_frame(&mut self) {
        let target = self.index as f32;
        if self.offset < target {
            self.offset = (self.offset + ANIMATION_STEP).min(target);
        } else {
            self.offset = target;
        }
    }

    pub fn is_animating(&self) -> bool {
        self.offset != self.index as f32
    }

    /// Index into the doubled sequence of the leftmost visible card
    pub fn first_visible(&self) -> usize {
        self.offset.floor() as usize
    }

    /// Fraction of the leftmost card already scrolled out of view
    pub fn scroll_fraction(&self) -> f32 {
        self.offset - self.offset.floor()
    }

    /// Item order starting at the leftmost visible card, `take` long
    pub fn visible_items(&self, take: usize) -> Vec<usize> {
        if self.count == 0 {
            return Vec::new();
        }
        (self.first_visible()..2 * self.count)
            .take(take)
            .map(|i| i % self.count)
            .collect()
    }
}

// =============================================================================
// Timer
// =============================================================================

/// Periodic ticker bound to the carousel's pause flag.
///
/// Running only while unpaused; the task is aborted on pause and on drop.
#[derive(Debug)]
pub struct CarouselTimer<T: Clone + Send + 'static> {
    interval: Duration,
    tx: UnboundedSender<T>,
    message: T,
    task: Option<JoinHandle<()>>,
}

impl<T: Clone + Send + 'static> CarouselTimer<T> {
    pub fn new(interval: Duration, tx: UnboundedSender<T>, message: T) -> Self {
        Self {
            interval,
            tx,
            message,
            task: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().map(|t| !t.is_finished()).unwrap_or(false)
    }

    /// Spawn the ticking task if it isn't running
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        let tx = self.tx.clone();
        let message = self.message.clone();
        let period = self.interval;
        tracing::debug!(?period, "carousel timer started");

        self.task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // First tick completes immediately; the first advance is one period out
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(message.clone()).is_err() {
                    break;
                }
            }
        }));
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("carousel timer stopped");
        }
    }

    /// Paused stops the task, unpaused (re)starts it
    pub fn set_paused(&mut self, paused: bool) {
        if paused {
            self.stop();
        } else {
            self.start();
        }
    }
}

impl<T: Clone + Send + 'static> Drop for CarouselTimer<T> {
    fn drop(&mut self) {
        self.stop();
    }
}
