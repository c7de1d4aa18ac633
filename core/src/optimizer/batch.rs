use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// One animation frame at 60 Hz.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);
pub const DEFAULT_DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// Coalesces bursts of UI mutations (drags, multi-select edits) into one
/// flush aligned to the next animation frame. Items come back out in
/// enqueue order; no two flushes can overlap because polling is driven by
/// the single host tick.
pub struct BatchQueue<T> {
    queue: VecDeque<T>,
    frame_interval: Duration,
    deadline: Option<Instant>,
}

impl<T> BatchQueue<T> {
    pub fn new() -> Self {
        Self::with_interval(DEFAULT_FRAME_INTERVAL)
    }

    pub fn with_interval(frame_interval: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            frame_interval,
            deadline: None,
        }
    }

    /// The first push of a burst arms the frame deadline.
    pub fn push(&mut self, item: T, now: Instant) {
        if self.deadline.is_none() {
            self.deadline = Some(now + self.frame_interval);
        }
        self.queue.push_back(item);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the whole batch once the frame deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<Vec<T>> {
        match self.deadline {
            Some(deadline) if now >= deadline => Some(self.flush_now()),
            _ => None,
        }
    }

    pub fn flush_now(&mut self) -> Vec<T> {
        self.deadline = None;
        self.queue.drain(..).collect()
    }
}

impl<T> Default for BatchQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Wraps high-frequency handlers (resize, scroll) so downstream work runs
/// only once input has quiesced for the configured delay.
pub struct Debouncer {
    delay: Duration,
    last_trigger: Option<Instant>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_DEBOUNCE_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            last_trigger: None,
        }
    }

    pub fn trigger(&mut self, now: Instant) {
        self.last_trigger = Some(now);
    }

    pub fn pending(&self) -> bool {
        self.last_trigger.is_some()
    }

    /// True exactly once per quiesced burst; re-arms afterwards.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.last_trigger {
            Some(last) if now.duration_since(last) >= self.delay => {
                self.last_trigger = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}
