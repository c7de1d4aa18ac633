//! Render-side performance strategy: animation-frame-aligned batching,
//! debouncing for high-frequency handlers, track/action virtualization and
//! bounded memo caches.

pub mod batch;
pub mod cache;
pub mod virtualize;

pub use batch::{BatchQueue, Debouncer, DEFAULT_DEBOUNCE_DELAY, DEFAULT_FRAME_INTERVAL};
pub use cache::BoundedCache;
pub use virtualize::{visible_actions, visible_track_range, Viewport, DEFAULT_OVERSCAN};
