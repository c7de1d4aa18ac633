pub mod action;
pub mod clip;
pub mod project;
pub mod track;

pub use action::{ActionRecord, Row};
pub use clip::{Clip, ClipKind, EffectConfig, MediaSource, Transform, Vec2};
pub use project::Project;
pub use track::Track;
