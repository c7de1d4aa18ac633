pub mod adapter;
pub mod engine;
pub mod error;
pub mod export;
pub mod history;
pub mod mapping;
pub mod model;
pub mod ops;
pub mod optimizer;
pub mod playback;
pub mod session;
pub mod store;
pub mod util;

pub use error::CoreError;
pub use session::EditorSession;
