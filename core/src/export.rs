use log::info;

use crate::engine::SharedEngine;
use crate::error::CoreError;

/// Single-flight guard around the engine's output stream. A second export
/// while one is in progress fails fast instead of queueing; the export
/// pipeline itself lives behind the engine boundary.
pub struct ExportService {
    engine: SharedEngine,
    in_progress: bool,
}

impl ExportService {
    pub fn new(engine: SharedEngine) -> Self {
        Self {
            engine,
            in_progress: false,
        }
    }

    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn start(&mut self) -> Result<(), CoreError> {
        if self.in_progress {
            return Err(CoreError::ExportInProgress);
        }
        self.engine
            .lock()
            .map_err(|_| CoreError::Runtime("Engine lock poisoned".to_string()))?
            .create_output_stream()?;
        self.in_progress = true;
        info!("Export stream opened");
        Ok(())
    }

    pub fn finish(&mut self) {
        self.in_progress = false;
    }
}
