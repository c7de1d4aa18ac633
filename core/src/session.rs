use std::sync::{Arc, Mutex};

use crate::engine::SharedEngine;
use crate::export::ExportService;
use crate::history::History;
use crate::mapping::SpriteRegistry;
use crate::model::project::Project;
use crate::ops::snap::SnapConfig;
use crate::ops::EditEngine;
use crate::playback::PlaybackCoordinator;
use crate::store::ProjectStore;

/// One editing session. Every collaborator is constructed here and injected
/// explicitly, so parallel sessions (and tests) never share state.
pub struct EditorSession {
    store: ProjectStore,
    registry: Arc<Mutex<SpriteRegistry>>,
    history: Arc<Mutex<History>>,
    edit: EditEngine,
    playback: PlaybackCoordinator,
    export: ExportService,
}

impl EditorSession {
    pub fn new(project: Project, engine: SharedEngine) -> Self {
        Self::with_snap(project, engine, SnapConfig::default())
    }

    pub fn with_snap(project: Project, engine: SharedEngine, snap: SnapConfig) -> Self {
        let store = ProjectStore::new(project);
        let registry = Arc::new(Mutex::new(SpriteRegistry::new()));
        let history = Arc::new(Mutex::new(History::new()));
        let edit = EditEngine::new(
            store.clone(),
            registry.clone(),
            engine.clone(),
            history.clone(),
            snap,
        );
        let playback = PlaybackCoordinator::new(store.clone(), engine.clone());
        let export = ExportService::new(engine);
        Self {
            store,
            registry,
            history,
            edit,
            playback,
            export,
        }
    }

    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    pub fn edit(&self) -> &EditEngine {
        &self.edit
    }

    pub fn edit_mut(&mut self) -> &mut EditEngine {
        &mut self.edit
    }

    pub fn playback(&self) -> &PlaybackCoordinator {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut PlaybackCoordinator {
        &mut self.playback
    }

    pub fn export(&self) -> &ExportService {
        &self.export
    }

    pub fn export_mut(&mut self) -> &mut ExportService {
        &mut self.export
    }

    pub fn registry(&self) -> Arc<Mutex<SpriteRegistry>> {
        self.registry.clone()
    }

    pub fn history(&self) -> Arc<Mutex<History>> {
        self.history.clone()
    }
}
