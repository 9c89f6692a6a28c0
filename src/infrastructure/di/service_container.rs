//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{EnsureService, PathService, TemplateService, WaitService};
use crate::application::Poller;
use crate::config::Settings;
use crate::domain::EnvSnapshot;
use crate::infrastructure::traits::{
    Connector, FileSystem, HttpProbe, RealConnector, RealFileSystem, ReqwestProbe,
};

/// Container holding settings, the environment snapshot and I/O boundaries.
///
/// Services are cheap to build and are created on demand.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Environment captured at startup
    pub env: Arc<EnvSnapshot>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// TCP connector abstraction
    pub connector: Arc<dyn Connector>,

    /// HTTP probe abstraction
    pub http: Arc<dyn HttpProbe>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings, env: EnvSnapshot) -> Self {
        Self::with_deps(
            settings,
            env,
            Arc::new(RealFileSystem),
            Arc::new(RealConnector),
            Arc::new(ReqwestProbe),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        env: EnvSnapshot,
        fs: Arc<dyn FileSystem>,
        connector: Arc<dyn Connector>,
        http: Arc<dyn HttpProbe>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            env: Arc::new(env),
            fs,
            connector,
            http,
        }
    }

    pub fn template_service(&self) -> TemplateService {
        TemplateService::new(Arc::clone(&self.fs), self.settings.template_root.clone())
    }

    pub fn ensure_service(&self) -> EnsureService {
        EnsureService::new(Arc::clone(&self.env))
    }

    pub fn wait_service(&self) -> WaitService {
        WaitService::new(
            Arc::clone(&self.fs),
            Arc::clone(&self.connector),
            Arc::clone(&self.http),
            Poller::new(self.settings.poll_interval()),
            self.settings.connect_timeout(),
        )
    }

    pub fn path_service(&self) -> PathService {
        PathService::new(Arc::clone(&self.fs))
    }
}
