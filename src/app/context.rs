use crate::api::ApiClient;
use crate::app::error::Result;
use crate::bus::EventBus;
use crate::config::Config;
use crate::ui::{ActivityLog, Application, ComponentLibrary, Router};

/// Routes the command line navigates between.
pub const ROUTES: &[(&str, &str)] = &[
    ("/", "home"),
    ("/sources", "sources"),
    ("/contents", "contents"),
    ("/recommendations", "recommendations"),
    ("/system", "system"),
];

pub struct AppContext {
    pub config: Config,
    pub api: ApiClient,
    pub bus: EventBus,
    pub app: Application,
}

impl AppContext {
    /// Build and mount the application. Runs once per process.
    pub fn bootstrap(config: Config) -> Result<Self> {
        let api = ApiClient::new(&config.api)?;
        let bus = EventBus::new();

        let router = ROUTES
            .iter()
            .fold(Router::new(), |router, (path, name)| router.route(*path, *name));

        let mut app = Application::new(bus.clone());
        app.use_plugin(ComponentLibrary::new(&config.theme)?)
            .use_plugin(router)
            .component(ActivityLog::new());
        app.mount(&config.ui.mount)?;

        tracing::debug!(base_url = %api.base_url(), "bootstrap complete");
        Ok(Self {
            config,
            api,
            bus,
            app,
        })
    }

    /// Move the router to `path`. Navigation failures are only logged.
    pub fn navigate(&mut self, path: &str) {
        if let Err(e) = self.app.navigate(path) {
            tracing::warn!("{}", e);
        }
    }
}
