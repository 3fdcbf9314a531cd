//! The application instance: plugins, components and the mount lifecycle.
//!
//! An [`Application`] is built once per process, extended with plugins
//! ([`ComponentLibrary`], [`Router`]) and components, then mounted at an id
//! selector. Mounting is the only state transition it has.

pub mod components;
pub mod library;
pub mod router;

pub use components::ActivityLog;
pub use library::{ComponentLibrary, Theme};
pub use router::{Route, Router};

use serde_json::json;

use crate::app::{Result, RiffleError};
use crate::bus::EventBus;

/// Emitted on the bus once the application is mounted.
pub const APP_MOUNTED: &str = "app:mounted";

/// Something that extends the application when installed.
pub trait Plugin {
    fn install(self, app: &mut Application);
}

/// What a component gets handed when the application mounts.
pub struct ComponentContext<'a> {
    pub bus: &'a EventBus,
    pub theme: Option<&'a Theme>,
    pub router: Option<&'a Router>,
}

pub trait Component: Send {
    fn name(&self) -> &str;

    /// Called once, in registration order, during [`Application::mount`].
    fn mounted(&mut self, _ctx: &ComponentContext<'_>) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountState {
    Unmounted,
    Mounted { selector: String },
}

pub struct Application {
    bus: EventBus,
    library: Option<ComponentLibrary>,
    router: Option<Router>,
    components: Vec<Box<dyn Component>>,
    state: MountState,
}

impl Application {
    pub fn new(bus: EventBus) -> Self {
        Self {
            bus,
            library: None,
            router: None,
            components: Vec::new(),
            state: MountState::Unmounted,
        }
    }

    pub fn use_plugin<P: Plugin>(&mut self, plugin: P) -> &mut Self {
        plugin.install(self);
        self
    }

    pub fn component<C: Component + 'static>(&mut self, component: C) -> &mut Self {
        self.components.push(Box::new(component));
        self
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn library(&self) -> Option<&ComponentLibrary> {
        self.library.as_ref()
    }

    pub fn theme(&self) -> Option<&Theme> {
        self.library.as_ref().map(ComponentLibrary::theme)
    }

    pub fn router(&self) -> Option<&Router> {
        self.router.as_ref()
    }

    pub fn state(&self) -> &MountState {
        &self.state
    }

    pub fn is_mounted(&self) -> bool {
        matches!(self.state, MountState::Mounted { .. })
    }

    /// Navigate the installed router. Without a router every path is unknown.
    pub fn navigate(&mut self, path: &str) -> Result<&Route> {
        match self.router.as_mut() {
            Some(router) => router.push(path),
            None => Err(RiffleError::RouteNotFound(path.to_string())),
        }
    }

    /// Mount the application at an id selector such as `#app`.
    pub fn mount(&mut self, selector: &str) -> Result<()> {
        if self.is_mounted() {
            return Err(RiffleError::AlreadyMounted);
        }
        validate_selector(selector)?;

        let ctx = ComponentContext {
            bus: &self.bus,
            theme: self.library.as_ref().map(ComponentLibrary::theme),
            router: self.router.as_ref(),
        };
        for component in &mut self.components {
            tracing::trace!(component = component.name(), "mounting component");
            component.mounted(&ctx);
        }

        self.state = MountState::Mounted {
            selector: selector.to_string(),
        };
        tracing::info!(
            selector,
            components = self.components.len(),
            "application mounted"
        );
        self.bus.emit(APP_MOUNTED, json!({ "selector": selector }));
        Ok(())
    }
}

fn validate_selector(selector: &str) -> Result<()> {
    match selector.strip_prefix('#') {
        Some(id) if !id.is_empty() && !id.chars().any(char::is_whitespace) => Ok(()),
        _ => Err(RiffleError::InvalidMountTarget(selector.to_string())),
    }
}
