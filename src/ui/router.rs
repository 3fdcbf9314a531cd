use serde_json::json;

use crate::app::{Result, RiffleError};
use crate::bus::EventBus;

use super::{Application, Plugin};

/// Emitted on the bus after every successful navigation.
pub const ROUTE_CHANGED: &str = "route:changed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: String,
    pub name: String,
}

/// Client-side router: an ordered route table and the current position.
#[derive(Debug, Default)]
pub struct Router {
    routes: Vec<Route>,
    current: Option<usize>,
    bus: Option<EventBus>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, path: impl Into<String>, name: impl Into<String>) -> Self {
        self.routes.push(Route {
            path: normalize(&path.into()),
            name: name.into(),
        });
        self
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn current(&self) -> Option<&Route> {
        self.current.map(|i| &self.routes[i])
    }

    pub fn resolve(&self, path: &str) -> Option<&Route> {
        let path = normalize(path);
        self.routes.iter().find(|r| r.path == path)
    }

    /// Navigate to `path`. The first route registered for a path wins.
    pub fn push(&mut self, path: &str) -> Result<&Route> {
        let normalized = normalize(path);
        let index = self
            .routes
            .iter()
            .position(|r| r.path == normalized)
            .ok_or_else(|| RiffleError::RouteNotFound(path.to_string()))?;

        self.current = Some(index);
        let route = &self.routes[index];
        tracing::debug!(path = %route.path, name = %route.name, "navigated");

        if let Some(bus) = &self.bus {
            bus.emit(
                ROUTE_CHANGED,
                json!({ "path": route.path, "name": route.name }),
            );
        }
        Ok(route)
    }
}

impl Plugin for Router {
    fn install(mut self, app: &mut Application) {
        self.bus = Some(app.bus().clone());
        app.router = Some(self);
    }
}

// "sources/" and "/sources" name the same route
fn normalize(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    format!("/{}", trimmed)
}
