use crate::bus::{SubscriptionId, WILDCARD};

use super::{Component, ComponentContext};

/// Traces every bus event at debug level.
#[derive(Debug, Default)]
pub struct ActivityLog {
    subscription: Option<SubscriptionId>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscription(&self) -> Option<SubscriptionId> {
        self.subscription
    }
}

impl Component for ActivityLog {
    fn name(&self) -> &str {
        "activity-log"
    }

    fn mounted(&mut self, ctx: &ComponentContext<'_>) {
        let id = ctx.bus.on(WILDCARD, |event| {
            tracing::debug!(event = %event.name, payload = %event.payload, "bus event");
        });
        self.subscription = Some(id);
    }
}
