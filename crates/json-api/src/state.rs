//! State

use std::sync::Arc;

use reprieve_app::{context::AppContext, domain::locations::records::LocationUuid};

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,

    /// Location a cascade run falls back to when the request names none.
    pub(crate) default_location: Option<LocationUuid>,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, default_location: Option<LocationUuid>) -> Self {
        Self {
            app,
            default_location,
        }
    }

    #[must_use]
    pub(crate) fn shared(app: AppContext, default_location: Option<LocationUuid>) -> Arc<Self> {
        Arc::new(Self::new(app, default_location))
    }
}
