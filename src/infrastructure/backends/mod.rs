pub mod curio;

use std::sync::Arc;

use crate::domain::models::BackendBox;

pub struct BackendManager {}

impl BackendManager {
    /// Builds the process wide assistant client from the loaded configuration.
    /// Call once at startup and share the result.
    pub fn get() -> BackendBox {
        return Arc::new(curio::Curio::default());
    }
}
