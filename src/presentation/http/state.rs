// src/presentation/http/state.rs
use std::sync::Arc;

use crate::application::services::ApplicationServices;

#[derive(Clone)]
pub struct HttpState {
    pub services: Arc<ApplicationServices>,
}
