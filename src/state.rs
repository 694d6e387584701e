//! Shared application state injected into handlers.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{LinkService, RedirectService};
use crate::config::RegistrationConfig;
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;
use crate::utils::code_generator::RandomCodeGenerator;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
    pub repository: Arc<dyn LinkRepository>,
}

impl AppState {
    /// Wires both services around one registry.
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        click_sender: mpsc::Sender<ClickEvent>,
        registration: RegistrationConfig,
    ) -> Self {
        let generator = Arc::new(RandomCodeGenerator::new(registration.code_length));

        Self {
            link_service: Arc::new(LinkService::new(
                repository.clone(),
                generator,
                registration,
            )),
            redirect_service: Arc::new(RedirectService::new(repository.clone(), click_sender)),
            repository,
        }
    }
}
