use std::sync::Arc;

use common::payment::PaymentGateway;
use common::store::RecordStore;

use crate::config::AppConfig;
use crate::registration::RegistrationCoordinator;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub registrations: Arc<RegistrationCoordinator>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(
        store: Arc<dyn RecordStore>,
        gateway: Arc<dyn PaymentGateway>,
        config: AppConfig,
    ) -> Self {
        let registrations = Arc::new(RegistrationCoordinator::new(
            store.clone(),
            gateway,
            &config.payment,
        ));
        Self {
            store,
            registrations,
            config,
        }
    }
}
