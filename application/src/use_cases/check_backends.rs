//! Check Backends use case
//!
//! Probes every configured backend for reachability and the models it serves.

use crate::ports::generation_gateway::{GenerationError, GenerationGateway};
use concept_domain::BackendDescriptor;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Availability of one backend
#[derive(Debug, Clone)]
pub struct BackendStatus {
    pub backend: BackendDescriptor,
    pub models: Result<Vec<String>, GenerationError>,
}

impl BackendStatus {
    pub fn is_available(&self) -> bool {
        self.models.is_ok()
    }

    /// Whether the configured model id is among the served models.
    ///
    /// `None` when the backend could not be probed.
    pub fn serves_configured_model(&self) -> Option<bool> {
        self.models
            .as_ref()
            .ok()
            .map(|models| models.iter().any(|m| *m == self.backend.model_id))
    }
}

/// Use case for probing backend availability
pub struct CheckBackendsUseCase<G: GenerationGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: GenerationGateway + 'static> CheckBackendsUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Probe all backends in parallel; statuses come back in input order.
    pub async fn execute(&self, backends: &[BackendDescriptor]) -> Vec<BackendStatus> {
        let mut join_set = JoinSet::new();

        for (index, backend) in backends.iter().enumerate() {
            let gateway = Arc::clone(&self.gateway);
            let backend = backend.clone();
            join_set.spawn(async move {
                let models = gateway.list_models(&backend).await;
                (index, models)
            });
        }

        let mut slots: Vec<Option<Result<Vec<String>, GenerationError>>> =
            vec![None; backends.len()];

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, models)) => {
                    match &models {
                        Ok(list) => info!(
                            "{} is available ({} models)",
                            backends[index].name,
                            list.len()
                        ),
                        Err(e) => warn!("{} is unavailable: {}", backends[index].name, e),
                    }
                    slots[index] = Some(models);
                }
                Err(e) => warn!("Probe task join error: {}", e),
            }
        }

        slots
            .into_iter()
            .zip(backends)
            .map(|(slot, backend)| BackendStatus {
                backend: backend.clone(),
                models: slot.unwrap_or_else(|| {
                    Err(GenerationError::Connection("probe task failed".to_string()))
                }),
            })
            .collect()
    }
}
