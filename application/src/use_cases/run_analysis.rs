//! Run Analysis use case
//!
//! Orchestrates one concept analysis request across all configured backends.
//!
//! 1. Keep items with answer content (none left: empty result, fallback flagged)
//! 2. Validate ids and build the shared prompt
//! 3. Query every backend concurrently, each into its own result slot
//! 4. If no backend produced concepts or clusters, substitute the category fallback
//!
//! The use case never fails: backend and extraction problems are recorded per
//! analysis, and an error in steps 1-2 becomes a synthesized fallback that
//! carries the error text.

use crate::ports::generation_gateway::GenerationGateway;
use crate::ports::progress::{AnalysisProgress, NoProgress};
use concept_domain::analysis::item::{items_with_content, validate_item_ids};
use concept_domain::{
    AnalysisLimits, AnalysisResult, BackendDescriptor, ConceptAnalysis, DomainError,
    PromptTemplate, QaItem, analysis_from_response, synthesize, synthesize_after_error,
};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Error text for a backend whose task ended without reporting back
const BACKEND_TASK_FAILED: &str = "Backend task failed";

/// Input for the RunAnalysis use case
#[derive(Debug, Clone)]
pub struct RunAnalysisInput {
    pub items: Vec<QaItem>,
    /// Backends in configuration order; results are assembled in this order
    pub backends: Arc<[BackendDescriptor]>,
    pub limits: AnalysisLimits,
}

impl RunAnalysisInput {
    pub fn new(items: Vec<QaItem>, backends: Arc<[BackendDescriptor]>) -> Self {
        Self {
            items,
            backends,
            limits: AnalysisLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: AnalysisLimits) -> Self {
        self.limits = limits;
        self
    }
}

/// Use case for running a multi-backend concept analysis
pub struct RunAnalysisUseCase<G: GenerationGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: GenerationGateway + 'static> RunAnalysisUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunAnalysisInput) -> AnalysisResult {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunAnalysisInput,
        progress: &dyn AnalysisProgress,
    ) -> AnalysisResult {
        let items = items_with_content(&input.items);
        if items.is_empty() {
            info!(
                "No items with answers among {} submitted; skipping analysis",
                input.items.len()
            );
            progress.on_analysis_complete(true);
            return AnalysisResult::empty();
        }

        let prompt = match Self::prepare(&items, &input.limits) {
            Ok(prompt) => prompt,
            Err(e) => {
                if e.is_input_error() {
                    warn!("Request items rejected, using category fallback: {}", e);
                } else {
                    warn!("Analysis preparation failed, using category fallback: {}", e);
                }
                progress.on_analysis_complete(true);
                return AnalysisResult::fallback(synthesize_after_error(&items, e.to_string()));
            }
        };

        info!(
            "Starting analysis of {} items with {} backends",
            items.len(),
            input.backends.len()
        );

        let analyses = self.dispatch(&input.backends, prompt, progress).await;

        let result = if analyses.iter().all(ConceptAnalysis::is_empty) {
            info!(
                "No backend produced concepts or clusters ({} attempted); using category fallback",
                analyses.len()
            );
            AnalysisResult::fallback(synthesize(&items))
        } else {
            AnalysisResult::from_backends(analyses)
        };

        info!(
            "Analysis complete: {} analyses, fallback_used={}",
            result.analyses.len(),
            result.fallback_used
        );
        progress.on_analysis_complete(result.fallback_used);
        result
    }

    /// Validate the filtered items and build the shared prompt
    fn prepare(items: &[QaItem], limits: &AnalysisLimits) -> Result<String, DomainError> {
        limits.validate()?;
        validate_item_ids(items)?;
        if items.len() > limits.max_prompt_items {
            debug!(
                "Prompt includes the first {} of {} items",
                limits.max_prompt_items,
                items.len()
            );
        }
        Ok(PromptTemplate::concept_analysis(items, limits))
    }

    /// Query all backends in parallel, one result slot per backend
    async fn dispatch(
        &self,
        backends: &[BackendDescriptor],
        prompt: String,
        progress: &dyn AnalysisProgress,
    ) -> Vec<ConceptAnalysis> {
        progress.on_dispatch_start(backends.len());

        let prompt: Arc<str> = prompt.into();
        let mut join_set = JoinSet::new();

        for (index, backend) in backends.iter().enumerate() {
            let gateway = Arc::clone(&self.gateway);
            let backend = backend.clone();
            let prompt = Arc::clone(&prompt);

            join_set.spawn(async move {
                let analysis = Self::query_backend(gateway.as_ref(), &backend, &prompt).await;
                (index, analysis)
            });
        }

        let mut slots: Vec<Option<ConceptAnalysis>> = vec![None; backends.len()];

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, analysis)) => {
                    progress.on_backend_complete(&backends[index], !analysis.is_error());
                    slots[index] = Some(analysis);
                }
                Err(e) => {
                    warn!("Backend task join error: {}", e);
                }
            }
        }

        slots
            .into_iter()
            .zip(backends)
            .map(|(slot, backend)| {
                slot.unwrap_or_else(|| {
                    ConceptAnalysis::failure(backend.name.as_str(), BACKEND_TASK_FAILED, None)
                })
            })
            .collect()
    }

    /// Query a single backend and extract its analysis
    async fn query_backend(
        gateway: &G,
        backend: &BackendDescriptor,
        prompt: &str,
    ) -> ConceptAnalysis {
        debug!("Querying backend {}", backend);

        match gateway.generate(backend, prompt).await {
            Ok(raw) => {
                let analysis = analysis_from_response(&backend.name, &raw);
                match &analysis.error {
                    Some(error) => warn!(
                        "Backend {} returned unusable output: {}",
                        backend.name, error
                    ),
                    None => info!(
                        "Backend {} responded: {} concepts, {} clusters",
                        backend.name,
                        analysis.concepts.len(),
                        analysis.suggested_clusters.len()
                    ),
                }
                analysis
            }
            Err(e) => {
                warn!("Backend {} failed: {}", backend.name, e);
                ConceptAnalysis::failure(backend.name.as_str(), e.to_string(), None)
            }
        }
    }
}
