//! The disaster lookup pipeline
//!
//! One call to [`DisasterPipeline::investigate`] runs the whole flow for a
//! disaster idea:
//! 1. Ask the agent for the affected places
//! 2. Geocode each place, dropping the ones that cannot be resolved
//! 3. Ask the agent for news about each resolved place
//! 4. Persist the aggregated bundle

use crate::api::Geocoder;
use crate::bundle::ResultBundle;
use crate::error::{Result, WatchError};
use crate::locations::{ResolvedLocation, normalize_location, split_locations};
use crate::news::NewsReport;
use crate::prompts::PromptLibrary;
use crate::store::ResultStore;
use dw_core::Agent;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// Marker of an empty Google search, matched against the agent's output
pub const NO_RESULTS_MARKER: &str = "Google hasn't returned any results for this query";

pub const EMPTY_IDEA_MESSAGE: &str = "Field 'idea' must be a non-empty string";

/// Outcome of a lookup
#[derive(Debug)]
pub enum Investigation {
    /// Search found nothing; nothing was geocoded or saved
    NoResults,
    /// Lookup completed and was saved
    Found(SavedBundle),
}

/// A bundle together with the exact bytes written to disk
#[derive(Debug)]
pub struct SavedBundle {
    pub bundle: ResultBundle,
    pub body: Vec<u8>,
    pub path: PathBuf,
}

/// Orchestrates agent, geocoder and store for one disaster idea
pub struct DisasterPipeline {
    agent: Arc<dyn Agent>,
    geocoder: Arc<dyn Geocoder>,
    prompts: PromptLibrary,
    store: ResultStore,
}

impl DisasterPipeline {
    /// Create a new pipeline
    pub fn new(
        agent: Arc<dyn Agent>,
        geocoder: Arc<dyn Geocoder>,
        store: ResultStore,
    ) -> Result<Self> {
        Ok(Self {
            agent,
            geocoder,
            prompts: PromptLibrary::new()?,
            store,
        })
    }

    /// Run the full lookup for `idea`
    pub async fn investigate(&self, idea: &str) -> Result<Investigation> {
        let idea = idea.trim();
        if idea.is_empty() {
            return Err(WatchError::InvalidRequest(EMPTY_IDEA_MESSAGE.to_string()));
        }

        info!(agent = self.agent.name(), idea, "Looking up affected locations");
        let outcome = self.agent.run(self.prompts.locations_prompt(idea)?).await?;

        if outcome.mentions(NO_RESULTS_MARKER) {
            info!(idea, "Search returned no results");
            return Ok(Investigation::NoResults);
        }

        let names = split_locations(&outcome.answer);
        info!(candidates = names.len(), "Agent proposed locations");

        let resolved = self.resolve_locations(&names).await;

        let mut bundle = ResultBundle::default();
        for location in &resolved {
            let report = self.lookup_news(location).await?;
            bundle.push(location, report);
        }

        let body = serde_json::to_vec(&bundle)?;
        let path = self.store.save(&body).await?;
        info!(locations = bundle.len(), path = %path.display(), "Lookup complete");

        Ok(Investigation::Found(SavedBundle { bundle, body, path }))
    }

    /// Geocode each name in order; misses and geocoder errors are skipped
    async fn resolve_locations(&self, names: &[String]) -> Vec<ResolvedLocation> {
        let mut resolved = Vec::with_capacity(names.len());

        for raw in names {
            let name = normalize_location(raw);
            if name.is_empty() {
                info!(location = %raw, "Location empty after normalisation, skipping");
                continue;
            }

            match self.geocoder.resolve(&name).await {
                Ok(Some(coordinates)) => resolved.push(ResolvedLocation { name, coordinates }),
                Ok(None) => info!(location = %name, "Location not found, skipping"),
                Err(e) => info!(location = %name, error = %e, "Geocoding failed, skipping"),
            }
        }

        resolved
    }

    async fn lookup_news(&self, location: &ResolvedLocation) -> Result<NewsReport> {
        let prompt = self.prompts.news_prompt(&location.name)?;
        let outcome = self.agent.run(prompt).await?;

        Ok(NewsReport::parse(&outcome.answer).unwrap_or_else(|e| {
            error!(location = %location.name, error = %e, "News response parsing error");
            NewsReport::placeholder()
        }))
    }
}
