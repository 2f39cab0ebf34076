//! Fetch, merge and cache path behind both movie endpoints.

use crate::cache::MovieCache;
use crate::error::{MovieError, UpstreamError};
use crate::metadata::MetadataApi;
use crate::models::{Actor, Movie, StreamingOption, TitleInfo};
use crate::streaming::StreamingApi;
use futures_util::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, warn};

pub const DEFAULT_BATCH_CONCURRENCY: usize = 4;

#[derive(Clone)]
pub struct Aggregator {
    metadata: Arc<dyn MetadataApi>,
    streaming: Arc<dyn StreamingApi>,
    cache: MovieCache,
    batch_concurrency: usize,
}

impl Aggregator {
    pub fn new(
        metadata: Arc<dyn MetadataApi>,
        streaming: Arc<dyn StreamingApi>,
        cache: MovieCache,
    ) -> Self {
        Self {
            metadata,
            streaming,
            cache,
            batch_concurrency: DEFAULT_BATCH_CONCURRENCY,
        }
    }

    pub fn with_batch_concurrency(mut self, limit: usize) -> Self {
        self.batch_concurrency = limit.max(1);
        self
    }

    pub fn cache(&self) -> &MovieCache {
        &self.cache
    }

    /// Returns the movie for `id`, from cache when possible.
    ///
    /// The base record is mandatory. A missing actor or streaming listing is
    /// an empty list. Any other actor or streaming failure also leaves the
    /// list empty, but that partial record is returned without being cached,
    /// so the next request tries the providers again.
    pub async fn movie(&self, id: &str) -> Result<Movie, MovieError> {
        if let Some(movie) = self.cache.get(id).await {
            return Ok(movie);
        }

        let (title, actors, streaming) = tokio::join!(
            self.metadata.fetch_title(id),
            self.metadata.fetch_main_actors(id),
            self.streaming.fetch_streaming_options(id),
        );

        let title = match title {
            Ok(title) => title,
            Err(e) if e.is_not_found() => {
                warn!("Movie {} not found upstream: {}", id, e);
                return Err(MovieError::NotFound { id: id.to_string() });
            }
            Err(e) => {
                error!("Failed to fetch movie data for {}: {}", id, e);
                return Err(MovieError::Upstream {
                    id: id.to_string(),
                    source: e,
                });
            }
        };

        let mut complete = true;
        let actors = or_empty(id, "main actors", actors, &mut complete);
        let streaming = or_empty(id, "streaming options", streaming, &mut complete);

        let movie = merge(id, title, actors, streaming);
        if complete {
            self.cache.put(id, movie.clone()).await;
        } else {
            debug!("Not caching partial record for {}", id);
        }
        Ok(movie)
    }

    /// Resolves every id, in input order.
    ///
    /// Repeated ids are fetched once. The first failing id (in input order)
    /// fails the whole batch.
    pub async fn movies(&self, ids: &[String]) -> Result<Vec<Movie>, MovieError> {
        let mut unique: Vec<String> = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(id) {
                unique.push(id.clone());
            }
        }

        let resolved: Vec<(String, Result<Movie, MovieError>)> = stream::iter(unique)
            .map(|id| async move {
                let result = self.movie(&id).await;
                (id, result)
            })
            .buffered(self.batch_concurrency)
            .collect()
            .await;

        let mut by_id: HashMap<String, Movie> = HashMap::with_capacity(resolved.len());
        for (id, result) in resolved {
            by_id.insert(id, result?);
        }
        Ok(ids.iter().filter_map(|id| by_id.get(id).cloned()).collect())
    }
}

fn or_empty<T: Default>(
    id: &str,
    what: &str,
    result: Result<T, UpstreamError>,
    complete: &mut bool,
) -> T {
    match result {
        Ok(value) => value,
        // The provider simply has nothing listed for this title.
        Err(e) if e.is_not_found() => {
            debug!("No {} listed for {}", what, id);
            T::default()
        }
        Err(e) => {
            warn!("Failed to fetch {} for {}: {}", what, id, e);
            *complete = false;
            T::default()
        }
    }
}

/// Combines the three upstream results into one record. Each source owns
/// disjoint fields.
pub fn merge(
    id: &str,
    title: TitleInfo,
    main_actors: Vec<Actor>,
    streaming_options: Vec<StreamingOption>,
) -> Movie {
    Movie {
        id: title
            .id
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| id.to_string()),
        title_text: title.title_text.unwrap_or_default(),
        title_type: title.title_type.unwrap_or_default(),
        release_year: title.release_year.unwrap_or_default(),
        release_date: title.release_date.unwrap_or_default(),
        genres: title.genres.unwrap_or_default(),
        primary_image: title.primary_image,
        ratings_summary: title.ratings_summary,
        main_actors,
        streaming_options,
    }
}
