//! In-process movie cache.
//!
//! Entries are never evicted; they live as long as the cache itself. Clones
//! share the same underlying map.

use crate::models::Movie;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Clone, Debug, Default)]
pub struct MovieCache {
    entries: Arc<RwLock<HashMap<String, Movie>>>,
}

impl MovieCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, id: &str) -> Option<Movie> {
        let entries = self.entries.read().await;
        let hit = entries.get(id).cloned();
        debug!("Movie cache {} for {}", if hit.is_some() { "HIT" } else { "MISS" }, id);
        hit
    }

    /// Stores `movie` under `id`, replacing any previous snapshot wholesale.
    pub async fn put(&self, id: &str, movie: Movie) {
        self.entries.write().await.insert(id.to_string(), movie);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: &str, title: &str) -> Movie {
        Movie {
            id: id.to_string(),
            title_text: title.to_string(),
            title_type: "movie".to_string(),
            release_year: 2000,
            release_date: "2000-01-01".to_string(),
            genres: vec![],
            primary_image: None,
            ratings_summary: None,
            main_actors: vec![],
            streaming_options: vec![],
        }
    }

    #[tokio::test]
    async fn miss_for_unknown_id() {
        let cache = MovieCache::new();
        assert_eq!(cache.get("tt404").await, None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn hit_after_put() {
        let cache = MovieCache::new();
        cache.put("tt1", movie("tt1", "First")).await;
        assert_eq!(cache.get("tt1").await, Some(movie("tt1", "First")));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn put_replaces_existing_entry() {
        let cache = MovieCache::new();
        cache.put("tt1", movie("tt1", "Old")).await;
        cache.put("tt1", movie("tt1", "New")).await;
        assert_eq!(cache.get("tt1").await.unwrap().title_text, "New");
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn clones_share_entries() {
        let cache = MovieCache::new();
        let other = cache.clone();
        other.put("tt2", movie("tt2", "Shared")).await;
        assert!(cache.get("tt2").await.is_some());
    }

    #[tokio::test]
    async fn separate_instances_are_isolated() {
        let a = MovieCache::new();
        let b = MovieCache::new();
        a.put("tt3", movie("tt3", "Only in a")).await;
        assert!(b.get("tt3").await.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_writers_do_not_lose_entries() {
        let cache = MovieCache::new();
        let mut handles = Vec::new();
        for i in 0..32 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                let id = format!("tt{i}");
                cache.put(&id, movie(&id, "Concurrent")).await;
                cache.get(&id).await
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap().is_some());
        }
        assert_eq!(cache.len().await, 32);
    }
}
