use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::CatalogStore;
use crate::error::CoreError;
use crate::movie::{MovieRecord, NewMovie};
use crate::pagination::paginate_from;
use crate::types::{new_movie_id, MovieId};

/// In-process store kept newest first.
///
/// Backs the API when `STORE_BACKEND=memory` and every HTTP-level test.
#[derive(Debug, Default)]
pub struct MemoryCatalogStore {
    records: RwLock<Vec<MovieRecord>>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn insert(&self, input: NewMovie) -> Result<MovieRecord, CoreError> {
        let record = MovieRecord::from_new(new_movie_id(), input, Utc::now());
        self.records.write().await.insert(0, record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        id: MovieId,
        input: NewMovie,
    ) -> Result<Option<MovieRecord>, CoreError> {
        let mut records = self.records.write().await;
        Ok(records.iter_mut().find(|r| r.id == id).map(|r| {
            r.replace(input, Utc::now());
            r.clone()
        }))
    }

    async fn delete(&self, id: MovieId) -> Result<bool, CoreError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() < before)
    }

    async fn get(&self, id: MovieId) -> Result<Option<MovieRecord>, CoreError> {
        Ok(self.records.read().await.iter().find(|r| r.id == id).cloned())
    }

    async fn list_page(&self, offset: u64, limit: u32) -> Result<Vec<MovieRecord>, CoreError> {
        Ok(paginate_from(
            self.records.read().await.as_slice(),
            offset,
            limit,
        ))
    }

    async fn count(&self) -> Result<u64, CoreError> {
        Ok(self.records.read().await.len() as u64)
    }

    async fn find_by_name(
        &self,
        term: &str,
        offset: u64,
        limit: u32,
    ) -> Result<(Vec<MovieRecord>, u64), CoreError> {
        let needle = term.to_lowercase();
        let matches: Vec<MovieRecord> = self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        let total = matches.len() as u64;
        Ok((paginate_from(&matches, offset, limit), total))
    }

    async fn all(&self) -> Result<Vec<MovieRecord>, CoreError> {
        Ok(self.records.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movie::DownloadLinks;

    fn movie(name: &str) -> NewMovie {
        NewMovie {
            name: name.to_string(),
            image: "http://img".to_string(),
            links: DownloadLinks::List(vec!["http://dl".to_string()]),
        }
    }

    #[tokio::test]
    async fn listing_is_newest_first() {
        let store = MemoryCatalogStore::new();
        store.insert(movie("first")).await.unwrap();
        store.insert(movie("second")).await.unwrap();

        let page = store.list_page(0, 10).await.unwrap();
        let names: Vec<_> = page.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["second", "first"]);
    }

    #[tokio::test]
    async fn update_keeps_id_and_created_at() {
        let store = MemoryCatalogStore::new();
        let created = store.insert(movie("old")).await.unwrap();

        let updated = store
            .update(created.id, movie("new"))
            .await
            .unwrap()
            .expect("record exists");
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.name, "new");
    }

    #[tokio::test]
    async fn update_and_delete_unknown_id() {
        let store = MemoryCatalogStore::new();
        let id = new_movie_id();
        assert!(store.update(id, movie("x")).await.unwrap().is_none());
        assert!(!store.delete(id).await.unwrap());
    }

    #[tokio::test]
    async fn find_by_name_reports_total_and_pages() {
        let store = MemoryCatalogStore::new();
        for i in 0..12 {
            store.insert(movie(&format!("Saw {i}"))).await.unwrap();
        }
        store.insert(movie("Up")).await.unwrap();

        let (page, total) = store.find_by_name("saw", 10, 10).await.unwrap();
        assert_eq!(total, 12);
        assert_eq!(page.len(), 2);
    }
}
