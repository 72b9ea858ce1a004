//! Process-local storage used for development and tests.

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::repository::{
    DuplicateKey, PlaceRepository, Repository, ReviewRepository, check_attribute,
};
use crate::models::{Entity, Place, Review};

/// Records kept in insertion order behind an async lock.
pub struct InMemoryRepository<T> {
    items: RwLock<Vec<T>>,
}

impl<T: Entity> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn add(&self, entity: T) -> Result<T> {
        let mut items = self.items.write().await;
        if items.iter().any(|item| item.id() == entity.id()) {
            anyhow::bail!("{} {} already exists", T::KIND, entity.id());
        }
        ensure_unique(&items, &entity)?;
        items.push(entity.clone());
        Ok(entity)
    }

    async fn get(&self, id: Uuid) -> Result<Option<T>> {
        let items = self.items.read().await;
        Ok(items.iter().find(|item| item.id() == id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<T>> {
        let mut all = self.items.read().await.clone();
        all.sort_by_key(|item| item.created_at());
        Ok(all)
    }

    async fn update(&self, entity: T) -> Result<Option<T>> {
        let mut items = self.items.write().await;
        ensure_unique(&items, &entity)?;
        match items.iter_mut().find(|item| item.id() == entity.id()) {
            Some(slot) => {
                *slot = entity.clone();
                Ok(Some(entity))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|item| item.id() != id);
        Ok(items.len() != before)
    }

    async fn get_by_attribute(&self, name: &str, value: &str) -> Result<Option<T>> {
        check_attribute::<T>(name)?;
        let items = self.items.read().await;
        Ok(items
            .iter()
            .find(|item| item.attribute(name).as_deref() == Some(value))
            .cloned())
    }
}

// Runs under the caller's write guard so check and insert are one step.
fn ensure_unique<T: Entity>(items: &[T], entity: &T) -> Result<(), DuplicateKey> {
    let Some(key) = entity.unique_key() else {
        return Ok(());
    };
    let taken = items.iter().any(|item| {
        item.id() != entity.id() && item.unique_key().as_deref() == Some(key.as_str())
    });
    if taken {
        Err(DuplicateKey { kind: T::KIND })
    } else {
        Ok(())
    }
}

#[async_trait]
impl ReviewRepository for InMemoryRepository<Review> {
    async fn get_by_place(&self, place_id: Uuid) -> Result<Vec<Review>> {
        let mut reviews: Vec<Review> = self
            .items
            .read()
            .await
            .iter()
            .filter(|review| review.place_id() == place_id)
            .cloned()
            .collect();
        reviews.sort_by_key(|review| review.created_at());
        Ok(reviews)
    }

    async fn get_by_user_and_place(
        &self,
        user_id: Uuid,
        place_id: Uuid,
    ) -> Result<Option<Review>> {
        let items = self.items.read().await;
        Ok(items
            .iter()
            .find(|review| review.user_id() == user_id && review.place_id() == place_id)
            .cloned())
    }
}

/// Places plus the place/amenity link table.
#[derive(Default)]
pub struct InMemoryPlaceRepository {
    places: InMemoryRepository<Place>,
    links: RwLock<Vec<(Uuid, Uuid)>>,
}

impl InMemoryPlaceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<Place> for InMemoryPlaceRepository {
    async fn add(&self, place: Place) -> Result<Place> {
        self.places.add(place).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<Place>> {
        self.places.get(id).await
    }

    async fn get_all(&self) -> Result<Vec<Place>> {
        self.places.get_all().await
    }

    async fn update(&self, place: Place) -> Result<Option<Place>> {
        self.places.update(place).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let removed = self.places.delete(id).await?;
        if removed {
            self.links
                .write()
                .await
                .retain(|(place_id, _)| *place_id != id);
        }
        Ok(removed)
    }

    async fn get_by_attribute(&self, name: &str, value: &str) -> Result<Option<Place>> {
        self.places.get_by_attribute(name, value).await
    }
}

#[async_trait]
impl PlaceRepository for InMemoryPlaceRepository {
    async fn add_amenity(&self, place_id: Uuid, amenity_id: Uuid) -> Result<()> {
        let mut links = self.links.write().await;
        if !links.contains(&(place_id, amenity_id)) {
            links.push((place_id, amenity_id));
        }
        Ok(())
    }

    async fn amenity_ids(&self, place_id: Uuid) -> Result<Vec<Uuid>> {
        let links = self.links.read().await;
        Ok(links
            .iter()
            .filter(|(linked_place, _)| *linked_place == place_id)
            .map(|(_, amenity_id)| *amenity_id)
            .collect())
    }
}
