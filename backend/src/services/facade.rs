use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{
    InMemoryPlaceRepository, InMemoryRepository, PgAmenityRepository, PgPlaceRepository,
    PgReviewRepository, PgUserRepository, PlaceRepository, Repository, ReviewRepository,
    is_duplicate,
};
use crate::error::{HbnbError, Result};
use crate::models::{
    Amenity, AmenityUpdate, Entity, Place, PlaceDetails, PlaceInput, PlaceUpdate, Review,
    ReviewUpdate, User, UserUpdate,
};

/// Registration data for a new account. The password is hashed on construction of the `User`.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub is_admin: bool,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub text: String,
    pub rating: i32,
    pub place_id: Uuid,
}

/// One method per use case, delegating storage to the repositories.
#[derive(Clone)]
pub struct HbnbFacade {
    users: Arc<dyn Repository<User>>,
    amenities: Arc<dyn Repository<Amenity>>,
    places: Arc<dyn PlaceRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl HbnbFacade {
    pub fn new(
        users: Arc<dyn Repository<User>>,
        amenities: Arc<dyn Repository<Amenity>>,
        places: Arc<dyn PlaceRepository>,
        reviews: Arc<dyn ReviewRepository>,
    ) -> Self {
        Self {
            users,
            amenities,
            places,
            reviews,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryRepository::<User>::new()),
            Arc::new(InMemoryRepository::<Amenity>::new()),
            Arc::new(InMemoryPlaceRepository::new()),
            Arc::new(InMemoryRepository::<Review>::new()),
        )
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgAmenityRepository::new(pool.clone())),
            Arc::new(PgPlaceRepository::new(pool.clone())),
            Arc::new(PgReviewRepository::new(pool)),
        )
    }

    // USER

    /// The email check here is a fast path; the storage write is what guarantees uniqueness.
    pub async fn create_user(&self, new_user: NewUser) -> Result<User> {
        if self.get_user_by_email(&new_user.email).await?.is_some() {
            return Err(email_taken());
        }

        let user = User::new(
            &new_user.first_name,
            &new_user.last_name,
            &new_user.email,
            &new_user.password,
            new_user.is_admin,
        )?;
        let user = self
            .users
            .add(user)
            .await
            .map_err(|e| duplicate_as(e, email_taken))?;

        tracing::info!(user_id = %user.id(), is_admin = user.is_admin(), "User created");
        Ok(user)
    }

    pub async fn get_user(&self, user_id: Uuid) -> Result<User> {
        self.users
            .get(user_id)
            .await?
            .ok_or_else(|| HbnbError::not_found(User::KIND))
    }

    pub async fn get_users(&self) -> Result<Vec<User>> {
        Ok(self.users.get_all().await?)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.users.get_by_attribute("email", email.trim()).await?)
    }

    /// Non-admin callers can never change email, password or the admin flag.
    pub async fn update_user(
        &self,
        user_id: Uuid,
        mut update: UserUpdate,
        is_admin: bool,
    ) -> Result<User> {
        let mut user = self.get_user(user_id).await?;

        if !is_admin {
            update.email = None;
            update.password = None;
            update.is_admin = None;
        } else if let Some(email) = update.email.as_deref() {
            if let Some(existing) = self.get_user_by_email(email).await? {
                if existing.id() != user_id {
                    return Err(email_in_use());
                }
            }
        }

        user.apply(update)?;
        let user = self
            .users
            .update(user)
            .await
            .map_err(|e| duplicate_as(e, email_in_use))?
            .ok_or_else(|| HbnbError::not_found(User::KIND))?;

        tracing::info!(user_id = %user_id, "User updated");
        Ok(user)
    }

    /// Resolves login credentials to a user.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let user = self.get_user_by_email(email).await?;
        match user {
            Some(user) if user.verify_password(password) => Ok(user),
            _ => {
                tracing::warn!(email = %email, "Failed login attempt");
                Err(HbnbError::unauthorized("Invalid credentials"))
            }
        }
    }

    // AMENITY

    pub async fn create_amenity(&self, name: &str) -> Result<Amenity> {
        let amenity = self.amenities.add(Amenity::new(name)?).await?;
        tracing::info!(amenity_id = %amenity.id(), "Amenity created");
        Ok(amenity)
    }

    pub async fn get_amenity(&self, amenity_id: Uuid) -> Result<Amenity> {
        self.amenities
            .get(amenity_id)
            .await?
            .ok_or_else(|| HbnbError::not_found(Amenity::KIND))
    }

    pub async fn get_all_amenities(&self) -> Result<Vec<Amenity>> {
        Ok(self.amenities.get_all().await?)
    }

    pub async fn update_amenity(&self, amenity_id: Uuid, update: AmenityUpdate) -> Result<Amenity> {
        let mut amenity = self.get_amenity(amenity_id).await?;
        amenity.apply(update)?;
        self.amenities
            .update(amenity)
            .await?
            .ok_or_else(|| HbnbError::not_found(Amenity::KIND))
    }

    // PLACE

    /// Every listed amenity is checked before the place is written.
    pub async fn create_place(&self, input: PlaceInput, owner_id: Uuid) -> Result<PlaceDetails> {
        if self.users.get(owner_id).await?.is_none() {
            return Err(HbnbError::bad_request("Invalid user"));
        }
        let amenity_ids = dedup(&input.amenities);
        self.require_amenities(&amenity_ids).await?;

        let place = Place::new(
            &input.title,
            &input.description,
            input.price,
            input.latitude,
            input.longitude,
            owner_id,
        )?;
        let place = self.places.add(place).await?;

        for amenity_id in &amenity_ids {
            self.places.add_amenity(place.id(), *amenity_id).await?;
        }

        tracing::info!(place_id = %place.id(), owner_id = %owner_id, "Place created");
        self.place_details(place).await
    }

    pub async fn get_place(&self, place_id: Uuid) -> Result<Place> {
        self.places
            .get(place_id)
            .await?
            .ok_or_else(|| HbnbError::not_found(Place::KIND))
    }

    pub async fn get_place_details(&self, place_id: Uuid) -> Result<PlaceDetails> {
        let place = self.get_place(place_id).await?;
        self.place_details(place).await
    }

    pub async fn get_all_places(&self) -> Result<Vec<PlaceDetails>> {
        let places = self.places.get_all().await?;
        let mut details = Vec::with_capacity(places.len());
        for place in places {
            details.push(self.place_details(place).await?);
        }
        Ok(details)
    }

    pub async fn update_place(&self, place_id: Uuid, update: PlaceUpdate) -> Result<PlaceDetails> {
        let mut place = self.get_place(place_id).await?;
        place.apply(update)?;
        let place = self
            .places
            .update(place)
            .await?
            .ok_or_else(|| HbnbError::not_found(Place::KIND))?;

        tracing::info!(place_id = %place_id, "Place updated");
        self.place_details(place).await
    }

    /// Deletes a place together with its reviews and amenity links.
    pub async fn delete_place(&self, place_id: Uuid) -> Result<()> {
        self.get_place(place_id).await?;

        let reviews = self.reviews.get_by_place(place_id).await?;
        for review in &reviews {
            self.reviews.delete(review.id()).await?;
        }
        self.places.delete(place_id).await?;

        tracing::info!(place_id = %place_id, reviews_removed = reviews.len(), "Place deleted");
        Ok(())
    }

    pub async fn add_amenities_to_place(
        &self,
        place_id: Uuid,
        amenity_ids: &[Uuid],
    ) -> Result<PlaceDetails> {
        if amenity_ids.is_empty() {
            return Err(HbnbError::bad_request("Invalid input data"));
        }
        let place = self.get_place(place_id).await?;
        let amenity_ids = dedup(amenity_ids);
        self.require_amenities(&amenity_ids).await?;

        for amenity_id in &amenity_ids {
            self.places.add_amenity(place_id, *amenity_id).await?;
        }

        tracing::info!(
            place_id = %place_id,
            count = amenity_ids.len(),
            "Amenities linked to place"
        );
        self.place_details(place).await
    }

    async fn place_details(&self, place: Place) -> Result<PlaceDetails> {
        let owner = self.users.get(place.owner_id()).await?;
        let mut amenities = Vec::new();
        for amenity_id in self.places.amenity_ids(place.id()).await? {
            if let Some(amenity) = self.amenities.get(amenity_id).await? {
                amenities.push(amenity);
            }
        }
        Ok(PlaceDetails {
            place,
            owner,
            amenities,
        })
    }

    async fn require_amenities(&self, amenity_ids: &[Uuid]) -> Result<()> {
        for amenity_id in amenity_ids {
            if self.amenities.get(*amenity_id).await?.is_none() {
                return Err(HbnbError::bad_request(format!(
                    "Invalid input data: amenity {} not found",
                    amenity_id
                )));
            }
        }
        Ok(())
    }

    // REVIEW

    /// A user may review a place once, and never a place they own.
    pub async fn create_review(&self, new_review: NewReview, user_id: Uuid) -> Result<Review> {
        let place = self
            .places
            .get(new_review.place_id)
            .await?
            .ok_or_else(|| HbnbError::bad_request("Place not found"))?;
        if self.users.get(user_id).await?.is_none() {
            return Err(HbnbError::bad_request("User not found"));
        }
        if place.is_owned_by(user_id) {
            return Err(HbnbError::bad_request("You cannot review your own place"));
        }
        if self
            .reviews
            .get_by_user_and_place(user_id, place.id())
            .await?
            .is_some()
        {
            return Err(already_reviewed());
        }

        let review = Review::new(&new_review.text, new_review.rating, user_id, place.id())?;
        let review = self
            .reviews
            .add(review)
            .await
            .map_err(|e| duplicate_as(e, already_reviewed))?;

        tracing::info!(review_id = %review.id(), place_id = %place.id(), "Review created");
        Ok(review)
    }

    pub async fn get_review(&self, review_id: Uuid) -> Result<Review> {
        self.reviews
            .get(review_id)
            .await?
            .ok_or_else(|| HbnbError::not_found(Review::KIND))
    }

    pub async fn get_all_reviews(&self) -> Result<Vec<Review>> {
        Ok(self.reviews.get_all().await?)
    }

    pub async fn get_reviews_by_place(&self, place_id: Uuid) -> Result<Vec<Review>> {
        self.get_place(place_id).await?;
        Ok(self.reviews.get_by_place(place_id).await?)
    }

    pub async fn update_review(&self, review_id: Uuid, update: ReviewUpdate) -> Result<Review> {
        let mut review = self.get_review(review_id).await?;
        review.apply(update)?;
        self.reviews
            .update(review)
            .await?
            .ok_or_else(|| HbnbError::not_found(Review::KIND))
    }

    pub async fn delete_review(&self, review_id: Uuid) -> Result<()> {
        if !self.reviews.delete(review_id).await? {
            return Err(HbnbError::not_found(Review::KIND));
        }
        tracing::info!(review_id = %review_id, "Review deleted");
        Ok(())
    }
}

fn email_taken() -> HbnbError {
    HbnbError::Conflict("Email already registered".to_string())
}

fn email_in_use() -> HbnbError {
    HbnbError::bad_request("Email already in use")
}

fn already_reviewed() -> HbnbError {
    HbnbError::bad_request("You have already reviewed this place")
}

/// Maps a unique-key collision from storage to a client error; anything else stays internal.
fn duplicate_as(err: anyhow::Error, client_error: fn() -> HbnbError) -> HbnbError {
    if is_duplicate(&err) {
        client_error()
    } else {
        HbnbError::Internal(err)
    }
}

fn dedup(ids: &[Uuid]) -> Vec<Uuid> {
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(id) {
            unique.push(*id);
        }
    }
    unique
}
