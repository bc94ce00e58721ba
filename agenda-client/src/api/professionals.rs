//! Directory, professional detail, review and availability endpoints

use chrono::NaiveDate;
use shared::Page;
use shared::filter::FilterQuery;
use shared::models::{
    Availability, AvailabilityQuery, Professional, ProfessionalUpdate, Review, ReviewCreate,
};

use super::ApiClient;
use crate::ClientResult;

impl ApiClient {
    /// `GET /professionals/`
    pub async fn list_professionals(
        &self,
        query: &FilterQuery,
    ) -> ClientResult<Page<Professional>> {
        self.get_query("/professionals/", query).await
    }

    /// `GET /professionals/featured/`
    pub async fn featured_professionals(&self) -> ClientResult<Vec<Professional>> {
        self.get("/professionals/featured/").await
    }

    /// `GET /professionals/{id}/`
    pub async fn get_professional(&self, id: &str) -> ClientResult<Professional> {
        self.get(&format!("/professionals/{}/", id)).await
    }

    /// `PATCH /professionals/profile/`: the signed-in professional's listing and hours
    pub async fn update_professional_profile(
        &self,
        update: &ProfessionalUpdate,
    ) -> ClientResult<Professional> {
        self.patch("/professionals/profile/", update).await
    }

    /// `GET /professionals/{id}/reviews/`
    pub async fn list_reviews(&self, professional_id: &str) -> ClientResult<Vec<Review>> {
        self.get(&format!("/professionals/{}/reviews/", professional_id)).await
    }

    /// `POST /professionals/{id}/reviews/`
    pub async fn post_review(
        &self,
        professional_id: &str,
        review: &ReviewCreate,
    ) -> ClientResult<Review> {
        self.post(&format!("/professionals/{}/reviews/", professional_id), review).await
    }

    /// `GET /professionals/{id}/availability/?date=&service_id=`
    pub async fn availability(
        &self,
        professional_id: &str,
        date: NaiveDate,
        service_id: Option<&str>,
    ) -> ClientResult<Availability> {
        let query = AvailabilityQuery {
            date,
            service_id: service_id.map(str::to_string),
        };
        self.get_query(&format!("/professionals/{}/availability/", professional_id), &query).await
    }
}
