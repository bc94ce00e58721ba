//! Service catalogue and schedule block endpoints

use shared::models::{ScheduleBlock, ScheduleBlockCreate, Service, ServiceCreate, ServiceUpdate};

use super::ApiClient;
use crate::ClientResult;

impl ApiClient {
    /// `GET /professionals/{id}/services/`
    pub async fn list_services(&self, professional_id: &str) -> ClientResult<Vec<Service>> {
        self.get(&format!("/professionals/{}/services/", professional_id)).await
    }

    /// `POST /professionals/{id}/services/`
    pub async fn add_service(
        &self,
        professional_id: &str,
        service: &ServiceCreate,
    ) -> ClientResult<Service> {
        self.post(&format!("/professionals/{}/services/", professional_id), service).await
    }

    /// `POST /services/`: adds to the signed-in professional's own listing
    pub async fn create_service(&self, service: &ServiceCreate) -> ClientResult<Service> {
        self.post("/services/", service).await
    }

    /// `PATCH /services/{id}/`
    pub async fn update_service(&self, id: &str, update: &ServiceUpdate) -> ClientResult<Service> {
        self.patch(&format!("/services/{}/", id), update).await
    }

    /// `DELETE /services/{id}/`
    pub async fn delete_service(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("/services/{}/", id)).await
    }

    /// `GET /professionals/blocks/`
    pub async fn list_blocks(&self) -> ClientResult<Vec<ScheduleBlock>> {
        self.get("/professionals/blocks/").await
    }

    /// `POST /professionals/blocks/`
    pub async fn create_block(&self, block: &ScheduleBlockCreate) -> ClientResult<ScheduleBlock> {
        self.post("/professionals/blocks/", block).await
    }

    /// `DELETE /professionals/blocks/{id}/`
    pub async fn delete_block(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("/professionals/blocks/{}/", id)).await
    }
}
