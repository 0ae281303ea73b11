use ceybazaar_core::Envelope;
use ceybazaar_core::model::DeliveryRegion;

use crate::error::ApiError;
use crate::transport::ApiClient;

/// `Region/*` endpoints.
#[derive(Debug, Clone)]
pub struct RegionService {
    api: ApiClient,
}

impl RegionService {
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Envelope<Vec<DeliveryRegion>>, ApiError> {
        self.api.get("/Region/ViewDeliveryRegions", &[]).await
    }

    pub async fn create(
        &self,
        region: &DeliveryRegion,
    ) -> Result<Envelope<serde_json::Value>, ApiError> {
        self.api.post_json("/Region/NewDeliveryRegion", region).await
    }
}
