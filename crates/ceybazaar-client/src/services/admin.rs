use chrono::NaiveDate;

use ceybazaar_core::Envelope;
use ceybazaar_core::model::{
    CompleteOrderRequest, DailyReport, DeliveryStatus, DeliveryStatusRequest, Order,
};

use crate::error::ApiError;
use crate::transport::ApiClient;

/// Date format the report endpoints expect.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// `Admin/*` endpoints: orders and reports.
#[derive(Debug, Clone)]
pub struct AdminService {
    api: ApiClient,
}

impl AdminService {
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    // =========================================================================
    // Orders
    // =========================================================================

    pub async fn all_orders(&self) -> Result<Envelope<Vec<Order>>, ApiError> {
        self.api.get("/Admin/orders/all", &[]).await
    }

    pub async fn paid_orders(&self) -> Result<Envelope<Vec<Order>>, ApiError> {
        self.api.get("/Admin/orders/paid", &[]).await
    }

    pub async fn complete_order(
        &self,
        order_id: i64,
    ) -> Result<Envelope<serde_json::Value>, ApiError> {
        self.api
            .post_json("/Admin/orders/complete", &CompleteOrderRequest { order_id })
            .await
    }

    pub async fn update_delivery_status(
        &self,
        order_id: i64,
        delivery_status: DeliveryStatus,
    ) -> Result<Envelope<serde_json::Value>, ApiError> {
        let body = DeliveryStatusRequest {
            order_id,
            delivery_status,
        };
        self.api
            .post_json("/Admin/orders/delivery-status", &body)
            .await
    }

    // =========================================================================
    // Reports
    // =========================================================================

    pub async fn daily_report(&self, date: NaiveDate) -> Result<Envelope<DailyReport>, ApiError> {
        let query = [("date", date.format(DATE_FORMAT).to_string())];
        self.api.get("/Admin/reports/daily", &query).await
    }

    pub async fn range_report(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Envelope<Vec<DailyReport>>, ApiError> {
        let query = [
            ("startDate", start.format(DATE_FORMAT).to_string()),
            ("endDate", end.format(DATE_FORMAT).to_string()),
        ];
        self.api.get("/Admin/reports/range", &query).await
    }
}
