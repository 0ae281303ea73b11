//! Backend data model.
//!
//! Deserialization structs matching the backend's camelCase JSON. Every
//! entity is backend-owned; these are transient copies for display.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Auth
// =============================================================================

/// Credentials posted to `User/Login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_email: String,
    pub password: String,
}

/// Payload of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    pub token: String,
    pub user_name: String,
    #[serde(default)]
    pub user_type: String,
}

impl LoginResult {
    /// Only administrators may use the admin client.
    pub fn is_admin(&self) -> bool {
        self.user_type == "ADMIN"
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub category_name: String,
}

/// Body of `POST /Products/NewProductCat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub category_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_by: Option<String>,
}

/// Product as listed by `GET /Products/ViewProductList`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub product_name: String,
    pub price: f64,
    pub quantity: i64,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub product_cat_name: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub additional_image_paths: Vec<String>,
}

impl Product {
    /// Absolute URL of the main image, resolved against `asset_base`.
    ///
    /// The backend stores Windows-style paths (`\uploads\x.png`); separators
    /// are normalised to `/`.
    pub fn image_url(&self, asset_base: &str) -> Option<String> {
        self.image_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| asset_url(asset_base, p))
    }
}

/// Join a backend asset path onto the asset base address.
pub fn asset_url(asset_base: &str, path: &str) -> String {
    let path = path.replace('\\', "/");
    let base = asset_base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Category reference inside a product submission.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: i64,
}

/// JSON metadata part (`productDTO`) of a product submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub product_name: String,
    pub price: f64,
    pub quantity: i64,
    pub weight: f64,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_by: Option<String>,
    pub product_cat: CategoryRef,
}

// =============================================================================
// Delivery regions
// =============================================================================

/// Delivery region with its flat shipping cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRegion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub region_code: String,
    pub region_name: String,
    pub shipping_cost: f64,
}

// =============================================================================
// Orders
// =============================================================================

/// Payment/fulfilment status of an order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Unpaid,
    Paid,
    Completed,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unpaid => "UNPAID",
            Self::Paid => "PAID",
            Self::Completed => "COMPLETED",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "UNPAID" => Self::Unpaid,
            "PAID" => Self::Paid,
            "COMPLETED" => Self::Completed,
            _ => Self::Other(s),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(s: OrderStatus) -> Self {
        s.as_str().to_string()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivery progress of an order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeliveryStatus {
    Pending,
    Progressing,
    Delivered,
    Other(String),
}

impl DeliveryStatus {
    /// Statuses an administrator may move a paid order to.
    pub const SELECTABLE: [Self; 2] = [Self::Progressing, Self::Delivered];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "PENDING",
            Self::Progressing => "PROGRESSING",
            Self::Delivered => "DELIVERED",
            Self::Other(s) => s,
        }
    }

    /// Parse a user-supplied status name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Some(Self::Pending),
            "PROGRESSING" => Some(Self::Progressing),
            "DELIVERED" => Some(Self::Delivered),
            _ => None,
        }
    }
}

impl From<String> for DeliveryStatus {
    fn from(s: String) -> Self {
        Self::parse(&s).unwrap_or(Self::Other(s))
    }
}

impl From<DeliveryStatus> for String {
    fn from(s: DeliveryStatus) -> Self {
        s.as_str().to_string()
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_name: String,
    pub quantity: i64,
    #[serde(default)]
    pub unit_price: Option<f64>,
}

/// Customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default)]
    pub id: Option<i64>,
    pub order_id: i64,
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    pub status: OrderStatus,
    pub delivery_status: DeliveryStatus,
    pub total_cost: f64,
    #[serde(default)]
    pub shipping_cost: f64,
    #[serde(default)]
    pub added_on: Option<String>,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
}

/// Body of `POST /Admin/orders/complete`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteOrderRequest {
    pub order_id: i64,
}

/// Body of `POST /Admin/orders/delivery-status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryStatusRequest {
    pub order_id: i64,
    pub delivery_status: DeliveryStatus,
}

// =============================================================================
// Reports
// =============================================================================

/// Per-day sales report computed by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub total_orders: i64,
    #[serde(default)]
    pub paid_orders: i64,
    #[serde(default)]
    pub completed_orders: i64,
    #[serde(default)]
    pub total_revenue: f64,
    #[serde(default)]
    pub total_shipping_revenue: f64,
}
