//! Page behaviour against an in-process fake of the store backend.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{Duration, NaiveDate, Utc};
use serde_json::{Value, json};

use ceybazaar_cli::auth_cmd;
use ceybazaar_cli::category_cmd::{self, CategoryAction};
use ceybazaar_cli::context::PageContext;
use ceybazaar_cli::guard::SESSION_EXPIRED;
use ceybazaar_cli::notice::NoticeLevel;
use ceybazaar_cli::order_cmd::{self, OrderAction};
use ceybazaar_cli::pages::{
    CategoryPage, DashboardPage, LoginForm, LoginPage, Navigation, NewProductForm,
    NewProductPage, OrderActions, OrderFilter, OrdersPage, PageState, RegionForm, RegionPage,
    ReportsPage, SESSION_REJECTED,
};
use ceybazaar_cli::routes::Route;
use ceybazaar_core::config::Config;
use ceybazaar_core::model::{DeliveryStatus, OrderStatus};
use ceybazaar_core::{FileSessionStore, MemorySessionStore, Session, SessionStore};

const ADMIN_TOKEN: &str = "jwt-admin";

#[derive(Debug, Default)]
struct Fake {
    categories: Vec<Value>,
    orders: Vec<Value>,
    reject_categories: bool,
    regions: Vec<Value>,
    reject_regions: bool,
    /// Answer 401 to any request not carrying the admin token.
    strict_auth: bool,
    product_posts: usize,
    delivery_updates: Vec<Value>,
}

type Shared = Arc<Mutex<Fake>>;

fn envelope(code: &str, desc: &str, object: Value) -> Json<Value> {
    Json(json!({ "responseCode": code, "responseDesc": desc, "responseObject": object }))
}

fn ok(object: Value) -> Json<Value> {
    envelope("00", "Success", object)
}

fn authorized(fake: &Fake, headers: &HeaderMap) -> bool {
    if !fake.strict_auth {
        return true;
    }
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {ADMIN_TOKEN}"))
}

async fn login(Json(body): Json<Value>) -> Json<Value> {
    match (body["userEmail"].as_str(), body["password"].as_str()) {
        (Some("admin@ceybazaar.lk"), Some("secret")) => ok(json!({
            "token": ADMIN_TOKEN, "userName": "admin@ceybazaar.lk", "userType": "ADMIN"
        })),
        (Some("buyer@ceybazaar.lk"), Some("secret")) => ok(json!({
            "token": "jwt-buyer", "userName": "buyer@ceybazaar.lk", "userType": "CUSTOMER"
        })),
        _ => envelope("01", "Invalid username or password", Value::Null),
    }
}

async fn list_categories(State(fake): State<Shared>, headers: HeaderMap) -> Response {
    let fake = fake.lock().unwrap();
    if !authorized(&fake, &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    ok(Value::Array(fake.categories.clone())).into_response()
}

async fn new_category(State(fake): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    let mut fake = fake.lock().unwrap();
    if fake.reject_categories {
        return envelope("05", "Category already exists", Value::Null);
    }
    let id = fake.categories.len() + 1;
    fake.categories
        .push(json!({ "id": id, "categoryName": body["categoryName"] }));
    ok(Value::Null)
}

async fn list_regions(State(fake): State<Shared>) -> Json<Value> {
    ok(Value::Array(fake.lock().unwrap().regions.clone()))
}

async fn new_region(State(fake): State<Shared>, Json(mut body): Json<Value>) -> Json<Value> {
    let mut fake = fake.lock().unwrap();
    if fake.reject_regions {
        return envelope("03", "Region code already exists", Value::Null);
    }
    body["id"] = json!(fake.regions.len() + 1);
    fake.regions.push(body);
    ok(Value::Null)
}

async fn list_products() -> Json<Value> {
    ok(json!([
        { "id": 1, "productName": "Ceylon Tea", "price": 950.0, "quantity": 40,
          "imagePath": "uploads\\tea.png" },
        { "id": 2, "productName": "Black Pepper", "price": 600.0, "quantity": 3 }
    ]))
}

async fn new_product(State(fake): State<Shared>, mut multipart: Multipart) -> Json<Value> {
    while let Some(field) = multipart.next_field().await.unwrap() {
        let _ = field.bytes().await.unwrap();
    }
    fake.lock().unwrap().product_posts += 1;
    ok(Value::Null)
}

async fn all_orders(State(fake): State<Shared>, headers: HeaderMap) -> Response {
    let fake = fake.lock().unwrap();
    if !authorized(&fake, &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    ok(Value::Array(fake.orders.clone())).into_response()
}

async fn paid_orders(State(fake): State<Shared>) -> Json<Value> {
    let fake = fake.lock().unwrap();
    let paid = fake
        .orders
        .iter()
        .filter(|o| o["status"] == "PAID")
        .cloned()
        .collect();
    ok(Value::Array(paid))
}

async fn complete_order(State(fake): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    let mut fake = fake.lock().unwrap();
    let Some(order) = fake
        .orders
        .iter_mut()
        .find(|o| o["orderId"] == body["orderId"])
    else {
        return envelope("04", "Order not found", Value::Null);
    };
    order["status"] = json!("COMPLETED");
    ok(Value::Null)
}

async fn delivery_status(State(fake): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    let mut fake = fake.lock().unwrap();
    if let Some(order) = fake
        .orders
        .iter_mut()
        .find(|o| o["orderId"] == body["orderId"])
    {
        order["deliveryStatus"] = body["deliveryStatus"].clone();
    }
    fake.delivery_updates.push(body);
    ok(Value::Null)
}

async fn daily_report() -> Json<Value> {
    ok(json!({
        "totalOrders": 0, "paidOrders": 0, "completedOrders": 0,
        "totalRevenue": 0.0, "totalShippingRevenue": 0.0
    }))
}

fn order(order_id: i64, status: &str) -> Value {
    json!({
        "orderId": order_id, "customerName": "Nimal Perera", "status": status,
        "deliveryStatus": "PENDING", "totalCost": 4500.0, "shippingCost": 350.0,
        "orderItems": [{ "productName": "Ceylon Tea", "quantity": 2, "unitPrice": 950.0 }]
    })
}

fn routes(fake: Shared, with_daily_report: bool) -> Router {
    let mut router = Router::new()
        .route("/User/Login", post(login))
        .route("/Products/ViewProductCatList", get(list_categories))
        .route("/Products/NewProductCat", post(new_category))
        .route("/Products/ViewProductList", get(list_products))
        .route("/Products/NewProduct", post(new_product))
        .route("/Region/ViewDeliveryRegions", get(list_regions))
        .route("/Region/NewDeliveryRegion", post(new_region))
        .route("/Admin/orders/all", get(all_orders))
        .route("/Admin/orders/paid", get(paid_orders))
        .route("/Admin/orders/complete", post(complete_order))
        .route("/Admin/orders/delivery-status", post(delivery_status));
    if with_daily_report {
        router = router.route("/Admin/reports/daily", get(daily_report));
    }
    router.with_state(fake)
}

async fn serve(fake: Shared, with_daily_report: bool) -> String {
    let app = Router::new().nest("/CeyBazaar", routes(fake, with_daily_report));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/CeyBazaar")
}

fn context(base_url: &str, store: Arc<dyn SessionStore>) -> PageContext {
    let mut config = Config::default();
    config.backend.base_url = base_url.to_string();
    config.backend.asset_base_url = "http://assets.test".to_string();
    PageContext::new(&config, store).unwrap()
}

fn admin_session() -> Arc<MemorySessionStore> {
    let store = Arc::new(MemorySessionStore::default());
    store
        .set(ADMIN_TOKEN, "admin@ceybazaar.lk", Utc::now())
        .unwrap();
    store
}

fn messages(ctx: &PageContext, level: NoticeLevel) -> Vec<String> {
    ctx.notices
        .drain()
        .into_iter()
        .filter(|n| n.level == level)
        .map(|n| n.message)
        .collect()
}

// =========================================================================
// Login
// =========================================================================

#[tokio::test]
async fn admin_login_redirects_home_and_persists_token() {
    let base = serve(Arc::default(), true).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let store = Arc::new(FileSessionStore::new(&path, Duration::hours(1)));
    let ctx = context(&base, store.clone());

    let mut page = LoginPage::new(&ctx);
    let form = LoginForm {
        user_email: "admin@ceybazaar.lk".into(),
        password: "secret".into(),
    };
    let nav = page.submit(&ctx, &form).await;

    assert_eq!(nav, Navigation::Redirect(Route::Home));
    let session = store.get().unwrap().unwrap();
    assert!(!session.token.is_empty());
    assert_eq!(session.token, ADMIN_TOKEN);
    assert_eq!(
        session.expiration_time - session.login_time,
        Duration::hours(1)
    );
    assert!(path.exists());
    assert_eq!(messages(&ctx, NoticeLevel::Success), ["Login successful!"]);
}

#[tokio::test]
async fn failed_login_shows_backend_description() {
    let base = serve(Arc::default(), true).await;
    let store = Arc::new(MemorySessionStore::default());
    let ctx = context(&base, store.clone());

    let form = LoginForm {
        user_email: "admin@ceybazaar.lk".into(),
        password: "wrong".into(),
    };
    let nav = LoginPage::new(&ctx).submit(&ctx, &form).await;

    assert_eq!(nav, Navigation::Stay);
    assert!(store.get().unwrap().is_none());
    assert_eq!(
        messages(&ctx, NoticeLevel::Error),
        ["Login Failed : Invalid username or password"]
    );
}

#[tokio::test]
async fn non_admin_login_is_refused() {
    let base = serve(Arc::default(), true).await;
    let store = Arc::new(MemorySessionStore::default());
    let ctx = context(&base, store.clone());

    let form = LoginForm {
        user_email: "buyer@ceybazaar.lk".into(),
        password: "secret".into(),
    };
    let nav = LoginPage::new(&ctx).submit(&ctx, &form).await;

    assert_eq!(nav, Navigation::Stay);
    assert!(store.get().unwrap().is_none());
}

#[tokio::test]
async fn empty_login_form_sends_nothing() {
    // Unreachable backend: any request would surface as a transport failure.
    let store = Arc::new(MemorySessionStore::default());
    let ctx = context("http://127.0.0.1:9/CeyBazaar", store);

    let nav = LoginPage::new(&ctx)
        .submit(&ctx, &LoginForm::default())
        .await;

    assert_eq!(nav, Navigation::Stay);
    assert_eq!(
        messages(&ctx, NoticeLevel::Error),
        ["Please enter your username!"]
    );
}

#[tokio::test]
async fn logout_removes_persisted_session() {
    let base = serve(Arc::default(), true).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let store = Arc::new(FileSessionStore::new(&path, Duration::hours(1)));
    let ctx = context(&base, store.clone());

    let form = LoginForm {
        user_email: "admin@ceybazaar.lk".into(),
        password: "secret".into(),
    };
    LoginPage::new(&ctx).submit(&ctx, &form).await;
    assert!(path.exists());
    ctx.notices.drain();

    let nav = auth_cmd::logout(&ctx);

    assert_eq!(nav, Navigation::Redirect(Route::Login));
    assert!(!path.exists());
    assert!(store.get().unwrap().is_none());
    assert!(store.token().is_none());
    assert_eq!(
        messages(&ctx, NoticeLevel::Success),
        ["Logged out successfully"]
    );
}

// =========================================================================
// Categories
// =========================================================================

#[tokio::test]
async fn added_category_appears_after_refetch() {
    let fake: Shared = Arc::default();
    let base = serve(fake.clone(), true).await;
    let ctx = context(&base, admin_session());

    let mut page = CategoryPage::new(&ctx);
    assert_eq!(page.activate(&ctx).await, Navigation::Stay);
    assert_eq!(page.categories, PageState::Ready(Vec::new()));

    page.form.category_name = "Spices".into();
    assert_eq!(page.submit(&ctx).await, Navigation::Stay);

    let names: Vec<_> = page
        .categories
        .data()
        .unwrap()
        .iter()
        .map(|c| c.category_name.as_str())
        .collect();
    assert_eq!(names, ["Spices"]);
    assert!(page.form.category_name.is_empty());
    assert_eq!(
        messages(&ctx, NoticeLevel::Success),
        ["Product category added successfully!"]
    );
}

#[tokio::test]
async fn rejected_category_keeps_list_and_form() {
    let fake: Shared = Arc::default();
    {
        let mut f = fake.lock().unwrap();
        f.categories.push(json!({ "id": 1, "categoryName": "Tea" }));
        f.reject_categories = true;
    }
    let base = serve(fake, true).await;
    let ctx = context(&base, admin_session());

    let mut page = CategoryPage::new(&ctx);
    page.activate(&ctx).await;
    let before = page.categories.clone();

    page.form.category_name = "Spices".into();
    assert_eq!(page.submit(&ctx).await, Navigation::Stay);

    assert_eq!(page.categories, before);
    assert_eq!(page.form.category_name, "Spices");
    assert_eq!(
        messages(&ctx, NoticeLevel::Error),
        ["Failed to add product category."]
    );
}

#[tokio::test]
async fn category_command_renders_layout_and_list() {
    let fake: Shared = Arc::default();
    let base = serve(fake, true).await;
    let ctx = context(&base, admin_session());

    let mut out = Vec::new();
    let nav = category_cmd::run(
        CategoryAction::Add {
            name: "Spices".into(),
        },
        &ctx,
        &mut out,
    )
    .await
    .unwrap();

    assert_eq!(nav, Navigation::Stay);
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("CeyBazaar Admin | Product Category | admin@ceybazaar.lk"));
    assert!(text.contains("Spices"));
}

// =========================================================================
// Delivery regions
// =========================================================================

#[tokio::test]
async fn added_region_appears_after_refetch() {
    let fake: Shared = Arc::default();
    let base = serve(fake.clone(), true).await;
    let ctx = context(&base, admin_session());

    let mut page = RegionPage::new(&ctx);
    assert_eq!(page.activate(&ctx).await, Navigation::Stay);
    assert_eq!(page.regions, PageState::Ready(Vec::new()));

    page.form.region_code = "CMB".into();
    page.form.region_name = "Colombo".into();
    page.form.shipping_cost = Some(350.0);
    assert_eq!(page.submit(&ctx).await, Navigation::Stay);

    let regions = page.regions.data().unwrap();
    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].region_code, "CMB");
    assert_eq!(regions[0].id, Some(1));
    assert!((regions[0].shipping_cost - 350.0).abs() < f64::EPSILON);
    assert_eq!(page.form, RegionForm::default());
    assert_eq!(
        messages(&ctx, NoticeLevel::Success),
        ["Delivery region added successfully!"]
    );
    assert_eq!(fake.lock().unwrap().regions[0]["regionName"], "Colombo");
}

#[tokio::test]
async fn rejected_region_keeps_list_and_form() {
    let fake: Shared = Arc::default();
    {
        let mut f = fake.lock().unwrap();
        f.regions.push(json!({
            "id": 1, "regionCode": "KDY", "regionName": "Kandy", "shippingCost": 450.0
        }));
        f.reject_regions = true;
    }
    let base = serve(fake, true).await;
    let ctx = context(&base, admin_session());

    let mut page = RegionPage::new(&ctx);
    page.activate(&ctx).await;
    let before = page.regions.clone();

    page.form.region_code = "KDY".into();
    page.form.region_name = "Kandy".into();
    page.form.shipping_cost = Some(450.0);
    let form = page.form.clone();
    assert_eq!(page.submit(&ctx).await, Navigation::Stay);

    assert_eq!(page.regions, before);
    assert_eq!(page.form, form);
    assert_eq!(
        messages(&ctx, NoticeLevel::Error),
        ["Failed to add delivery region."]
    );
}

// =========================================================================
// Products
// =========================================================================

#[tokio::test]
async fn product_without_main_image_is_not_sent() {
    let fake: Shared = Arc::default();
    fake.lock()
        .unwrap()
        .categories
        .push(json!({ "id": 3, "categoryName": "Spices" }));
    let base = serve(fake.clone(), true).await;
    let ctx = context(&base, admin_session());

    let mut page = NewProductPage::new(&ctx);
    page.activate(&ctx).await;
    let form = NewProductForm {
        product_name: "Cinnamon".into(),
        price: Some(1200.0),
        quantity: Some(20),
        category_id: Some(3),
        ..NewProductForm::default()
    };
    page.form = form.clone();
    assert_eq!(page.submit(&ctx).await, Navigation::Stay);

    assert_eq!(fake.lock().unwrap().product_posts, 0);
    assert_eq!(page.form, form);
    assert_eq!(messages(&ctx, NoticeLevel::Error), ["Main image is required"]);
}

#[tokio::test]
async fn product_with_image_is_submitted_and_form_reset() {
    let fake: Shared = Arc::default();
    fake.lock()
        .unwrap()
        .categories
        .push(json!({ "id": 3, "categoryName": "Spices" }));
    let base = serve(fake.clone(), true).await;
    let ctx = context(&base, admin_session());

    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("cinnamon.png");
    std::fs::write(&image, b"\x89PNG fake").unwrap();

    let mut page = NewProductPage::new(&ctx);
    page.activate(&ctx).await;
    page.form = NewProductForm {
        product_name: "Cinnamon".into(),
        price: Some(1200.0),
        quantity: Some(20),
        category_id: Some(3),
        image: Some(image),
        ..NewProductForm::default()
    };
    assert_eq!(page.submit(&ctx).await, Navigation::Stay);

    assert_eq!(fake.lock().unwrap().product_posts, 1);
    assert_eq!(page.form, NewProductForm::default());
    assert_eq!(
        messages(&ctx, NoticeLevel::Success),
        ["Product added successfully!"]
    );
}

// =========================================================================
// Orders
// =========================================================================

#[tokio::test]
async fn completed_order_offers_no_delivery_selector() {
    let fake: Shared = Arc::default();
    fake.lock().unwrap().orders = vec![order(1001, "PAID"), order(1002, "UNPAID")];
    let base = serve(fake, true).await;
    let ctx = context(&base, admin_session());

    let mut page = OrdersPage::new(&ctx, OrderFilter::All);
    page.activate(&ctx).await;
    let before = OrderActions::for_order(page.find(1001).unwrap());
    assert!(before.can_complete);
    assert_eq!(before.delivery_options.len(), 2);

    assert_eq!(page.complete(&ctx, 1001).await, Navigation::Stay);

    let order = page.find(1001).unwrap();
    assert_eq!(order.status, OrderStatus::Completed);
    let after = OrderActions::for_order(order);
    assert!(!after.can_complete);
    assert!(after.delivery_options.is_empty());
    assert_eq!(
        messages(&ctx, NoticeLevel::Success),
        ["Order completed successfully"]
    );

    let mut out = Vec::new();
    page.render(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("COMPLETED"));
}

#[tokio::test]
async fn unpaid_order_cannot_be_completed() {
    let fake: Shared = Arc::default();
    fake.lock().unwrap().orders = vec![order(1002, "UNPAID")];
    let base = serve(fake.clone(), true).await;
    let ctx = context(&base, admin_session());

    let mut page = OrdersPage::new(&ctx, OrderFilter::All);
    page.activate(&ctx).await;
    page.complete(&ctx, 1002).await;

    assert_eq!(page.find(1002).unwrap().status, OrderStatus::Unpaid);
    assert_eq!(fake.lock().unwrap().orders[0]["status"], "UNPAID");
}

#[tokio::test]
async fn completing_unpaid_order_is_refused_before_confirmation() {
    let fake: Shared = Arc::default();
    fake.lock().unwrap().orders = vec![order(1002, "UNPAID")];
    let base = serve(fake.clone(), true).await;
    let ctx = context(&base, admin_session());

    // No --yes: reaching the confirmation prompt would fail without a terminal.
    let mut out = Vec::new();
    let nav = order_cmd::run(
        OrderAction::Complete {
            order_id: 1002,
            yes: false,
        },
        &ctx,
        &mut out,
    )
    .await
    .unwrap();

    assert_eq!(nav, Navigation::Stay);
    assert_eq!(
        messages(&ctx, NoticeLevel::Warning),
        ["Order 1002 is not paid and cannot be completed"]
    );
    assert_eq!(fake.lock().unwrap().orders[0]["status"], "UNPAID");
    assert!(String::from_utf8(out).unwrap().contains("1002"));
}

#[tokio::test]
async fn completing_unknown_order_is_refused_before_confirmation() {
    let fake: Shared = Arc::default();
    fake.lock().unwrap().orders = vec![order(1001, "PAID")];
    let base = serve(fake, true).await;
    let ctx = context(&base, admin_session());

    let mut out = Vec::new();
    let nav = order_cmd::run(
        OrderAction::Complete {
            order_id: 4242,
            yes: false,
        },
        &ctx,
        &mut out,
    )
    .await
    .unwrap();

    assert_eq!(nav, Navigation::Stay);
    assert_eq!(
        messages(&ctx, NoticeLevel::Error),
        ["Order 4242 not found"]
    );
}

#[tokio::test]
async fn delivery_status_update_for_paid_order() {
    let fake: Shared = Arc::default();
    fake.lock().unwrap().orders = vec![order(1001, "PAID")];
    let base = serve(fake.clone(), true).await;
    let ctx = context(&base, admin_session());

    let mut page = OrdersPage::new(&ctx, OrderFilter::Paid);
    page.activate(&ctx).await;
    page.update_delivery(&ctx, 1001, DeliveryStatus::Progressing)
        .await;

    assert_eq!(
        page.find(1001).unwrap().delivery_status,
        DeliveryStatus::Progressing
    );
    let updates = fake.lock().unwrap().delivery_updates.clone();
    assert_eq!(
        updates,
        [json!({ "orderId": 1001, "deliveryStatus": "PROGRESSING" })]
    );
}

// =========================================================================
// Reports and dashboard
// =========================================================================

#[tokio::test]
async fn zero_order_day_renders_zero_statistics() {
    let base = serve(Arc::default(), true).await;
    let ctx = context(&base, admin_session());
    let date = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();

    let mut page = ReportsPage::new(&ctx);
    assert_eq!(page.load_daily(&ctx, date).await, Navigation::Stay);

    let mut out = Vec::new();
    page.render_daily(&mut out, date).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Total Orders:     0"));
    assert!(text.contains("Paid Orders:      0"));
    assert!(text.contains("Completed Orders: 0"));
    assert!(text.contains("Total Revenue:    0.00 LKR"));
}

#[tokio::test]
async fn dashboard_merges_parallel_fetches() {
    let fake: Shared = Arc::default();
    {
        let mut f = fake.lock().unwrap();
        f.orders = (1..=7).map(|id| order(id, "PAID")).collect();
        f.categories.push(json!({ "id": 1, "categoryName": "Tea" }));
    }
    let base = serve(fake, true).await;
    let ctx = context(&base, admin_session());

    let mut page = DashboardPage::new(&ctx);
    let today = Utc::now().date_naive();
    assert_eq!(page.activate(&ctx, today).await, Navigation::Stay);

    let data = page.data.data().unwrap();
    assert_eq!(data.recent_orders.len(), 5);
    assert_eq!(data.products.len(), 2);
    assert_eq!(data.categories.len(), 1);

    let mut out = Vec::new();
    page.render(&mut out, &ctx.dashboard).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Black Pepper"));
    assert!(text.contains("[CRITICAL]"));
}

#[tokio::test]
async fn dashboard_fails_whole_when_one_fetch_fails() {
    let fake: Shared = Arc::default();
    let base = serve(fake, false).await;
    let ctx = context(&base, admin_session());

    let mut page = DashboardPage::new(&ctx);
    let today = Utc::now().date_naive();
    assert_eq!(page.activate(&ctx, today).await, Navigation::Stay);

    assert!(matches!(page.data, PageState::Failed(_)));
    assert_eq!(
        messages(&ctx, NoticeLevel::Error),
        ["Failed to fetch dashboard data"]
    );
}

// =========================================================================
// Session handling
// =========================================================================

#[tokio::test]
async fn backend_rejection_clears_session_and_redirects() {
    let fake: Shared = Arc::default();
    fake.lock().unwrap().strict_auth = true;
    let base = serve(fake, true).await;
    let store = Arc::new(MemorySessionStore::default());
    store.set("revoked", "admin@ceybazaar.lk", Utc::now()).unwrap();
    let ctx = context(&base, store.clone());

    let mut page = OrdersPage::new(&ctx, OrderFilter::All);
    let nav = page.activate(&ctx).await;

    assert_eq!(nav, Navigation::Redirect(Route::Login));
    assert!(page.orders.is_loading());
    assert!(store.get().unwrap().is_none());
    assert_eq!(messages(&ctx, NoticeLevel::Warning), [SESSION_REJECTED]);
}

#[tokio::test]
async fn expired_session_is_cleared_before_any_request() {
    let fake: Shared = Arc::default();
    let base = serve(fake.clone(), true).await;
    let login = Utc::now() - Duration::hours(2);
    let store = Arc::new(MemorySessionStore::with_session(
        Duration::hours(1),
        Session::new(ADMIN_TOKEN, "admin@ceybazaar.lk", login, Duration::hours(1)).unwrap(),
    ));
    let ctx = context(&base, store.clone());

    let mut out = Vec::new();
    let nav = category_cmd::run(
        CategoryAction::Add {
            name: "Spices".into(),
        },
        &ctx,
        &mut out,
    )
    .await
    .unwrap();

    assert_eq!(nav, Navigation::Redirect(Route::Login));
    assert!(out.is_empty());
    assert!(store.get().unwrap().is_none());
    assert!(fake.lock().unwrap().categories.is_empty());
    assert_eq!(messages(&ctx, NoticeLevel::Warning), [SESSION_EXPIRED]);
}

#[tokio::test]
async fn shut_down_console_never_writes_page_state() {
    let base = serve(Arc::default(), true).await;
    let ctx = context(&base, admin_session());
    ctx.shutdown();

    let mut page = CategoryPage::new(&ctx);
    assert_eq!(page.activate(&ctx).await, Navigation::Stay);
    assert!(page.categories.is_loading());
    assert!(ctx.notices.drain().is_empty());
}
