//! Dashboard page (`/Home`).
//!
//! Four resources are fetched in parallel: today's report, the full order
//! list, products and categories. A transport failure of any one of them
//! fails the whole fetch; a non-success envelope only empties the resource
//! it belongs to.

use std::io::{self, Write};

use chrono::NaiveDate;

use ceybazaar_core::config::DashboardConfig;
use ceybazaar_core::model::{Category, DailyReport, Order, Product};
use ceybazaar_core::report::completion_rate;

use super::{Halt, Navigation, PageState, call};
use crate::context::PageContext;
use crate::fmt::{rupees, truncate, write_daily_report};
use crate::scope::PageScope;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub today: Option<DailyReport>,
    pub recent_orders: Vec<Order>,
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
}

impl DashboardData {
    /// Today's figures, zeros when the backend had no report.
    pub fn today_or_zero(&self) -> DailyReport {
        self.today.clone().unwrap_or_default()
    }

    /// Products below the low-stock threshold, in listing order.
    pub fn low_stock(&self, config: &DashboardConfig) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.quantity < config.low_stock_threshold)
            .collect()
    }
}

#[derive(Debug)]
pub struct DashboardPage {
    scope: PageScope,
    pub data: PageState<DashboardData>,
}

impl DashboardPage {
    pub fn new(ctx: &PageContext) -> Self {
        Self {
            scope: ctx.scope(),
            data: PageState::Loading,
        }
    }

    pub async fn activate(&mut self, ctx: &PageContext, today: NaiveDate) -> Navigation {
        let admin = &ctx.backend.admin;
        let products = &ctx.backend.products;
        let fetch = async {
            tokio::try_join!(
                admin.daily_report(today),
                admin.all_orders(),
                products.list_products(),
                products.list_categories(),
            )
        };

        match call(ctx, &self.scope, fetch).await {
            Ok((report, orders, product_list, categories)) => {
                let mut recent_orders = orders.into_list().unwrap_or_default();
                recent_orders.truncate(ctx.dashboard.recent_orders);
                self.data = PageState::Ready(DashboardData {
                    today: report.into_success(),
                    recent_orders,
                    products: product_list.into_list().unwrap_or_default(),
                    categories: categories.into_list().unwrap_or_default(),
                });
                Navigation::Stay
            }
            Err(Halt::Failed(e)) => {
                ctx.notices.error("Failed to fetch dashboard data");
                self.data.fail(e);
                Navigation::Stay
            }
            Err(halt) => halt.navigation(),
        }
    }

    pub fn render(&self, w: &mut impl Write, config: &DashboardConfig) -> io::Result<()> {
        let data = match &self.data {
            PageState::Loading => return writeln!(w, "Loading dashboard..."),
            PageState::Failed(reason) => return writeln!(w, "Dashboard unavailable: {reason}"),
            PageState::Ready(data) => data,
        };

        let today = data.today_or_zero();
        writeln!(w, "Today")?;
        write_daily_report(w, &today)?;
        writeln!(w, "  Completion Rate:  {:.1}%", completion_rate(&today))?;
        writeln!(w, "  Products:         {}", data.products.len())?;
        writeln!(w, "  Categories:       {}", data.categories.len())?;

        writeln!(w)?;
        writeln!(w, "Recent Orders")?;
        if data.recent_orders.is_empty() {
            writeln!(w, "  No orders yet.")?;
        }
        for order in &data.recent_orders {
            writeln!(
                w,
                "  {:<8} {:<24} {:<10} {:>14}",
                order.order_id,
                truncate(&order.customer_name, 24),
                order.status.as_str(),
                rupees(order.total_cost),
            )?;
        }

        writeln!(w)?;
        writeln!(w, "Low Stock Alert")?;
        let low = data.low_stock(config);
        if low.is_empty() {
            return writeln!(w, "  All products are well stocked!");
        }
        for product in low {
            let marker = if product.quantity < config.critical_stock_threshold {
                "CRITICAL"
            } else {
                "low"
            };
            writeln!(
                w,
                "  {:<28} {:>4} left  [{marker}]",
                truncate(&product.product_name, 28),
                product.quantity
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(name: &str, quantity: i64) -> Product {
        Product {
            id: 1,
            product_name: name.into(),
            price: 100.0,
            quantity,
            weight: None,
            description: None,
            product_cat_name: None,
            image_path: None,
            additional_image_paths: Vec::new(),
        }
    }

    fn data(products: Vec<Product>) -> DashboardData {
        DashboardData {
            today: None,
            recent_orders: Vec::new(),
            products,
            categories: Vec::new(),
        }
    }

    #[test]
    fn low_stock_uses_threshold() {
        let data = data(vec![product("Tea", 50), product("Pepper", 9), product("Clove", 10)]);
        let low = data.low_stock(&DashboardConfig::default());
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].product_name, "Pepper");
    }

    #[test]
    fn render_flags_critical_and_zero_report() {
        let root = tokio_util::sync::CancellationToken::new();
        let page = DashboardPage {
            scope: PageScope::new(&root),
            data: PageState::Ready(data(vec![product("Pepper", 3), product("Clove", 8)])),
        };
        let mut buf = Vec::new();
        page.render(&mut buf, &DashboardConfig::default()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Total Orders:     0"));
        assert!(text.contains("Completion Rate:  0.0%"));
        assert!(text.contains("[CRITICAL]"));
        assert!(text.contains("[low]"));
    }

    #[test]
    fn render_well_stocked() {
        let root = tokio_util::sync::CancellationToken::new();
        let page = DashboardPage {
            scope: PageScope::new(&root),
            data: PageState::Ready(data(vec![product("Tea", 40)])),
        };
        let mut buf = Vec::new();
        page.render(&mut buf, &DashboardConfig::default()).unwrap();
        assert!(String::from_utf8(buf).unwrap().contains("All products are well stocked!"));
    }
}
