//! Orders page (`/Orders`).

use std::io::{self, Write};

use tracing::info;

use ceybazaar_core::model::{DeliveryStatus, Order, OrderStatus};

use super::{Halt, Navigation, PageState, call};
use crate::context::PageContext;
use crate::fmt::{rupees, truncate, write_order_detail};
use crate::scope::PageScope;

/// Which listing the page shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderFilter {
    #[default]
    All,
    Paid,
}

/// Actions the page offers for one order. Only `PAID` orders can be
/// completed or have their delivery status changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderActions {
    pub can_complete: bool,
    pub delivery_options: Vec<DeliveryStatus>,
}

impl OrderActions {
    pub fn for_order(order: &Order) -> Self {
        if order.status == OrderStatus::Paid {
            Self {
                can_complete: true,
                delivery_options: DeliveryStatus::SELECTABLE.to_vec(),
            }
        } else {
            Self {
                can_complete: false,
                delivery_options: Vec::new(),
            }
        }
    }
}

#[derive(Debug)]
pub struct OrdersPage {
    scope: PageScope,
    pub filter: OrderFilter,
    pub orders: PageState<Vec<Order>>,
}

impl OrdersPage {
    pub fn new(ctx: &PageContext, filter: OrderFilter) -> Self {
        Self {
            scope: ctx.scope(),
            filter,
            orders: PageState::Loading,
        }
    }

    pub async fn activate(&mut self, ctx: &PageContext) -> Navigation {
        let admin = &ctx.backend.admin;
        let result = match self.filter {
            OrderFilter::All => call(ctx, &self.scope, admin.all_orders()).await,
            OrderFilter::Paid => call(ctx, &self.scope, admin.paid_orders()).await,
        };
        match result {
            Ok(envelope) => {
                let description = envelope.description().to_string();
                match envelope.into_list() {
                    Some(list) => self.orders = PageState::Ready(list),
                    None => {
                        ctx.notices.error("Failed to fetch orders.");
                        self.orders.fail(description);
                    }
                }
                Navigation::Stay
            }
            Err(Halt::Failed(e)) => {
                ctx.notices.error("Failed to fetch orders.");
                self.orders.fail(e);
                Navigation::Stay
            }
            Err(halt) => halt.navigation(),
        }
    }

    pub fn find(&self, order_id: i64) -> Option<&Order> {
        self.orders
            .data()
            .and_then(|list| list.iter().find(|o| o.order_id == order_id))
    }

    fn actions(&self, ctx: &PageContext, order_id: i64) -> Option<OrderActions> {
        let Some(order) = self.find(order_id) else {
            ctx.notices.error(format!("Order {order_id} not found"));
            return None;
        };
        Some(OrderActions::for_order(order))
    }

    /// Whether `order_id` is listed and `PAID`. Pushes the reason when not.
    pub fn check_completable(&self, ctx: &PageContext, order_id: i64) -> bool {
        let Some(actions) = self.actions(ctx, order_id) else {
            return false;
        };
        if !actions.can_complete {
            ctx.notices
                .warning(format!("Order {order_id} is not paid and cannot be completed"));
        }
        actions.can_complete
    }

    /// Mark a `PAID` order completed, then re-read the listing.
    pub async fn complete(&mut self, ctx: &PageContext, order_id: i64) -> Navigation {
        if !self.check_completable(ctx, order_id) {
            return Navigation::Stay;
        }
        match call(ctx, &self.scope, ctx.backend.admin.complete_order(order_id)).await {
            Ok(envelope) if envelope.is_success() => {
                info!(order_id, "Order completed");
                ctx.notices.success("Order completed successfully");
                self.activate(ctx).await
            }
            Ok(_) | Err(Halt::Failed(_)) => {
                ctx.notices.error("Failed to complete order");
                Navigation::Stay
            }
            Err(halt) => halt.navigation(),
        }
    }

    /// Change the delivery status of a `PAID` order, then re-read the listing.
    pub async fn update_delivery(
        &mut self,
        ctx: &PageContext,
        order_id: i64,
        status: DeliveryStatus,
    ) -> Navigation {
        let Some(actions) = self.actions(ctx, order_id) else {
            return Navigation::Stay;
        };
        if !actions.delivery_options.contains(&status) {
            ctx.notices.warning(format!(
                "Delivery status {status} is not available for order {order_id}"
            ));
            return Navigation::Stay;
        }
        let request = ctx.backend.admin.update_delivery_status(order_id, status.clone());
        match call(ctx, &self.scope, request).await {
            Ok(envelope) if envelope.is_success() => {
                info!(order_id, status = %status, "Delivery status updated");
                ctx.notices.success("Delivery status updated successfully");
                self.activate(ctx).await
            }
            Ok(_) | Err(Halt::Failed(_)) => {
                ctx.notices.error("Failed to update delivery status");
                Navigation::Stay
            }
            Err(halt) => halt.navigation(),
        }
    }

    pub fn render(&self, w: &mut impl Write) -> io::Result<()> {
        let list = match &self.orders {
            PageState::Loading => return writeln!(w, "Loading orders..."),
            PageState::Failed(reason) => return writeln!(w, "Orders unavailable: {reason}"),
            PageState::Ready(list) => list,
        };
        if list.is_empty() {
            return writeln!(w, "No orders found.");
        }
        writeln!(
            w,
            "{:<8} {:<24} {:<10} {:<12} {:>14}  ACTIONS",
            "ORDER", "CUSTOMER", "STATUS", "DELIVERY", "TOTAL"
        )?;
        for order in list {
            writeln!(
                w,
                "{:<8} {:<24} {:<10} {:<12} {:>14}  {}",
                order.order_id,
                truncate(&order.customer_name, 24),
                order.status.as_str(),
                order.delivery_status.as_str(),
                rupees(order.total_cost),
                describe_actions(&OrderActions::for_order(order)),
            )?;
        }
        Ok(())
    }

    /// Detail view of one order with the actions it offers.
    pub fn render_detail(&self, w: &mut impl Write, order_id: i64) -> io::Result<()> {
        let Some(order) = self.find(order_id) else {
            return writeln!(w, "Order {order_id} not found.");
        };
        write_order_detail(w, order)?;
        writeln!(w, "  Actions:  {}", describe_actions(&OrderActions::for_order(order)))
    }
}

fn describe_actions(actions: &OrderActions) -> String {
    if !actions.can_complete && actions.delivery_options.is_empty() {
        return "-".into();
    }
    let mut parts = Vec::new();
    if actions.can_complete {
        parts.push("complete".to_string());
    }
    if !actions.delivery_options.is_empty() {
        let options: Vec<&str> = actions
            .delivery_options
            .iter()
            .map(DeliveryStatus::as_str)
            .collect();
        parts.push(format!("delivery: {}", options.join("/")));
    }
    parts.join(", ")
}
