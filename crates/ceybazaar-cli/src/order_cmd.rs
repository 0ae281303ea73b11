//! Order commands: list, show, complete, delivery.

use std::io::Write;

use anyhow::anyhow;
use chrono::Utc;

use ceybazaar_core::model::DeliveryStatus;

use crate::console::enter;
use crate::context::PageContext;
use crate::pages::{Navigation, OrderFilter, OrdersPage};
use crate::prompt::confirm_completion;
use crate::routes::Route;

#[derive(clap::Subcommand, Debug)]
pub enum OrderAction {
    /// List orders.
    List {
        /// Only paid orders.
        #[arg(long)]
        paid: bool,
    },
    /// Show one order with its line items.
    Show { order_id: i64 },
    /// Mark a paid order as completed.
    Complete {
        order_id: i64,
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Set the delivery status of a paid order.
    Delivery {
        order_id: i64,
        /// PROGRESSING or DELIVERED.
        #[arg(value_parser = parse_delivery_status)]
        status: DeliveryStatus,
    },
}

fn parse_delivery_status(s: &str) -> Result<DeliveryStatus, String> {
    DeliveryStatus::parse(s)
        .filter(|status| DeliveryStatus::SELECTABLE.contains(status))
        .ok_or_else(|| format!("expected PROGRESSING or DELIVERED, got '{s}'"))
}

pub async fn run(
    action: OrderAction,
    ctx: &PageContext,
    out: &mut impl Write,
) -> anyhow::Result<Navigation> {
    if let nav @ Navigation::Redirect(_) = enter(ctx, Route::Orders, Utc::now(), out)? {
        return Ok(nav);
    }
    let filter = match action {
        OrderAction::List { paid: true } => OrderFilter::Paid,
        _ => OrderFilter::All,
    };
    let mut page = OrdersPage::new(ctx, filter);
    if let nav @ Navigation::Redirect(_) = page.activate(ctx).await {
        return Ok(nav);
    }

    let nav = match action {
        OrderAction::List { .. } => Navigation::Stay,
        OrderAction::Show { order_id } => {
            if page.orders.data().is_some() && page.find(order_id).is_none() {
                return Err(anyhow!("Order {order_id} not found"));
            }
            page.render_detail(out, order_id)?;
            return Ok(Navigation::Stay);
        }
        OrderAction::Complete { order_id, yes } => {
            // Only a listed PAID order is worth asking about.
            if !page.check_completable(ctx, order_id) {
                return finish(&page, Navigation::Stay, out);
            }
            if confirm_completion(order_id, yes)? {
                page.complete(ctx, order_id).await
            } else {
                ctx.notices.info("Order completion cancelled");
                Navigation::Stay
            }
        }
        OrderAction::Delivery { order_id, status } => {
            page.update_delivery(ctx, order_id, status).await
        }
    };
    finish(&page, nav, out)
}

fn finish(page: &OrdersPage, nav: Navigation, out: &mut impl Write) -> anyhow::Result<Navigation> {
    if nav == Navigation::Stay {
        page.render(out)?;
    }
    Ok(nav)
}
