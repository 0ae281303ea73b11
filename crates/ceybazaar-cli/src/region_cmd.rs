//! Delivery region commands.

use std::io::Write;

use chrono::Utc;

use crate::console::enter;
use crate::context::PageContext;
use crate::pages::{Navigation, RegionForm, RegionPage};
use crate::routes::Route;

#[derive(clap::Subcommand, Debug)]
pub enum RegionAction {
    /// List delivery regions.
    List,
    /// Add a delivery region.
    Add {
        /// Short region code, e.g. `CMB`.
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: String,
        /// Shipping cost in LKR.
        #[arg(long)]
        shipping_cost: f64,
    },
}

pub async fn run(
    action: RegionAction,
    ctx: &PageContext,
    out: &mut impl Write,
) -> anyhow::Result<Navigation> {
    if let nav @ Navigation::Redirect(_) = enter(ctx, Route::DeliveryRegion, Utc::now(), out)? {
        return Ok(nav);
    }
    let mut page = RegionPage::new(ctx);
    if let nav @ Navigation::Redirect(_) = page.activate(ctx).await {
        return Ok(nav);
    }
    if let RegionAction::Add {
        code,
        name,
        shipping_cost,
    } = action
    {
        page.form = RegionForm {
            region_code: code,
            region_name: name,
            shipping_cost: Some(shipping_cost),
        };
        if let nav @ Navigation::Redirect(_) = page.submit(ctx).await {
            return Ok(nav);
        }
    }
    page.render(out)?;
    Ok(Navigation::Stay)
}
