//! Product category commands.

use std::io::Write;

use chrono::Utc;

use crate::console::enter;
use crate::context::PageContext;
use crate::pages::{CategoryPage, Navigation};
use crate::routes::Route;

#[derive(clap::Subcommand, Debug)]
pub enum CategoryAction {
    /// List product categories.
    List,
    /// Add a product category.
    Add {
        /// Category name.
        name: String,
    },
}

pub async fn run(
    action: CategoryAction,
    ctx: &PageContext,
    out: &mut impl Write,
) -> anyhow::Result<Navigation> {
    if let nav @ Navigation::Redirect(_) = enter(ctx, Route::ProductCategory, Utc::now(), out)? {
        return Ok(nav);
    }
    let mut page = CategoryPage::new(ctx);
    if let nav @ Navigation::Redirect(_) = page.activate(ctx).await {
        return Ok(nav);
    }
    if let CategoryAction::Add { name } = action {
        page.form.category_name = name;
        if let nav @ Navigation::Redirect(_) = page.submit(ctx).await {
            return Ok(nav);
        }
    }
    page.render(out)?;
    Ok(Navigation::Stay)
}
