//! Product commands: list and add.

use std::io::Write;
use std::path::PathBuf;

use chrono::Utc;

use crate::console::enter;
use crate::context::PageContext;
use crate::pages::{Navigation, NewProductForm, NewProductPage, ProductListPage};
use crate::routes::Route;

#[derive(clap::Subcommand, Debug)]
pub enum ProductAction {
    /// List products with stock and image URLs.
    List,
    /// Add a product with its images.
    Add(AddProductArgs),
}

#[derive(clap::Args, Debug)]
pub struct AddProductArgs {
    /// Product name.
    #[arg(long)]
    pub name: String,
    /// Unit price in LKR.
    #[arg(long)]
    pub price: f64,
    /// Units in stock.
    #[arg(long)]
    pub quantity: i64,
    /// Weight in kilograms.
    #[arg(long, default_value_t = 0.0)]
    pub weight: f64,
    #[arg(long, default_value = "")]
    pub description: String,
    /// Category id (see `category list`).
    #[arg(long)]
    pub category: i64,
    /// Main image file.
    #[arg(long)]
    pub image: Option<PathBuf>,
    /// Additional image file; may be repeated.
    #[arg(long = "additional-image")]
    pub additional_images: Vec<PathBuf>,
}

impl From<AddProductArgs> for NewProductForm {
    fn from(args: AddProductArgs) -> Self {
        Self {
            product_name: args.name,
            price: Some(args.price),
            quantity: Some(args.quantity),
            weight: args.weight,
            description: args.description,
            category_id: Some(args.category),
            image: args.image,
            additional_images: args.additional_images,
        }
    }
}

pub async fn run(
    action: ProductAction,
    ctx: &PageContext,
    out: &mut impl Write,
) -> anyhow::Result<Navigation> {
    match action {
        ProductAction::List => list(ctx, out).await,
        ProductAction::Add(args) => add(ctx, args, out).await,
    }
}

async fn list(ctx: &PageContext, out: &mut impl Write) -> anyhow::Result<Navigation> {
    if let nav @ Navigation::Redirect(_) = enter(ctx, Route::ViewProducts, Utc::now(), out)? {
        return Ok(nav);
    }
    let mut page = ProductListPage::new(ctx);
    let nav = page.activate(ctx).await;
    if nav == Navigation::Stay {
        page.render(out, &ctx.asset_base_url)?;
    }
    Ok(nav)
}

async fn add(
    ctx: &PageContext,
    args: AddProductArgs,
    out: &mut impl Write,
) -> anyhow::Result<Navigation> {
    if let nav @ Navigation::Redirect(_) = enter(ctx, Route::NewProduct, Utc::now(), out)? {
        return Ok(nav);
    }
    let mut page = NewProductPage::new(ctx);
    if let nav @ Navigation::Redirect(_) = page.activate(ctx).await {
        return Ok(nav);
    }
    page.form = args.into();
    let nav = page.submit(ctx).await;
    if nav == Navigation::Stay && page.form == NewProductForm::default() {
        writeln!(out, "Product submitted.")?;
    }
    Ok(nav)
}
