//! Product pages: listing (`/View-Products`) and submission (`/New-Product`).

use std::io::{self, Write};
use std::path::PathBuf;

use tracing::info;

use ceybazaar_client::{ImageUpload, ProductSubmission};
use ceybazaar_core::model::{Category, CategoryRef, NewProduct, Product};

use super::{Halt, Navigation, PageState, call};
use crate::context::PageContext;
use crate::fmt::{rupees, truncate};
use crate::scope::PageScope;

#[derive(Debug)]
pub struct ProductListPage {
    scope: PageScope,
    pub products: PageState<Vec<Product>>,
}

impl ProductListPage {
    pub fn new(ctx: &PageContext) -> Self {
        Self {
            scope: ctx.scope(),
            products: PageState::Loading,
        }
    }

    pub async fn activate(&mut self, ctx: &PageContext) -> Navigation {
        match call(ctx, &self.scope, ctx.backend.products.list_products()).await {
            Ok(envelope) => {
                let description = envelope.description().to_string();
                match envelope.into_list() {
                    Some(list) => self.products = PageState::Ready(list),
                    None => {
                        ctx.notices.error("Failed to fetch products.");
                        self.products.fail(description);
                    }
                }
                Navigation::Stay
            }
            Err(Halt::Failed(e)) => {
                ctx.notices.error("Failed to fetch products.");
                self.products.fail(e);
                Navigation::Stay
            }
            Err(halt) => halt.navigation(),
        }
    }

    pub fn render(&self, w: &mut impl Write, asset_base: &str) -> io::Result<()> {
        let list = match &self.products {
            PageState::Loading => return writeln!(w, "Loading products..."),
            PageState::Failed(reason) => return writeln!(w, "Products unavailable: {reason}"),
            PageState::Ready(list) => list,
        };
        if list.is_empty() {
            return writeln!(w, "No products.");
        }
        writeln!(
            w,
            "{:<6} {:<28} {:<18} {:>14} {:>6}  IMAGE",
            "ID", "NAME", "CATEGORY", "PRICE", "QTY"
        )?;
        for product in list {
            writeln!(
                w,
                "{:<6} {:<28} {:<18} {:>14} {:>6}  {}",
                product.id,
                truncate(&product.product_name, 28),
                truncate(product.product_cat_name.as_deref().unwrap_or("-"), 18),
                rupees(product.price),
                product.quantity,
                product.image_url(asset_base).unwrap_or_else(|| "-".into()),
            )?;
        }
        Ok(())
    }
}

/// Fields of the new-product form. Images are local file paths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewProductForm {
    pub product_name: String,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
    pub weight: f64,
    pub description: String,
    pub category_id: Option<i64>,
    pub image: Option<PathBuf>,
    pub additional_images: Vec<PathBuf>,
}

impl NewProductForm {
    fn validate(&self, categories: Option<&Vec<Category>>) -> Result<(), String> {
        if self.product_name.trim().is_empty() {
            return Err("Please enter product name".into());
        }
        match self.price {
            Some(price) if price >= 0.0 => {}
            _ => return Err("Please enter a valid price".into()),
        }
        match self.quantity {
            Some(quantity) if quantity >= 0 => {}
            _ => return Err("Please enter a valid quantity".into()),
        }
        let Some(category_id) = self.category_id else {
            return Err("Please select a product category".into());
        };
        if categories.is_some_and(|list| !list.iter().any(|c| c.id == category_id)) {
            return Err(format!("Unknown product category: {category_id}"));
        }
        if self.image.is_none() {
            return Err("Main image is required".into());
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct NewProductPage {
    scope: PageScope,
    pub categories: PageState<Vec<Category>>,
    pub form: NewProductForm,
}

impl NewProductPage {
    pub fn new(ctx: &PageContext) -> Self {
        Self {
            scope: ctx.scope(),
            categories: PageState::Loading,
            form: NewProductForm::default(),
        }
    }

    /// Load the category choices.
    pub async fn activate(&mut self, ctx: &PageContext) -> Navigation {
        match call(ctx, &self.scope, ctx.backend.products.list_categories()).await {
            Ok(envelope) => {
                let description = envelope.description().to_string();
                match envelope.into_list() {
                    Some(list) => self.categories = PageState::Ready(list),
                    None => {
                        ctx.notices.error("Failed to fetch product categories.");
                        self.categories.fail(description);
                    }
                }
                Navigation::Stay
            }
            Err(Halt::Failed(e)) => {
                ctx.notices.error("Failed to fetch product categories.");
                self.categories.fail(e);
                Navigation::Stay
            }
            Err(halt) => halt.navigation(),
        }
    }

    /// Submit [`Self::form`] as multipart. Nothing is sent when validation
    /// or reading an image fails.
    pub async fn submit(&mut self, ctx: &PageContext) -> Navigation {
        if let Err(msg) = self.form.validate(self.categories.data()) {
            ctx.notices.error(msg);
            return Navigation::Stay;
        }
        let submission = match self.build_submission(ctx) {
            Ok(submission) => submission,
            Err(msg) => {
                ctx.notices.error(msg);
                return Navigation::Stay;
            }
        };
        let name = submission.product.product_name.clone();

        match call(ctx, &self.scope, ctx.backend.products.create_product(submission)).await {
            Ok(envelope) if envelope.is_success() => {
                info!(product = %name, "Product added");
                ctx.notices.success("Product added successfully!");
                self.form = NewProductForm::default();
                Navigation::Stay
            }
            Ok(envelope) => {
                ctx.notices.error(format!(
                    "Failed to add product, response code: {}",
                    envelope.response_code
                ));
                Navigation::Stay
            }
            Err(Halt::Failed(e)) => {
                ctx.notices.error(format!("Failed to add product: {e}"));
                Navigation::Stay
            }
            Err(halt) => halt.navigation(),
        }
    }

    fn build_submission(&self, ctx: &PageContext) -> Result<ProductSubmission, String> {
        let form = &self.form;
        let image = form
            .image
            .as_deref()
            .map(ImageUpload::from_path)
            .transpose()
            .map_err(|e| e.to_string())?;
        let additional_images = form
            .additional_images
            .iter()
            .map(|p| ImageUpload::from_path(p))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| e.to_string())?;
        Ok(ProductSubmission {
            product: NewProduct {
                product_name: form.product_name.trim().to_string(),
                price: form.price.unwrap_or_default(),
                quantity: form.quantity.unwrap_or_default(),
                weight: form.weight,
                description: form.description.clone(),
                added_by: ctx.user_name(),
                product_cat: CategoryRef {
                    id: form.category_id.unwrap_or_default(),
                },
            },
            image,
            additional_images,
        })
    }

    /// Category choices for the form.
    pub fn render(&self, w: &mut impl Write) -> io::Result<()> {
        match &self.categories {
            PageState::Loading => writeln!(w, "Loading categories..."),
            PageState::Failed(reason) => writeln!(w, "Categories unavailable: {reason}"),
            PageState::Ready(list) => {
                writeln!(w, "Categories:")?;
                for category in list {
                    writeln!(w, "  [{}] {}", category.id, category.category_name)?;
                }
                Ok(())
            }
        }
    }
}
