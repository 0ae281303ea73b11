//! Product category page (`/Product-Category`).

use std::io::{self, Write};

use tracing::info;

use ceybazaar_core::model::{Category, NewCategory};

use super::{Halt, Navigation, PageState, call};
use crate::context::PageContext;
use crate::scope::PageScope;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryForm {
    pub category_name: String,
}

#[derive(Debug)]
pub struct CategoryPage {
    scope: PageScope,
    pub categories: PageState<Vec<Category>>,
    pub form: CategoryForm,
}

impl CategoryPage {
    pub fn new(ctx: &PageContext) -> Self {
        Self {
            scope: ctx.scope(),
            categories: PageState::Loading,
            form: CategoryForm::default(),
        }
    }

    /// Fetch the category list.
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

    /// Submit [`Self::form`]. On success the form is reset and the list re-read.
    pub async fn submit(&mut self, ctx: &PageContext) -> Navigation {
        let name = self.form.category_name.trim().to_string();
        if name.is_empty() {
            ctx.notices.error("Please enter category name");
            return Navigation::Stay;
        }

        let body = NewCategory {
            category_name: name,
            added_by: ctx.user_name(),
        };
        match call(ctx, &self.scope, ctx.backend.products.create_category(&body)).await {
            Ok(envelope) if envelope.is_success() => {
                info!(category = %body.category_name, "Product category added");
                ctx.notices.success("Product category added successfully!");
                self.form = CategoryForm::default();
                self.activate(ctx).await
            }
            Ok(_) | Err(Halt::Failed(_)) => {
                ctx.notices.error("Failed to add product category.");
                Navigation::Stay
            }
            Err(halt) => halt.navigation(),
        }
    }

    pub fn render(&self, w: &mut impl Write) -> io::Result<()> {
        match &self.categories {
            PageState::Loading => writeln!(w, "Loading categories..."),
            PageState::Failed(reason) => writeln!(w, "Categories unavailable: {reason}"),
            PageState::Ready(list) if list.is_empty() => writeln!(w, "No product categories."),
            PageState::Ready(list) => {
                writeln!(w, "{:<6} NAME", "ID")?;
                for category in list {
                    writeln!(w, "{:<6} {}", category.id, category.category_name)?;
                }
                Ok(())
            }
        }
    }
}
