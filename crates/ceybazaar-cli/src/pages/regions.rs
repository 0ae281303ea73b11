//! Delivery region page (`/Delivery-Region`).

use std::io::{self, Write};

use tracing::info;

use ceybazaar_core::model::DeliveryRegion;

use super::{Halt, Navigation, PageState, call};
use crate::context::PageContext;
use crate::fmt::rupees;
use crate::scope::PageScope;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionForm {
    pub region_code: String,
    pub region_name: String,
    pub shipping_cost: Option<f64>,
}

impl RegionForm {
    fn to_region(&self) -> Result<DeliveryRegion, &'static str> {
        let region_code = self.region_code.trim();
        let region_name = self.region_name.trim();
        if region_code.is_empty() {
            return Err("Please enter region code");
        }
        if region_name.is_empty() {
            return Err("Please enter region name");
        }
        let shipping_cost = match self.shipping_cost {
            Some(cost) if cost >= 0.0 => cost,
            _ => return Err("Please enter a valid shipping cost"),
        };
        Ok(DeliveryRegion {
            id: None,
            region_code: region_code.to_string(),
            region_name: region_name.to_string(),
            shipping_cost,
        })
    }
}

#[derive(Debug)]
pub struct RegionPage {
    scope: PageScope,
    pub regions: PageState<Vec<DeliveryRegion>>,
    pub form: RegionForm,
}

impl RegionPage {
    pub fn new(ctx: &PageContext) -> Self {
        Self {
            scope: ctx.scope(),
            regions: PageState::Loading,
            form: RegionForm::default(),
        }
    }

    pub async fn activate(&mut self, ctx: &PageContext) -> Navigation {
        match call(ctx, &self.scope, ctx.backend.regions.list()).await {
            Ok(envelope) => {
                let description = envelope.description().to_string();
                match envelope.into_list() {
                    Some(list) => self.regions = PageState::Ready(list),
                    None => {
                        ctx.notices.error("Failed to fetch delivery regions.");
                        self.regions.fail(description);
                    }
                }
                Navigation::Stay
            }
            Err(Halt::Failed(e)) => {
                ctx.notices.error("Failed to fetch delivery regions.");
                self.regions.fail(e);
                Navigation::Stay
            }
            Err(halt) => halt.navigation(),
        }
    }

    pub async fn submit(&mut self, ctx: &PageContext) -> Navigation {
        let region = match self.form.to_region() {
            Ok(region) => region,
            Err(msg) => {
                ctx.notices.error(msg);
                return Navigation::Stay;
            }
        };
        match call(ctx, &self.scope, ctx.backend.regions.create(&region)).await {
            Ok(envelope) if envelope.is_success() => {
                info!(region = %region.region_code, "Delivery region added");
                ctx.notices.success("Delivery region added successfully!");
                self.form = RegionForm::default();
                self.activate(ctx).await
            }
            Ok(_) | Err(Halt::Failed(_)) => {
                ctx.notices.error("Failed to add delivery region.");
                Navigation::Stay
            }
            Err(halt) => halt.navigation(),
        }
    }

    pub fn render(&self, w: &mut impl Write) -> io::Result<()> {
        match &self.regions {
            PageState::Loading => writeln!(w, "Loading delivery regions..."),
            PageState::Failed(reason) => writeln!(w, "Delivery regions unavailable: {reason}"),
            PageState::Ready(list) if list.is_empty() => writeln!(w, "No delivery regions."),
            PageState::Ready(list) => {
                writeln!(w, "{:<8} {:<24} {:>14}", "CODE", "NAME", "SHIPPING")?;
                for region in list {
                    writeln!(
                        w,
                        "{:<8} {:<24} {:>14}",
                        region.region_code,
                        region.region_name,
                        rupees(region.shipping_cost)
                    )?;
                }
                Ok(())
            }
        }
    }
}
