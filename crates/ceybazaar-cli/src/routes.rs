//! Console routes.

use std::fmt;

/// Every view of the admin console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Unauthenticated entry route.
    Login,
    Home,
    ProductCategory,
    NewProduct,
    ViewProducts,
    DeliveryRegion,
    Orders,
    Reports,
}

impl Route {
    pub const ALL: [Self; 8] = [
        Self::Login,
        Self::Home,
        Self::ProductCategory,
        Self::NewProduct,
        Self::ViewProducts,
        Self::DeliveryRegion,
        Self::Orders,
        Self::Reports,
    ];

    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Home => "/Home",
            Self::ProductCategory => "/Product-Category",
            Self::NewProduct => "/New-Product",
            Self::ViewProducts => "/View-Products",
            Self::DeliveryRegion => "/Delivery-Region",
            Self::Orders => "/Orders",
            Self::Reports => "/Reports",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Home => "Dashboard",
            Self::ProductCategory => "Product Category",
            Self::NewProduct => "New Product",
            Self::ViewProducts => "View Products",
            Self::DeliveryRegion => "Delivery Region",
            Self::Orders => "Orders",
            Self::Reports => "Reports",
        }
    }

    /// Routes rendered inside the dashboard layout (and therefore guarded).
    pub const fn is_guarded(self) -> bool {
        !matches!(self, Self::Login)
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.path() == path)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
