//! `CeyBazaar` Admin CLI Library
//!
//! Terminal front end of the store administration console. Pages fetch
//! through the backend facades and render plain text; commands wire a page
//! to a clap subcommand.

pub mod auth_cmd;
pub mod category_cmd;
pub mod console;
pub mod context;
pub mod fmt;
pub mod guard;
pub mod notice;
pub mod order_cmd;
pub mod pages;
pub mod product_cmd;
pub mod prompt;
pub mod region_cmd;
pub mod report_cmd;
pub mod routes;
pub mod scope;
