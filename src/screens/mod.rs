//! Screen state holders
//!
//! A screen owns its items and the filter, sort, selection and page state
//! that live for as long as it is mounted. Nothing here renders markup.

pub mod dashboard;
pub mod list;
pub mod pages;

pub use dashboard::DashboardSummary;
pub use list::{Intent, ListScreen, ListView, Row};
pub use pages::{Page, RouteDecision, resolve};
