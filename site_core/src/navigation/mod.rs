//! Which overlay is on screen, and the page-level side effects it implies

pub mod controller;
pub mod page;

pub use controller::{Effect, NavEvent, NavigationState, Transition};
pub use page::Page;
