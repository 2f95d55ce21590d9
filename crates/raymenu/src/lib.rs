//! A fan-out popup menu: a toggle button that opens a staggered, animated grid of
//! action items and reports which one was tapped.
//!
//! The crate does no drawing of its own. A host toolkit measures children, runs
//! layout passes, delivers touches and ticks the clock; see [`menu::RayMenu`].

pub mod config;
pub mod geometry;
pub mod input;
pub mod menu;

pub use crate::config::MenuConfig;
pub use crate::geometry::{MeasureError, Padding, Point, Rect, Size};
pub use crate::input::{TouchAction, TouchEvent};
pub use crate::menu::{ChildVisual, MenuStatus, RayMenu};
