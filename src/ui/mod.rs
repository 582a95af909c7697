//! Rendering: panels and the charts drawn into them.

pub mod colorbar;
pub mod heatmap;
pub mod panels;
pub mod pie;
pub mod plot;
