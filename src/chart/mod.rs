//! Chart format support: osu! text parsing and file loading.

mod error;
mod loader;
mod osu;

pub use error::ChartError;
pub use loader::ChartLoader;
pub use osu::{chart_id, parse};
