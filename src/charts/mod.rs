pub mod svg;

pub use svg::{SvgChart, SvgChartBackend};
