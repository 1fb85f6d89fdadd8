//! DrawingML charts for presentation slides.
//!
//! A [`Chart`] is serialized into a `c:chartSpace` part by [`write_chart`].
//! Its data can also be packed into a small workbook with
//! [`generate_chart_workbook`] so that PowerPoint can edit it later.
//!
//! # Example
//!
//! ```rust
//! use slidecraft::ooxml::charts::{Chart, ChartSeries, ChartType, chart_to_bytes};
//!
//! let chart = Chart::new(ChartType::Bar, vec!["Q1".into(), "Q2".into()])
//!     .with_series(ChartSeries::new("Sales", vec![120.0, 150.0]));
//!
//! let xml = chart_to_bytes(&chart, None)?;
//! assert!(xml.starts_with(b"<?xml"));
//! # Ok::<(), std::io::Error>(())
//! ```

pub mod models;
pub mod workbook;
pub mod writer;

pub use models::{Chart, ChartSeries, ChartType, SERIES_PALETTE, palette_color};
pub use workbook::generate_chart_workbook;
pub use writer::{chart_to_bytes, write_chart};
