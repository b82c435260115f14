//! Iris Explorer core: the bundled Iris table and the pure analysis
//! functions behind the dashboard views.
//!
//! ```no_run
//! use iris_explorer::analysis::{filter, parse_selection, project, summarize};
//!
//! let dataset = iris_explorer::data::load()?;
//! let selection = parse_selection(&["Setosa"])?;
//! let subset = filter(&dataset, &selection)?;
//! assert_eq!(summarize(&subset).count, 50);
//!
//! let pca = project(&subset)?;
//! println!("PC1 explains {:.1}%", pca.percent(0));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod analysis;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod insights;

pub use error::AnalysisError;
