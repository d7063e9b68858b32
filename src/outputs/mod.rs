//! Output writers for a finished search.
//!
//! - [`spreadsheet`]: one header row plus one row per article, overwriting any previous export
//! - [`images`]: one image file per article, named after its spreadsheet row
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── news_data.xlsx
//! └── images/
//!     ├── 2.png
//!     ├── 3.jpg
//!     └── ...
//! ```

use std::path::{Path, PathBuf};

pub mod images;
pub mod spreadsheet;

pub const SPREADSHEET_FILE: &str = "news_data.xlsx";
pub const IMAGES_DIR: &str = "images";

/// Where a run writes its results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub spreadsheet: PathBuf,
    pub images_dir: PathBuf,
}

impl OutputPaths {
    /// The standard layout below `output_dir`.
    pub fn under(output_dir: &Path) -> Self {
        Self {
            spreadsheet: output_dir.join(SPREADSHEET_FILE),
            images_dir: output_dir.join(IMAGES_DIR),
        }
    }
}
