//! Output generation for extracted articles.
//!
//! # Submodules
//!
//! - [`plaintext`]: one `.txt` file per article
//! - [`json`]: optional JSON summary of the whole run
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── scraper.log
//! ├── BBC Health_Some_Headline_20251019_083000_0.txt
//! ├── WebMD_Another_Headline_20251019_083000_1.txt
//! └── ...
//! ```

pub mod json;
pub mod plaintext;
