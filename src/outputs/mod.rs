//! Report outputs.
//!
//! - [`xlsx`]: writes the result set to `search_results.xlsx`
//! - [`work_item`]: reads the input work item and saves the output one with
//!   the `results` variable
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── 1_challenge.png
//! ├── 2_challenge.png
//! ├── search_results.xlsx
//! └── work-items-out/
//!     └── output.json
//! ```

pub mod work_item;
pub mod xlsx;
