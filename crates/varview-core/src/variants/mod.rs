//! The annotated variant table and the views built on it.

mod links;
mod stats;
mod table;

pub use links::{anchor, dbsnp_url, detail_fields, gnomad_region_url, DetailField};
pub use stats::{category_counts, distribution, CategoryCount, Distribution};
pub use table::{is_missing, VariantRecord, VariantTable, VariantTableError};
