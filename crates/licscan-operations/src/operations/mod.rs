mod aggregate;
mod enrich;
mod scan;

pub use aggregate::{ScanContext, aggregate, aggregate_at};
pub use enrich::enrich_licenses;
pub use scan::{ScanInput, ScanOperation};
