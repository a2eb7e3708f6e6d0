//! Feature encoding and schema validation

mod features;
mod schema;

pub use features::{encode, NUM_FEATURES};
pub use schema::{FeatureSchema, SchemaError, FEATURE_COLUMNS};
