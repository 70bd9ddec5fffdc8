//! Field inspection for argument binding.
//!
//! Decides how many command-line tokens a field consumes:
//!
//! ```text
//! TypeDescriptor → can_parse? → presence flag? → Zero | One
//!                └ unwrap pointer → Vec / HashMap → Multiple | Unsupported
//! ```
//!
//! Every function here is pure and holds no state.

mod cardinality;
mod exported;
mod plan;
mod presence;
mod zero;

pub use cardinality::{cardinality_of, classify, classify_type, Cardinality, UnsupportedType};
pub use exported::{is_exported, is_exported_bytes};
pub use plan::{plan_fields, unset_fields, FieldPlan, PlanError};
pub use presence::{is_presence_flag, is_text_decodable};
pub use zero::is_zero;
