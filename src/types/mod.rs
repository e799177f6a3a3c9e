pub mod cardinality;
pub mod code_set;
pub mod length;
pub mod schema;
pub mod spec_type;

pub use cardinality::Cardinality;
pub use code_set::{CodeEntry, CodeSet};
pub use length::{LengthConstraint, LengthViolation};
pub use schema::{Branch, Leaf, RootSchema, SchemaNode};
pub use spec_type::{BaseType, BaseTypeInfo, SpecificationType};
