use once_cell::sync::Lazy;
use std::sync::Arc;

use super::SpecDictionary;

// Dictionary documents compiled into the binary
pub static BASE_TYPES_JSON: &str = include_str!("../../data/base_types.json");
pub static SPEC_TYPES_JSON: &str = include_str!("../../data/spec_types.json");
pub static CODE_SETS_JSON: &str = include_str!("../../data/code_sets.json");
pub static SCHEMAS_JSON: &str = include_str!("../../data/schemas.json");

static EMBEDDED_DICTIONARY: Lazy<Arc<SpecDictionary>> = Lazy::new(|| {
    let dictionary = SpecDictionary::from_json_parts(
        BASE_TYPES_JSON,
        SPEC_TYPES_JSON,
        CODE_SETS_JSON,
        SCHEMAS_JSON,
    )
    .expect("embedded dictionary is valid");
    Arc::new(dictionary)
});

/// Shared handle to the embedded dictionary, deserialized on first use.
pub fn embedded_dictionary() -> Arc<SpecDictionary> {
    Arc::clone(&EMBEDDED_DICTIONARY)
}
