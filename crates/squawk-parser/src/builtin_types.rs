//! Types every script can reference without declaring them.

use squawk_core::semantic::{Attributes, Family, TypeDefinition};

/// The built-in `Timestamp` meta type.
///
/// A script that declares its own `[metaTypes.Timestamp]` replaces it.
pub fn defaults() -> Vec<TypeDefinition> {
    vec![TypeDefinition::new(
        "Timestamp",
        Family::Meta,
        Attributes::default(),
    )]
}
