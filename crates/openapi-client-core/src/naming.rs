//! Operation naming strategies for generated client methods.
//!
//! Two rules are supported: deriving a name from the URL path segments plus
//! the HTTP verb, or converting the operation's declared `operationId`. Both
//! produce PascalCase identifiers suffixed with `Async` for the asynchronous
//! call sites of the generated client.

// Internal imports (std, crate)
use std::collections::HashSet;

use crate::utils::to_pascal_case;

/// Derive a method name from URL path segments and the HTTP verb.
///
/// Placeholder segments (`{petId}`) are skipped; the remaining segments and
/// the verb are PascalCased and concatenated, so `GET /pet/{petId}` becomes
/// `PetGetAsync`.
pub fn path_segments_name(path: &str, http_method: &str) -> String {
    let mut name = String::new();
    for segment in path.split('/') {
        if segment.is_empty() || segment.starts_with('{') {
            continue;
        }
        name.push_str(&to_pascal_case(segment));
    }
    name.push_str(&to_pascal_case(http_method));
    name.push_str("Async");
    name
}

/// Derive a method name from a declared operation id.
///
/// `getPetById` becomes `GetPetByIdAsync`.
pub fn operation_id_name(operation_id: &str) -> String {
    format!("{}Async", to_pascal_case(operation_id))
}

/// Resolve duplicate derived names with a deterministic numeric suffix.
///
/// The first operation keeps the plain name; later collisions get `2`, `3`,
/// and so on appended in document order.
pub fn disambiguate(candidate: String, used: &mut HashSet<String>) -> String {
    if used.insert(candidate.clone()) {
        return candidate;
    }
    let mut n = 2;
    loop {
        let alternative = format!("{}{}", candidate, n);
        if used.insert(alternative.clone()) {
            return alternative;
        }
        n += 1;
    }
}
