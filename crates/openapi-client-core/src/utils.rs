//! String transformation utilities for code generation

/// Convert a string to snake_case
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_is_lowercase = false;

    for ch in s.chars() {
        if ch.is_uppercase() {
            if prev_is_lowercase {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
            prev_is_lowercase = false;
        } else if ch.is_alphanumeric() {
            result.push(ch);
            prev_is_lowercase = ch.is_lowercase() || ch.is_ascii_digit();
        } else {
            // Any separator (-, _, space, braces) collapses to one underscore
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            prev_is_lowercase = false;
        }
    }

    result.trim_matches('_').to_string()
}

/// Convert a string to PascalCase
pub fn to_pascal_case(s: &str) -> String {
    to_snake_case(s)
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("getPetById"), "get_pet_by_id");
        assert_eq!(to_snake_case("findByStatus"), "find_by_status");
        assert_eq!(to_snake_case("pet-store"), "pet_store");
        assert_eq!(to_snake_case("{petId}"), "pet_id");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
        assert_eq!(to_snake_case(""), "");
    }

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("getPetById"), "GetPetById");
        assert_eq!(to_pascal_case("pet"), "Pet");
        assert_eq!(to_pascal_case("findByStatus"), "FindByStatus");
        assert_eq!(to_pascal_case("pet-store"), "PetStore");
        assert_eq!(to_pascal_case("{petId}"), "PetId");
        assert_eq!(to_pascal_case(""), "");
    }
}
