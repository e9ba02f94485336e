//! Naming policy for generated symbols and files.
//!
//! Every function here is pure and total over non-empty identifiers. An empty
//! identifier is a broken upstream contract and panics.

/// Default extension of generated headers.
pub const DEFAULT_EXTENSION: &str = "h";

/// Returns the class name: first character uppercased, rest unchanged.
///
/// # Panics
/// Panics if `identifier` is empty.
#[must_use]
pub fn class_name(identifier: &str) -> String {
    let (first, rest) = split_first(identifier);
    let mut result = String::with_capacity(identifier.len());
    result.extend(first.to_uppercase());
    result.push_str(rest);
    result
}

/// Returns the header file name for a type or message (`side` -> `Side.h`).
///
/// # Panics
/// Panics if `identifier` is empty.
#[must_use]
pub fn artifact_name(identifier: &str) -> String {
    artifact_name_with(identifier, DEFAULT_EXTENSION)
}

/// Same as [`artifact_name`] with an explicit extension (without the dot).
///
/// # Panics
/// Panics if `identifier` is empty.
#[must_use]
pub fn artifact_name_with(identifier: &str, extension: &str) -> String {
    format!("{}.{}", class_name(identifier), extension)
}

/// Returns the getter name.
///
/// # Panics
/// Panics if `identifier` is empty.
#[must_use]
pub fn getter_name(identifier: &str) -> String {
    method_name(identifier, "")
}

/// Returns the setter name.
///
/// Identical to [`getter_name`]; the generated C++ tells the two apart by
/// overload (const no-arg getter, value-taking setter).
///
/// # Panics
/// Panics if `identifier` is empty.
#[must_use]
pub fn setter_name(identifier: &str) -> String {
    method_name(identifier, "")
}

/// Returns the presence check name (`price` -> `isPricePresent`).
///
/// # Panics
/// Panics if `identifier` is empty.
#[must_use]
pub fn is_present_name(identifier: &str) -> String {
    format!("is{}Present", class_name(identifier))
}

/// Returns the reset method name (`price` -> `priceReset`).
///
/// # Panics
/// Panics if `identifier` is empty.
#[must_use]
pub fn reset_name(identifier: &str) -> String {
    method_name(identifier, "Reset")
}

/// Returns the data length accessor name (`memo` -> `memoLength`).
///
/// # Panics
/// Panics if `identifier` is empty.
#[must_use]
pub fn length_name(identifier: &str) -> String {
    method_name(identifier, "Length")
}

/// Returns the group count accessor name (`legs` -> `legsCount`).
///
/// # Panics
/// Panics if `identifier` is empty.
#[must_use]
pub fn count_name(identifier: &str) -> String {
    method_name(identifier, "Count")
}

/// Returns the named constant symbol (`buy` -> `kBuy`).
///
/// # Panics
/// Panics if `identifier` is empty.
#[must_use]
pub fn constant_name(identifier: &str) -> String {
    format!("k{}", class_name(identifier))
}

/// Returns the include guard macro for an artifact (`NewOrder.h` ->
/// `NEW_ORDER_H`).
///
/// # Panics
/// Panics if `artifact` is empty.
#[must_use]
pub fn include_guard(artifact: &str) -> String {
    assert!(!artifact.is_empty(), "artifact name must not be empty");
    let mut guard = String::with_capacity(artifact.len() + 4);
    let mut prev_lower = false;
    for c in artifact.chars() {
        if c.is_ascii_alphanumeric() {
            if c.is_ascii_uppercase() && prev_lower {
                guard.push('_');
            }
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
            guard.push(c.to_ascii_uppercase());
        } else {
            guard.push('_');
            prev_lower = false;
        }
    }
    guard
}

fn method_name(identifier: &str, suffix: &str) -> String {
    let (first, rest) = split_first(identifier);
    let mut result = String::with_capacity(identifier.len() + suffix.len());
    result.extend(first.to_lowercase());
    result.push_str(rest);
    result.push_str(suffix);
    result
}

fn split_first(identifier: &str) -> (char, &str) {
    let mut chars = identifier.chars();
    match chars.next() {
        Some(first) => (first, chars.as_str()),
        None => panic!("identifier must not be empty"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_name() {
        assert_eq!(class_name("messageHeader"), "MessageHeader");
        assert_eq!(class_name("Side"), "Side");
        assert_eq!(class_name("x"), "X");
        assert_eq!(class_name("mDEntryPx"), "MDEntryPx");
    }

    #[test]
    fn test_artifact_name() {
        assert_eq!(artifact_name("newOrderSingle"), "NewOrderSingle.h");
        assert_eq!(artifact_name_with("side", "hpp"), "Side.hpp");
    }

    #[test]
    fn test_artifact_name_preserves_tail_case() {
        assert_ne!(artifact_name("orderId"), artifact_name("orderID"));
        assert_eq!(artifact_name("ORDER"), "ORDER.h");
    }

    #[test]
    fn test_getter_and_setter_collide() {
        for id in ["Price", "price", "MDEntryPx"] {
            assert_eq!(getter_name(id), setter_name(id));
        }
        assert_eq!(getter_name("Price"), "price");
    }

    #[test]
    fn test_accessor_suffixes() {
        assert_eq!(is_present_name("price"), "isPricePresent");
        assert_eq!(reset_name("Price"), "priceReset");
        assert_eq!(length_name("Memo"), "memoLength");
        assert_eq!(count_name("legs"), "legsCount");
    }

    #[test]
    fn test_constant_name() {
        assert_eq!(constant_name("buy"), "kBuy");
        assert_eq!(constant_name("RED"), "kRED");
    }

    #[test]
    fn test_include_guard() {
        assert_eq!(include_guard("Shape.h"), "SHAPE_H");
        assert_eq!(include_guard("NewOrderSingle.h"), "NEW_ORDER_SINGLE_H");
        assert_eq!(include_guard("schema.h"), "SCHEMA_H");
    }

    #[test]
    #[should_panic(expected = "identifier must not be empty")]
    fn test_empty_identifier_panics() {
        let _ = class_name("");
    }
}
