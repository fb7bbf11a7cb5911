//! Naming convention utilities for code generation.
//!
//! Specification keys arrive in snake_case; the emitted runtime source
//! spells record types in PascalCase, accessors in camelCase, and header
//! guards / field constants in SCREAMING_CASE. The same conversion must be
//! applied everywhere the same name is referenced, including across
//! cross-type reference includes, or generated members stop lining up.
//!
//! # Supported Conversions
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `snake_case` | [`to_camel_case`] | `camelCase` |
//! | `snake_case` | [`to_pascal_case`] | `PascalCase` |
//! | `any_case` | [`to_screaming`] | `ANY_CASE` |

/// Convert snake_case to camelCase.
///
/// # Examples
///
/// ```
/// use recforge_codegen::naming::to_camel_case;
///
/// assert_eq!(to_camel_case("card_type"), "cardType");
/// assert_eq!(to_camel_case("balance"), "balance");
/// ```
pub fn to_camel_case(s: &str) -> String {
    let mut result = String::new();
    let mut capitalize_next = false;

    for c in s.chars() {
        if c == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push_str(&c.to_uppercase().to_string());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Convert a string to PascalCase.
///
/// Handles snake_case, kebab-case, and already-capitalized input.
///
/// # Examples
///
/// ```
/// use recforge_codegen::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("credit_card"), "CreditCard");
/// assert_eq!(to_pascal_case("customer"), "Customer");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    s.split(['-', '_'])
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Uppercase a name in place, keeping underscores.
///
/// Used for header guards (`Customer` → `CUSTOMER`) and field-identifier
/// constants (`card_type` → `CARD_TYPE`).
///
/// # Examples
///
/// ```
/// use recforge_codegen::naming::to_screaming;
///
/// assert_eq!(to_screaming("card_type"), "CARD_TYPE");
/// assert_eq!(to_screaming("Customer"), "CUSTOMER");
/// ```
pub fn to_screaming(s: &str) -> String {
    s.to_uppercase()
}
