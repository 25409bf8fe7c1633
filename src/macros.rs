//! Macros to reduce boilerplate in the codebase

/// Macro to generate the canonical value list, labels, Display and FromStr
/// for a catalog enum
///
/// Parsing is case-insensitive and treats `_` and `-` as spaces, so
/// `in_progress`, `In-Progress` and `in progress` all parse to the same value.
///
/// # Usage
///
/// ```rust,ignore
/// catalog_enum!(
///     MyEnum,
///     "my field",
///     {
///         Variant1 => "Variant 1",
///         Variant2 => "Variant 2",
///     }
/// );
/// ```
#[macro_export]
macro_rules! catalog_enum {
    (
        $enum_name:ident,
        $field:expr,
        { $($variant:ident => $label:expr),+ $(,)? }
    ) => {
        impl $enum_name {
            /// Every value in canonical order
            pub const ALL: &'static [$enum_name] = &[$($enum_name::$variant,)+];

            /// Display label, also used as the serialized form
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($enum_name::$variant => $label,)+
                }
            }

            /// Labels of every value in canonical order
            pub fn labels() -> Vec<&'static str> {
                Self::ALL.iter().map(|v| v.as_str()).collect()
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::error::DeskError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                let wanted = $crate::macros::normalize_label(s);
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| $crate::macros::normalize_label(v.as_str()) == wanted)
                    .ok_or_else(|| {
                        $crate::error::DeskError::Validation(format!(
                            "invalid {} '{}'. Must be one of: {}",
                            $field,
                            s,
                            Self::labels().join(", ")
                        ))
                    })
            }
        }
    };
}

#[doc(hidden)]
pub fn normalize_label(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| if c == '_' || c == '-' { ' ' } else { c })
        .collect::<String>()
        .to_lowercase()
}
