//! Macros for reducing boilerplate when defining items
//!
//! These macros generate the repetitive trait implementations needed for
//! every listed item type and for the string-backed enums they carry.

/// Implement `Entity` for a struct with a `String` id field
///
/// Every listed field must implement `ToFieldValue`.
///
/// # Example
///
/// ```rust,ignore
/// impl_entity!(
///     Trek, "trek", "treks",
///     searchable: ["name", "region", "description"],
///     fields: {
///         "name" => name,
///         "duration_days" => duration_days,
///     }
/// );
/// ```
#[macro_export]
macro_rules! impl_entity {
    (
        $type:ident, $singular:literal, $plural:literal,
        searchable: [$($search:literal),* $(,)?],
        fields: { $($name:literal => $field:ident),* $(,)? }
    ) => {
        impl $crate::core::entity::Entity for $type {
            fn resource_name() -> &'static str {
                $plural
            }

            fn resource_name_singular() -> &'static str {
                $singular
            }

            fn id(&self) -> &str {
                &self.id
            }

            fn searchable_fields() -> &'static [&'static str] {
                &[$($search),*]
            }

            fn field_names() -> &'static [&'static str] {
                &[$($name),*]
            }

            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                match field {
                    "id" => Some($crate::core::field::FieldValue::String(self.id.clone())),
                    $($name => Some($crate::core::field::ToFieldValue::to_field_value(&self.$field)),)*
                    _ => None,
                }
            }
        }
    };
}

/// Implement `as_str`, `Display`, `FromStr`, `keywords` and `ToFieldValue`
/// for a unit-only enum backed by fixed strings
///
/// # Example
///
/// ```rust,ignore
/// impl_field_enum!(Difficulty {
///     Easy => "Easy",
///     Hard => "Hard",
/// });
/// ```
#[macro_export]
macro_rules! impl_field_enum {
    ($type:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $type {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($type::$variant => $text,)+
                }
            }

            /// Every accepted string, in declaration order
            pub fn keywords() -> Vec<String> {
                vec![$($text.to_string()),+]
            }
        }

        impl ::std::fmt::Display for $type {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl ::std::str::FromStr for $type {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $(s if s.eq_ignore_ascii_case($text) => Ok($type::$variant),)+
                    _ => Err(format!("invalid {}: {}", stringify!($type), s)),
                }
            }
        }

        impl $crate::core::field::ToFieldValue for $type {
            fn to_field_value(&self) -> $crate::core::field::FieldValue {
                $crate::core::field::FieldValue::String(self.as_str().to_string())
            }
        }
    };
}
