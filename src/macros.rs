/// Declares a struct whose fields are populated from document paths.
///
/// The struct is emitted as written (attributes, visibility and all), minus
/// the annotations. Each field may end with `=>` and one of:
///
/// - `"a.b.c"`: the path in the default namespace
/// - `("a.b.c", v2 = "x.y", legacy = "z")`: default path plus alternates
/// - `(v2 = "x.y")`: alternates only; the default namespace reads `""`
/// - `skip`: the field is never visited and may have any type
///
/// A field without `=>` is still visited, with the empty annotation (path `[""]`).
///
/// Besides the struct, the macro implements [`Mapped`](crate::Mapped) and
/// [`Field`](crate::Field), so the struct can itself be nested (by value or as
/// `Option`) inside other `tagmap!` structs.
///
/// # Examples
///
/// ```rust
/// use tagmap::{from_str, tagmap, MapOptions, Timestamp};
///
/// tagmap! {
///     #[derive(Debug, Default)]
///     pub struct Address {
///         pub city: String => "city",
///     }
/// }
///
/// tagmap! {
///     #[derive(Debug, Default)]
///     pub struct Customer {
///         /// Display name.
///         pub name: String => ("profile.name", v2 = "fullName"),
///         pub joined: Option<Timestamp> => "profile.joined",
///         pub address: Address => "address",
///         pub cache: Vec<u8> => skip,
///     }
/// }
///
/// let text = r#"{"profile": {"name": "Ada", "joined": "2003-01"}, "address": {"city": "Berlin"}}"#;
/// let (customer, report) = from_str::<Customer, _>(text, &MapOptions::new()).unwrap();
/// assert!(report.is_clean());
/// assert_eq!(customer.name, "Ada");
/// assert_eq!(customer.address.city, "Berlin");
/// assert!(customer.joined.is_some());
/// ```
#[macro_export]
macro_rules! tagmap {
    (
        $(#[$struct_meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $field_ty:ty $(=> $tags:tt)?
            ),* $(,)?
        }
    ) => {
        $(#[$struct_meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $field_ty,
            )*
        }

        impl $crate::Mapped for $name {
            #[allow(unused_variables)]
            fn visit_fields(
                &mut self,
                visit: &mut dyn FnMut(&'static $crate::FieldSpec, $crate::Slot<'_>),
            ) {
                $(
                    $crate::tagmap!(@visit visit, [$($tags)?], $field, self.$field);
                )*
            }
        }

        impl $crate::Field for $name {
            fn slot(&mut self) -> $crate::Slot<'_> {
                $crate::Slot::Composite(self)
            }
        }
    };

    (@visit $visit:ident, [skip], $field:ident, $place:expr) => {};
    (@visit $visit:ident, [$($tags:tt)?], $field:ident, $place:expr) => {{
        static SPEC: $crate::FieldSpec = $crate::FieldSpec {
            name: stringify!($field),
            tags: $crate::tagmap!(@tags $($tags)?),
        };
        $visit(&SPEC, $crate::Field::slot(&mut $place));
    }};

    (@tags) => { &[] };
    (@tags $path:literal) => { &[("", $path)] };
    (@tags ($path:literal $(, $ns:ident = $alt:literal)* $(,)?)) => {
        &[("", $path) $(, (stringify!($ns), $alt))*]
    };
    (@tags ($($ns:ident = $alt:literal),* $(,)?)) => {
        &[$((stringify!($ns), $alt)),*]
    };
}

/// Builds a document [`Value`](crate::Value) from JSON-like syntax.
///
/// Object keys must be string literals. Leaf values may be `null`, `true`,
/// `false`, nested arrays/objects, or any expression convertible with
/// `Value::from`.
///
/// ```rust
/// use tagmap::{value, Value};
///
/// let doc = value!({
///     "name": "Alice",
///     "tags": ["a", "b"],
///     "manager": null
/// });
/// assert!(doc.is_object());
/// ```
#[macro_export]
macro_rules! value {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::value!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Map::new();
        $(
            object.insert($key.to_string(), $crate::value!($value));
        )*
        $crate::Value::Object(object)
    }};

    ($other:expr) => {
        $crate::Value::from($other)
    };
}
