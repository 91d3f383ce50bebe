//! Field descriptors and typed slots.
//!
//! A target type describes itself through [`Mapped::visit_fields`]: for every
//! mappable field it hands the visitor a static [`FieldSpec`] (name and
//! annotations) and a [`Slot`], a mutable view of the field tagged with its
//! [`FieldKind`]. The mapper dispatches with a single `match` over `Slot`.
//!
//! Implementations are normally generated by [`tagmap!`](crate::tagmap). The
//! field types that can appear in a target are exactly those implementing
//! [`Field`]:
//!
//! | Rust type | Kind |
//! |-----------|------|
//! | `String`, integers, `f32`/`f64`, `bool` | [`FieldKind::Scalar`] |
//! | `Option` of the above | [`FieldKind::OptionalScalar`] |
//! | [`Timestamp`] | [`FieldKind::Temporal`] |
//! | `Option<Timestamp>` | [`FieldKind::OptionalTemporal`] |
//! | a `tagmap!` struct | [`FieldKind::Composite`] |
//! | `Option` of a `tagmap!` struct | [`FieldKind::OptionalComposite`] |

use crate::{Path, Timestamp};

/// The scalar families a document can supply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Int,
    Uint,
    Float,
    Bool,
}

impl ScalarKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Int => "integer",
            ScalarKind::Uint => "unsigned integer",
            ScalarKind::Float => "number",
            ScalarKind::Bool => "bool",
        }
    }
}

/// An extracted scalar, before narrowing to the field's own type.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    /// The value a field of `kind` receives when extraction misses.
    #[must_use]
    pub fn zero(kind: ScalarKind) -> Self {
        match kind {
            ScalarKind::String => Scalar::String(String::new()),
            ScalarKind::Int => Scalar::Int(0),
            ScalarKind::Uint => Scalar::Uint(0),
            ScalarKind::Float => Scalar::Float(0.0),
            ScalarKind::Bool => Scalar::Bool(false),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ScalarKind {
        match self {
            Scalar::String(_) => ScalarKind::String,
            Scalar::Int(_) => ScalarKind::Int,
            Scalar::Uint(_) => ScalarKind::Uint,
            Scalar::Float(_) => ScalarKind::Float,
            Scalar::Bool(_) => ScalarKind::Bool,
        }
    }

    fn into_string(self) -> String {
        match self {
            Scalar::String(s) => s,
            _ => String::new(),
        }
    }

    fn into_i64(self) -> i64 {
        match self {
            Scalar::Int(i) => i,
            Scalar::Uint(u) => u as i64,
            Scalar::Float(f) => f as i64,
            _ => 0,
        }
    }

    fn into_u64(self) -> u64 {
        match self {
            Scalar::Int(i) => i as u64,
            Scalar::Uint(u) => u,
            Scalar::Float(f) => f as u64,
            _ => 0,
        }
    }

    fn into_f64(self) -> f64 {
        match self {
            Scalar::Int(i) => i as f64,
            Scalar::Uint(u) => u as f64,
            Scalar::Float(f) => f,
            _ => 0.0,
        }
    }

    fn into_bool(self) -> bool {
        matches!(self, Scalar::Bool(true))
    }
}

/// Closed set of field kinds the mapper knows how to fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Scalar(ScalarKind),
    OptionalScalar(ScalarKind),
    Temporal,
    OptionalTemporal,
    Composite,
    OptionalComposite,
}

impl FieldKind {
    /// Returns `true` for `Option` fields, which are skipped when the document holds `null`.
    #[must_use]
    pub const fn is_optional(self) -> bool {
        matches!(
            self,
            FieldKind::OptionalScalar(_) | FieldKind::OptionalTemporal | FieldKind::OptionalComposite
        )
    }
}

/// Write access to a scalar field, plain or `Option`.
///
/// Integers and floats are narrowed with `as`, so out-of-range values wrap or
/// saturate exactly like a Rust cast. For an `Option` field `store` always
/// leaves it `Some`.
pub trait ScalarSlot {
    fn scalar_kind(&self) -> ScalarKind;

    fn store(&mut self, value: Scalar);
}

/// Write access to an `Option` of a nested target.
pub trait OptionalComposite {
    /// Returns the nested target, allocating it with `Default` when `None`.
    fn allocate(&mut self) -> &mut dyn Mapped;

    fn is_allocated(&self) -> bool;
}

impl<T: Mapped + Default> OptionalComposite for Option<T> {
    fn allocate(&mut self) -> &mut dyn Mapped {
        self.get_or_insert_with(T::default)
    }

    fn is_allocated(&self) -> bool {
        self.is_some()
    }
}

/// A mutable, kind-tagged view of one target field.
pub enum Slot<'a> {
    Scalar(&'a mut dyn ScalarSlot),
    OptionalScalar(&'a mut dyn ScalarSlot),
    Temporal(&'a mut Timestamp),
    OptionalTemporal(&'a mut Option<Timestamp>),
    Composite(&'a mut dyn Mapped),
    OptionalComposite(&'a mut dyn OptionalComposite),
}

impl Slot<'_> {
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            Slot::Scalar(cell) => FieldKind::Scalar(cell.scalar_kind()),
            Slot::OptionalScalar(cell) => FieldKind::OptionalScalar(cell.scalar_kind()),
            Slot::Temporal(_) => FieldKind::Temporal,
            Slot::OptionalTemporal(_) => FieldKind::OptionalTemporal,
            Slot::Composite(_) => FieldKind::Composite,
            Slot::OptionalComposite(_) => FieldKind::OptionalComposite,
        }
    }
}

/// A type that can be a field of a mapped target.
pub trait Field {
    fn slot(&mut self) -> Slot<'_>;
}

/// Static description of one target field.
#[derive(Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// The Rust field name.
    pub name: &'static str,
    /// `(namespace suffix, annotation)` pairs; the default namespace is `""`.
    pub tags: &'static [(&'static str, &'static str)],
}

impl FieldSpec {
    /// The annotation under `namespace`, or `""` when the field has none there.
    #[must_use]
    pub fn annotation(&self, namespace: &str) -> &'static str {
        self.tags
            .iter()
            .find(|(ns, _)| *ns == namespace)
            .map_or("", |(_, annotation)| annotation)
    }

    /// The field's own lookup path under `namespace`, before any prefix.
    #[must_use]
    pub fn path(&self, namespace: &str) -> Path {
        Path::split(self.annotation(namespace))
    }
}

/// A struct whose fields can be populated from a document.
///
/// Fields declared `=> skip` in [`tagmap!`](crate::tagmap) are never visited.
pub trait Mapped {
    /// Calls `visit` once per mappable field, in declaration order.
    fn visit_fields(&mut self, visit: &mut dyn FnMut(&'static FieldSpec, Slot<'_>));
}

/// A field descriptor paired with its kind, as reported by [`describe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    pub spec: &'static FieldSpec,
    pub kind: FieldKind,
}

/// Lists the mappable fields of `T` in declaration order.
///
/// # Examples
///
/// ```rust
/// use tagmap::{describe, tagmap, FieldKind, ScalarKind};
///
/// tagmap! {
///     #[derive(Default)]
///     struct Row {
///         id: u32 => "id",
///         note: Option<String> => ("meta.note", v2 = "note"),
///         scratch: Vec<u8> => skip,
///     }
/// }
///
/// let fields = describe::<Row>();
/// assert_eq!(fields.len(), 2);
/// assert_eq!(fields[0].kind, FieldKind::Scalar(ScalarKind::Uint));
/// assert_eq!(fields[1].spec.annotation("v2"), "note");
/// ```
#[must_use]
pub fn describe<T: Mapped + Default>() -> Vec<FieldInfo> {
    let mut fields = Vec::new();
    T::default().visit_fields(&mut |spec: &'static FieldSpec, slot: Slot<'_>| {
        fields.push(FieldInfo {
            spec,
            kind: slot.kind(),
        });
    });
    fields
}

macro_rules! scalar_fields {
    ($($ty:ty => $kind:ident, $convert:expr);* $(;)?) => {
        $(
            impl ScalarSlot for $ty {
                fn scalar_kind(&self) -> ScalarKind {
                    ScalarKind::$kind
                }

                fn store(&mut self, value: Scalar) {
                    let convert: fn(Scalar) -> $ty = $convert;
                    *self = convert(value);
                }
            }

            impl ScalarSlot for Option<$ty> {
                fn scalar_kind(&self) -> ScalarKind {
                    ScalarKind::$kind
                }

                fn store(&mut self, value: Scalar) {
                    let convert: fn(Scalar) -> $ty = $convert;
                    *self = Some(convert(value));
                }
            }

            impl Field for $ty {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::Scalar(self)
                }
            }

            impl Field for Option<$ty> {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::OptionalScalar(self)
                }
            }
        )*
    };
}

scalar_fields! {
    String => String, Scalar::into_string;
    bool => Bool, Scalar::into_bool;
    i8 => Int, |v| v.into_i64() as i8;
    i16 => Int, |v| v.into_i64() as i16;
    i32 => Int, |v| v.into_i64() as i32;
    i64 => Int, Scalar::into_i64;
    isize => Int, |v| v.into_i64() as isize;
    u8 => Uint, |v| v.into_u64() as u8;
    u16 => Uint, |v| v.into_u64() as u16;
    u32 => Uint, |v| v.into_u64() as u32;
    u64 => Uint, Scalar::into_u64;
    usize => Uint, |v| v.into_u64() as usize;
    f32 => Float, |v| v.into_f64() as f32;
    f64 => Float, Scalar::into_f64;
}

impl Field for Timestamp {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Temporal(self)
    }
}

impl Field for Option<Timestamp> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::OptionalTemporal(self)
    }
}

impl<T: Mapped + Default> Field for Option<T> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::OptionalComposite(self)
    }
}
