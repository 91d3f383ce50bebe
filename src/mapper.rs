//! The recursive struct mapper and type dispatcher.
//!
//! For every field a target visits, the mapper:
//!
//! 1. resolves the effective path: the current prefix joined with the field's
//!    annotation under the active namespace;
//! 2. skips the field when the path does not exist in the document;
//! 3. for `Option` fields, skips the field when the document holds `null`;
//! 4. dispatches on the [`Slot`] kind, or recurses into nested targets.
//!
//! Nested targets are read with the parent's namespace when propagation is
//! on; otherwise with the default namespace and propagation off. Either way
//! the nested prefix is the composite field's effective path.

use crate::accessor::Accessor;
use crate::error::{Fault, Report};
use crate::field::{FieldSpec, Mapped, Scalar, ScalarKind, Slot};
use crate::timestamp::{parse_timestamp, Timestamp};
use crate::{Error, Kind, MapOptions, Path};
use chrono::TimeZone;

/// Where in the target and the document a walk currently is.
struct Scope<'n> {
    namespace: &'n str,
    propagate: bool,
    base: Path,
    trail: String,
}

impl<'n> Scope<'n> {
    fn trail_for(&self, name: &str) -> String {
        if self.trail.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.trail, name)
        }
    }

    fn nested(&self, base: Path, trail: String) -> Scope<'n> {
        if self.propagate {
            Scope {
                namespace: self.namespace,
                propagate: true,
                base,
                trail,
            }
        } else {
            Scope {
                namespace: "",
                propagate: false,
                base,
                trail,
            }
        }
    }
}

struct Mapper<'a, Tz: TimeZone> {
    doc: &'a dyn Accessor,
    zone: &'a Tz,
    report: Report,
}

/// Maps `doc` into `target`, collecting recoverable faults.
pub(crate) fn map_document<T, Tz>(
    doc: &dyn Accessor,
    target: &mut T,
    options: &MapOptions<Tz>,
) -> Report
where
    T: Mapped + ?Sized,
    Tz: TimeZone,
{
    tracing::debug!(
        namespace = %options.namespace,
        propagate = options.propagate,
        base = %options.base_path,
        "mapping document"
    );

    let mut mapper = Mapper {
        doc,
        zone: &options.zone,
        report: Report::new(),
    };
    let scope = Scope {
        namespace: &options.namespace,
        propagate: options.propagate,
        base: options.base_path.clone(),
        trail: String::new(),
    };
    mapper.walk(target, &scope);
    mapper.report
}

impl<Tz: TimeZone> Mapper<'_, Tz> {
    fn walk<T: Mapped + ?Sized>(&mut self, target: &mut T, scope: &Scope<'_>) {
        target.visit_fields(&mut |spec: &'static FieldSpec, slot: Slot<'_>| {
            self.field(spec, slot, scope);
        });
    }

    fn field(&mut self, spec: &FieldSpec, slot: Slot<'_>, scope: &Scope<'_>) {
        let path = scope.base.join(&spec.path(scope.namespace));

        let Some(found) = self.doc.kind_of(&path) else {
            tracing::trace!(field = spec.name, path = %path, "path not present, skipping");
            return;
        };

        if found == Kind::Null && slot.kind().is_optional() {
            tracing::debug!(field = spec.name, path = %path, "null value, leaving optional field unset");
            return;
        }

        match slot {
            Slot::Scalar(cell) => {
                let kind = cell.scalar_kind();
                let value = self.read(&path, kind).unwrap_or_else(|| {
                    tracing::trace!(
                        field = spec.name,
                        path = %path,
                        expected = kind.as_str(),
                        found = found.as_str(),
                        "coercion miss, storing zero value"
                    );
                    Scalar::zero(kind)
                });
                cell.store(value);
            }
            Slot::OptionalScalar(cell) => {
                let kind = cell.scalar_kind();
                match self.read(&path, kind) {
                    Some(value) => cell.store(value),
                    None => {
                        let error = Error::type_mismatch(kind.as_str(), found.as_str());
                        self.fault(scope.trail_for(spec.name), path, error);
                    }
                }
            }
            Slot::Temporal(cell) => {
                *cell = match self.timestamp(&path) {
                    Ok(ts) => ts,
                    Err(error) => {
                        self.fault(scope.trail_for(spec.name), path, error);
                        Timestamp::default()
                    }
                };
            }
            Slot::OptionalTemporal(cell) => match self.timestamp(&path) {
                Ok(ts) => {
                    if let Some(existing) = cell.as_mut() {
                        *existing = ts;
                    } else {
                        *cell = Some(ts);
                    }
                }
                Err(error) => self.fault(scope.trail_for(spec.name), path, error),
            },
            Slot::Composite(inner) => {
                let nested = scope.nested(path, scope.trail_for(spec.name));
                self.walk(inner, &nested);
            }
            Slot::OptionalComposite(cell) => {
                if !cell.is_allocated() {
                    tracing::debug!(field = spec.name, path = %path, "allocating nested target");
                }
                let nested = scope.nested(path, scope.trail_for(spec.name));
                self.walk(cell.allocate(), &nested);
            }
        }
    }

    fn read(&self, path: &Path, kind: ScalarKind) -> Option<Scalar> {
        match kind {
            ScalarKind::String => self
                .doc
                .lookup_str(path)
                .map(|s| Scalar::String(s.to_string())),
            ScalarKind::Int => self.doc.lookup_i64(path).map(Scalar::Int),
            ScalarKind::Uint => self.doc.lookup_u64(path).map(Scalar::Uint),
            ScalarKind::Float => self.doc.lookup_f64(path).map(Scalar::Float),
            ScalarKind::Bool => self.doc.lookup_bool(path).map(Scalar::Bool),
        }
    }

    fn timestamp(&self, path: &Path) -> crate::Result<Timestamp> {
        let text = self.doc.raw_text(path).unwrap_or_default();
        parse_timestamp(&text, self.zone)
    }

    fn fault(&mut self, field: String, path: Path, error: Error) {
        tracing::debug!(field = %field, path = %path, error = %error, "field fault");
        self.report.record(Fault { field, path, error });
    }
}
