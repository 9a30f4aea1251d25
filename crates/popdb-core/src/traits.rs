use crate::value::Value;
use serde::Serialize;
use std::fmt::Debug;

///
/// FieldValues
///
/// Dynamic field projection over a typed entity.
///
/// `None` means the field is unknown to the schema. A present-but-null field
/// projects as `Some(Value::Null)`; the two are never conflated.
///

pub trait FieldValues {
    fn get_value(&self, field: &str) -> Option<Value>;
}

///
/// EntityKind
///
/// Schema contract for one record collection.
///
/// `FIELDS` is the closed set of queryable field names; every name in it must
/// be covered by `get_value`. Referencing a field outside `FIELDS` in any
/// query position is an invariant violation, never a silent null.
///

pub trait EntityKind: Clone + FieldValues + Serialize {
    type Key: Clone + Debug + Ord;

    const ENTITY_NAME: &'static str;
    const FIELDS: &'static [&'static str];

    fn key(&self) -> Self::Key;

    /// Whether `field` is part of this entity's schema.
    #[must_use]
    fn has_field(field: &str) -> bool {
        Self::FIELDS.contains(&field)
    }
}
