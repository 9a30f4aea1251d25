use crate::{
    error::InternalError,
    traits::EntityKind,
    value::{Value, strict_order_cmp, values_equal},
};
use std::cmp::Ordering;

///
/// Predicate
///
/// Deterministic, schema-visible row filter language.
///
/// Range operators never match null or missing operands; membership and
/// equality treat `Null` as equal only to `Null`. Referencing a field the
/// entity schema does not declare fails the whole query.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    /// Always true.
    True,

    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),

    /// Scalar comparison against a literal.
    Cmp {
        field: String,
        op: CompareOp,
        value: Value,
    },

    /// Field value is one of the listed literals.
    In { field: String, values: Vec<Value> },

    /// List-typed field contains the literal.
    Contains { field: String, value: Value },

    /// Field is present and explicitly null.
    IsNull { field: String },

    /// Field is present and non-null.
    IsNotNull { field: String },
}

impl Predicate {
    #[must_use]
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::cmp(field, CompareOp::Eq, value)
    }

    #[must_use]
    pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::cmp(field, CompareOp::Ne, value)
    }

    #[must_use]
    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::cmp(field, CompareOp::Lt, value)
    }

    #[must_use]
    pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::cmp(field, CompareOp::Lte, value)
    }

    #[must_use]
    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::cmp(field, CompareOp::Gt, value)
    }

    #[must_use]
    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::cmp(field, CompareOp::Gte, value)
    }

    #[must_use]
    pub fn is_in(field: impl Into<String>, values: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        Self::In {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn contains(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Contains {
            field: field.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn is_null(field: impl Into<String>) -> Self {
        Self::IsNull {
            field: field.into(),
        }
    }

    #[must_use]
    pub fn is_not_null(field: impl Into<String>) -> Self {
        Self::IsNotNull {
            field: field.into(),
        }
    }

    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match self {
            Self::True => other,
            Self::And(mut parts) => {
                parts.push(other);
                Self::And(parts)
            }
            first => Self::And(vec![first, other]),
        }
    }

    fn cmp(field: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> Self {
        Self::Cmp {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    /// Evaluate against one entity row.
    pub(crate) fn eval<E: EntityKind>(&self, entity: &E) -> Result<bool, InternalError> {
        match self {
            Self::True => Ok(true),
            Self::And(parts) => {
                for part in parts {
                    if !part.eval(entity)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Self::Or(parts) => {
                for part in parts {
                    if part.eval(entity)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Self::Not(inner) => Ok(!inner.eval(entity)?),
            Self::Cmp { field, op, value } => {
                let actual = project::<E>(entity, field)?;
                Ok(op.matches(&actual, value))
            }
            Self::In { field, values } => {
                let actual = project::<E>(entity, field)?;
                Ok(values.iter().any(|v| values_equal(&actual, v)))
            }
            Self::Contains { field, value } => {
                let actual = project::<E>(entity, field)?;
                match actual {
                    Value::List(items) => Ok(items.iter().any(|item| values_equal(item, value))),
                    _ => Ok(false),
                }
            }
            Self::IsNull { field } => Ok(project::<E>(entity, field)?.is_null()),
            Self::IsNotNull { field } => Ok(!project::<E>(entity, field)?.is_null()),
        }
    }
}

///
/// CompareOp
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompareOp {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
    Ne,
}

impl CompareOp {
    fn matches(self, actual: &Value, expected: &Value) -> bool {
        match self {
            Self::Eq => values_equal(actual, expected),
            Self::Ne => !values_equal(actual, expected),
            Self::Lt => strict_order_cmp(actual, expected) == Some(Ordering::Less),
            Self::Lte => matches!(
                strict_order_cmp(actual, expected),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Self::Gt => strict_order_cmp(actual, expected) == Some(Ordering::Greater),
            Self::Gte => matches!(
                strict_order_cmp(actual, expected),
                Some(Ordering::Greater | Ordering::Equal)
            ),
        }
    }
}

/// Project one schema-checked field off an entity.
pub(crate) fn project<E: EntityKind>(entity: &E, field: &str) -> Result<Value, InternalError> {
    if !E::has_field(field) {
        return Err(InternalError::query_invariant(format!(
            "unknown field `{field}` on entity `{}`",
            E::ENTITY_NAME
        )));
    }

    entity.get_value(field).ok_or_else(|| {
        InternalError::query_invariant(format!(
            "field `{field}` declared but not projected on entity `{}`",
            E::ENTITY_NAME
        ))
    })
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use serde::Serialize;

    #[derive(Clone, Debug, Serialize)]
    struct Row {
        id: u64,
        rate: Option<f64>,
        tags: Vec<String>,
    }

    impl FieldValues for Row {
        fn get_value(&self, field: &str) -> Option<Value> {
            match field {
                "id" => Some(Value::Uint(self.id)),
                "rate" => Some(Value::from(self.rate)),
                "tags" => Some(Value::List(
                    self.tags.iter().cloned().map(Value::Text).collect(),
                )),
                _ => None,
            }
        }
    }

    impl EntityKind for Row {
        type Key = u64;

        const ENTITY_NAME: &'static str = "row";
        const FIELDS: &'static [&'static str] = &["id", "rate", "tags"];

        fn key(&self) -> Self::Key {
            self.id
        }
    }

    fn row(rate: Option<f64>) -> Row {
        Row {
            id: 1,
            rate,
            tags: vec!["a".to_string(), "b".to_string()],
        }
    }

    #[test]
    fn range_ops_never_match_null() {
        let null_rate = row(None);
        for pred in [
            Predicate::gt("rate", 0.0),
            Predicate::gte("rate", 0.0),
            Predicate::lt("rate", 0.0),
            Predicate::lte("rate", 0.0),
        ] {
            assert!(!pred.eval(&null_rate).unwrap(), "{pred:?} matched null");
        }
    }

    #[test]
    fn strict_gt_excludes_boundary() {
        let boundary = row(Some(2.5));
        assert!(!Predicate::gt("rate", 2.5).eval(&boundary).unwrap());
        assert!(Predicate::gte("rate", 2.5).eval(&boundary).unwrap());
        assert!(Predicate::gt("rate", 2.4).eval(&boundary).unwrap());
    }

    #[test]
    fn null_checks_distinguish_presence() {
        assert!(Predicate::is_null("rate").eval(&row(None)).unwrap());
        assert!(!Predicate::is_null("rate").eval(&row(Some(1.0))).unwrap());
        assert!(Predicate::is_not_null("rate").eval(&row(Some(1.0))).unwrap());
    }

    #[test]
    fn contains_matches_list_membership() {
        let entity = row(None);
        assert!(Predicate::contains("tags", "a").eval(&entity).unwrap());
        assert!(!Predicate::contains("tags", "z").eval(&entity).unwrap());
        // non-list field never matches
        assert!(!Predicate::contains("id", 1u64).eval(&entity).unwrap());
    }

    #[test]
    fn unknown_field_is_an_error_not_a_miss() {
        let err = Predicate::eq("bogus", 1u64).eval(&row(None)).unwrap_err();
        assert!(err.to_string().contains("unknown field `bogus`"));
    }

    #[test]
    fn membership_and_negation() {
        let entity = row(Some(2.0));
        assert!(Predicate::is_in("rate", [1.0, 2.0]).eval(&entity).unwrap());
        assert!(!Predicate::is_in("rate", [1.0, 3.0]).eval(&entity).unwrap());
        // null is only a member of an explicit null listing
        assert!(!Predicate::is_in("rate", [1.0, 2.0]).eval(&row(None)).unwrap());

        assert!(Predicate::ne("rate", 1.0).eval(&entity).unwrap());
        assert!(!Predicate::ne("rate", 2.0).eval(&entity).unwrap());

        let not = Predicate::Not(Box::new(Predicate::eq("id", 1u64)));
        assert!(!not.eval(&entity).unwrap());
    }

    #[test]
    fn or_matches_any_branch() {
        let entity = row(Some(2.0));
        let either = Predicate::Or(vec![
            Predicate::gt("rate", 100.0),
            Predicate::eq("id", 1u64),
        ]);
        assert!(either.eval(&entity).unwrap());
    }

    #[test]
    fn and_builder_flattens() {
        let pred = Predicate::True
            .and(Predicate::gt("rate", 0.0))
            .and(Predicate::lt("rate", 10.0));
        assert!(pred.eval(&row(Some(5.0))).unwrap());
        assert!(!pred.eval(&row(Some(10.0))).unwrap());
    }
}
