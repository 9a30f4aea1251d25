//! Fluent load-query builder and execution.
//!
//! A query is intent only until one of the execution methods runs; execution
//! scans the store in key order, so equal sort keys keep a deterministic
//! primary-key tie-break and identical queries over an unchanged store return
//! identical results.

use crate::{
    db::{
        predicate::{Predicate, project},
        response::Response,
        store::EntityStore,
    },
    error::InternalError,
    num::{pooled_mean, sum_present},
    obs::{MetricsEvent, record},
    traits::EntityKind,
    value::{Value, canonical_cmp},
};

///
/// Direction
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

///
/// LoadQuery
///
/// Session-free fluent read query over one entity store.
/// Owns intent construction and execution only; result inspection lives on
/// `Response<E>`.
///

pub struct LoadQuery<'a, E: EntityKind> {
    store: &'a EntityStore<E>,
    predicate: Predicate,
    order: Option<(String, Direction)>,
    offset: u32,
    limit: Option<u32>,
}

impl<'a, E: EntityKind> LoadQuery<'a, E> {
    pub(crate) const fn new(store: &'a EntityStore<E>) -> Self {
        Self {
            store,
            predicate: Predicate::True,
            order: None,
            offset: 0,
            limit: None,
        }
    }

    // ------------------------------------------------------------------
    // Query refinement
    // ------------------------------------------------------------------

    /// Add a row filter; multiple filters conjoin.
    #[must_use]
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicate = self.predicate.and(predicate);
        self
    }

    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>) -> Self {
        self.order = Some((field.into(), Direction::Asc));
        self
    }

    #[must_use]
    pub fn order_by_desc(mut self, field: impl Into<String>) -> Self {
        self.order = Some((field.into(), Direction::Desc));
        self
    }

    /// Skip a number of rows in the ordered result stream.
    #[must_use]
    pub const fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    // ------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------

    /// Execute and materialize the effective result window.
    pub fn execute(&self) -> Result<Response<E>, InternalError> {
        let rows = self.matched()?;
        Ok(Response::new(rows.into_iter().cloned().collect()))
    }

    /// Execute and return owned entities.
    pub fn entities(&self) -> Result<Vec<E>, InternalError> {
        Ok(self.execute()?.entities())
    }

    /// Execute and count the effective result window.
    pub fn count(&self) -> Result<u32, InternalError> {
        Ok(self.matched()?.len() as u32)
    }

    // ------------------------------------------------------------------
    // Projection & aggregation
    // ------------------------------------------------------------------

    /// Execute and return projected field values for the effective window.
    pub fn values_by(&self, field: impl AsRef<str>) -> Result<Vec<Value>, InternalError> {
        let field = field.as_ref();
        self.matched()?
            .into_iter()
            .map(|row| project::<E>(row, field))
            .collect()
    }

    /// Sum of the non-null numeric projections of `field`.
    /// Zero when nothing contributes, mirroring the store's `$sum`.
    pub fn sum_by(&self, field: impl AsRef<str>) -> Result<f64, InternalError> {
        let values = self.values_by(field)?;
        Ok(sum_present(values.iter().map(Value::as_f64)))
    }

    /// Pooled mean of the non-null numeric projections of `field`.
    ///
    /// Null rows are excluded from both the numerator and the denominator;
    /// `None` when no row contributes, mirroring the store's `$avg`.
    pub fn avg_by(&self, field: impl AsRef<str>) -> Result<Option<f64>, InternalError> {
        let values = self.values_by(field)?;
        Ok(pooled_mean(values.iter().map(Value::as_f64)))
    }

    /// Smallest non-null numeric projection of `field`.
    pub fn min_value_by(&self, field: impl AsRef<str>) -> Result<Option<f64>, InternalError> {
        let values = self.values_by(field)?;
        Ok(values
            .iter()
            .filter_map(Value::as_f64)
            .min_by(f64::total_cmp))
    }

    /// Largest non-null numeric projection of `field`.
    pub fn max_value_by(&self, field: impl AsRef<str>) -> Result<Option<f64>, InternalError> {
        let values = self.values_by(field)?;
        Ok(values
            .iter()
            .filter_map(Value::as_f64)
            .max_by(f64::total_cmp))
    }

    // ------------------------------------------------------------------
    // Pipeline core
    // ------------------------------------------------------------------

    fn matched(&self) -> Result<Vec<&'a E>, InternalError> {
        record(MetricsEvent::ExecStart {
            entity: E::ENTITY_NAME,
        });

        let mut rows = Vec::new();
        for row in self.store.values() {
            if self.predicate.eval(row)? {
                rows.push(row);
            }
        }

        record(MetricsEvent::RowsScanned {
            entity: E::ENTITY_NAME,
            rows_scanned: self.store.len() as u64,
        });

        if let Some((field, direction)) = &self.order {
            // validate the sort key before projecting row by row
            if !E::has_field(field) {
                return Err(InternalError::query_invariant(format!(
                    "unknown sort field `{field}` on entity `{}`",
                    E::ENTITY_NAME
                )));
            }

            let mut keyed: Vec<(Value, &E)> = rows
                .into_iter()
                .map(|row| Ok((project::<E>(row, field)?, row)))
                .collect::<Result<_, InternalError>>()?;

            // stable sort keeps primary-key order for equal keys
            match direction {
                Direction::Asc => keyed.sort_by(|a, b| canonical_cmp(&a.0, &b.0)),
                Direction::Desc => keyed.sort_by(|a, b| canonical_cmp(&b.0, &a.0)),
            }

            rows = keyed.into_iter().map(|(_, row)| row).collect();
        }

        let window: Vec<&E> = rows
            .into_iter()
            .skip(self.offset as usize)
            .take(self.limit.map_or(usize::MAX, |limit| limit as usize))
            .collect();

        record(MetricsEvent::ExecFinish {
            entity: E::ENTITY_NAME,
            rows_returned: window.len() as u64,
        });

        Ok(window)
    }
}

///
/// TESTS
///
