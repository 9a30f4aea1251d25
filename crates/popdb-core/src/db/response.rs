use crate::{
    error::{ErrorClass, ErrorOrigin, InternalError},
    traits::EntityKind,
};
use thiserror::Error as ThisError;

///
/// ResponseError
/// Errors related to interpreting a materialized response.
///

#[derive(Debug, ThisError)]
pub enum ResponseError {
    #[error("expected exactly one row, found 0 (entity {entity})")]
    NotFound { entity: &'static str },

    #[error("expected exactly one row, found {count} (entity {entity})")]
    NotUnique { entity: &'static str, count: u32 },
}

impl ResponseError {
    pub(crate) const fn class(&self) -> ErrorClass {
        match self {
            Self::NotFound { .. } => ErrorClass::NotFound,
            Self::NotUnique { .. } => ErrorClass::Conflict,
        }
    }
}

impl From<ResponseError> for InternalError {
    fn from(err: ResponseError) -> Self {
        Self::new(err.class(), ErrorOrigin::Response, err.to_string())
    }
}

///
/// Response
/// Materialized query result: entities in effective response order.
///

#[derive(Debug)]
pub struct Response<E: EntityKind>(Vec<E>);

impl<E: EntityKind> Response<E> {
    pub(crate) const fn new(rows: Vec<E>) -> Self {
        Self(rows)
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    #[must_use]
    pub fn count(&self) -> u32 {
        self.0.len() as u32
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.0.iter()
    }

    // ------------------------------------------------------------------
    // Cardinality enforcement
    // ------------------------------------------------------------------

    pub fn require_one(&self) -> Result<(), InternalError> {
        match self.count() {
            1 => Ok(()),
            0 => Err(ResponseError::NotFound {
                entity: E::ENTITY_NAME,
            }
            .into()),
            n => Err(ResponseError::NotUnique {
                entity: E::ENTITY_NAME,
                count: n,
            }
            .into()),
        }
    }

    pub fn require_some(&self) -> Result<(), InternalError> {
        if self.is_empty() {
            Err(ResponseError::NotFound {
                entity: E::ENTITY_NAME,
            }
            .into())
        } else {
            Ok(())
        }
    }

    // ------------------------------------------------------------------
    // Entities
    // ------------------------------------------------------------------

    pub fn entity(self) -> Result<E, InternalError> {
        self.require_one()?;
        Ok(self.0.into_iter().next().unwrap())
    }

    pub fn try_entity(self) -> Result<Option<E>, InternalError> {
        match self.count() {
            0 => Ok(None),
            1 => Ok(self.0.into_iter().next()),
            n => Err(ResponseError::NotUnique {
                entity: E::ENTITY_NAME,
                count: n,
            }
            .into()),
        }
    }

    #[must_use]
    pub fn entities(self) -> Vec<E> {
        self.0
    }
}

impl<E: EntityKind> IntoIterator for Response<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

///
/// TESTS
///
