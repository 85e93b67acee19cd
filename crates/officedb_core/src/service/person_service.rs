//! Person lookups: by name, age range and ticket membership.

use super::entity_service::EntityService;
use super::ServiceResult;
use crate::model::person::{Person, AGE_FIELD, NAME_FIELD, TICKETS_FIELD};
use crate::model::require_text;
use crate::query::filter::Filter;
use crate::repo::document_repo::DocumentRepository;

pub type PersonService<R> = EntityService<Person, R>;

impl<R: DocumentRepository> EntityService<Person, R> {
    /// Returns one person with exactly this name.
    ///
    /// Names are not unique; with several matches one arbitrary person is
    /// returned.
    pub fn find_by_name(&self, name: &str) -> ServiceResult<Person> {
        require_text(NAME_FIELD, name)?;
        self.find_one(&Filter::eq(NAME_FIELD, name))
            .map_err(|err| err.describe_not_found(|| format!("person `{name}` not found")))
    }

    /// Returns people whose age lies in `[min, max]`, bounds inclusive.
    ///
    /// A missing bound is unbounded; `min > max` yields an empty result.
    pub fn find_by_age_range(
        &self,
        min: Option<i32>,
        max: Option<i32>,
    ) -> ServiceResult<Vec<Person>> {
        self.find_many(&Filter::range(
            AGE_FIELD,
            min.map(i64::from),
            max.map(i64::from),
        ))
    }

    /// Returns people whose ticket list contains `number`.
    pub fn find_by_ticket(&self, number: i32) -> ServiceResult<Vec<Person>> {
        self.find_many(&Filter::contains(TICKETS_FIELD, number))
    }
}
