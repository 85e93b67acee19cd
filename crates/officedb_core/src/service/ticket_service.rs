//! Ticket lookups by number and owner.

use super::entity_service::EntityService;
use super::ServiceResult;
use crate::model::require_text;
use crate::model::ticket::{Ticket, NUMBER_FIELD, OWNER_FIELD};
use crate::query::filter::Filter;
use crate::repo::document_repo::DocumentRepository;

pub type TicketService<R> = EntityService<Ticket, R>;

impl<R: DocumentRepository> EntityService<Ticket, R> {
    /// Returns one ticket with this number (arbitrary pick among duplicates).
    pub fn find_by_number(&self, number: i32) -> ServiceResult<Ticket> {
        self.find_one(&Filter::eq(NUMBER_FIELD, number))
            .map_err(|err| err.describe_not_found(|| format!("ticket {number} not found")))
    }

    /// Returns one ticket owned by `owner` (arbitrary pick among several).
    pub fn find_by_owner(&self, owner: &str) -> ServiceResult<Ticket> {
        require_text(OWNER_FIELD, owner)?;
        self.find_one(&Filter::eq(OWNER_FIELD, owner))
            .map_err(|err| err.describe_not_found(|| format!("no ticket owned by `{owner}`")))
    }
}
