//! Project lookups by collaborator and by name.

use super::entity_service::EntityService;
use super::ServiceResult;
use crate::model::project::{Project, COLLABORATORS_FIELD, NAME_FIELD};
use crate::model::require_text;
use crate::query::filter::Filter;
use crate::repo::document_repo::DocumentRepository;

pub type ProjectService<R> = EntityService<Project, R>;

impl<R: DocumentRepository> EntityService<Project, R> {
    /// Returns one project listing `collaborator` among its collaborators.
    pub fn find_by_collaborator(&self, collaborator: &str) -> ServiceResult<Project> {
        require_text(COLLABORATORS_FIELD, collaborator)?;
        self.find_one(&Filter::contains(COLLABORATORS_FIELD, collaborator))
            .map_err(|err| {
                err.describe_not_found(|| {
                    format!("no project with collaborator `{collaborator}`")
                })
            })
    }

    /// Returns the collaborator names of the project called `name`.
    ///
    /// The whole project document is decoded, so a malformed project fails
    /// instead of yielding a partial list.
    pub fn collaborators_of(&self, name: &str) -> ServiceResult<Vec<String>> {
        require_text(NAME_FIELD, name)?;
        self.find_one(&Filter::eq(NAME_FIELD, name))
            .map(|project| project.collaborators)
            .map_err(|err| err.describe_not_found(|| format!("project `{name}` not found")))
    }
}
