//! Typed request and response messages of the gateway.
//!
//! Entity messages reuse the core wire entities, whose `id` is the 24-hex
//! store id.

use officedb_core::{Person, Project, Ticket};
use serde::{Deserialize, Serialize};

/// Id assigned to a newly created entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
}

/// Outcome flag of a person update or delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Empty acknowledgement of a ticket or project update/delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {}

/// Request addressing one entity by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByIdRequest {
    pub id: String,
}

// People

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonResponse {
    pub person: Person,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeopleResponse {
    pub people: Vec<Person>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetPersonByNameRequest {
    pub name: String,
}

/// Inclusive age bounds; a missing bound is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetPeopleByAgeRangeRequest {
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetPeopleByTicketNumberRequest {
    pub ticket_number: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePersonRequest {
    pub name: String,
    pub age: i32,
    pub tickets: Vec<i32>,
    pub project: String,
}

impl CreatePersonRequest {
    pub(crate) fn into_entity(self) -> Person {
        Person::new(self.name, self.age, self.tickets, self.project)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePersonRequest {
    pub id: String,
    pub name: String,
    pub age: i32,
    pub tickets: Vec<i32>,
    pub project: String,
}

impl UpdatePersonRequest {
    pub(crate) fn into_parts(self) -> (String, Person) {
        (
            self.id,
            Person::new(self.name, self.age, self.tickets, self.project),
        )
    }
}

// Tickets

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketResponse {
    pub ticket: Ticket,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketsResponse {
    pub tickets: Vec<Ticket>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetTicketByNumberRequest {
    pub number: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetTicketByOwnerRequest {
    pub owner: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTicketRequest {
    pub number: i32,
    pub owner: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTicketRequest {
    pub id: String,
    pub number: i32,
    pub owner: String,
}

// Projects

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectResponse {
    pub project: Project,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectsResponse {
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetProjectByCollaboratorRequest {
    pub collaborator: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetCollaboratorsRequest {
    pub project_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaboratorsResponse {
    pub collaborators: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    pub collaborators: Vec<String>,
    pub difficulty: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProjectRequest {
    pub id: String,
    pub name: String,
    pub collaborators: Vec<String>,
    pub difficulty: String,
}
