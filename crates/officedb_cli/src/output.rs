//! Response printing and the CLI error type.

use crate::seed::SeedSummary;
use officedb_core::{LoggingError, Person, Project, Ticket};
use officedb_rpc::{
    CollaboratorsResponse, ConfigError, PeopleResponse, PersonResponse, ProjectResponse,
    ProjectsResponse, Status, TicketResponse, TicketsResponse,
};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum CliError {
    Config(ConfigError),
    Logging(LoggingError),
    Rpc(Status),
    Encode(serde_json::Error),
    /// The walkthrough observed a state it should not have.
    Demo(String),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "configuration: {err}"),
            Self::Logging(err) => write!(f, "logging: {err}"),
            Self::Rpc(status) => write!(f, "{status}"),
            Self::Encode(err) => write!(f, "cannot encode output: {err}"),
            Self::Demo(message) => write!(f, "demo failed: {message}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Logging(err) => Some(err),
            Self::Rpc(status) => Some(status),
            Self::Encode(err) => Some(err),
            Self::Demo(_) => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<LoggingError> for CliError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<Status> for CliError {
    fn from(value: Status) -> Self {
        Self::Rpc(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Writes responses to stdout, one JSON document or text lines per response.
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn seed_summary(&self, summary: &SeedSummary) -> Result<(), CliError> {
        self.emit(summary, || {
            vec![format!(
                "seeded people={} tickets={} projects={}",
                summary.people, summary.tickets, summary.projects
            )]
        })
    }

    pub fn person(&self, response: &PersonResponse) -> Result<(), CliError> {
        self.emit(response, || vec![person_line(&response.person)])
    }

    pub fn people(&self, response: &PeopleResponse) -> Result<(), CliError> {
        self.emit(response, || response.people.iter().map(person_line).collect())
    }

    pub fn ticket(&self, response: &TicketResponse) -> Result<(), CliError> {
        self.emit(response, || vec![ticket_line(&response.ticket)])
    }

    pub fn tickets(&self, response: &TicketsResponse) -> Result<(), CliError> {
        self.emit(response, || response.tickets.iter().map(ticket_line).collect())
    }

    pub fn project(&self, response: &ProjectResponse) -> Result<(), CliError> {
        self.emit(response, || vec![project_line(&response.project)])
    }

    pub fn projects(&self, response: &ProjectsResponse) -> Result<(), CliError> {
        self.emit(response, || response.projects.iter().map(project_line).collect())
    }

    pub fn collaborators(&self, response: &CollaboratorsResponse) -> Result<(), CliError> {
        self.emit(response, || response.collaborators.clone())
    }

    /// Prints one labelled walkthrough step.
    pub fn step<T: Serialize>(&self, label: &str, value: &T) -> Result<(), CliError> {
        let encoded = serde_json::to_string(value)?;
        if self.json {
            println!("{{\"step\":\"{label}\",\"value\":{encoded}}}");
        } else {
            println!("{label}: {encoded}");
        }
        Ok(())
    }

    fn emit<T: Serialize>(
        &self,
        value: &T,
        lines: impl FnOnce() -> Vec<String>,
    ) -> Result<(), CliError> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            for line in lines() {
                println!("{line}");
            }
        }
        Ok(())
    }
}

fn person_line(person: &Person) -> String {
    format!(
        "{} name={} age={} tickets={:?} project={}",
        person.id, person.name, person.age, person.tickets, person.project
    )
}

fn ticket_line(ticket: &Ticket) -> String {
    format!("{} number={} owner={}", ticket.id, ticket.number, ticket.owner)
}

fn project_line(project: &Project) -> String {
    format!(
        "{} name={} difficulty={} collaborators={}",
        project.id,
        project.name,
        project.difficulty,
        project.collaborators.join(", ")
    )
}
