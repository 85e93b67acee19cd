//! officedb command-line client.
//!
//! # Responsibility
//! - Resolve configuration from the environment and command-line flags.
//! - Drive the gateway for seeding, lookups and the CRUD walkthrough.
//! - Print responses as text lines or JSON.

mod cli;
mod output;
mod seed;

use clap::Parser;
use cli::{Cli, Command, PeopleArgs, ProjectArgs, TicketArgs};
use officedb_core::init_logging;
use officedb_rpc::{
    ByIdRequest, CallContext, CreatePersonRequest, GatewayConfig, GetCollaboratorsRequest,
    GetPeopleByAgeRangeRequest, GetPeopleByTicketNumberRequest, GetPersonByNameRequest,
    GetProjectByCollaboratorRequest, GetTicketByNumberRequest, GetTicketByOwnerRequest,
    OfficeGateway, UpdatePersonRequest,
};
use output::{CliError, Output};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("officedb: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = cli.apply_overrides(GatewayConfig::from_env()?)?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, &log_dir.to_string_lossy())?;
    }

    let gateway = OfficeGateway::open(&config)?;
    let out = Output::new(cli.json);
    let ctx = CallContext::new();

    match cli.command {
        Command::Seed => out.seed_summary(&seed::seed(&gateway, &ctx)?),
        Command::People(args) => people(&gateway, &ctx, &out, args),
        Command::Tickets(args) => tickets(&gateway, &ctx, &out, args),
        Command::Projects(args) => projects(&gateway, &ctx, &out, args),
        Command::Demo => demo(&gateway, &ctx, &out),
    }
}

fn people(
    gateway: &OfficeGateway,
    ctx: &CallContext,
    out: &Output,
    args: PeopleArgs,
) -> Result<(), CliError> {
    if let Some(id) = args.id {
        return out.person(&gateway.get_person_by_id(ctx, ByIdRequest { id })?);
    }
    if let Some(name) = args.name {
        return out.person(&gateway.get_person_by_name(ctx, GetPersonByNameRequest { name })?);
    }
    if let Some(ticket_number) = args.ticket {
        let request = GetPeopleByTicketNumberRequest { ticket_number };
        return out.people(&gateway.get_people_by_ticket_number(ctx, request)?);
    }
    if args.min_age.is_some() || args.max_age.is_some() {
        let request = GetPeopleByAgeRangeRequest {
            min_age: args.min_age,
            max_age: args.max_age,
        };
        return out.people(&gateway.get_people_by_age_range(ctx, request)?);
    }
    out.people(&gateway.get_people(ctx)?)
}

fn tickets(
    gateway: &OfficeGateway,
    ctx: &CallContext,
    out: &Output,
    args: TicketArgs,
) -> Result<(), CliError> {
    if let Some(number) = args.number {
        let request = GetTicketByNumberRequest { number };
        return out.ticket(&gateway.get_ticket_by_number(ctx, request)?);
    }
    if let Some(owner) = args.owner {
        let request = GetTicketByOwnerRequest { owner };
        return out.ticket(&gateway.get_ticket_by_owner(ctx, request)?);
    }
    out.tickets(&gateway.get_tickets(ctx)?)
}

fn projects(
    gateway: &OfficeGateway,
    ctx: &CallContext,
    out: &Output,
    args: ProjectArgs,
) -> Result<(), CliError> {
    if let Some(collaborator) = args.collaborator {
        let request = GetProjectByCollaboratorRequest { collaborator };
        return out.project(&gateway.get_project_by_collaborator(ctx, request)?);
    }
    if let Some(project_name) = args.members_of {
        let request = GetCollaboratorsRequest { project_name };
        return out.collaborators(&gateway.get_collaborators(ctx, request)?);
    }
    out.projects(&gateway.get_projects(ctx)?)
}

/// Create, read back, update, delete and confirm removal of one person.
fn demo(gateway: &OfficeGateway, ctx: &CallContext, out: &Output) -> Result<(), CliError> {
    let created = gateway.create_person(
        ctx,
        CreatePersonRequest {
            name: "Carlos".to_string(),
            age: 29,
            tickets: vec![100, 200],
            project: "Proyecto Nuevo".to_string(),
        },
    )?;
    out.step("created", &created)?;

    let found = gateway.get_person_by_name(
        ctx,
        GetPersonByNameRequest {
            name: "Carlos".to_string(),
        },
    )?;
    out.step("found", &found)?;

    let updated = gateway.update_person(
        ctx,
        UpdatePersonRequest {
            id: created.id.clone(),
            name: "Carlos Actualizado".to_string(),
            age: 30,
            tickets: vec![101, 201],
            project: "Proyecto Actualizado".to_string(),
        },
    )?;
    out.step("updated", &updated)?;

    let renamed = gateway.get_person_by_name(
        ctx,
        GetPersonByNameRequest {
            name: "Carlos Actualizado".to_string(),
        },
    )?;
    out.step("found", &renamed)?;

    let deleted = gateway.delete_person(ctx, ByIdRequest { id: created.id.clone() })?;
    out.step("deleted", &deleted)?;

    match gateway.get_person_by_id(ctx, ByIdRequest { id: created.id }) {
        Ok(unexpected) => Err(CliError::Demo(format!(
            "person {} still present after delete",
            unexpected.person.id
        ))),
        Err(status) => out.step("gone", &status),
    }
}
