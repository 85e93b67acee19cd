//! Demo data set inserted by `officedb seed`.

use officedb_rpc::{
    CallContext, CreatePersonRequest, CreateProjectRequest, CreateTicketRequest, OfficeGateway,
    Status,
};
use serde::Serialize;

const PEOPLE: &[(&str, i32, &[i32], &str)] = &[
    ("Juan Pérez", 30, &[100, 101], "Portal de Clientes"),
    ("María López", 28, &[102], "Portal de Clientes"),
    ("Pedro Gómez", 35, &[103, 104], "Migración de Datos"),
    ("Ana Torres", 22, &[], "Portal de Clientes"),
    ("Luis Fernández", 40, &[105], "Migración de Datos"),
    ("Sofía Ruiz", 25, &[106, 100], "App Móvil"),
    ("Diego Díaz", 33, &[107], "App Móvil"),
    ("Laura Castro", 29, &[108], "Migración de Datos"),
    ("Javier Morales", 27, &[], "App Móvil"),
    ("Paula Salazar", 31, &[109], "Portal de Clientes"),
];

const TICKETS: &[(i32, &str)] = &[
    (100, "Juan Pérez"),
    (101, "Juan Pérez"),
    (102, "María López"),
    (103, "Pedro Gómez"),
    (104, "Pedro Gómez"),
    (105, "Luis Fernández"),
    (106, "Sofía Ruiz"),
    (107, "Diego Díaz"),
    (108, "Laura Castro"),
    (109, "Paula Salazar"),
];

const PROJECTS: &[(&str, &[&str], &str)] = &[
    (
        "Portal de Clientes",
        &["Juan Pérez", "María López", "Ana Torres", "Paula Salazar"],
        "media",
    ),
    (
        "Migración de Datos",
        &["Pedro Gómez", "Luis Fernández", "Laura Castro"],
        "alta",
    ),
    ("App Móvil", &["Sofía Ruiz", "Diego Díaz", "Javier Morales"], "baja"),
];

/// Number of documents inserted per collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub people: usize,
    pub tickets: usize,
    pub projects: usize,
}

/// Inserts the demo data set through `gateway`, stopping at the first failure.
///
/// Seeding twice inserts duplicates; ids and names are not deduplicated.
pub fn seed(gateway: &OfficeGateway, ctx: &CallContext) -> Result<SeedSummary, Status> {
    let mut summary = SeedSummary::default();

    for (name, age, tickets, project) in PEOPLE {
        gateway.create_person(
            ctx,
            CreatePersonRequest {
                name: (*name).to_string(),
                age: *age,
                tickets: tickets.to_vec(),
                project: (*project).to_string(),
            },
        )?;
        summary.people += 1;
    }
    for (number, owner) in TICKETS {
        gateway.create_ticket(
            ctx,
            CreateTicketRequest {
                number: *number,
                owner: (*owner).to_string(),
            },
        )?;
        summary.tickets += 1;
    }
    for (name, collaborators, difficulty) in PROJECTS {
        gateway.create_project(
            ctx,
            CreateProjectRequest {
                name: (*name).to_string(),
                collaborators: collaborators.iter().map(|c| (*c).to_string()).collect(),
                difficulty: (*difficulty).to_string(),
            },
        )?;
        summary.projects += 1;
    }

    log::info!(
        "event=seed module=cli status=ok people={} tickets={} projects={}",
        summary.people,
        summary.tickets,
        summary.projects
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::{seed, PEOPLE, PROJECTS, TICKETS};
    use officedb_core::open_db_in_memory;
    use officedb_rpc::{
        CallContext, GetCollaboratorsRequest, GetPeopleByAgeRangeRequest, OfficeGateway,
    };

    #[test]
    fn seed_inserts_every_collection() {
        let gateway = OfficeGateway::new(open_db_in_memory().unwrap());
        let ctx = CallContext::new();

        let summary = seed(&gateway, &ctx).unwrap();
        assert_eq!(summary.people, PEOPLE.len());
        assert_eq!(summary.tickets, TICKETS.len());
        assert_eq!(summary.projects, PROJECTS.len());

        assert_eq!(gateway.get_people(&ctx).unwrap().people.len(), PEOPLE.len());
        assert_eq!(gateway.get_tickets(&ctx).unwrap().tickets.len(), TICKETS.len());
        assert_eq!(
            gateway.get_projects(&ctx).unwrap().projects.len(),
            PROJECTS.len()
        );
    }

    #[test]
    fn seeded_age_range_matches_fixture() {
        let gateway = OfficeGateway::new(open_db_in_memory().unwrap());
        let ctx = CallContext::new();
        seed(&gateway, &ctx).unwrap();

        let in_range = gateway
            .get_people_by_age_range(
                &ctx,
                GetPeopleByAgeRangeRequest {
                    min_age: Some(25),
                    max_age: Some(40),
                },
            )
            .unwrap()
            .people;
        let expected = PEOPLE
            .iter()
            .filter(|(_, age, _, _)| (25..=40).contains(age))
            .count();
        assert_eq!(in_range.len(), expected);
    }

    #[test]
    fn seeded_projects_list_their_people() {
        let gateway = OfficeGateway::new(open_db_in_memory().unwrap());
        let ctx = CallContext::new();
        seed(&gateway, &ctx).unwrap();

        let members = gateway
            .get_collaborators(
                &ctx,
                GetCollaboratorsRequest {
                    project_name: "App Móvil".to_string(),
                },
            )
            .unwrap()
            .collaborators;
        assert_eq!(members, ["Sofía Ruiz", "Diego Díaz", "Javier Morales"]);
    }
}
