use super::OfficeGateway;
use crate::context::CallContext;
use crate::messages::{
    ByIdRequest, CreatePersonRequest, CreatedResponse, GetPeopleByAgeRangeRequest,
    GetPeopleByTicketNumberRequest, GetPersonByNameRequest, PeopleResponse, PersonResponse,
    SuccessResponse, UpdatePersonRequest,
};
use crate::status::Status;
use officedb_core::Person;

impl OfficeGateway {
    pub fn get_people(&self, ctx: &CallContext) -> Result<PeopleResponse, Status> {
        self.call("GetPeople", ctx, |scope| {
            let people = self.service::<Person>(scope).list()?;
            Ok(PeopleResponse { people })
        })
    }

    pub fn get_person_by_id(
        &self,
        ctx: &CallContext,
        request: ByIdRequest,
    ) -> Result<PersonResponse, Status> {
        self.call("GetPersonById", ctx, |scope| {
            let person = self.service::<Person>(scope).get(&request.id)?;
            Ok(PersonResponse { person })
        })
    }

    /// Returns one person with this exact name; arbitrary among duplicates.
    pub fn get_person_by_name(
        &self,
        ctx: &CallContext,
        request: GetPersonByNameRequest,
    ) -> Result<PersonResponse, Status> {
        self.call("GetPersonByName", ctx, |scope| {
            let person = self.service::<Person>(scope).find_by_name(&request.name)?;
            Ok(PersonResponse { person })
        })
    }

    pub fn get_people_by_age_range(
        &self,
        ctx: &CallContext,
        request: GetPeopleByAgeRangeRequest,
    ) -> Result<PeopleResponse, Status> {
        self.call("GetPeopleByAgeRange", ctx, |scope| {
            let people = self
                .service::<Person>(scope)
                .find_by_age_range(request.min_age, request.max_age)?;
            Ok(PeopleResponse { people })
        })
    }

    pub fn get_people_by_ticket_number(
        &self,
        ctx: &CallContext,
        request: GetPeopleByTicketNumberRequest,
    ) -> Result<PeopleResponse, Status> {
        self.call("GetPeopleByTicketNumber", ctx, |scope| {
            let people = self
                .service::<Person>(scope)
                .find_by_ticket(request.ticket_number)?;
            Ok(PeopleResponse { people })
        })
    }

    pub fn create_person(
        &self,
        ctx: &CallContext,
        request: CreatePersonRequest,
    ) -> Result<CreatedResponse, Status> {
        self.call("CreatePerson", ctx, |scope| {
            let id = self
                .service::<Person>(scope)
                .create(&request.into_entity())?;
            Ok(CreatedResponse { id: id.to_hex() })
        })
    }

    /// Overwrites name, age, tickets and project of an existing person.
    pub fn update_person(
        &self,
        ctx: &CallContext,
        request: UpdatePersonRequest,
    ) -> Result<SuccessResponse, Status> {
        self.call("UpdatePerson", ctx, |scope| {
            let (id, person) = request.into_parts();
            let success = self.service::<Person>(scope).update(&id, &person)?;
            Ok(SuccessResponse { success })
        })
    }

    pub fn delete_person(
        &self,
        ctx: &CallContext,
        request: ByIdRequest,
    ) -> Result<SuccessResponse, Status> {
        self.call("DeletePerson", ctx, |scope| {
            let success = self.service::<Person>(scope).delete(&request.id)?;
            Ok(SuccessResponse { success })
        })
    }
}
