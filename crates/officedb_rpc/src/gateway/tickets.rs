use super::OfficeGateway;
use crate::context::CallContext;
use crate::messages::{
    Ack, ByIdRequest, CreateTicketRequest, CreatedResponse, GetTicketByNumberRequest,
    GetTicketByOwnerRequest, TicketResponse, TicketsResponse, UpdateTicketRequest,
};
use crate::status::Status;
use officedb_core::Ticket;

impl OfficeGateway {
    pub fn get_tickets(&self, ctx: &CallContext) -> Result<TicketsResponse, Status> {
        self.call("GetTickets", ctx, |scope| {
            let tickets = self.service::<Ticket>(scope).list()?;
            Ok(TicketsResponse { tickets })
        })
    }

    pub fn get_ticket_by_id(
        &self,
        ctx: &CallContext,
        request: ByIdRequest,
    ) -> Result<TicketResponse, Status> {
        self.call("GetTicketById", ctx, |scope| {
            let ticket = self.service::<Ticket>(scope).get(&request.id)?;
            Ok(TicketResponse { ticket })
        })
    }

    pub fn get_ticket_by_number(
        &self,
        ctx: &CallContext,
        request: GetTicketByNumberRequest,
    ) -> Result<TicketResponse, Status> {
        self.call("GetTicketByNumber", ctx, |scope| {
            let ticket = self
                .service::<Ticket>(scope)
                .find_by_number(request.number)?;
            Ok(TicketResponse { ticket })
        })
    }

    pub fn get_ticket_by_owner(
        &self,
        ctx: &CallContext,
        request: GetTicketByOwnerRequest,
    ) -> Result<TicketResponse, Status> {
        self.call("GetTicketByOwner", ctx, |scope| {
            let ticket = self.service::<Ticket>(scope).find_by_owner(&request.owner)?;
            Ok(TicketResponse { ticket })
        })
    }

    pub fn create_ticket(
        &self,
        ctx: &CallContext,
        request: CreateTicketRequest,
    ) -> Result<CreatedResponse, Status> {
        self.call("CreateTicket", ctx, |scope| {
            let ticket = Ticket::new(request.number, request.owner);
            let id = self.service::<Ticket>(scope).create(&ticket)?;
            Ok(CreatedResponse { id: id.to_hex() })
        })
    }

    pub fn update_ticket(
        &self,
        ctx: &CallContext,
        request: UpdateTicketRequest,
    ) -> Result<Ack, Status> {
        self.call("UpdateTicket", ctx, |scope| {
            let ticket = Ticket::new(request.number, request.owner);
            self.service::<Ticket>(scope).update(&request.id, &ticket)?;
            Ok(Ack {})
        })
    }

    pub fn delete_ticket(&self, ctx: &CallContext, request: ByIdRequest) -> Result<Ack, Status> {
        self.call("DeleteTicket", ctx, |scope| {
            self.service::<Ticket>(scope).delete(&request.id)?;
            Ok(Ack {})
        })
    }
}
