use super::OfficeGateway;
use crate::context::CallContext;
use crate::messages::{
    Ack, ByIdRequest, CollaboratorsResponse, CreateProjectRequest, CreatedResponse,
    GetCollaboratorsRequest, GetProjectByCollaboratorRequest, ProjectResponse, ProjectsResponse,
    UpdateProjectRequest,
};
use crate::status::Status;
use officedb_core::Project;

impl OfficeGateway {
    pub fn get_projects(&self, ctx: &CallContext) -> Result<ProjectsResponse, Status> {
        self.call("GetProjects", ctx, |scope| {
            let projects = self.service::<Project>(scope).list()?;
            Ok(ProjectsResponse { projects })
        })
    }

    pub fn get_project_by_id(
        &self,
        ctx: &CallContext,
        request: ByIdRequest,
    ) -> Result<ProjectResponse, Status> {
        self.call("GetProjectById", ctx, |scope| {
            let project = self.service::<Project>(scope).get(&request.id)?;
            Ok(ProjectResponse { project })
        })
    }

    pub fn get_project_by_collaborator(
        &self,
        ctx: &CallContext,
        request: GetProjectByCollaboratorRequest,
    ) -> Result<ProjectResponse, Status> {
        self.call("GetProjectByCollaborator", ctx, |scope| {
            let project = self
                .service::<Project>(scope)
                .find_by_collaborator(&request.collaborator)?;
            Ok(ProjectResponse { project })
        })
    }

    /// Lists collaborator names of the project called `project_name`.
    pub fn get_collaborators(
        &self,
        ctx: &CallContext,
        request: GetCollaboratorsRequest,
    ) -> Result<CollaboratorsResponse, Status> {
        self.call("GetCollaborators", ctx, |scope| {
            let collaborators = self
                .service::<Project>(scope)
                .collaborators_of(&request.project_name)?;
            Ok(CollaboratorsResponse { collaborators })
        })
    }

    pub fn create_project(
        &self,
        ctx: &CallContext,
        request: CreateProjectRequest,
    ) -> Result<CreatedResponse, Status> {
        self.call("CreateProject", ctx, |scope| {
            let project = Project::new(request.name, request.collaborators, request.difficulty);
            let id = self.service::<Project>(scope).create(&project)?;
            Ok(CreatedResponse { id: id.to_hex() })
        })
    }

    pub fn update_project(
        &self,
        ctx: &CallContext,
        request: UpdateProjectRequest,
    ) -> Result<Ack, Status> {
        self.call("UpdateProject", ctx, |scope| {
            let project = Project::new(request.name, request.collaborators, request.difficulty);
            self.service::<Project>(scope).update(&request.id, &project)?;
            Ok(Ack {})
        })
    }

    pub fn delete_project(&self, ctx: &CallContext, request: ByIdRequest) -> Result<Ack, Status> {
        self.call("DeleteProject", ctx, |scope| {
            self.service::<Project>(scope).delete(&request.id)?;
            Ok(Ack {})
        })
    }
}
