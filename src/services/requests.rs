//! Request lifecycle service: creation, visibility, field edits and stage
//! transitions with their audit rows.

use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        history::HistoryEntry,
        request::{
            CreateRequest, MaintenanceRequest, RequestDetails, RequestFieldsChange, RequestQuery,
            RequestScope, RequestSummary, StageChange, UpdateRequestFields, UpdateStage,
        },
        user::{Role, UserClaims},
    },
    policy::{Action, ResourceContext},
    repository::Repository,
};

/// Visibility scope for list queries
pub fn scope_for(claims: &UserClaims) -> RequestScope {
    match claims.role {
        Role::Admin | Role::Manager => RequestScope::All,
        Role::Technician => RequestScope::Technician(claims.user_id),
        Role::User => RequestScope::CreatedBy(claims.user_id),
    }
}

fn request_context(request: &MaintenanceRequest) -> ResourceContext {
    ResourceContext::request(request.created_by_user_id, request.assigned_to_user_id)
}

#[derive(Clone)]
pub struct RequestsService {
    repository: Repository,
}

impl RequestsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a request owned by the caller. It always starts in `new` and
    /// gets no history row.
    pub async fn create(
        &self,
        claims: &UserClaims,
        input: CreateRequest,
    ) -> AppResult<RequestDetails> {
        let new = input.into_new(claims.user_id, Utc::now())?;

        if !self.repository.equipment.exists(new.equipment_id).await? {
            return Err(AppError::NotFound(format!("Equipment {} not found", new.equipment_id)));
        }
        self.repository.categories.get_by_id(new.category_id).await?;
        self.repository.teams.get_by_id(new.team_id).await?;

        let id = self.repository.requests.create(&new).await?;
        tracing::info!(request_id = id, created_by = claims.user_id, "maintenance request created");

        self.repository.requests.get_details(id).await
    }

    /// Get a request the caller may see, with its overdue flag reconciled
    pub async fn get(&self, claims: &UserClaims, id: i32) -> AppResult<RequestDetails> {
        let mut details = self.repository.requests.get_details(id).await?;
        self.authorize_view(claims, &details.request).await?;
        self.reconcile_overdue(std::slice::from_mut(&mut details)).await;
        Ok(details)
    }

    /// Get a request together with its audit trail, newest first
    pub async fn get_with_history(
        &self,
        claims: &UserClaims,
        id: i32,
    ) -> AppResult<(RequestDetails, Vec<HistoryEntry>)> {
        let details = self.get(claims, id).await?;
        let history = self.repository.history.list_for_request(id).await?;
        Ok((details, history))
    }

    pub async fn list(
        &self,
        claims: &UserClaims,
        query: &RequestQuery,
    ) -> AppResult<Vec<RequestDetails>> {
        let mut requests = self.repository.requests.list(query, scope_for(claims)).await?;
        self.reconcile_overdue(&mut requests).await;
        Ok(requests)
    }

    /// Requests raised against one piece of equipment, within the caller's scope
    pub async fn list_for_equipment(
        &self,
        claims: &UserClaims,
        equipment_id: i32,
    ) -> AppResult<Vec<RequestDetails>> {
        self.repository.equipment.get_by_id(equipment_id).await?;
        let query = RequestQuery {
            equipment_id: Some(equipment_id),
            ..RequestQuery::default()
        };
        self.list(claims, &query).await
    }

    /// Audit trail of a visible request, newest first
    pub async fn history(&self, claims: &UserClaims, id: i32) -> AppResult<Vec<HistoryEntry>> {
        let request = self.repository.requests.get_by_id(id).await?;
        self.authorize_view(claims, &request).await?;
        self.repository.history.list_for_request(id).await
    }

    /// Edit descriptive fields. Stage, assignee and completion never change here.
    pub async fn update_fields(
        &self,
        claims: &UserClaims,
        id: i32,
        data: UpdateRequestFields,
    ) -> AppResult<RequestDetails> {
        data.validate()?;

        let mut tx = self.repository.begin().await?;
        let request = self.repository.requests.lock(&mut *tx, id).await?;
        claims.authorize(Action::UpdateRequestFields, request_context(&request))?;

        let change = RequestFieldsChange::plan(&request, data, Utc::now())?;
        self.repository.requests.update_fields(&mut *tx, &change).await?;
        tx.commit().await?;

        tracing::info!(request_id = id, changed_by = claims.user_id, "maintenance request updated");
        self.repository.requests.get_details(id).await
    }

    /// Move a request to another stage.
    ///
    /// The new stage, derived fields and the history row are written in one
    /// transaction holding the request row lock.
    pub async fn update_stage(
        &self,
        claims: &UserClaims,
        id: i32,
        body: UpdateStage,
    ) -> AppResult<RequestDetails> {
        let new_stage = body.parse_stage()?;

        let mut tx = self.repository.begin().await?;
        let request = self.repository.requests.lock(&mut *tx, id).await?;
        claims.authorize(Action::UpdateStage, request_context(&request))?;

        let change = StageChange::plan(
            &request,
            new_stage,
            claims.user_id,
            body.notes,
            body.duration_hours,
            Utc::now(),
        )?;
        self.repository
            .requests
            .apply_stage_change(&mut *tx, &change)
            .await?;
        self.repository
            .history
            .append(&mut *tx, &change.history(claims.user_id))
            .await?;
        tx.commit().await?;

        tracing::info!(
            request_id = id,
            actor = claims.user_id,
            old_stage = %change.old_stage,
            new_stage = %change.new_stage,
            auto_assigned = change.auto_assigned(),
            "request stage changed"
        );
        self.repository.requests.get_details(id).await
    }

    pub async fn delete(&self, claims: &UserClaims, id: i32) -> AppResult<()> {
        self.repository.requests.delete(id).await?;
        tracing::info!(request_id = id, deleted_by = claims.user_id, "maintenance request deleted");
        Ok(())
    }

    pub async fn summary(&self) -> AppResult<RequestSummary> {
        self.repository.requests.summary().await
    }

    async fn authorize_view(
        &self,
        claims: &UserClaims,
        request: &MaintenanceRequest,
    ) -> AppResult<()> {
        let mut context = request_context(request);
        if claims.role == Role::Technician && request.assigned_to_user_id != Some(claims.user_id) {
            let in_team = self
                .repository
                .teams
                .is_member(request.team_id, claims.user_id)
                .await?;
            context = context.in_team(in_team);
        }
        claims.authorize(Action::ViewRequest, context)
    }

    /// Recompute overdue flags and persist the ones that drifted. Failures to
    /// persist are logged and otherwise ignored; the returned values are correct
    /// either way.
    async fn reconcile_overdue(&self, requests: &mut [RequestDetails]) {
        let now = Utc::now();
        let (mut now_overdue, mut no_longer_overdue) = (Vec::new(), Vec::new());

        for details in requests.iter_mut() {
            if details.request.reconcile_overdue(now) {
                if details.request.is_overdue {
                    now_overdue.push(details.request.id);
                } else {
                    no_longer_overdue.push(details.request.id);
                }
            }
        }

        for (ids, value) in [(now_overdue, true), (no_longer_overdue, false)] {
            if ids.is_empty() {
                continue;
            }
            match self.repository.requests.set_overdue(&ids, value).await {
                Ok(updated) => {
                    tracing::debug!(?ids, is_overdue = value, updated, "reconciled overdue flags")
                }
                Err(e) => tracing::warn!(?ids, error = %e, "failed to persist overdue flags"),
            }
        }
    }
}
