//! Assignment manager: hands a request to a technician

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{
        request::{AssignRequest, AssignmentChange, RequestDetails},
        user::UserClaims,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AssignmentService {
    repository: Repository,
}

impl AssignmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Assign or reassign a request. A `new` request moves to `in_progress`;
    /// one history row records the change.
    pub async fn assign(
        &self,
        claims: &UserClaims,
        id: i32,
        body: AssignRequest,
    ) -> AppResult<RequestDetails> {
        let assignee_id = body
            .assigned_to_user_id
            .ok_or_else(|| AppError::Validation("Assignee is required".to_string()))?;
        let assignee = self.repository.users.get_by_id(assignee_id).await?;

        let mut tx = self.repository.begin().await?;
        let request = self.repository.requests.lock(&mut *tx, id).await?;

        let change = AssignmentChange::plan(&request, assignee.id, &assignee.name, Utc::now());
        self.repository
            .requests
            .apply_assignment(&mut *tx, &change)
            .await?;
        self.repository
            .history
            .append(&mut *tx, &change.history(claims.user_id))
            .await?;
        tx.commit().await?;

        tracing::info!(
            request_id = id,
            actor = claims.user_id,
            old_assignee = ?change.old_assigned_to,
            new_assignee = assignee.id,
            stage = %change.new_stage,
            "request assigned"
        );
        self.repository.requests.get_details(id).await
    }
}
