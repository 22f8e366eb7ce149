//! Role policy: which role may perform which action.
//!
//! Pure and side-effect free. Every handler consults it before delegating to a
//! service, first at role level (`require_role`) and, once the target resource
//! is loaded, with ownership (`authorize`).

use crate::{error::AppError, error::AppResult, models::user::Role};

/// Everything the API lets a caller attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ViewDashboard,
    ManageDepartments,
    ManageCategories,
    ManageTeams,
    ManageEquipment,
    CreateRequest,
    ViewRequest,
    UpdateRequestFields,
    UpdateStage,
    AssignRequest,
    DeleteRequest,
    DeleteTeam,
    DeleteEquipment,
    ListUsers,
    ViewUser,
    ChangeUserRole,
    DeleteUser,
}

/// Ownership facts about the target resource, from the actor's point of view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceContext {
    pub actor_id: i32,
    /// Creator of a request, or the user record itself
    pub owner_id: Option<i32>,
    pub assignee_id: Option<i32>,
    /// Actor belongs to the maintenance team owning the resource
    pub actor_in_team: bool,
}

impl ResourceContext {
    pub fn owned_by(owner_id: i32) -> Self {
        Self {
            owner_id: Some(owner_id),
            ..Self::default()
        }
    }

    pub fn request(creator_id: i32, assignee_id: Option<i32>) -> Self {
        Self {
            owner_id: Some(creator_id),
            assignee_id,
            ..Self::default()
        }
    }

    pub fn in_team(mut self, actor_in_team: bool) -> Self {
        self.actor_in_team = actor_in_team;
        self
    }

    pub fn with_actor(mut self, actor_id: i32) -> Self {
        self.actor_id = actor_id;
        self
    }

    fn is_owner(&self) -> bool {
        self.owner_id == Some(self.actor_id)
    }

    fn is_assignee(&self) -> bool {
        self.assignee_id == Some(self.actor_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grant {
    Always,
    IfOwner,
    IfAssignee,
    IfAssigneeOrTeam,
    Never,
}

fn grant(role: Role, action: Action) -> Grant {
    use Action::*;
    use Grant::*;

    match (role, action) {
        (Role::Admin, _) => Always,

        (Role::Manager, ManageDepartments | ChangeUserRole | DeleteUser) => Never,
        (Role::Manager, _) => Always,

        (Role::Technician, UpdateStage) => IfAssignee,
        (Role::Technician, ViewRequest) => IfAssigneeOrTeam,
        (Role::Technician, ViewUser) => IfOwner,
        (Role::Technician, _) => Never,

        (Role::User, CreateRequest) => Always,
        (Role::User, UpdateRequestFields | ViewRequest | ViewUser) => IfOwner,
        (Role::User, _) => Never,
    }
}

/// Decide whether `role` may perform `action`.
///
/// Ownership-dependent grants need a `context`; without one they are denied.
pub fn can_perform(role: Role, action: Action, context: Option<&ResourceContext>) -> bool {
    match (grant(role, action), context) {
        (Grant::Always, _) => true,
        (Grant::Never, _) | (_, None) => false,
        (Grant::IfOwner, Some(ctx)) => ctx.is_owner(),
        (Grant::IfAssignee, Some(ctx)) => ctx.is_assignee(),
        (Grant::IfAssigneeOrTeam, Some(ctx)) => ctx.is_assignee() || ctx.actor_in_team,
    }
}

/// Roles that could ever be granted `action`
pub fn roles_for(action: Action) -> Vec<Role> {
    Role::ALL
        .iter()
        .copied()
        .filter(|role| grant(*role, action) != Grant::Never)
        .collect()
}

fn forbidden_for_role(role: Role, action: Action) -> AppError {
    let required: Vec<&str> = roles_for(action).iter().map(Role::as_str).collect();
    AppError::Authorization(format!(
        "Access denied. Required role(s): {}. Your role: {}",
        required.join(", "),
        role
    ))
}

/// Role-level gate, evaluated before any resource is loaded
pub fn require_role(role: Role, action: Action) -> AppResult<()> {
    if grant(role, action) == Grant::Never {
        return Err(forbidden_for_role(role, action));
    }
    Ok(())
}

/// Full gate against a loaded resource
pub fn authorize(role: Role, action: Action, context: &ResourceContext) -> AppResult<()> {
    if can_perform(role, action, Some(context)) {
        return Ok(());
    }

    let reason = match grant(role, action) {
        Grant::Never | Grant::Always => return Err(forbidden_for_role(role, action)),
        Grant::IfAssignee => "Technicians can only update requests assigned to them",
        Grant::IfAssigneeOrTeam => "You can only view requests assigned to you or your team",
        Grant::IfOwner if action == Action::ViewUser => "You can only view your own account",
        Grant::IfOwner if action == Action::ViewRequest => "You can only view requests you created",
        Grant::IfOwner => "You can only edit requests you created",
    };
    Err(AppError::Authorization(format!(
        "Access denied. {}. Your role: {}",
        reason, role
    )))
}
