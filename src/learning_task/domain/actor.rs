//! Calling actor as supplied by the identity and role oracle.
//!
//! The oracle is external; the engine trusts the [`Actor`] it is handed and
//! resolves it once per operation into a [`TaskAccess`] capability for the
//! target task.

use super::{AuthorizationError, LearningTask, TaskId, TaskOperation, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role held by an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Moderator allowed to rate, redo, and remove any task or review.
    Admin,
    /// Regular authenticated user.
    Member,
}

impl Role {
    /// Returns the canonical role name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated user together with the role they hold right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthenticatedActor {
    id: UserId,
    role: Role,
}

impl AuthenticatedActor {
    /// Creates an authenticated actor.
    #[must_use]
    pub const fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns `true` for admins.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

impl fmt::Display for AuthenticatedActor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.role)
    }
}

/// Caller of an engine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Actor {
    /// No authenticated session.
    Anonymous,
    /// Authenticated user.
    Authenticated(AuthenticatedActor),
}

impl Actor {
    /// Creates an authenticated admin.
    #[must_use]
    pub const fn admin(id: UserId) -> Self {
        Self::Authenticated(AuthenticatedActor::new(id, Role::Admin))
    }

    /// Creates an authenticated member.
    #[must_use]
    pub const fn member(id: UserId) -> Self {
        Self::Authenticated(AuthenticatedActor::new(id, Role::Member))
    }

    /// Returns the authenticated identity, or rejects anonymous callers.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorizationError::Unauthenticated`] for
    /// [`Actor::Anonymous`].
    pub const fn authenticated(
        &self,
        operation: TaskOperation,
    ) -> Result<AuthenticatedActor, AuthorizationError> {
        match self {
            Self::Authenticated(actor) => Ok(*actor),
            Self::Anonymous => Err(AuthorizationError::Unauthenticated { operation }),
        }
    }

    /// Resolves the actor's capabilities over `task`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorizationError::Unauthenticated`] for anonymous callers.
    pub fn access(
        &self,
        task: &LearningTask,
        operation: TaskOperation,
    ) -> Result<TaskAccess, AuthorizationError> {
        self.authenticated(operation)
            .map(|actor| TaskAccess::resolve(actor, task))
    }
}

/// Relation between an actor and one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ownership {
    /// The actor created the task.
    Owner,
    /// The actor did not create the task.
    Other,
}

/// Capabilities an authenticated actor holds over a single task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskAccess {
    actor: AuthenticatedActor,
    task_id: TaskId,
    ownership: Ownership,
    task_is_public: bool,
}

impl TaskAccess {
    /// Resolves capabilities of `actor` over `task`.
    #[must_use]
    pub fn resolve(actor: AuthenticatedActor, task: &LearningTask) -> Self {
        let ownership = if task.owner() == actor.id() {
            Ownership::Owner
        } else {
            Ownership::Other
        };
        Self {
            actor,
            task_id: task.id(),
            ownership,
            task_is_public: task.content().is_public(),
        }
    }

    /// Returns the resolved actor.
    #[must_use]
    pub const fn actor(&self) -> AuthenticatedActor {
        self.actor
    }

    /// Returns the actor's relation to the task.
    #[must_use]
    pub const fn ownership(&self) -> Ownership {
        self.ownership
    }

    /// Returns `true` when the actor owns the task.
    #[must_use]
    pub const fn is_owner(&self) -> bool {
        matches!(self.ownership, Ownership::Owner)
    }

    /// Returns `true` when the actor is an admin.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.actor.is_admin()
    }

    /// Private tasks are visible only to their owner and to admins.
    #[must_use]
    pub const fn can_view(&self) -> bool {
        self.task_is_public || self.is_owner() || self.is_admin()
    }

    /// Requires task ownership.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorizationError::NotOwner`] otherwise.
    pub const fn require_owner(&self, operation: TaskOperation) -> Result<(), AuthorizationError> {
        if self.is_owner() {
            Ok(())
        } else {
            Err(AuthorizationError::NotOwner {
                task_id: self.task_id,
                operation,
            })
        }
    }

    /// Requires the admin role.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorizationError::AdminRequired`] otherwise.
    pub const fn require_admin(&self, operation: TaskOperation) -> Result<(), AuthorizationError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AuthorizationError::AdminRequired { operation })
        }
    }

    /// Requires that the actor is eligible to review the task.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorizationError::SelfReview`] for the owner.
    pub const fn require_reviewer(&self) -> Result<(), AuthorizationError> {
        if self.is_owner() {
            Err(AuthorizationError::SelfReview(self.task_id))
        } else {
            Ok(())
        }
    }

    /// Requires authorship of a review, or the admin role.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorizationError::NotReviewAuthor`] otherwise.
    pub fn require_review_author_or_admin(
        &self,
        reviewer: UserId,
    ) -> Result<(), AuthorizationError> {
        if self.actor.id() == reviewer || self.is_admin() {
            Ok(())
        } else {
            Err(AuthorizationError::NotReviewAuthor {
                task_id: self.task_id,
                reviewer,
            })
        }
    }
}
