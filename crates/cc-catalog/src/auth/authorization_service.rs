//! Authorization Service
//!
//! Permission-based access control with group resolution.

use std::collections::HashSet;
use std::sync::Arc;
use crate::permissions;
use crate::GroupRepository;
use crate::shared::error::{CatalogError, Result};
use crate::AccessTokenClaims;

/// Authorization context for a request
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User ID
    pub user_id: String,

    /// Email
    pub email: Option<String>,

    /// Display name
    pub name: String,

    /// Home partner ID
    pub partner_id: Option<String>,

    /// Partner IDs this user can access ("*" grants all)
    pub accessible_partners: Vec<String>,

    /// Group codes
    pub groups: Vec<String>,

    /// All permissions (resolved from groups)
    pub permissions: HashSet<String>,
}

impl AuthContext {
    /// Create from JWT claims with resolved permissions
    pub fn from_claims_with_permissions(
        claims: &AccessTokenClaims,
        permissions: HashSet<String>,
    ) -> Self {
        Self {
            user_id: claims.sub.clone(),
            email: claims.email.clone(),
            name: claims.name.clone(),
            partner_id: claims.partner_id.clone(),
            accessible_partners: claims.partners.clone(),
            groups: claims.groups.clone(),
            permissions,
        }
    }

    /// Check if this context can access a specific partner
    pub fn can_access_partner(&self, partner_id: &str) -> bool {
        self.accessible_partners.contains(&"*".to_string()) ||
            self.accessible_partners.contains(&partner_id.to_string())
    }

    /// Check if this context has a specific permission
    pub fn has_permission(&self, permission: &str) -> bool {
        // Direct match
        if self.permissions.contains(permission) {
            return true;
        }

        // Wildcard matching
        let parts: Vec<&str> = permission.split(':').collect();
        if parts.len() >= 2 {
            // Check resource:* wildcard
            let wildcard = format!("{}:*", parts[0]);
            if self.permissions.contains(&wildcard) {
                return true;
            }

            // Check superuser *:*
            if self.permissions.contains(permissions::ADMIN_ALL) {
                return true;
            }
        }

        false
    }

    /// Check if this context has all specified permissions
    pub fn has_all_permissions(&self, required: &[&str]) -> bool {
        required.iter().all(|p| self.has_permission(p))
    }

    /// Check if this context has any of the specified permissions
    pub fn has_any_permission(&self, required: &[&str]) -> bool {
        required.iter().any(|p| self.has_permission(p))
    }

    /// Check if this context belongs to a specific group
    pub fn in_group(&self, group: &str) -> bool {
        self.groups.contains(&group.to_string())
    }
}

/// Authorization service for checking permissions
pub struct AuthorizationService {
    group_repo: Arc<GroupRepository>,
}

impl AuthorizationService {
    pub fn new(group_repo: Arc<GroupRepository>) -> Self {
        Self { group_repo }
    }

    /// Build an authorization context from JWT claims.
    /// Resolves all permissions from group membership.
    pub async fn build_context(&self, claims: &AccessTokenClaims) -> Result<AuthContext> {
        let permissions = self.resolve_permissions(&claims.groups).await?;
        Ok(AuthContext::from_claims_with_permissions(claims, permissions))
    }

    /// Resolve all permissions for a set of group codes
    async fn resolve_permissions(&self, group_codes: &[String]) -> Result<HashSet<String>> {
        if group_codes.is_empty() {
            return Ok(HashSet::new());
        }

        let groups = self.group_repo.find_by_codes(group_codes).await?;
        let mut permissions = HashSet::new();

        for group in groups {
            permissions.extend(group.permissions);
        }

        Ok(permissions)
    }

    /// Require a specific permission
    pub fn require_permission(&self, context: &AuthContext, permission: &str) -> Result<()> {
        if !context.has_permission(permission) {
            return Err(CatalogError::forbidden(format!(
                "Permission required: {}",
                permission
            )));
        }
        Ok(())
    }

    /// Require partner access
    pub fn require_partner_access(&self, context: &AuthContext, partner_id: &str) -> Result<()> {
        if !context.can_access_partner(partner_id) {
            return Err(CatalogError::forbidden(format!(
                "Partner access required: {}",
                partner_id
            )));
        }
        Ok(())
    }
}

/// Common authorization checks
pub mod checks {
    use super::*;

    /// Check create access to people
    pub fn can_add_people(context: &AuthContext) -> Result<()> {
        if context.has_permission(permissions::people::ADD) {
            Ok(())
        } else {
            Err(CatalogError::forbidden("Cannot add people"))
        }
    }

    /// Check update access to people
    pub fn can_change_people(context: &AuthContext) -> Result<()> {
        if context.has_permission(permissions::people::CHANGE) {
            Ok(())
        } else {
            Err(CatalogError::forbidden("Cannot change people"))
        }
    }

    /// Check delete access to people
    pub fn can_delete_people(context: &AuthContext) -> Result<()> {
        if context.has_permission(permissions::people::DELETE) {
            Ok(())
        } else {
            Err(CatalogError::forbidden("Cannot delete people"))
        }
    }

    /// Check write access to people (any mutation)
    pub fn can_write_people(context: &AuthContext) -> Result<()> {
        if context.has_any_permission(&[
            permissions::people::ADD,
            permissions::people::CHANGE,
            permissions::people::DELETE,
        ]) {
            Ok(())
        } else {
            Err(CatalogError::forbidden("Cannot write people"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_context(permissions: Vec<&str>, partners: Vec<&str>) -> AuthContext {
        AuthContext {
            user_id: "user-1".to_string(),
            email: Some("test@example.com".to_string()),
            name: "Test User".to_string(),
            partner_id: partners.first().map(|p| p.to_string()),
            accessible_partners: partners.into_iter().map(String::from).collect(),
            groups: vec!["internal-test".to_string()],
            permissions: permissions.into_iter().map(String::from).collect(),
        }
    }

    #[test]
    fn test_direct_permission() {
        let ctx = create_test_context(vec!["people:add"], vec!["partner1"]);
        assert!(ctx.has_permission("people:add"));
        assert!(!ctx.has_permission("people:change"));
    }

    #[test]
    fn test_wildcard_permission() {
        let ctx = create_test_context(vec!["people:*"], vec!["partner1"]);
        assert!(ctx.has_permission("people:add"));
        assert!(ctx.has_permission("people:delete"));
        assert!(!ctx.has_permission("courses:add"));
    }

    #[test]
    fn test_superuser_permission() {
        let ctx = create_test_context(vec!["*:*"], vec!["*"]);
        assert!(ctx.has_permission("people:add"));
        assert!(ctx.has_permission("anything:everything"));
    }

    #[test]
    fn test_partner_access() {
        let ctx = create_test_context(vec![], vec!["partner1", "partner2"]);
        assert!(ctx.can_access_partner("partner1"));
        assert!(ctx.can_access_partner("partner2"));
        assert!(!ctx.can_access_partner("partner3"));
    }

    #[test]
    fn test_wildcard_partner_access() {
        let ctx = create_test_context(vec![], vec!["*"]);
        assert!(ctx.can_access_partner("any_partner"));
    }

    #[test]
    fn test_checks_require_specific_permissions() {
        let ctx = create_test_context(vec!["people:add"], vec!["partner1"]);
        assert!(checks::can_add_people(&ctx).is_ok());
        assert!(checks::can_change_people(&ctx).is_err());
        assert!(checks::can_write_people(&ctx).is_ok());

        let no_perms = create_test_context(vec![], vec!["partner1"]);
        assert!(checks::can_write_people(&no_perms).is_err());
    }

    #[test]
    fn test_in_group() {
        let ctx = create_test_context(vec![], vec!["partner1"]);
        assert!(ctx.in_group("internal-test"));
        assert!(!ctx.in_group("other-group"));
    }
}
