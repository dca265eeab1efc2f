//! Audit Service
//!
//! Centralized audit logging for catalog mutations. Failures to write an
//! audit entry are logged but never fail the request.

use std::sync::Arc;
use tracing::error;

use crate::audit::entity::{AuditAction, AuditLog};
use crate::audit::repository::AuditLogRepository;
use crate::auth::authorization_service::AuthContext;
use crate::shared::error::Result;

/// Audit service for recording catalog actions
#[derive(Clone)]
pub struct AuditService {
    repo: Arc<AuditLogRepository>,
}

impl AuditService {
    pub fn new(repo: Arc<AuditLogRepository>) -> Self {
        Self { repo }
    }

    /// Log a create action
    pub async fn log_create(
        &self,
        auth: &AuthContext,
        entity_type: &str,
        entity_id: &str,
        operation: impl Into<String>,
    ) -> Result<()> {
        let log = AuditLog::new(
            entity_type,
            Some(entity_id.to_string()),
            AuditAction::Create,
            operation,
            Some(auth.user_id.clone()),
        );
        self.insert(log).await
    }

    /// Log an update action
    pub async fn log_update(
        &self,
        auth: &AuthContext,
        entity_type: &str,
        entity_id: &str,
        operation: impl Into<String>,
    ) -> Result<()> {
        let log = AuditLog::new(
            entity_type,
            Some(entity_id.to_string()),
            AuditAction::Update,
            operation,
            Some(auth.user_id.clone()),
        );
        self.insert(log).await
    }

    /// Log a delete action
    pub async fn log_delete(
        &self,
        auth: &AuthContext,
        entity_type: &str,
        entity_id: &str,
        operation: impl Into<String>,
    ) -> Result<()> {
        let log = AuditLog::new(
            entity_type,
            Some(entity_id.to_string()),
            AuditAction::Delete,
            operation,
            Some(auth.user_id.clone()),
        );
        self.insert(log).await
    }

    async fn insert(&self, log: AuditLog) -> Result<()> {
        if let Err(e) = self.repo.insert(&log).await {
            error!(
                entity_type = %log.entity_type,
                "Failed to write audit log: {}", e
            );
        }
        Ok(())
    }
}
