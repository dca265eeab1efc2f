//! People API
//!
//! REST endpoints for the person resource. Reads require authentication;
//! mutations additionally require the matching people permission.

use axum::{
    extract::{State, Path, Query},
    http::StatusCode,
    Json,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa::ToSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::audit::service::AuditService;
use crate::checks;
use crate::organization::repository::{OrganizationLookup, OrganizationRepository};
use crate::partner::repository::PartnerRepository;
use crate::person::entity::{NetworkType, Person};
use crate::person::operations::create::email_pattern;
use crate::person::operations::{CreatePerson, CreatePersonCommand, PositionPayload, UrlsPayload};
use crate::person::repository::PersonRepository;
use crate::shared::api_common::{PaginationParams, ResultsPage};
use crate::shared::error::CatalogError;
use crate::shared::middleware::Authenticated;

/// Update person request (partial)
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePersonRequest {
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,

    /// Replaces the current position
    pub position: Option<PositionPayload>,

    /// Replaces the works list wholesale
    pub works: Option<Vec<String>>,

    /// Syncs networks by type: present types are upserted, absent types deleted
    pub urls: Option<UrlsPayload>,
}

/// Position response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct PositionResponse {
    pub title: String,
    pub organization: String,
}

/// Network URLs response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct UrlsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog: Option<String>,
}

/// Person response DTO - the canonical serialization
#[derive(Debug, Serialize, ToSchema)]
pub struct PersonResponse {
    pub uuid: String,
    pub slug: String,
    pub given_name: String,
    pub family_name: String,
    pub email: Option<String>,
    pub bio: String,
    pub position: Option<PositionResponse>,
    pub works: Vec<String>,
    pub urls: UrlsResponse,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Person> for PersonResponse {
    fn from(p: Person) -> Self {
        let urls = UrlsResponse {
            facebook: p.network(NetworkType::Facebook).map(String::from),
            twitter: p.network(NetworkType::Twitter).map(String::from),
            blog: p.network(NetworkType::Blog).map(String::from),
        };

        Self {
            uuid: p.uuid,
            slug: p.slug,
            given_name: p.given_name,
            family_name: p.family_name,
            email: p.email,
            bio: p.bio,
            position: p.position.map(|pos| PositionResponse {
                title: pos.title,
                organization: pos.organization_id,
            }),
            works: p.works,
            urls,
            created_at: p.created_at.to_rfc3339(),
            updated_at: p.updated_at.to_rfc3339(),
        }
    }
}

/// Query parameters for the people list
#[derive(Debug, Deserialize, Default, ToSchema)]
pub struct PeopleQuery {
    #[serde(flatten)]
    pub pagination: PaginationParams,

    /// Exact-match slug filter
    pub slug: Option<String>,
}

/// People service state
#[derive(Clone)]
pub struct PeopleState {
    pub person_repo: Arc<PersonRepository>,
    pub organization_repo: Arc<OrganizationRepository>,
    pub partner_repo: Arc<PartnerRepository>,
    pub create_person: Arc<CreatePerson>,
    pub audit_service: Option<Arc<AuditService>>,
}

/// Create a new person
#[utoipa::path(
    post,
    path = "",
    tag = "people",
    operation_id = "postApiPeople",
    request_body = CreatePersonCommand,
    responses(
        (status = 201, description = "Person created", body = PersonResponse),
        (status = 400, description = "Validation, feature-flag, or marketing site failure"),
        (status = 403, description = "Missing authentication or permission")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_person(
    State(state): State<PeopleState>,
    auth: Authenticated,
    Json(command): Json<CreatePersonCommand>,
) -> Result<(StatusCode, Json<PersonResponse>), CatalogError> {
    checks::can_add_people(&auth.0)?;

    let partner_id = auth.0.partner_id.clone()
        .ok_or_else(|| CatalogError::validation("Authenticated user has no partner"))?;
    let partner = state.partner_repo.find_by_id(&partner_id).await?
        .ok_or_else(|| CatalogError::PartnerNotFound { id: partner_id })?;

    let person = state.create_person.execute(command, &partner).await?;

    if let Some(ref audit) = state.audit_service {
        let _ = audit.log_create(
            &auth.0,
            "Person",
            &person.uuid,
            format!("Created person {}", person.full_name()),
        ).await;
    }

    Ok((StatusCode::CREATED, Json(person.into())))
}

/// Get a person by UUID
#[utoipa::path(
    get,
    path = "/{uuid}",
    tag = "people",
    operation_id = "getApiPeopleByUuid",
    params(
        ("uuid" = String, Path, description = "Person UUID")
    ),
    responses(
        (status = 200, description = "Person found", body = PersonResponse),
        (status = 403, description = "Missing authentication"),
        (status = 404, description = "Person not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_person(
    State(state): State<PeopleState>,
    _auth: Authenticated,
    Path(uuid): Path<String>,
) -> Result<Json<PersonResponse>, CatalogError> {
    let person = state.person_repo.find_by_uuid(&uuid).await?
        .ok_or_else(|| CatalogError::not_found("Person", &uuid))?;

    Ok(Json(person.into()))
}

/// List people
#[utoipa::path(
    get,
    path = "",
    tag = "people",
    operation_id = "getApiPeople",
    params(
        ("page" = Option<u32>, Query, description = "Page number"),
        ("size" = Option<u32>, Query, description = "Items per page"),
        ("slug" = Option<String>, Query, description = "Exact-match slug filter")
    ),
    responses(
        (status = 200, description = "List of people", body = ResultsPage<PersonResponse>),
        (status = 403, description = "Missing authentication")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_people(
    State(state): State<PeopleState>,
    _auth: Authenticated,
    Query(query): Query<PeopleQuery>,
) -> Result<Json<ResultsPage<PersonResponse>>, CatalogError> {
    let (people, count) = if let Some(ref slug) = query.slug {
        let matches = state.person_repo.find_by_slug(slug).await?;
        let count = matches.len() as u64;
        (matches, count)
    } else {
        let page = state.person_repo
            .find_page(query.pagination.offset(), query.pagination.limit())
            .await?;
        let count = state.person_repo.count().await?;
        (page, count)
    };

    let results: Vec<PersonResponse> = people.into_iter().map(Into::into).collect();
    Ok(Json(ResultsPage::new(results, count)))
}

/// Partially update a person
#[utoipa::path(
    patch,
    path = "/{uuid}",
    tag = "people",
    operation_id = "patchApiPeopleByUuid",
    params(
        ("uuid" = String, Path, description = "Person UUID")
    ),
    request_body = UpdatePersonRequest,
    responses(
        (status = 200, description = "Person updated", body = PersonResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Missing authentication or permission"),
        (status = 404, description = "Person not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_person(
    State(state): State<PeopleState>,
    auth: Authenticated,
    Path(uuid): Path<String>,
    Json(req): Json<UpdatePersonRequest>,
) -> Result<Json<PersonResponse>, CatalogError> {
    checks::can_change_people(&auth.0)?;

    let mut person = state.person_repo.find_by_uuid(&uuid).await?
        .ok_or_else(|| CatalogError::not_found("Person", &uuid))?;

    if let Some(given) = req.given_name {
        let given = given.trim().to_string();
        if given.is_empty() {
            return Err(CatalogError::validation("given_name must not be blank"));
        }
        person.given_name = given;
    }
    if let Some(family) = req.family_name {
        let family = family.trim().to_string();
        if family.is_empty() {
            return Err(CatalogError::validation("family_name must not be blank"));
        }
        person.family_name = family;
    }
    if let Some(email) = req.email {
        if !email_pattern().is_match(&email) {
            return Err(CatalogError::validation(format!("Invalid email address: {}", email)));
        }
        person.email = Some(email);
    }
    if let Some(bio) = req.bio {
        person.bio = bio;
    }

    if let Some(position) = req.position {
        if position.title.trim().is_empty() {
            return Err(CatalogError::validation("position.title is required"));
        }
        if !state.organization_repo.exists(&position.organization).await? {
            return Err(CatalogError::OrganizationNotFound { id: position.organization });
        }
        person.set_position(position.title.trim(), position.organization);
    }

    if let Some(works) = req.works {
        person.set_works(works);
    }

    if let Some(urls) = req.urls {
        person.sync_networks(&urls.entries());
    }

    person.updated_at = chrono::Utc::now();
    state.person_repo.update(&person).await?;

    if let Some(ref audit) = state.audit_service {
        let _ = audit.log_update(
            &auth.0,
            "Person",
            &person.uuid,
            format!("Updated person {}", person.full_name()),
        ).await;
    }

    Ok(Json(person.into()))
}

/// Create the people router
pub fn people_router(state: PeopleState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(create_person, list_people))
        .routes(routes!(get_person, update_person))
        .with_state(state)
}
