//! Users API handlers.
//!
//! ```text
//! GET    /users/{id}
//! POST   /users       {"name":"Ann","email":"ann@example.com"}
//! PUT    /users/{id}  {"name":"Ann","email":"ann@example.com"}  If-Match: "1"
//! DELETE /users/{id}
//! ```
//!
//! Every route sits behind [`BasicAuth`]; see [`scope`].

use actix_web::dev::HttpServiceFactory;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::domain::ports::UpdateUserRequest;
use crate::domain::{Error, User, UserDetails, UserId, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::basic_auth::BasicAuth;
use crate::inbound::http::error::json_config;
use crate::inbound::http::preconditions::{etag, if_match};
use crate::inbound::http::state::HttpState;

/// Message returned when `name` or `email` is missing or empty.
pub const MISSING_FIELDS_MESSAGE: &str = "Name and email are required fields.";
/// Message returned when the path id is not an integer.
pub const INVALID_ID_MESSAGE: &str = "User id must be an integer";
/// Message carried by a successful create.
pub const USER_ADDED_MESSAGE: &str = "User Added Successfully";
/// Body of a successful update.
pub const USER_UPDATED_MESSAGE: &str = "User updated successfully";

/// Request body for create and update.
///
/// Both fields are optional at the wire level so that a missing field is
/// reported with [`MISSING_FIELDS_MESSAGE`] rather than a decoding error.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UserPayload {
    #[schema(example = "Ann")]
    pub name: Option<String>,
    #[schema(example = "ann@example.com")]
    pub email: Option<String>,
}

impl TryFrom<UserPayload> for UserDetails {
    type Error = UserValidationError;

    fn try_from(value: UserPayload) -> Result<Self, Self::Error> {
        Self::try_from_parts(value.name.as_deref(), value.email.as_deref())
    }
}

/// Wrapper around the created user's details.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CreatedUser {
    pub user: UserDetails,
}

/// Response body for `POST /users`.
///
/// Example JSON:
/// `{"message":"User Added Successfully","body":{"user":{"name":"Ann","email":"ann@example.com"}}}`
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CreateUserResponse {
    pub message: String,
    pub body: CreatedUser,
}

fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    raw.parse::<UserId>().map_err(|_| {
        Error::invalid_request(INVALID_ID_MESSAGE)
            .with_details(json!({ "field": "id", "value": raw }))
    })
}

fn map_details_error(err: UserValidationError) -> Error {
    let (field, code) = match err {
        UserValidationError::EmptyName => ("name", "empty_name"),
        UserValidationError::EmptyEmail => ("email", "empty_email"),
        UserValidationError::InvalidId => ("id", "invalid_id"),
    };
    Error::invalid_request(MISSING_FIELDS_MESSAGE)
        .with_details(json!({ "field": field, "code": code }))
}

fn location_of(user: &User) -> String {
    format!("/users/{}", user.id())
}

/// Fetch a user by id.
///
/// Responds with a JSON array holding zero or one user. A missing user is
/// `200 []`. A found user also sets `ETag` to its version.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Zero or one user", body = [User],
            headers(("ETag" = String, description = "Current version when a user is returned"))),
        (status = 400, description = "Invalid id", body = Error),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUserById",
    security(("basicAuth" = []))
)]
#[get("/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path)?;
    let users = state.users_query.get_user(id).await?;
    debug!(%id, found = users.len(), "fetched user");

    let mut response = HttpResponse::Ok();
    if let [user] = users.as_slice() {
        response.insert_header(etag(user.version()));
    }
    Ok(response.json(users))
}

/// Create a user.
///
/// The body echoes the submitted details; the new id is only exposed through
/// the `Location` header.
#[utoipa::path(
    post,
    path = "/users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created", body = CreateUserResponse,
            headers(("Location" = String, description = "Path of the new user"))),
        (status = 400, description = "Missing name or email", body = Error),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 409, description = "Email already taken", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser",
    security(("basicAuth" = []))
)]
#[post("")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let details = UserDetails::try_from(payload.into_inner()).map_err(map_details_error)?;
    let user = state.users_command.create_user(details).await?;
    debug!(id = %user.id(), "created user");

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location_of(&user)))
        .json(CreateUserResponse {
            message: USER_ADDED_MESSAGE.to_owned(),
            body: CreatedUser {
                user: user.details(),
            },
        }))
}

/// Replace a user's name and email.
///
/// `If-Match` must carry the user's current version; `*` matches any
/// existing user.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(
        ("id" = i32, Path, description = "User identifier"),
        ("If-Match" = String, Header, description = "Current version token")
    ),
    request_body = UserPayload,
    responses(
        (status = 200, description = "User updated", body = String,
            headers(("ETag" = String, description = "New version"))),
        (status = 400, description = "Invalid id or missing fields", body = Error),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 404, description = "User not found", body = Error),
        (status = 409, description = "Email already taken", body = Error),
        (status = 412, description = "Version mismatch or missing If-Match", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser",
    security(("basicAuth" = []))
)]
#[put("/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    req: HttpRequest,
    path: web::Path<String>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path)?;
    let details = UserDetails::try_from(payload.into_inner()).map_err(map_details_error)?;
    let precondition = if_match(&req);

    let user = state
        .users_command
        .update_user(UpdateUserRequest {
            id,
            precondition,
            details,
        })
        .await?;
    debug!(%id, version = %user.version(), "updated user");

    Ok(HttpResponse::Ok()
        .insert_header(etag(user.version()))
        .json(USER_UPDATED_MESSAGE))
}

/// Delete a user. Succeeds whether or not the user existed.
///
/// The message echoes the id segment exactly as requested.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Deletion message", body = String),
        (status = 400, description = "Invalid id", body = Error),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser",
    security(("basicAuth" = []))
)]
#[delete("/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<String>> {
    let id = parse_user_id(&path)?;
    state.users_command.delete_user(id).await?;
    debug!(%id, "deleted user");
    Ok(web::Json(format!("User {} deleted successfully", path.as_str())))
}

/// The `/users` scope with every handler registered behind `auth`.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::App;
/// use users_api::domain::ports::RejectAllCredentials;
/// use users_api::inbound::http::basic_auth::BasicAuth;
/// use users_api::inbound::http::users;
///
/// let _app = App::new().service(users::scope(BasicAuth::new(
///     Arc::new(RejectAllCredentials),
///     "users",
/// )));
/// ```
pub fn scope(auth: BasicAuth) -> impl HttpServiceFactory + 'static {
    web::scope("/users")
        .app_data(json_config())
        .service(get_user)
        .service(create_user)
        .service(update_user)
        .service(delete_user)
        .wrap(auth)
}
