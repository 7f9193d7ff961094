use actix_web::{error::InternalError, web, HttpResponse};
use crate::api::metrics;
use crate::database::UserStore;
use crate::models::{NewUser, RequestedUserResponse, User};
use crate::services::user_service;
use crate::utils::error::{AppError, ErrorStatusPolicy, MessageResponse};

const CREATE_FAILED_MESSAGE: &str = "Failed to create the user.";
const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred!";

/// Registers `/api/users` routes and the JSON body error handler.
pub fn routes(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        log::warn!("⚠️ Rejected user payload: {}", err);
        let response = HttpResponse::BadRequest().json(MessageResponse::new(format!("Invalid user payload: {}", err)));
        InternalError::from_response(err, response).into()
    });

    cfg.service(
        web::scope("/api/users")
            .app_data(json_config)
            .route("", web::post().to(create_user))
            .route("", web::get().to(list_users))
            .route("/{id}", web::get().to(get_user)),
    );
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = NewUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Body is not a JSON object or Content-Type is not application/json", body = MessageResponse),
        (status = 401, description = "Storage write failed (legacy status policy)", body = MessageResponse),
        (status = 500, description = "Storage read or write failed", body = MessageResponse)
    )
)]
pub async fn create_user(
    store: web::Data<dyn UserStore>,
    policy: web::Data<ErrorStatusPolicy>,
    request: web::Json<NewUser>,
) -> HttpResponse {
    log::info!("📝 POST /api/users");

    match user_service::create_user(store.get_ref(), request.into_inner()).await {
        Ok(user) => {
            metrics::increment_users_created();
            log::info!("✅ User {} created", user.id);
            HttpResponse::Created().json(user)
        }
        Err(e) => {
            log::error!("❌ Error creating user: {}", e);
            HttpResponse::build(policy.status_for(&e)).json(MessageResponse::new(CREATE_FAILED_MESSAGE))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "All stored entries in order; entries without an integer id are returned as stored", body = Vec<User>),
        (status = 500, description = "Storage read failed", body = MessageResponse)
    )
)]
pub async fn list_users(store: web::Data<dyn UserStore>) -> HttpResponse {
    log::info!("📋 GET /api/users");

    match user_service::list_users(store.get_ref()).await {
        Ok(users) => {
            log::info!("✅ Listed {} users", users.len());
            HttpResponse::Ok().json(users)
        }
        Err(e) => {
            log::error!("❌ Error listing users: {}", e);
            HttpResponse::InternalServerError().json(MessageResponse::new(UNKNOWN_ERROR_MESSAGE))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User id; non-numeric values match nothing")
    ),
    responses(
        (status = 200, description = "User found", body = RequestedUserResponse),
        (status = 404, description = "No user with this id", body = MessageResponse),
        (status = 500, description = "Storage read failed", body = MessageResponse)
    )
)]
pub async fn get_user(
    store: web::Data<dyn UserStore>,
    policy: web::Data<ErrorStatusPolicy>,
    id: web::Path<String>,
) -> HttpResponse {
    let raw_id = id.into_inner();
    log::info!("🔎 GET /api/users/{}", raw_id);

    match user_service::find_user(store.get_ref(), &raw_id).await {
        Ok(user) => HttpResponse::Ok().json(RequestedUserResponse { requested_user: user }),
        Err(AppError::NotFound(requested)) => {
            log::info!("ℹ️  User {:?} not found", requested);
            HttpResponse::NotFound().json(MessageResponse::new(format!(
                "Requested user \"{}\" does not exist.",
                requested
            )))
        }
        Err(e) => {
            log::error!("❌ Error fetching user {}: {}", raw_id, e);
            HttpResponse::build(policy.status_for(&e)).json(MessageResponse::new(UNKNOWN_ERROR_MESSAGE))
        }
    }
}
