use std::sync::{Mutex, MutexGuard};

use actix_web::{error::InternalError, web::{Data, JsonConfig, ServiceConfig}, HttpResponse};
use serde_json::json;

use crate::{db::{store::StoreError, DB}, errors::ApiError};

mod thoughts;
mod users;

pub use thoughts::*;
pub use users::*;

pub(crate) fn lock(db: &Data<Mutex<DB>>) -> Result<MutexGuard<'_, DB>, ApiError> {
    db.lock().map_err(|_| ApiError::Store(StoreError::Poisoned))
}

pub(crate) fn message(text: &str) -> serde_json::Value {
    json!({ "message": text })
}

fn json_config() -> JsonConfig {
    JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(message(&err.to_string()));
        InternalError::from_response(err, response).into()
    })
}

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.app_data(json_config())
        .service(list_users)
        .service(get_user)
        .service(create_user)
        .service(update_user)
        .service(delete_user)
        .service(add_friend)
        .service(remove_friend)
        .service(list_thoughts)
        .service(get_thought)
        .service(create_thought)
        .service(update_thought)
        .service(delete_thought)
        .service(add_reaction)
        .service(remove_reaction);
}

pub async fn default_handler() -> HttpResponse {
    HttpResponse::NotFound().json(message("Route not found"))
}
