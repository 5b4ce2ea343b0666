use std::sync::Mutex;

use actix_web::{delete, get, post, put, web::{Data, Json, Path}, HttpResponse};
use serde::Deserialize;

use crate::{
    data::{UserID, UserPatch},
    db::DB,
    errors::ApiResult,
    render::{render_populated_user, render_user},
};

use super::{lock, message};

#[derive(Deserialize)]
pub struct NewUser {
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: String,
}

#[get("/api/users")]
pub async fn list_users(db: Data<Mutex<DB>>) -> ApiResult<HttpResponse> {
    let db = lock(&db)?;
    let users = db.list_users();
    let views = users.iter().map(render_populated_user).collect::<Vec<_>>();
    Ok(HttpResponse::Ok().json(views))
}

#[get("/api/users/{id}")]
pub async fn get_user(db: Data<Mutex<DB>>, id: Path<String>) -> ApiResult<HttpResponse> {
    let db = lock(&db)?;
    let user = db.get_user(&UserID(id.into_inner()))?;
    Ok(HttpResponse::Ok().json(render_populated_user(&user)))
}

#[post("/api/users")]
pub async fn create_user(db: Data<Mutex<DB>>, Json(input): Json<NewUser>) -> ApiResult<HttpResponse> {
    let mut db = lock(&db)?;
    let user = db.create_user(&input.username, &input.email)?;
    Ok(HttpResponse::Created().json(render_user(user)))
}

#[put("/api/users/{id}")]
pub async fn update_user(db: Data<Mutex<DB>>, id: Path<String>, Json(patch): Json<UserPatch>) -> ApiResult<HttpResponse> {
    let mut db = lock(&db)?;
    let user = db.update_user(&UserID(id.into_inner()), &patch)?;
    Ok(HttpResponse::Ok().json(render_user(user)))
}

#[delete("/api/users/{id}")]
pub async fn delete_user(db: Data<Mutex<DB>>, id: Path<String>) -> ApiResult<HttpResponse> {
    lock(&db)?.delete_user(&UserID(id.into_inner()))?;
    Ok(HttpResponse::Ok().json(message("User deleted successfully")))
}

#[post("/api/users/{user_id}/friends/{friend_id}")]
pub async fn add_friend(db: Data<Mutex<DB>>, path: Path<(String, String)>) -> ApiResult<HttpResponse> {
    let (user_id, friend_id) = path.into_inner();
    lock(&db)?.add_friend(&UserID(user_id), &UserID(friend_id))?;
    Ok(HttpResponse::Ok().json(message("Friend added successfully")))
}

#[delete("/api/users/{user_id}/friends/{friend_id}")]
pub async fn remove_friend(db: Data<Mutex<DB>>, path: Path<(String, String)>) -> ApiResult<HttpResponse> {
    let (user_id, friend_id) = path.into_inner();
    lock(&db)?.remove_friend(&UserID(user_id), &UserID(friend_id))?;
    Ok(HttpResponse::Ok().json(message("Friend removed successfully")))
}
