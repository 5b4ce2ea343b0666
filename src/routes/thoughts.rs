use std::sync::Mutex;

use actix_web::{delete, get, post, put, web::{Data, Json, Path}, HttpResponse};
use serde::Deserialize;

use crate::{
    data::{ReactionID, ThoughtID, ThoughtPatch},
    db::DB,
    errors::ApiResult,
    render::render_thought,
};

use super::{lock, message};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewThought {
    #[serde(default)]
    thought_text: String,
    #[serde(default)]
    username: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReaction {
    #[serde(default)]
    reaction_body: String,
    #[serde(default)]
    username: String,
}

#[get("/api/thoughts")]
pub async fn list_thoughts(db: Data<Mutex<DB>>) -> ApiResult<HttpResponse> {
    let db = lock(&db)?;
    let views = db.list_thoughts().into_iter().map(render_thought).collect::<Vec<_>>();
    Ok(HttpResponse::Ok().json(views))
}

#[get("/api/thoughts/{id}")]
pub async fn get_thought(db: Data<Mutex<DB>>, id: Path<String>) -> ApiResult<HttpResponse> {
    let db = lock(&db)?;
    let thought = db.get_thought(&ThoughtID(id.into_inner()))?;
    Ok(HttpResponse::Ok().json(render_thought(thought)))
}

#[post("/api/thoughts")]
pub async fn create_thought(db: Data<Mutex<DB>>, Json(input): Json<NewThought>) -> ApiResult<HttpResponse> {
    let mut db = lock(&db)?;
    let thought = db.create_thought(&input.thought_text, &input.username)?;
    Ok(HttpResponse::Created().json(render_thought(thought)))
}

#[put("/api/thoughts/{id}")]
pub async fn update_thought(db: Data<Mutex<DB>>, id: Path<String>, Json(patch): Json<ThoughtPatch>) -> ApiResult<HttpResponse> {
    let mut db = lock(&db)?;
    let thought = db.update_thought(&ThoughtID(id.into_inner()), &patch)?;
    Ok(HttpResponse::Ok().json(render_thought(thought)))
}

#[delete("/api/thoughts/{id}")]
pub async fn delete_thought(db: Data<Mutex<DB>>, id: Path<String>) -> ApiResult<HttpResponse> {
    lock(&db)?.delete_thought(&ThoughtID(id.into_inner()))?;
    Ok(HttpResponse::Ok().json(message("Thought deleted successfully")))
}

#[post("/api/thoughts/{thought_id}/reactions")]
pub async fn add_reaction(db: Data<Mutex<DB>>, thought_id: Path<String>, Json(input): Json<NewReaction>) -> ApiResult<HttpResponse> {
    let mut db = lock(&db)?;
    let thought = db.add_reaction(&ThoughtID(thought_id.into_inner()), &input.reaction_body, &input.username)?;
    Ok(HttpResponse::Created().json(render_thought(thought)))
}

#[delete("/api/thoughts/{thought_id}/reactions/{reaction_id}")]
pub async fn remove_reaction(db: Data<Mutex<DB>>, path: Path<(String, String)>) -> ApiResult<HttpResponse> {
    let (thought_id, reaction_id) = path.into_inner();
    lock(&db)?.remove_reaction(&ThoughtID(thought_id), &ReactionID(reaction_id))?;
    Ok(HttpResponse::Ok().json(message("Reaction deleted successfully")))
}
