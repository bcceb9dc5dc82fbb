use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse, Json, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::error::HandlerError;
use crate::api::session::ActiveSession;
use crate::api::views;
use crate::logic::todo_list;
use crate::model::{ItemId, UserId};
use crate::session::SessionRegistry;
use crate::store::traits::Store;

pub struct AppState<S> {
    pub store: Arc<S>,
    pub sessions: Arc<SessionRegistry>,
}

impl<S> AppState<S> {
    pub fn new(store: Arc<S>, sessions: Arc<SessionRegistry>) -> Self {
        Self { store, sessions }
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            sessions: Arc::clone(&self.sessions),
        }
    }
}

type HandlerResult<T> = Result<T, HandlerError>;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

// Form bodies keep the field names the list page posts

#[derive(Debug, Deserialize)]
pub struct AddItemForm {
    #[serde(rename = "newItem", default)]
    pub new_item: String,
}

#[derive(Debug, Deserialize)]
pub struct EditItemForm {
    #[serde(rename = "updatedItemTitle", default)]
    pub updated_item_title: String,
    #[serde(rename = "updatedItemId")]
    pub updated_item_id: ItemId,
}

#[derive(Debug, Deserialize)]
pub struct DeleteItemForm {
    #[serde(rename = "deleteItemId")]
    pub delete_item_id: ItemId,
}

#[derive(Debug, Deserialize)]
pub struct UserChoiceForm {
    pub add: Option<String>,
    pub user: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SwitchUserForm {
    pub user: UserId,
}

#[derive(Debug, Deserialize)]
pub struct NewUserForm {
    #[serde(default)]
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RenameUserForm {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "newName", default)]
    pub new_name: String,
}

/// GET /
pub async fn list_view<S: Store>(
    State(state): State<AppState<S>>,
    ActiveSession(key): ActiveSession,
) -> HandlerResult<Html<String>> {
    let view = todo_list::load_list_view(&*state.store, &state.sessions, &key)
        .await
        .map_err(HandlerError::storage("Error loading list"))?;
    Ok(Html(views::render_list(&view)))
}

/// POST /add
pub async fn add_item<S: Store>(
    State(state): State<AppState<S>>,
    ActiveSession(key): ActiveSession,
    Form(form): Form<AddItemForm>,
) -> HandlerResult<Redirect> {
    todo_list::add_item(&*state.store, &state.sessions, &key, &form.new_item)
        .await
        .map_err(HandlerError::storage("Error adding item"))?;
    Ok(Redirect::to("/"))
}

/// POST /edit
pub async fn edit_item<S: Store>(
    State(state): State<AppState<S>>,
    ActiveSession(key): ActiveSession,
    Form(form): Form<EditItemForm>,
) -> HandlerResult<Redirect> {
    todo_list::edit_item(
        &*state.store,
        &state.sessions,
        &key,
        form.updated_item_id,
        &form.updated_item_title,
    )
    .await
    .map_err(HandlerError::storage("Error editing item"))?;
    Ok(Redirect::to("/"))
}

/// POST /delete
pub async fn delete_item<S: Store>(
    State(state): State<AppState<S>>,
    ActiveSession(key): ActiveSession,
    Form(form): Form<DeleteItemForm>,
) -> HandlerResult<Redirect> {
    todo_list::delete_item(&*state.store, &state.sessions, &key, form.delete_item_id)
        .await
        .map_err(HandlerError::storage("Error deleting item"))?;
    Ok(Redirect::to("/"))
}

/// POST /user
/// `add=new` shows the create-user form, anything else switches to `user`
pub async fn choose_user<S: Store>(
    state: State<AppState<S>>,
    session: ActiveSession,
    Form(form): Form<UserChoiceForm>,
) -> HandlerResult<Response> {
    if form.add.as_deref() == Some("new") {
        return Ok(new_user_form(state, session).await?.into_response());
    }

    // No user reload before switching: the next list view reconciles the selection
    let user = form
        .user
        .as_deref()
        .and_then(|user| user.trim().parse::<UserId>().ok())
        .ok_or(HandlerError::InvalidInput {
            message: "Invalid user id",
        })?;
    Ok(switch_user(state, session, Form(SwitchUserForm { user }))
        .await
        .into_response())
}

/// GET /new
pub async fn new_user_form<S: Store>(
    State(state): State<AppState<S>>,
    ActiveSession(key): ActiveSession,
) -> HandlerResult<Html<String>> {
    let view = todo_list::new_user_form(&*state.store, &state.sessions, &key)
        .await
        .map_err(HandlerError::storage("Error loading users"))?;
    Ok(Html(views::render_new_user(&view)))
}

/// POST /user/switch
pub async fn switch_user<S: Store>(
    State(state): State<AppState<S>>,
    ActiveSession(key): ActiveSession,
    Form(form): Form<SwitchUserForm>,
) -> Redirect {
    todo_list::switch_user(&state.sessions, &key, form.user);
    Redirect::to("/")
}

/// POST /new
pub async fn create_user<S: Store>(
    State(state): State<AppState<S>>,
    ActiveSession(key): ActiveSession,
    Form(form): Form<NewUserForm>,
) -> HandlerResult<Redirect> {
    todo_list::create_user(&*state.store, &state.sessions, &key, form.name, form.color)
        .await
        .map_err(HandlerError::storage("Error creating user"))?;
    Ok(Redirect::to("/"))
}

/// POST /user/update
pub async fn rename_user<S: Store>(
    State(state): State<AppState<S>>,
    Form(form): Form<RenameUserForm>,
) -> HandlerResult<Redirect> {
    todo_list::rename_user(&*state.store, form.user_id, &form.new_name)
        .await
        .map_err(HandlerError::storage("Error updating user name"))?;
    Ok(Redirect::to("/"))
}
