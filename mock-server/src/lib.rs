//! In-memory stand-in for the Jotform REST API.
//!
//! Every JSON answer uses the Jotform envelope. A request without an
//! `apiKey` query parameter gets HTTP 401 with an envelope; a lookup of an
//! unknown resource gets HTTP 200 with `responseCode` 404, the way Jotform
//! reports vendor failures. Unknown routes fall through to an HTML 404 page.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::{delete, get, post},
    Form, Json, Router,
};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const MOCK_USERNAME: &str = "mockuser";

#[derive(Debug, Default)]
pub struct Store {
    forms: BTreeMap<String, Value>,
    submissions: BTreeMap<String, Value>,
    webhooks: HashMap<String, BTreeMap<String, String>>,
    folders: BTreeMap<String, Value>,
}

pub type Db = Arc<RwLock<Store>>;

type Fields = HashMap<String, String>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/user", get(get_user))
        .route("/user/usage", get(get_usage))
        .route("/user/forms", get(list_forms).post(create_form).put(create_forms))
        .route("/user/submissions", get(list_all_submissions))
        .route("/user/folders", get(list_folders))
        .route("/form/{id}", get(get_form).delete(delete_form))
        .route(
            "/form/{id}/submissions",
            get(list_form_submissions)
                .post(create_submission)
                .put(create_submissions),
        )
        .route("/form/{id}/webhooks", get(list_webhooks).post(create_webhook))
        .route("/form/{id}/webhooks/{webhook_id}", delete(delete_webhook))
        .route(
            "/submission/{id}",
            get(get_submission).post(edit_submission).delete(delete_submission),
        )
        .route("/folder", post(create_folder))
        .route("/folder/{id}", get(get_folder).put(update_folder).delete(delete_folder))
        .route("/system/plan/{plan}", get(get_plan))
        .fallback(not_found_page)
        .layer(middleware::from_fn(require_api_key))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

// ---------------------------------------------------------------------------
// Envelope helpers
// ---------------------------------------------------------------------------

fn success(content: Value) -> Response {
    Json(json!({
        "responseCode": 200,
        "message": "success",
        "content": content,
        "limit-left": 9999,
        "duration": "1ms",
    }))
    .into_response()
}

fn vendor_error(code: u16, message: &str) -> Response {
    Json(json!({
        "responseCode": code,
        "message": message,
        "content": "",
    }))
    .into_response()
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Collect `prefix[key]` and `prefix[key][sub]` fields into an object.
fn nested(fields: &Fields, prefix: &str) -> Map<String, Value> {
    let mut out = Map::new();
    let start = format!("{prefix}[");
    for (key, value) in fields {
        let Some(rest) = key.strip_prefix(&start) else {
            continue;
        };
        let Some((head, tail)) = rest.split_once(']') else {
            continue;
        };
        if tail.is_empty() {
            out.insert(head.to_string(), Value::String(value.clone()));
        } else if let Some(sub) = tail.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
            let entry = out
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(map) = entry {
                map.insert(sub.to_string(), Value::String(value.clone()));
            }
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Middleware and fallback
// ---------------------------------------------------------------------------

async fn require_api_key(Query(params): Query<Fields>, request: Request, next: Next) -> Response {
    match params.get("apiKey") {
        Some(key) if !key.is_empty() => next.run(request).await,
        _ => {
            let message = format!("You're not authorized to use ({})", request.uri().path());
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"responseCode": 401, "message": message, "content": ""})),
            )
                .into_response()
        }
    }
}

async fn not_found_page() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html("<html><body><h1>404 Not Found</h1></body></html>"),
    )
        .into_response()
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

async fn get_user() -> Response {
    success(json!({
        "username": MOCK_USERNAME,
        "email": "mockuser@example.com",
        "account_type": "FREE",
        "status": "ACTIVE",
    }))
}

async fn get_usage(State(db): State<Db>) -> Response {
    let store = db.read().await;
    success(json!({ "submissions": store.submissions.len().to_string() }))
}

async fn list_forms(State(db): State<Db>, Query(params): Query<Fields>) -> Response {
    let store = db.read().await;
    let limit = params
        .get("limit")
        .and_then(|l| l.parse::<usize>().ok())
        .unwrap_or(usize::MAX);
    success(Value::Array(store.forms.values().take(limit).cloned().collect()))
}

fn insert_form(store: &mut Store, title: &str) -> Value {
    let id = new_id();
    let form = json!({
        "id": id,
        "username": MOCK_USERNAME,
        "title": title,
        "status": "ENABLED",
        "count": "0",
    });
    store.forms.insert(id, form.clone());
    form
}

async fn create_form(State(db): State<Db>, Form(fields): Form<Fields>) -> Response {
    let properties = nested(&fields, "properties");
    let title = properties
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or("Untitled Form");
    let form = insert_form(&mut *db.write().await, title);
    success(form)
}

async fn create_forms(State(db): State<Db>, Json(body): Json<Value>) -> Response {
    let title = body["properties"]["title"].as_str().unwrap_or("Untitled Form");
    let form = insert_form(&mut *db.write().await, title);
    success(form)
}

async fn list_all_submissions(State(db): State<Db>) -> Response {
    let store = db.read().await;
    success(Value::Array(store.submissions.values().cloned().collect()))
}

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

async fn get_form(State(db): State<Db>, Path(id): Path<String>) -> Response {
    match db.read().await.forms.get(&id) {
        Some(form) => success(form.clone()),
        None => vendor_error(404, "Form not found"),
    }
}

async fn delete_form(State(db): State<Db>, Path(id): Path<String>) -> Response {
    let mut store = db.write().await;
    match store.forms.get_mut(&id) {
        Some(form) => {
            form["status"] = json!("DELETED");
            success(form.clone())
        }
        None => vendor_error(404, "Form not found"),
    }
}

async fn list_form_submissions(State(db): State<Db>, Path(id): Path<String>) -> Response {
    let store = db.read().await;
    if !store.forms.contains_key(&id) {
        return vendor_error(404, "Form not found");
    }
    let submissions = store
        .submissions
        .values()
        .filter(|s| s["form_id"] == id.as_str())
        .cloned()
        .collect();
    success(Value::Array(submissions))
}

fn insert_submission(store: &mut Store, form_id: &str, answers: Map<String, Value>) -> Value {
    let id = new_id();
    let submission = json!({
        "id": id,
        "form_id": form_id,
        "status": "ACTIVE",
        "answers": answers,
    });
    store.submissions.insert(id, submission.clone());
    submission
}

async fn create_submission(
    State(db): State<Db>,
    Path(id): Path<String>,
    Form(fields): Form<Fields>,
) -> Response {
    let mut store = db.write().await;
    if !store.forms.contains_key(&id) {
        return vendor_error(404, "Form not found");
    }
    let submission = insert_submission(&mut store, &id, nested(&fields, "submission"));
    success(json!({ "submissionID": submission["id"] }))
}

async fn create_submissions(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut store = db.write().await;
    if !store.forms.contains_key(&id) {
        return vendor_error(404, "Form not found");
    }
    let Value::Array(items) = body else {
        return vendor_error(400, "Submissions must be a JSON array");
    };
    let created: Vec<Value> = items
        .into_iter()
        .map(|item| {
            let answers = item.as_object().cloned().unwrap_or_default();
            let submission = insert_submission(&mut store, &id, answers);
            json!({ "submissionID": submission["id"] })
        })
        .collect();
    success(Value::Array(created))
}

async fn list_webhooks(State(db): State<Db>, Path(id): Path<String>) -> Response {
    let store = db.read().await;
    let hooks = store.webhooks.get(&id).cloned().unwrap_or_default();
    success(json!(hooks))
}

async fn create_webhook(
    State(db): State<Db>,
    Path(id): Path<String>,
    Form(fields): Form<Fields>,
) -> Response {
    let Some(url) = fields.get("webhookURL").filter(|u| !u.is_empty()) else {
        return vendor_error(400, "webhookURL is required");
    };
    let mut store = db.write().await;
    if !store.forms.contains_key(&id) {
        return vendor_error(404, "Form not found");
    }
    let hooks = store.webhooks.entry(id).or_default();
    let next = hooks.len().to_string();
    hooks.insert(next, url.clone());
    success(json!(hooks))
}

async fn delete_webhook(
    State(db): State<Db>,
    Path((id, webhook_id)): Path<(String, String)>,
) -> Response {
    let mut store = db.write().await;
    let Some(hooks) = store.webhooks.get_mut(&id) else {
        return vendor_error(404, "Webhook not found");
    };
    match hooks.remove(&webhook_id) {
        Some(_) => success(json!(hooks)),
        None => vendor_error(404, "Webhook not found"),
    }
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

async fn get_submission(State(db): State<Db>, Path(id): Path<String>) -> Response {
    match db.read().await.submissions.get(&id) {
        Some(submission) => success(submission.clone()),
        None => vendor_error(404, "Submission not found"),
    }
}

async fn edit_submission(
    State(db): State<Db>,
    Path(id): Path<String>,
    Form(fields): Form<Fields>,
) -> Response {
    let mut store = db.write().await;
    let Some(submission) = store.submissions.get_mut(&id) else {
        return vendor_error(404, "Submission not found");
    };
    if let Value::Object(answers) = &mut submission["answers"] {
        answers.extend(nested(&fields, "submission"));
    }
    success(json!({ "submissionID": id }))
}

async fn delete_submission(State(db): State<Db>, Path(id): Path<String>) -> Response {
    match db.write().await.submissions.remove(&id) {
        Some(_) => success(json!(format!("Submission #{id} deleted successfully."))),
        None => vendor_error(404, "Submission not found"),
    }
}

// ---------------------------------------------------------------------------
// Folder
// ---------------------------------------------------------------------------

async fn list_folders(State(db): State<Db>) -> Response {
    let store = db.read().await;
    success(Value::Array(store.folders.values().cloned().collect()))
}

async fn create_folder(State(db): State<Db>, Form(fields): Form<Fields>) -> Response {
    let Some(name) = fields.get("name").filter(|n| !n.is_empty()) else {
        return vendor_error(400, "Folder name is required");
    };
    let id = new_id();
    let folder = json!({
        "id": id,
        "name": name,
        "parent": fields.get("parent"),
        "color": fields.get("color"),
        "forms": [],
    });
    db.write().await.folders.insert(id, folder.clone());
    success(folder)
}

async fn get_folder(State(db): State<Db>, Path(id): Path<String>) -> Response {
    match db.read().await.folders.get(&id) {
        Some(folder) => success(folder.clone()),
        None => vendor_error(404, "Folder not found"),
    }
}

async fn update_folder(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let Value::Object(changes) = body else {
        return vendor_error(400, "Folder properties must be a JSON object");
    };
    let mut store = db.write().await;
    let Some(folder) = store.folders.get_mut(&id) else {
        return vendor_error(404, "Folder not found");
    };
    for (key, value) in changes {
        if key == "forms" {
            if let (Value::Array(existing), Value::Array(added)) = (&mut folder["forms"], value) {
                existing.extend(added);
            }
        } else {
            folder[key.as_str()] = value;
        }
    }
    success(folder.clone())
}

async fn delete_folder(State(db): State<Db>, Path(id): Path<String>) -> Response {
    match db.write().await.folders.remove(&id) {
        Some(_) => success(json!("Folder deleted successfully.")),
        None => vendor_error(404, "Folder not found"),
    }
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

async fn get_plan(Path(plan): Path<String>) -> Response {
    let limit = match plan.as_str() {
        "FREE" => 100,
        "BRONZE" => 1000,
        "SILVER" => 2500,
        "GOLD" => 10000,
        "PLATINUM" => 100000,
        _ => return vendor_error(404, "Plan not found"),
    };
    success(json!({ "name": plan, "submissions": limit }))
}
