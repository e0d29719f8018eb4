use std::time::Duration;

use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use leave_desk::state::{LeaveRequestFilter, LeaveRequestForm, ListQuery, PaginationModel};
use leave_desk::{ApiClient, ApiError};

fn record(id: u64, reason: &str) -> Value {
    json!({
        "id": id,
        "user": { "id": 9, "first_name": "Ana", "middle_name": null, "last_name": "Horvat" },
        "leave_type": { "id": 2, "type": "Sick leave" },
        "start_date": "2024-11-01T00:00:00.000Z",
        "end_date": "2024-11-05T00:00:00.000Z",
        "reason": reason
    })
}

// The received query string comes back as the reason of the only row.
async fn list(req: HttpRequest) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "items": [record(1, req.query_string())],
        "total": 31
    }))
}

async fn create(body: web::Json<Value>) -> HttpResponse {
    if body.get("start_date").is_none() {
        return HttpResponse::BadRequest().json(json!({
            "errors": { "start_date": "This field is required." }
        }));
    }
    let reason = body["reason"].as_str().unwrap_or_default();
    HttpResponse::Created().json(record(99, reason))
}

async fn update(path: web::Path<u64>, body: web::Json<Value>) -> HttpResponse {
    let reason = body["reason"].as_str().unwrap_or_default();
    HttpResponse::Ok().json(record(path.into_inner(), reason))
}

async fn delete(_path: web::Path<u64>) -> HttpResponse {
    HttpResponse::NoContent().finish()
}

async fn leave_types() -> HttpResponse {
    HttpResponse::Ok().json(json!([
        { "id": 1, "type": "Annual" },
        { "id": 2, "type": "Sick leave" }
    ]))
}

async fn users() -> HttpResponse {
    HttpResponse::Ok().json(json!([
        { "id": 9, "first_name": "Ana", "middle_name": "Marija", "last_name": "Horvat" }
    ]))
}

async fn broken() -> HttpResponse {
    HttpResponse::InternalServerError().body("database is down")
}

/// Starts a fake leave API on a random port and returns its base URL.
fn spawn_api() -> String {
    let server = HttpServer::new(|| {
        App::new()
            .service(
                web::scope("/api")
                    .service(
                        web::resource("/leave-requests")
                            .route(web::get().to(list))
                            .route(web::post().to(create)),
                    )
                    .service(
                        web::resource("/leave-requests/{id}")
                            .route(web::put().to(update))
                            .route(web::delete().to(delete)),
                    )
                    .route("/leave-types", web::get().to(leave_types))
                    .route("/users", web::get().to(users)),
            )
            .route("/broken/users", web::get().to(broken))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind fake api");

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());

    format!("http://{addr}/api")
}

fn client(base_url: &str) -> ApiClient {
    ApiClient::new(base_url, Duration::from_secs(5)).unwrap()
}

fn filled_form() -> LeaveRequestForm {
    let mut form = LeaveRequestForm::new();
    form.set_leave_type(2);
    form.set_user(9);
    form.set_reason("flu");
    form.set_start_date(Utc.with_ymd_and_hms(2024, 11, 1, 0, 0, 0).unwrap());
    form.set_end_date(Utc.with_ymd_and_hms(2024, 11, 5, 0, 0, 0).unwrap());
    form
}

#[actix_web::test]
async fn fetches_filtered_page() {
    let api = client(&spawn_api());
    let filter = LeaveRequestFilter {
        start_date: Some(Utc.timestamp_opt(1_700_000_000, 0).unwrap()),
        user: Some(9),
        search_query: "a b".into(),
        ..Default::default()
    };
    let query = ListQuery::build(&filter, &PaginationModel { page: 1, page_size: 20 });

    let page = api.fetch_leave_requests(&query).await.unwrap();

    assert_eq!(page.total, 31);
    assert_eq!(page.items.len(), 1);
    let row = &page.items[0];
    assert_eq!(
        row.reason,
        "start_date=1700000000&user=9&search_query=a%20b&page=2&limit=20"
    );
    assert_eq!(row.user.full_name(), "Ana  Horvat");
    assert_eq!(row.leave_type.name, "Sick leave");
    assert_eq!(row.days(), 4.0);
}

#[actix_web::test]
async fn creates_from_form_submission() {
    let api = client(&spawn_api());
    let payload = filled_form().submission().unwrap();

    let created = api.create_leave_request(&payload).await.unwrap();

    assert_eq!(created.id, 99);
    assert_eq!(created.reason, "flu");
}

#[actix_web::test]
async fn bad_request_keeps_body() {
    let api = client(&spawn_api());
    let mut payload = filled_form().submission().unwrap();
    payload.remove("start_date");

    let err = api.create_leave_request(&payload).await.unwrap_err();

    match err {
        ApiError::BadRequest { body, .. } => assert!(body.contains("This field is required.")),
        other => panic!("expected BadRequest, got {other:?}"),
    }
}

#[actix_web::test]
async fn updates_and_deletes() {
    let api = client(&spawn_api());
    let mut form = filled_form();
    form.set_reason("dentist");
    let payload = form.submission().unwrap();

    let updated = api.update_leave_request(12, &payload).await.unwrap();
    assert_eq!(updated.id, 12);
    assert_eq!(updated.reason, "dentist");

    api.delete_leave_request(12).await.unwrap();
}

#[actix_web::test]
async fn fetches_lookups() {
    let api = client(&spawn_api());

    let types = api.fetch_leave_types().await.unwrap();
    let names: Vec<&str> = types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Annual", "Sick leave"]);

    let users = api.fetch_users().await.unwrap();
    assert_eq!(users[0].full_name(), "Ana Marija Horvat");
}

#[actix_web::test]
async fn server_error_is_reported() {
    let base = spawn_api().replace("/api", "/broken");
    let api = client(&base);

    match api.fetch_users().await.unwrap_err() {
        ApiError::Status { status, body, .. } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "database is down");
        }
        other => panic!("expected Status, got {other:?}"),
    }
}

#[actix_web::test]
async fn empty_filter_only_paginates() {
    let api = client(&spawn_api());
    let query = ListQuery::build(&LeaveRequestFilter::default(), &PaginationModel::default());

    let page = api.fetch_leave_requests(&query).await.unwrap();

    assert_eq!(page.items[0].reason, "page=1&limit=10");
}
