//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! Generator wiring via env: GENERATOR_CMD, GROUPS_SCRIPT, SCHEDULE_SCRIPT,
//! UPLOAD_DIR, GENERATOR_TIMEOUT_SECS.

use actix_files::Files;
use actix_multipart::Multipart;
use actix_web::{
    get, post,
    web::{self, Data, Json},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::NaiveDate;
use futures_util::TryStreamExt;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;
use volley_schedule_web::{
    apply_filter, assemble_workbook, distinct_days, distinct_referees, distinct_teams,
    extract_grouping, extract_schedule, format_date, group_by_date, map_day_to_date,
    normalize_rows, run_generator, FilterSpec, GroupingResult, NormalizedMatch, RawMatchRow,
    RecordTable, ScheduleResult,
};

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Generator wiring, read once from the environment at startup.
struct Config {
    generator_cmd: String,
    groups_script: String,
    schedule_script: String,
    upload_dir: PathBuf,
    job_timeout: Duration,
}

impl Config {
    fn from_env() -> Self {
        Self {
            generator_cmd: env_or("GENERATOR_CMD", "python3"),
            groups_script: env_or("GROUPS_SCRIPT", "scripts/generate_groups.py"),
            schedule_script: env_or("SCHEDULE_SCRIPT", "scripts/generate_schedule.py"),
            upload_dir: PathBuf::from(env_or("UPLOAD_DIR", "uploads")),
            job_timeout: Duration::from_secs(
                std::env::var("GENERATOR_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(300),
            ),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Uploaded files for one request; removed on every exit path when dropped.
#[derive(Default)]
struct TempUploads {
    files: Vec<PathBuf>,
}

impl Drop for TempUploads {
    fn drop(&mut self) {
        for path in &self.files {
            if let Err(e) = std::fs::remove_file(path) {
                log::warn!("failed to remove upload {}: {}", path.display(), e);
            }
        }
    }
}

fn json_error(message: impl Into<String>) -> serde_json::Value {
    serde_json::json!({ "error": message.into() })
}

/// Save every multipart field to a uuid-named file under the upload dir.
/// Returns field name → saved path; paths are tracked for cleanup.
async fn save_uploads(
    mut payload: Multipart,
    upload_dir: &Path,
    uploads: &mut TempUploads,
) -> Result<HashMap<String, PathBuf>, HttpResponse> {
    let mut saved = HashMap::new();
    loop {
        let mut field = match payload.try_next().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return Err(HttpResponse::BadRequest().json(json_error(format!("bad upload: {}", e))))
            }
        };
        let name = match field.name() {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => continue,
        };
        let path = upload_dir.join(format!("{}.xlsx", Uuid::new_v4()));
        let mut file = match tokio::fs::File::create(&path).await {
            Ok(f) => f,
            Err(e) => {
                log::error!("cannot create upload file {}: {}", path.display(), e);
                return Err(HttpResponse::InternalServerError().json(json_error("upload failed")));
            }
        };
        uploads.files.push(path.clone());
        loop {
            match field.try_next().await {
                Ok(Some(chunk)) => {
                    if let Err(e) = file.write_all(&chunk).await {
                        log::error!("cannot write upload {}: {}", path.display(), e);
                        return Err(
                            HttpResponse::InternalServerError().json(json_error("upload failed"))
                        );
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    return Err(
                        HttpResponse::BadRequest().json(json_error(format!("bad upload: {}", e)))
                    )
                }
            }
        }
        saved.insert(name, path);
    }
    Ok(saved)
}

fn generator_args(script: &str, inputs: &[&Path]) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![OsString::from(script)];
    args.extend(inputs.iter().map(|p| p.as_os_str().to_os_string()));
    args
}

fn xlsx_response(filename: &str, bytes: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(XLSX_CONTENT_TYPE)
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(bytes)
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "volley-schedule-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Run the group generator over one uploaded spreadsheet (multipart field
/// `file`); respond with the grouping + referee-conflict tables as JSON.
#[post("/api/generate-groups")]
async fn api_generate_groups(config: Data<Config>, payload: Multipart) -> HttpResponse {
    let mut uploads = TempUploads::default();
    let fields = match save_uploads(payload, &config.upload_dir, &mut uploads).await {
        Ok(fields) => fields,
        Err(resp) => return resp,
    };
    let input = match fields.get("file") {
        Some(path) => path.as_path(),
        None => return HttpResponse::BadRequest().json(json_error("missing file upload")),
    };
    let args = generator_args(&config.groups_script, &[input]);
    let stdout =
        match run_generator(&config.generator_cmd, &args, config.job_timeout).await {
            Ok(out) => out,
            Err(e) => return HttpResponse::InternalServerError().json(json_error(e.to_string())),
        };
    match extract_grouping(&stdout) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            log::error!("group result extraction failed: {}", e);
            HttpResponse::InternalServerError().json(json_error("result parse failed"))
        }
    }
}

/// Run the schedule generator over the grouping + availability spreadsheets
/// (multipart fields `group_file`, `availability_file`).
#[post("/api/generate-schedule")]
async fn api_generate_schedule(config: Data<Config>, payload: Multipart) -> HttpResponse {
    let mut uploads = TempUploads::default();
    let fields = match save_uploads(payload, &config.upload_dir, &mut uploads).await {
        Ok(fields) => fields,
        Err(resp) => return resp,
    };
    let (group_file, availability_file) =
        match (fields.get("group_file"), fields.get("availability_file")) {
            (Some(g), Some(a)) => (g.as_path(), a.as_path()),
            _ => {
                return HttpResponse::BadRequest()
                    .json(json_error("missing group_file or availability_file upload"))
            }
        };
    let args = generator_args(&config.schedule_script, &[group_file, availability_file]);
    let stdout =
        match run_generator(&config.generator_cmd, &args, config.job_timeout).await {
            Ok(out) => out,
            Err(e) => return HttpResponse::InternalServerError().json(json_error(e.to_string())),
        };
    match extract_schedule(&stdout) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            log::error!("schedule result extraction failed: {}", e);
            HttpResponse::InternalServerError().json(json_error("result parse failed"))
        }
    }
}

/// Build the groupings workbook (`Groupings`, `Referee Conflicts`) from a
/// previously returned grouping result.
#[post("/api/export/groups")]
async fn api_export_groups(body: Json<GroupingResult>) -> HttpResponse {
    let sheets = [
        ("Groupings", &body.grouping_data),
        ("Referee Conflicts", &body.ref_conflict_data),
    ];
    match assemble_workbook(&sheets) {
        Ok(bytes) => xlsx_response("group_generate.xlsx", bytes),
        Err(e) => {
            log::error!("workbook assembly failed: {}", e);
            HttpResponse::InternalServerError().json(json_error("export failed"))
        }
    }
}

/// Build the schedule workbook (`Schedule`, `Referee Counts`, `Groupings`).
#[post("/api/export/schedule")]
async fn api_export_schedule(body: Json<ScheduleResult>) -> HttpResponse {
    let schedule_rows: RecordTable = body
        .schedule_data
        .iter()
        .filter_map(|row| match serde_json::to_value(row) {
            Ok(serde_json::Value::Object(map)) => Some(map),
            _ => None,
        })
        .collect();
    let sheets = [
        ("Schedule", &schedule_rows),
        ("Referee Counts", &body.ref_count_data),
        ("Groupings", &body.grouping_data),
    ];
    match assemble_workbook(&sheets) {
        Ok(bytes) => xlsx_response("volleyball_schedule.xlsx", bytes),
        Err(e) => {
            log::error!("workbook assembly failed: {}", e);
            HttpResponse::InternalServerError().json(json_error("export failed"))
        }
    }
}

#[derive(Deserialize)]
struct ViewRequest {
    #[serde(default)]
    schedule_data: Vec<RawMatchRow>,
    start_date: NaiveDate,
    #[serde(default)]
    filter: FilterSpec,
}

#[derive(Serialize)]
struct DayOption {
    day: i64,
    label: String,
}

#[derive(Serialize)]
struct CalendarGroup {
    date: NaiveDate,
    label: String,
    matches: Vec<NormalizedMatch>,
}

#[derive(Serialize)]
struct ViewResponse {
    matches: Vec<NormalizedMatch>,
    total: usize,
    days: Vec<DayOption>,
    teams: Vec<String>,
    referees: Vec<String>,
    calendar: Vec<CalendarGroup>,
}

/// Normalize, filter, and group a schedule for the interactive viewer.
/// Facet option lists always come from the unfiltered schedule. An empty
/// `schedule_data` is a legitimate empty state, not an error.
#[post("/api/schedule/view")]
async fn api_schedule_view(body: Json<ViewRequest>) -> HttpResponse {
    let normalized = normalize_rows(&body.schedule_data, body.start_date);
    let filtered = apply_filter(&normalized, &body.filter);
    let days = distinct_days(&normalized)
        .into_iter()
        .map(|day| DayOption {
            label: map_day_to_date(day, body.start_date)
                .map_or_else(|| "-".to_string(), format_date),
            day,
        })
        .collect();
    let calendar = group_by_date(&filtered)
        .into_iter()
        .map(|(date, members)| CalendarGroup {
            date,
            label: format_date(date),
            matches: members.into_iter().cloned().collect(),
        })
        .collect();
    let response = ViewResponse {
        total: filtered.len(),
        days,
        teams: distinct_teams(&normalized),
        referees: distinct_referees(&normalized),
        calendar,
        matches: filtered.into_iter().cloned().collect(),
    };
    HttpResponse::Ok().json(response)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);

    let config = Data::new(Config::from_env());
    std::fs::create_dir_all(&config.upload_dir)?;
    log::info!(
        "Starting server at http://{}:{} (generator: {} {})",
        bind.0,
        bind.1,
        config.generator_cmd,
        config.groups_script
    );

    HttpServer::new(move || {
        App::new()
            .app_data(config.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_generate_groups)
            .service(api_generate_schedule)
            .service(api_export_groups)
            .service(api_export_schedule)
            .service(api_schedule_view)
            .service(Files::new("/static", "static"))
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};

    fn multipart_file_upload(boundary: &str) -> String {
        format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"file\"; \
             filename=\"teams.xlsx\"\r\nContent-Type: application/octet-stream\
             \r\n\r\nstub\r\n--{b}--\r\n",
            b = boundary
        )
    }

    #[cfg(unix)]
    #[actix_web::test]
    async fn generator_failure_surfaces_stderr_in_the_error_body() {
        let dir = std::env::temp_dir().join(format!("volley-web-test-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let script = dir.join("fail.sh");
        std::fs::write(&script, "echo 'bad input' >&2\nexit 1\n").unwrap();

        let config = Data::new(Config {
            generator_cmd: "sh".to_string(),
            groups_script: script.to_string_lossy().into_owned(),
            schedule_script: String::new(),
            upload_dir: dir.clone(),
            job_timeout: Duration::from_secs(10),
        });
        let app =
            test::init_service(App::new().app_data(config).service(api_generate_groups)).await;

        let boundary = "----volley-test-boundary";
        let req = test::TestRequest::post()
            .uri("/api/generate-groups")
            .insert_header((
                "Content-Type",
                format!("multipart/form-data; boundary={}", boundary),
            ))
            .set_payload(multipart_file_upload(boundary))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!({ "error": "bad input" }));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[cfg(unix)]
    #[actix_web::test]
    async fn unparsable_generator_output_is_a_parse_failure() {
        let dir = std::env::temp_dir().join(format!("volley-web-test-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let script = dir.join("noise.sh");
        std::fs::write(&script, "echo 'solver diagnostics only'\nexit 0\n").unwrap();

        let config = Data::new(Config {
            generator_cmd: "sh".to_string(),
            groups_script: script.to_string_lossy().into_owned(),
            schedule_script: String::new(),
            upload_dir: dir.clone(),
            job_timeout: Duration::from_secs(10),
        });
        let app =
            test::init_service(App::new().app_data(config).service(api_generate_groups)).await;

        let boundary = "----volley-test-boundary";
        let req = test::TestRequest::post()
            .uri("/api/generate-groups")
            .insert_header((
                "Content-Type",
                format!("multipart/form-data; boundary={}", boundary),
            ))
            .set_payload(multipart_file_upload(boundary))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!({ "error": "result parse failed" }));

        std::fs::remove_dir_all(&dir).ok();
    }
}
