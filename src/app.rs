#![cfg(not(tarpaulin_include))]

use axum::{
    Json, Router,
    extract::{Multipart, Path as UrlPath, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use uuid::Uuid;

use crate::dataset::Dataset;
use crate::engine;
use crate::loader;
use crate::resolver::DEFAULT_TEXT_COLUMN;

const PREVIEW_ROWS: usize = 200;

pub struct AppState {
    upload_dir: PathBuf,
    output_dir: PathBuf,
}

pub async fn run(addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState {
        upload_dir: PathBuf::from("uploads"),
        output_dir: PathBuf::from("outputs"),
    });
    std::fs::create_dir_all(&state.upload_dir)?;
    std::fs::create_dir_all(&state.output_dir)?;

    // Build router
    let app = Router::new()
        .route("/", get(serve_index).post(process_upload))
        .route("/api/output/:filename", get(preview_output))
        .route("/download/:filename", get(download_output))
        .route("/reset/:filename", get(reset_output))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state);

    // Start server
    let listener = TcpListener::bind(addr).await?;
    println!("Listening on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}

async fn serve_index() -> Html<&'static str> {
    Html(include_str!("./static/index.html"))
}

async fn process_upload(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> Response {
    // Process the multipart form data
    let mut file_data = Vec::new();
    let mut file_name = String::new();
    let mut requested_column = String::new();

    while let Some(field) = multipart.next_field().await.unwrap_or(None) {
        let field_name = field.name().unwrap_or("unknown").to_string();

        if field_name == "excel_file" {
            file_name = field.file_name().unwrap_or("").to_string();
            file_data = field.bytes().await.unwrap_or_default().to_vec();
        } else if field_name == "description_column" {
            requested_column = field.text().await.unwrap_or_default().trim().to_string();
        }
    }

    let file_name = sanitize_filename(&file_name);
    if file_data.is_empty() || file_name.is_empty() {
        return error_page("Please upload a spreadsheet (.xlsx, .xls or .csv).");
    }
    if requested_column.is_empty() {
        requested_column = DEFAULT_TEXT_COLUMN.to_string();
    }

    let upload_path = state.upload_dir.join(&file_name);
    if let Err(e) = std::fs::write(&upload_path, &file_data) {
        return error_page(&format!("Error saving upload: {e}"));
    }

    // Fresh output name per request; concurrent uploads never share a path.
    let output_name = format!("annotated_{}.xlsx", Uuid::new_v4().simple());
    let output_path = state.output_dir.join(&output_name);

    let annotated = match engine::process(&upload_path, &requested_column, &output_path) {
        Ok(annotated) => annotated,
        Err(e) => return error_page(&format!("Error processing file: {e}")),
    };

    // Preview what was actually written, not the in-memory dataset.
    let preview = match loader::from_excel(&output_path) {
        Ok(document) => render_preview_table(&document, PREVIEW_ROWS),
        Err(e) => return error_page(&format!("Error reading output: {e}")),
    };

    let warning_note = match &annotated.warning {
        Some(warning) => format!(
            "<p class=\"warning\">Note: {}</p>",
            escape_html(&warning.to_string())
        ),
        None => String::new(),
    };

    let page = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"utf-8\">\n  \
         <title>Mailsift - preview</title>\n  \
         <link rel=\"stylesheet\" href=\"/static/style.css\">\n</head>\n<body>\n  \
         <h1>Annotated spreadsheet</h1>\n  \
         <p>Scanned column: <strong>{column}</strong></p>\n  {warning}\n  {preview}\n  \
         <p>\n    <a href=\"/download/{name}\">Download</a> |\n    \
         <a href=\"/reset/{name}\">Delete output</a> |\n    \
         <a href=\"/\">Upload another file</a>\n  </p>\n</body>\n</html>",
        column = escape_html(&annotated.resolved_column),
        warning = warning_note,
        preview = preview,
        name = output_name,
    );

    Html(page).into_response()
}

async fn preview_output(
    UrlPath(filename): UrlPath<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let filename = sanitize_filename(&filename);
    if filename.is_empty() {
        return StatusCode::NOT_FOUND.into_response();
    }

    match loader::from_excel(state.output_dir.join(&filename)) {
        Ok(document) => {
            let rows = document.row_count().min(PREVIEW_ROWS);
            let columns: Vec<serde_json::Value> = document
                .columns
                .iter()
                .map(|column| {
                    serde_json::json!({
                        "name": column.name,
                        "cells": &column.cells[..rows],
                    })
                })
                .collect();

            Json(serde_json::json!({
                "filename": filename,
                "rows": rows,
                "columns": columns,
            }))
            .into_response()
        }
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn download_output(
    UrlPath(filename): UrlPath<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let filename = sanitize_filename(&filename);
    let path = state.output_dir.join(&filename);

    match std::fs::read(&path) {
        Ok(bytes) => Response::builder()
            .status(StatusCode::OK)
            .header(
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            )
            .header(
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            )
            .body(axum::body::Body::from(bytes))
            .unwrap(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn reset_output(
    UrlPath(filename): UrlPath<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let filename = sanitize_filename(&filename);
    let path = state.output_dir.join(&filename);

    match std::fs::remove_file(&path) {
        Ok(()) => Html("Output file removed. <a href=\"/\">Go back</a>".to_string())
            .into_response(),
        Err(e) => error_page(&format!("Error removing file: {e}")),
    }
}

fn error_page(message: &str) -> Response {
    let page = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"utf-8\">\n  \
         <title>Mailsift - error</title>\n  \
         <link rel=\"stylesheet\" href=\"/static/style.css\">\n</head>\n<body>\n  \
         <h1>Something went wrong</h1>\n  <p class=\"error\">{}</p>\n  \
         <p><a href=\"/\">Go back</a></p>\n</body>\n</html>",
        escape_html(message)
    );
    Html(page).into_response()
}

// Keep only the final path component of a client-supplied name.
fn sanitize_filename(name: &str) -> String {
    std::path::Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_string()
}

fn render_preview_table(dataset: &Dataset, limit: usize) -> String {
    let rows = dataset.row_count().min(limit);

    let mut html = String::from("<table class=\"preview\">\n  <tr>");
    for column in &dataset.columns {
        html.push_str(&format!("<th>{}</th>", escape_html(&column.name)));
    }
    html.push_str("</tr>\n");

    for r in 0..rows {
        html.push_str("  <tr>");
        for column in &dataset.columns {
            let value = column.cells[r].as_deref().unwrap_or("");
            html.push_str(&format!(
                "<td>{}</td>",
                escape_html(value).replace('\n', "<br>")
            ));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</table>");
    html
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
