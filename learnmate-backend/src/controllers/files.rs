//! Multipart file upload for task descriptions.

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use futures_util::{StreamExt, TryStreamExt};

use crate::files;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/upload-file").route(web::post().to(upload_file)));
}

/// Accept a .txt or .docx upload and return its extracted text so the client
/// can use it as a task description.
async fn upload_file(mut payload: Multipart) -> impl Responder {
    while let Ok(Some(mut field)) = payload.try_next().await {
        let Some(filename) = field
            .content_disposition()
            .get_filename()
            .map(str::to_string)
        else {
            continue;
        };

        if !files::is_supported(&filename) {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "detail": files::UNSUPPORTED_TYPE_MESSAGE
            }));
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            match chunk {
                Ok(data) => bytes.extend_from_slice(&data),
                Err(e) => {
                    log::error!("[API] upload read failed: {}", e);
                    return HttpResponse::InternalServerError().json(serde_json::json!({
                        "detail": format!("Failed to read upload: {}", e)
                    }));
                }
            }
        }

        return match files::extract_text(&filename, &bytes) {
            Ok(content) => HttpResponse::Ok().json(serde_json::json!({
                "content": content,
                "filename": filename
            })),
            Err(e) => {
                log::error!("[API] upload extraction failed: {}", e);
                HttpResponse::InternalServerError().json(serde_json::json!({ "detail": e }))
            }
        };
    }

    HttpResponse::BadRequest().json(serde_json::json!({
        "detail": "No file field in upload."
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    fn multipart_body(filename: &str, content: &str) -> (String, String) {
        let boundary = "----learnmate-test-boundary";
        let body = format!(
            "--{b}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{f}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n\
             {c}\r\n\
             --{b}--\r\n",
            b = boundary,
            f = filename,
            c = content
        );
        (
            format!("multipart/form-data; boundary={}", boundary),
            body,
        )
    }

    #[actix_web::test]
    async fn test_upload_txt_returns_content() {
        let app = test::init_service(App::new().configure(config)).await;
        let (content_type, body) = multipart_body("task.txt", "Build a web scraper");

        let req = test::TestRequest::post()
            .uri("/api/upload-file")
            .insert_header(("content-type", content_type))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        let json: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(json["content"], "Build a web scraper");
        assert_eq!(json["filename"], "task.txt");
    }

    #[actix_web::test]
    async fn test_upload_unsupported_type_is_rejected() {
        let app = test::init_service(App::new().configure(config)).await;
        let (content_type, body) = multipart_body("report.pdf", "%PDF-1.4");

        let req = test::TestRequest::post()
            .uri("/api/upload-file")
            .insert_header(("content-type", content_type))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
        let json: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(json["detail"], crate::files::UNSUPPORTED_TYPE_MESSAGE);
    }
}
