use crate::model::{Chapter, Question};
use serde::{Deserialize, Serialize};

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_NATIVE_BASE: &str = "http://127.0.0.1:8001";

const CHAPTERS_PATH: &str = "/api/chapters";
const GENERATE_PATH: &str = "/api/generate-questions";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    chapter_id: &'a str,
    num_questions: u32,
}

#[derive(Debug, Deserialize)]
struct ChapterList {
    #[serde(default)]
    chapters: Vec<Chapter>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    questions: Vec<Question>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Error fields a failing endpoint may attach to any status code.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Server-supplied error text when the body carries one, "HTTP {status}" otherwise.
fn http_error_text(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error.or(b.message))
        .unwrap_or_else(|| format!("HTTP {status}"))
}

fn parse_chapters(body: &str) -> Result<Vec<Chapter>, String> {
    let list: ChapterList = serde_json::from_str(body)
        .map_err(|err| format!("Invalid chapter list from the server: {err}"))?;
    Ok(list.chapters)
}

/// Applies the generation success contract: `success: true` plus a
/// non-empty `questions` array. An empty batch is rejected here so the
/// quiz can never finish with a zero-question score.
fn parse_generated(body: &str) -> Result<Vec<Question>, String> {
    let response: GenerateResponse = serde_json::from_str(body)
        .map_err(|err| format!("Invalid response from the server: {err}"))?;
    if !response.success {
        return Err(response
            .error
            .or(response.message)
            .unwrap_or_else(|| "Unknown error".to_string()));
    }
    if response.questions.is_empty() {
        return Err("The server returned no questions".to_string());
    }
    Ok(response.questions)
}

fn normalize_base(value: &str) -> Option<String> {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn server_base() -> String {
    std::env::var("CHAPTER_QUIZ_SERVER")
        .ok()
        .as_deref()
        .and_then(normalize_base)
        .unwrap_or_else(|| DEFAULT_NATIVE_BASE.to_string())
}

// In the browser the widget talks to its own origin unless an override
// is provided at build time, via a meta tag, or via local storage.
#[cfg(target_arch = "wasm32")]
fn server_base() -> String {
    base_from_build_env()
        .or_else(base_from_meta)
        .or_else(base_from_local_storage)
        .unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
fn base_from_build_env() -> Option<String> {
    option_env!("CHAPTER_QUIZ_SERVER").and_then(normalize_base)
}

#[cfg(target_arch = "wasm32")]
fn base_from_meta() -> Option<String> {
    let window = web_sys::window()?;
    let document = window.document()?;
    let meta = document
        .query_selector("meta[name='chapter-quiz-server']")
        .ok()??;

    meta.get_attribute("content")
        .as_deref()
        .and_then(normalize_base)
}

#[cfg(target_arch = "wasm32")]
fn base_from_local_storage() -> Option<String> {
    let window = web_sys::window()?;
    let storage = window.local_storage().ok()??;
    storage
        .get_item("chapter_quiz_server")
        .ok()?
        .as_deref()
        .and_then(normalize_base)
}

#[cfg(not(target_arch = "wasm32"))]
fn http_text(
    method: &str,
    url: &str,
    body: Option<String>,
) -> Result<(u16, String), String> {
    let client = reqwest::blocking::Client::new();
    let request = match method {
        "POST" => {
            let mut req = client.post(url);
            if let Some(json) = body {
                req = req
                    .header(reqwest::header::CONTENT_TYPE, "application/json")
                    .body(json);
            }
            req
        }
        _ => client.get(url),
    };

    let response = request
        .send()
        .map_err(|err| format!("Could not reach the quiz server: {err}"))?;
    let status = response.status().as_u16();
    let text = response
        .text()
        .map_err(|err| format!("Could not read the server response: {err}"))?;
    Ok((status, text))
}

#[cfg(target_arch = "wasm32")]
async fn http_text(
    method: &str,
    url: &str,
    body: Option<String>,
) -> Result<(u16, String), String> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::JsValue;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    if let Some(json) = &body {
        opts.set_body(&JsValue::from_str(json));
    }

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|err| format!("Could not build the request: {err:?}"))?;
    if body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|err| format!("Could not set request headers: {err:?}"))?;
    }

    let window =
        web_sys::window().ok_or_else(|| "No window in this environment".to_string())?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|err| format!("Could not reach the quiz server: {err:?}"))?;
    let response: Response = resp_value
        .dyn_into()
        .map_err(|_| "Fetch did not yield a valid response".to_string())?;

    let text_promise = response
        .text()
        .map_err(|err| format!("Could not read the server response: {err:?}"))?;
    let text = JsFuture::from(text_promise)
        .await
        .map_err(|err| format!("Could not read the server response: {err:?}"))?
        .as_string()
        .ok_or_else(|| "Server response body was not text".to_string())?;

    Ok((response.status(), text))
}

fn check_status(status: u16, body: &str) -> Result<(), String> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(http_error_text(status, body))
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn fetch_chapters() -> Result<Vec<Chapter>, String> {
    let url = format!("{}{CHAPTERS_PATH}", server_base());
    let (status, body) = http_text("GET", &url, None)?;
    check_status(status, &body)?;
    parse_chapters(&body)
}

#[cfg(target_arch = "wasm32")]
pub async fn fetch_chapters() -> Result<Vec<Chapter>, String> {
    let url = format!("{}{CHAPTERS_PATH}", server_base());
    let (status, body) = http_text("GET", &url, None).await?;
    check_status(status, &body)?;
    parse_chapters(&body)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn generate_questions(chapter_id: &str, num_questions: u32) -> Result<Vec<Question>, String> {
    let url = format!("{}{GENERATE_PATH}", server_base());
    let payload = serde_json::to_string(&GenerateRequest {
        chapter_id,
        num_questions,
    })
    .map_err(|err| format!("Could not serialize the request: {err}"))?;
    let (status, body) = http_text("POST", &url, Some(payload))?;
    check_status(status, &body)?;
    parse_generated(&body)
}

#[cfg(target_arch = "wasm32")]
pub async fn generate_questions(
    chapter_id: &str,
    num_questions: u32,
) -> Result<Vec<Question>, String> {
    let url = format!("{}{GENERATE_PATH}", server_base());
    let payload = serde_json::to_string(&GenerateRequest {
        chapter_id,
        num_questions,
    })
    .map_err(|err| format!("Could not serialize the request: {err}"))?;
    let (status, body) = http_text("POST", &url, Some(payload)).await?;
    check_status(status, &body)?;
    parse_generated(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chapter_list_without_chapters_key_is_empty() {
        assert_eq!(parse_chapters("{}").unwrap(), vec![]);
    }

    #[test]
    fn chapter_list_preserves_server_order() {
        let body = r#"{"chapters":[{"id":"ch2","title":"Ch 2"},{"id":"ch1","title":"Ch 1"}]}"#;
        let chapters = parse_chapters(body).unwrap();
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].id, "ch2");
        assert_eq!(chapters[1].id, "ch1");
    }

    #[test]
    fn generation_success_yields_the_questions() {
        let body = r#"{
            "success": true,
            "chapter_id": "ch1",
            "questions": [
                {
                    "question": "Q1",
                    "options": ["a", "b", "c", "d"],
                    "correct": 2,
                    "explanation": "because"
                }
            ]
        }"#;
        let questions = parse_generated(body).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct, 2);
        assert_eq!(questions[0].explanation.as_deref(), Some("because"));
    }

    #[test]
    fn generation_failure_surfaces_the_server_error_verbatim() {
        let body = r#"{"success": false, "error": "quota exceeded"}"#;
        assert_eq!(parse_generated(body).unwrap_err(), "quota exceeded");
    }

    #[test]
    fn generation_failure_without_error_field_is_unknown() {
        assert_eq!(parse_generated(r#"{"success": false}"#).unwrap_err(), "Unknown error");
    }

    #[test]
    fn unparseable_generation_body_is_an_error() {
        assert!(parse_generated("<html>oops</html>").is_err());
    }

    #[test]
    fn empty_question_batch_is_rejected() {
        let body = r#"{"success": true, "questions": []}"#;
        assert_eq!(
            parse_generated(body).unwrap_err(),
            "The server returned no questions"
        );
    }

    #[test]
    fn generate_request_payload_carries_the_count() {
        let payload = serde_json::to_string(&GenerateRequest {
            chapter_id: "ch1",
            num_questions: 5,
        })
        .unwrap();
        assert_eq!(payload, r#"{"chapter_id":"ch1","num_questions":5}"#);
    }

    #[test]
    fn http_error_prefers_the_body_error_field() {
        assert_eq!(
            http_error_text(404, r#"{"success": false, "error": "Chapter not found"}"#),
            "Chapter not found"
        );
        assert_eq!(
            http_error_text(502, r#"{"message": "bad gateway"}"#),
            "bad gateway"
        );
    }

    #[test]
    fn http_error_falls_back_to_the_status_code() {
        assert_eq!(http_error_text(500, "not json"), "HTTP 500");
        assert_eq!(http_error_text(503, r#"{"success": false}"#), "HTTP 503");
    }

    #[test]
    fn base_normalization_strips_trailing_slashes() {
        assert_eq!(
            normalize_base("http://localhost:8001/"),
            Some("http://localhost:8001".to_string())
        );
        assert_eq!(normalize_base("   "), None);
    }
}
