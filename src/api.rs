//! Task API Client
//!
//! Thin async bindings over the browser `fetch` API. Every request carries
//! the static basic-auth credential pair; responses decode through
//! `serde_wasm_bindgen`.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use crate::config::ApiConfig;
use crate::models::{ErrorBody, Task};

/// Error from a task API call.
///
/// `status` is `None` for transport failures (the fetch itself rejected);
/// otherwise it carries the HTTP status of the non-2xx response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    fn transport(err: JsValue) -> Self {
        Self {
            status: None,
            message: js_error_message(&err),
        }
    }

    fn decode(message: impl std::fmt::Display) -> Self {
        Self {
            status: None,
            message: format!("Invalid server response: {}", message),
        }
    }
}

/// `Authorization` header value for the configured credential pair.
pub fn basic_auth(config: &ApiConfig) -> String {
    let pair = format!("{}:{}", config.username, config.password);
    format!("Basic {}", STANDARD.encode(pair))
}

fn js_error_message(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        String::from(error.to_string())
    } else {
        err.as_string()
            .unwrap_or_else(|| "Request failed".to_string())
    }
}

#[derive(Serialize)]
struct CreateTaskBody<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct UpdateTaskBody<'a> {
    name: &'a str,
    done: bool,
}

// ========================
// Task Calls
// ========================

pub async fn get_tasks(config: &ApiConfig) -> Result<Vec<Task>, ApiError> {
    let resp = send(config, "GET", &config.tasks_url(None), None).await?;
    decode_json(&resp).await
}

pub async fn create_task(config: &ApiConfig, name: &str) -> Result<Task, ApiError> {
    let body = serde_json::to_string(&CreateTaskBody { name }).map_err(ApiError::decode)?;
    let resp = send(config, "POST", &config.tasks_url(None), Some(&body)).await?;
    decode_json(&resp).await
}

pub async fn update_task(
    config: &ApiConfig,
    id: &str,
    name: &str,
    done: bool,
) -> Result<Task, ApiError> {
    let body = serde_json::to_string(&UpdateTaskBody { name, done }).map_err(ApiError::decode)?;
    let resp = send(config, "PUT", &config.tasks_url(Some(id)), Some(&body)).await?;
    decode_json(&resp).await
}

pub async fn delete_task(config: &ApiConfig, id: &str) -> Result<(), ApiError> {
    // Success needs no body
    send(config, "DELETE", &config.tasks_url(Some(id)), None).await?;
    Ok(())
}

// ========================
// Fetch Plumbing
// ========================

/// Issue one authenticated request. A rejected fetch becomes a transport
/// error; a non-2xx response becomes an [`ApiError`] carrying the error
/// body's `message` (falling back to the status text).
async fn send(
    config: &ApiConfig,
    method: &str,
    url: &str,
    body: Option<&str>,
) -> Result<Response, ApiError> {
    let headers = Headers::new().map_err(ApiError::transport)?;
    headers
        .set("Authorization", &basic_auth(config))
        .map_err(ApiError::transport)?;

    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_headers(&headers);
    if let Some(body) = body {
        headers
            .set("Content-Type", "application/json")
            .map_err(ApiError::transport)?;
        opts.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(url, &opts).map_err(ApiError::transport)?;
    let window = web_sys::window().ok_or_else(|| ApiError {
        status: None,
        message: "No window object".to_string(),
    })?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(ApiError::transport)?;
    let resp: Response = resp_value.dyn_into().map_err(ApiError::transport)?;

    if resp.ok() {
        Ok(resp)
    } else {
        Err(error_from_response(&resp).await)
    }
}

async fn error_from_response(resp: &Response) -> ApiError {
    let status = resp.status();
    let message = match read_json(resp).await {
        Ok(value) => serde_wasm_bindgen::from_value::<ErrorBody>(value)
            .map(|body| body.message)
            .unwrap_or_else(|_| resp.status_text()),
        Err(_) => resp.status_text(),
    };
    ApiError {
        status: Some(status),
        message,
    }
}

async fn read_json(resp: &Response) -> Result<JsValue, JsValue> {
    JsFuture::from(resp.json()?).await
}

async fn decode_json<T: serde::de::DeserializeOwned>(resp: &Response) -> Result<T, ApiError> {
    let value = read_json(resp).await.map_err(ApiError::transport)?;
    serde_wasm_bindgen::from_value(value).map_err(ApiError::decode)
}
