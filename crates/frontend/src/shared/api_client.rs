//! HTTP client for the comparison backend.
//!
//! The bearer token is read from the injected [`AuthContext`] on every
//! request. With cookie sessions enabled, non-GET requests first make sure the
//! `XSRF-TOKEN` cookie exists and echo it back in the `X-XSRF-TOKEN` header.

use contracts::shared::envelope::error_message_from_body;
use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{AbortSignal, RequestCredentials};

use super::api_utils::{api_origin, api_url, cookie_session_enabled, CSRF_COOKIE_PATH};
use crate::system::auth::context::AuthContext;

const XSRF_COOKIE: &str = "XSRF-TOKEN";
const XSRF_HEADER: &str = "X-XSRF-TOKEN";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Falha de comunicação: {0}")]
    Network(String),
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("Resposta inválida do servidor: {0}")]
    Decode(String),
    #[error("Assinatura obrigatória para acessar esta apresentação.")]
    MissingSignature,
    #[error("Requisição cancelada")]
    Aborted,
}

impl ApiError {
    fn from_gloo(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::JsError(js) if js.name == "AbortError" => ApiError::Aborted,
            gloo_net::Error::JsError(js) => ApiError::Network(js.message),
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, ApiError::Aborted)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Http { status: 401, .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    fn builder(self, url: &str) -> RequestBuilder {
        match self {
            Method::Get => Request::get(url),
            Method::Post => Request::post(url),
            Method::Put => Request::put(url),
            Method::Delete => Request::delete(url),
        }
    }

    fn has_body(self) -> bool {
        matches!(self, Method::Post | Method::Put)
    }
}

/// Read one cookie from a `document.cookie` string, URL-decoded
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        if key == name && !value.is_empty() {
            urlencoding::decode(value).ok().map(|v| v.into_owned())
        } else {
            None
        }
    })
}

fn document_cookie(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let html = document.dyn_into::<web_sys::HtmlDocument>().ok()?;
    cookie_value(&html.cookie().ok()?, name)
}

#[derive(Clone, Copy)]
pub struct ApiClient {
    auth: AuthContext,
    cookie_session: bool,
}

impl ApiClient {
    /// Bearer-token client
    pub fn new(auth: AuthContext) -> Self {
        Self {
            auth,
            cookie_session: false,
        }
    }

    /// Client that also sends cookies and the CSRF header
    pub fn with_cookie_session(auth: AuthContext) -> Self {
        Self {
            auth,
            cookie_session: true,
        }
    }

    /// Client for the build configuration: cookie session when
    /// `COMPARADOR_COOKIE_SESSION` is set, Bearer-token only otherwise
    pub fn from_config(auth: AuthContext) -> Self {
        if cookie_session_enabled() {
            Self::with_cookie_session(auth)
        } else {
            Self::new(auth)
        }
    }

    pub fn auth(&self) -> AuthContext {
        self.auth
    }

    async fn ensure_csrf_cookie(&self) -> Result<(), ApiError> {
        if document_cookie(XSRF_COOKIE).is_some() {
            return Ok(());
        }
        log::debug!("requesting CSRF cookie");
        let response = Request::get(&format!("{}{}", api_origin(), CSRF_COOKIE_PATH))
            .credentials(RequestCredentials::Include)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(ApiError::from_gloo)?;
        if !response.ok() {
            return Err(ApiError::Http {
                status: response.status(),
                message: "Não foi possível iniciar a sessão segura".to_string(),
            });
        }
        Ok(())
    }

    /// Send a request and decode the JSON response body
    pub async fn request<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        abort: Option<&AbortSignal>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        if self.cookie_session && method != Method::Get {
            self.ensure_csrf_cookie().await?;
        }

        let mut builder = method
            .builder(&api_url(path))
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .abort_signal(abort);

        if let Some(token) = self.auth.token() {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }
        if self.cookie_session {
            builder = builder.credentials(RequestCredentials::Include);
            if method != Method::Get {
                if let Some(xsrf) = document_cookie(XSRF_COOKIE) {
                    builder = builder.header(XSRF_HEADER, &xsrf);
                }
            }
        }

        let request = if method.has_body() {
            builder.json(&body.unwrap_or_else(|| Value::Object(Default::default())))
        } else {
            builder.build()
        }
        .map_err(ApiError::from_gloo)?;

        let response = request.send().await.map_err(ApiError::from_gloo)?;
        let status = response.status();
        let text = response.text().await.map_err(ApiError::from_gloo)?;
        let parsed: Option<Value> = serde_json::from_str(&text).ok();

        if !response.ok() {
            return Err(ApiError::Http {
                status,
                message: error_message_from_body(parsed.as_ref()),
            });
        }

        serde_json::from_value(parsed.unwrap_or(Value::Null))
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::Get, path, None, None).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.post_with_abort(path, body, None).await
    }

    pub async fn post_with_abort<T, B>(
        &self,
        path: &str,
        body: &B,
        abort: Option<&AbortSignal>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.request(Method::Post, path, Some(body), abort).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.request(Method::Put, path, Some(body), None).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::Delete, path, None, None).await
    }
}

/// Hook to access the API client provided by the app
pub fn use_api() -> ApiClient {
    leptos::prelude::use_context::<ApiClient>().expect("ApiClient not provided by App")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value() {
        let cookies = "laravel_session=abc; XSRF-TOKEN=eyJpdiI6%3D%3D; theme=dark";
        assert_eq!(
            cookie_value(cookies, "XSRF-TOKEN").as_deref(),
            Some("eyJpdiI6==")
        );
        assert_eq!(cookie_value(cookies, "missing"), None);
        assert_eq!(cookie_value("XSRF-TOKEN=", "XSRF-TOKEN"), None);
    }

    #[test]
    fn test_error_kinds() {
        let unauthorized = ApiError::Http {
            status: 401,
            message: "Unauthenticated.".into(),
        };
        assert!(unauthorized.is_unauthorized());
        assert_eq!(unauthorized.to_string(), "Unauthenticated.");
        assert!(ApiError::Aborted.is_aborted());
        assert_eq!(
            ApiError::MissingSignature.to_string(),
            "Assinatura obrigatória para acessar esta apresentação."
        );
    }
}
