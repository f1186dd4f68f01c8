//! fetch() adapter

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::error::{ConsoleError, Result};
use crate::platform::{HttpClient, HttpResponse, PostBody, PostRequest};

pub(crate) fn js_error(e: &JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

fn network(e: JsValue) -> ConsoleError {
    ConsoleError::Network(js_error(&e))
}

pub struct FetchClient;

impl FetchClient {
    async fn send(&self, request: web_sys::Request) -> Result<HttpResponse> {
        let window = web_sys::window().ok_or_else(|| ConsoleError::Network("no window".to_string()))?;
        let response: web_sys::Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(network)?
            .dyn_into()
            .map_err(network)?;
        let text = JsFuture::from(response.text().map_err(network)?).await.map_err(network)?;
        Ok(HttpResponse {
            status: response.status(),
            body: text.as_string().unwrap_or_default(),
        })
    }
}

impl HttpClient for FetchClient {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        let init = web_sys::RequestInit::new();
        init.set_method("GET");
        let request = web_sys::Request::new_with_str_and_init(url, &init).map_err(network)?;
        self.send(request).await
    }

    async fn post(&self, post: PostRequest) -> Result<HttpResponse> {
        let init = web_sys::RequestInit::new();
        init.set_method("POST");
        match &post.body {
            PostBody::Json(json) => init.set_body(&JsValue::from_str(json)),
            PostBody::Form(fields) => {
                let form = web_sys::FormData::new().map_err(network)?;
                for (name, value) in fields {
                    form.append_with_str(name, value).map_err(network)?;
                }
                init.set_body(&form);
            }
        }
        let request = web_sys::Request::new_with_str_and_init(&post.url, &init).map_err(network)?;
        let headers = request.headers();
        for (name, value) in &post.headers {
            headers.set(name, value).map_err(network)?;
        }
        self.send(request).await
    }
}
