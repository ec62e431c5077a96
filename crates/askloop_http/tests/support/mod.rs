use askloop_core::Store;
use askloop_http::AppState;
use serde_json::Value;
use std::sync::Arc;
use warp::http::Response;
use warp::hyper::body::Bytes;

pub fn test_state() -> AppState {
    AppState::new(Arc::new(Store::open_in_memory().unwrap()))
}

#[allow(dead_code)]
pub fn json_body(response: &Response<Bytes>) -> Value {
    serde_json::from_slice(response.body()).unwrap()
}

#[allow(dead_code)]
pub fn text_body(response: &Response<Bytes>) -> String {
    String::from_utf8(response.body().to_vec()).unwrap()
}
