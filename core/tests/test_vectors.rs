//! Verify client request building and response mapping against JSON
//! vectors stored in `test-vectors/`.
//!
//! Each vector case describes the inputs, the exact request the client
//! must produce, a simulated response, and the expected domain result.
//! Requests and results are compared as parsed JSON, not raw strings, so
//! field ordering never causes false negatives.

use std::sync::{Arc, Mutex};

use brigade_core::{
    ApiError, ClientOptions, CreateJobParams, HttpExecutor, HttpRequest, HttpResponse,
    IdentityClient, JobClient, ListParams, LoginParams, TransportError,
    UpdateApplicationStatusParams,
};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:8080";

/// Returns one canned response and records the request that triggered it.
struct RecordingExecutor {
    response: Mutex<Option<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingExecutor {
    fn new(response: HttpResponse) -> Self {
        Self {
            response: Mutex::new(Some(response)),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpExecutor for RecordingExecutor {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.response
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| TransportError("script exhausted".to_string()))
    }
}

fn executor(case: &Value) -> Arc<RecordingExecutor> {
    let sim = &case["simulated_response"];
    let body = match &sim["body"] {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    Arc::new(RecordingExecutor::new(HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        body,
    }))
}

fn options(executor: Arc<RecordingExecutor>) -> ClientOptions {
    ClientOptions {
        base_url: Some(BASE_URL.to_string()),
        http: Some(executor),
    }
}

fn verify_request(name: &str, expected: &Value, request: &HttpRequest) {
    let path = expected["path"].as_str().unwrap();
    assert_eq!(request.url, format!("{BASE_URL}{path}"), "{name}: url");

    let auth = request
        .headers
        .iter()
        .find(|(n, _)| n == "authorization")
        .map(|(_, v)| v.clone());
    match expected["authorization"].as_str() {
        Some(value) => assert_eq!(auth.as_deref(), Some(value), "{name}: authorization"),
        None => assert_eq!(auth, None, "{name}: authorization"),
    }

    let content_type = request
        .headers
        .iter()
        .find(|(n, _)| n == "content-type")
        .map(|(_, v)| v.as_str().to_string());
    assert_eq!(
        content_type.as_deref(),
        Some("application/json"),
        "{name}: content-type"
    );

    let body: Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, expected["body"], "{name}: body");
}

fn check<T: serde::Serialize>(name: &str, case: &Value, result: Result<T, ApiError>) {
    if let Some(expected_error) = case.get("expected_error") {
        let err = match result {
            Err(err) => err,
            Ok(_) => panic!("{name}: expected an error"),
        };
        assert_eq!(err.code(), expected_error["code"].as_str(), "{name}: code");
        assert_eq!(
            err.status(),
            expected_error["status"].as_u64().map(|s| s as u16),
            "{name}: status"
        );
    } else {
        let value = match result {
            Ok(value) => serde_json::to_value(value).unwrap(),
            Err(err) => panic!("{name}: unexpected error: {err}"),
        };
        assert_eq!(value, case["expected"], "{name}: result");
    }
}

#[test]
fn auth_test_vectors() {
    let raw = include_str!("../../test-vectors/auth.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let exec = executor(case);
        let client = IdentityClient::new(options(exec.clone()));

        match case["op"].as_str().unwrap() {
            "login" => {
                let params: LoginParams = serde_json::from_value(case["input"].clone()).unwrap();
                check(name, case, client.login(&params));
            }
            "get_me" => {
                let token = case["input"]["access_token"].as_str().unwrap();
                check(name, case, client.get_me(token));
            }
            "refresh" => {
                let token = case["input"]["refresh_token"].as_str().unwrap();
                check(name, case, client.refresh(token));
            }
            "logout" => {
                let token = case["input"]["refresh_token"].as_str().unwrap();
                assert!(client.logout(token).is_ok(), "{name}: expected success");
            }
            other => panic!("unknown op: {other}"),
        }

        verify_request(name, &case["expected_request"], &exec.requests()[0]);
    }
}

#[test]
fn job_test_vectors() {
    let raw = include_str!("../../test-vectors/jobs.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let exec = executor(case);
        let client = JobClient::new(options(exec.clone()));
        let token = case["access_token"].as_str();

        match case["op"].as_str().unwrap() {
            "create_job" => {
                let params: CreateJobParams =
                    serde_json::from_value(case["input"].clone()).unwrap();
                check(name, case, client.create_job(&params, token.unwrap()));
            }
            "get_job" => {
                let job_id = case["input"]["job_id"].as_str().unwrap();
                check(name, case, client.get_job(job_id, token));
            }
            "list_my_jobs" => {
                let params: ListParams = serde_json::from_value(case["input"].clone()).unwrap();
                check(name, case, client.list_my_jobs(&params, token.unwrap()));
            }
            "search_jobs" => {
                let params = serde_json::from_value(case["input"].clone()).unwrap();
                check(name, case, client.search_jobs(&params, token));
            }
            "update_application_status" => {
                let params: UpdateApplicationStatusParams =
                    serde_json::from_value(case["input"].clone()).unwrap();
                check(
                    name,
                    case,
                    client.update_application_status(&params, token.unwrap()),
                );
            }
            other => panic!("unknown op: {other}"),
        }

        verify_request(name, &case["expected_request"], &exec.requests()[0]);
    }
}
