mod common;

// std
use std::sync::Arc;
// crates.io
use axum::{
	Router,
	body::Body,
	http::{Method, Request, StatusCode, header},
	response::Response,
};
use http_body_util::BodyExt;
use httpmock::prelude::*;
use serde_json::{Value, json};
use tower::ServiceExt;
// self
use common::{CLIENT_ID, SECRET, TODAY, fake_relay};
use plaid_relay::{
	auth::TokenSecret,
	provider::PlaidClient,
	relay::Relay,
	server::{self, SESSION_HEADER},
	store::MemoryStore,
	url::Url,
};

fn build_app(server: &MockServer) -> Router {
	let base_url =
		Url::parse(&server.base_url()).expect("Mock provider base URL should parse successfully.");
	let client = PlaidClient::new(&base_url)
		.expect("Plaid client should build for the mock provider.")
		.with_credentials(Some(CLIENT_ID.into()), Some(TokenSecret::new(SECRET)));
	let relay = Relay::new(Arc::new(client), Arc::new(MemoryStore::default())).with_clock(|| TODAY);

	server::router(relay)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
	Request::builder()
		.method(Method::POST)
		.uri(uri)
		.header(header::CONTENT_TYPE, "application/json")
		.body(Body::from(body.to_string()))
		.expect("Request fixture should build.")
}

fn get(uri: &str) -> Request<Body> {
	Request::builder().uri(uri).body(Body::empty()).expect("Request fixture should build.")
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
	let response: Response =
		app.clone().oneshot(request).await.expect("Router should always produce a response.");
	let status = response.status();
	let bytes = response
		.into_body()
		.collect()
		.await
		.expect("Response body should be readable.")
		.to_bytes();
	let body = serde_json::from_slice(&bytes).expect("Response body should be JSON.");

	(status, body)
}

#[tokio::test]
async fn link_token_without_body_uses_demo_user() {
	let provider = MockServer::start_async().await;
	let app = build_app(&provider);
	let mock = provider
		.mock_async(|when, then| {
			when.method(POST)
				.path("/link/token/create")
				.json_body(json!({
					"client_name": "Blue Budget",
					"user": { "client_user_id": "demo-user-123" },
					"products": ["transactions"],
					"country_codes": ["US"],
					"language": "en",
				}));
			then.status(200).json_body(json!({ "link_token": "link-sandbox-demo" }));
		})
		.await;
	let request = Request::builder()
		.method(Method::POST)
		.uri("/link_token")
		.body(Body::empty())
		.expect("Request fixture should build.");
	let (status, body) = send(&app, request).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!({ "link_token": "link-sandbox-demo" }));

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn link_token_forwards_user_id() {
	let provider = MockServer::start_async().await;
	let app = build_app(&provider);
	let mock = provider
		.mock_async(|when, then| {
			when.method(POST).path("/link/token/create").json_body(json!({
				"client_name": "Blue Budget",
				"user": { "client_user_id": "user-99" },
				"products": ["transactions"],
				"country_codes": ["US"],
				"language": "en",
			}));
			then.status(200).json_body(json!({ "link_token": "link-sandbox-99" }));
		})
		.await;
	let (status, body) = send(&app, post_json("/link_token", json!({ "userId": "user-99" }))).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["link_token"], "link-sandbox-99");

	mock.assert_async().await;
}

#[tokio::test]
async fn transactions_require_an_exchange_first() {
	let provider = MockServer::start_async().await;
	let app = build_app(&provider);
	let mock = provider
		.mock_async(|when, then| {
			when.method(POST).path("/transactions/get");
			then.status(200).json_body(json!({}));
		})
		.await;
	let (status, body) = send(&app, get("/transactions")).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body, json!({ "error": "no_access_token" }));

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn exchange_then_transactions_round_trip() {
	let provider = MockServer::start_async().await;
	let app = build_app(&provider);
	let payload = json!({
		"accounts": [],
		"transactions": [{ "transaction_id": "txn-9", "amount": 19.99 }],
		"total_transactions": 1,
		"item": { "item_id": "item-9" },
	});
	let exchange = provider
		.mock_async(|when, then| {
			when.method(POST)
				.path("/item/public_token/exchange")
				.json_body(json!({ "public_token": "public-sandbox-9" }));
			then.status(200)
				.json_body(json!({ "access_token": "access-sandbox-9", "item_id": "item-9" }));
		})
		.await;
	let transactions = provider
		.mock_async(|when, then| {
			when.method(POST).path("/transactions/get").json_body(json!({
				"access_token": "access-sandbox-9",
				"start_date": "2024-02-15",
				"end_date": "2024-03-15",
				"options": { "count": 250 },
			}));
			then.status(200).json_body(payload.clone());
		})
		.await;
	let (status, body) = send(
		&app,
		post_json("/exchange_public_token", json!({ "public_token": "public-sandbox-9" })),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!({ "access_token": "access-sandbox-9" }));

	let (status, body) = send(&app, get("/transactions")).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, payload);

	exchange.assert_calls_async(1).await;
	transactions.assert_calls_async(1).await;
}

#[tokio::test]
async fn provider_failures_map_to_operation_codes() {
	let provider = MockServer::start_async().await;
	let app = build_app(&provider);
	let _mock = provider
		.mock_async(|when, then| {
			when.method(POST);
			then.status(400).json_body(json!({
				"error_type": "INVALID_REQUEST",
				"error_code": "INVALID_FIELD",
				"error_message": "detail that must stay server-side",
				"request_id": "req-1",
			}));
		})
		.await;
	let (status, body) = send(&app, post_json("/link_token", json!({}))).await;

	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(body, json!({ "error": "link_token_failed" }));

	let (status, body) =
		send(&app, post_json("/exchange_public_token", json!({ "public_token": "public-x" })))
			.await;

	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(body, json!({ "error": "exchange_failed" }));
}

#[tokio::test]
async fn transactions_failure_maps_to_transactions_failed() {
	let provider = MockServer::start_async().await;
	let app = build_app(&provider);
	let _exchange = provider
		.mock_async(|when, then| {
			when.method(POST).path("/item/public_token/exchange");
			then.status(200).json_body(json!({ "access_token": "access-sandbox-1" }));
		})
		.await;
	let _transactions = provider
		.mock_async(|when, then| {
			when.method(POST).path("/transactions/get");
			then.status(500).body("upstream exploded");
		})
		.await;
	let (status, _) =
		send(&app, post_json("/exchange_public_token", json!({ "public_token": "public-1" })))
			.await;

	assert_eq!(status, StatusCode::OK);

	let (status, body) = send(&app, get("/transactions")).await;

	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(body, json!({ "error": "transactions_failed" }));
}

#[tokio::test]
async fn exchange_without_public_token_fails_without_provider_call() {
	let provider = MockServer::start_async().await;
	let app = build_app(&provider);
	let mock = provider
		.mock_async(|when, then| {
			when.any_request();
			then.status(200).json_body(json!({ "access_token": "should-not-be-used" }));
		})
		.await;
	let (status, body) = send(&app, post_json("/exchange_public_token", json!({}))).await;

	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(body, json!({ "error": "exchange_failed" }));

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn session_header_scopes_tokens() {
	let (relay, _provider, _store) = fake_relay();
	let app = server::router(relay);
	let mut exchange =
		post_json("/exchange_public_token", json!({ "public_token": "public-tab-a" }));

	exchange.headers_mut().insert(SESSION_HEADER, "tab-a".parse().expect("Header should parse."));

	let (status, _) = send(&app, exchange).await;

	assert_eq!(status, StatusCode::OK);

	let mut other = get("/transactions");

	other.headers_mut().insert(SESSION_HEADER, "tab-b".parse().expect("Header should parse."));

	let (status, body) = send(&app, other).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body, json!({ "error": "no_access_token" }));

	let (status, _) = send(&app, get("/transactions")).await;

	assert_eq!(status, StatusCode::BAD_REQUEST, "The default session must stay empty.");

	let mut same = get("/transactions");

	same.headers_mut().insert(SESSION_HEADER, "tab-a".parse().expect("Header should parse."));

	let (status, body) = send(&app, same).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["transactions"][0]["transaction_id"], "txn-1");
}

#[tokio::test]
async fn malformed_session_header_is_rejected() {
	let (relay, provider, _store) = fake_relay();
	let app = server::router(relay);
	let mut request = get("/transactions");

	request.headers_mut().insert(SESSION_HEADER, "".parse().expect("Header should parse."));

	let (status, body) = send(&app, request).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body, json!({ "error": "invalid_session" }));
	assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn cors_allows_any_origin() {
	let (relay, _provider, _store) = fake_relay();
	let app = server::router(relay);
	let preflight = Request::builder()
		.method(Method::OPTIONS)
		.uri("/link_token")
		.header(header::ORIGIN, "https://budget.example.com")
		.header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
		.body(Body::empty())
		.expect("Preflight fixture should build.");
	let response =
		app.clone().oneshot(preflight).await.expect("Router should answer preflight requests.");

	assert!(response.status().is_success());
	assert_eq!(
		response
			.headers()
			.get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
			.and_then(|value| value.to_str().ok()),
		Some("*")
	);
}

#[tokio::test]
async fn empty_json_body_mints_for_demo_user() {
	let (relay, provider, _store) = fake_relay();
	let app = server::router(relay);
	let request = Request::builder()
		.method(Method::POST)
		.uri("/link_token")
		.header(header::CONTENT_TYPE, "application/json")
		.body(Body::empty())
		.expect("Request fixture should build.");
	let (status, body) = send(&app, request).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!({ "link_token": "link-sandbox-demo-user-123" }));
	assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn undecodable_bodies_use_operation_codes() {
	let (relay, provider, store) = fake_relay();
	let app = server::router(relay);
	let cases = [
		("/link_token", json!({ "userId": 42 }), "link_token_failed"),
		("/exchange_public_token", json!({ "public_token": 123 }), "exchange_failed"),
	];

	for (uri, payload, code) in cases {
		let (status, body) = send(&app, post_json(uri, payload)).await;

		assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri} should fail with a 500.");
		assert_eq!(body, json!({ "error": code }));
	}

	let request = Request::builder()
		.method(Method::POST)
		.uri("/exchange_public_token")
		.header(header::CONTENT_TYPE, "application/json")
		.body(Body::from("{not json"))
		.expect("Request fixture should build.");
	let (status, body) = send(&app, request).await;

	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(body, json!({ "error": "exchange_failed" }));
	assert_eq!(provider.calls(), 0);
	assert!(store.is_empty());
}

#[tokio::test]
async fn unknown_environment_fails_at_first_call() {
	let client = PlaidClient::for_environment_name("staging")
		.expect("Unknown environments should still build.")
		.with_credentials(Some(CLIENT_ID.into()), Some(TokenSecret::new(SECRET)));
	let relay = Relay::new(Arc::new(client), Arc::new(MemoryStore::default())).with_clock(|| TODAY);
	let app = server::router(relay);
	let (status, body) = send(&app, post_json("/link_token", json!({}))).await;

	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(body, json!({ "error": "link_token_failed" }));
}
