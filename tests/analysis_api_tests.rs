// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Analysis submission and history over HTTP.

use axum::http::StatusCode;
use hairlens_api::config::Config;
use serde_json::json;

mod common;
use common::{body_json, create_test_app, create_test_app_with, send_json, submission, sync_user};

#[tokio::test]
async fn test_credits_run_out_after_two_submissions() {
    let (app, _state) = create_test_app().await;
    sync_user(&app, "user_abc").await;

    let response = send_json(&app, "POST", "/analysis", Some(submission("user_abc"))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["remainingCredits"], 30);
    assert_eq!(body["analysis"]["topLabel"], "Dandruff");
    assert_eq!(body["analysis"]["topProbability"], 0.8);
    assert_eq!(body["analysis"]["predictions"].as_array().unwrap().len(), 3);

    let response = send_json(&app, "POST", "/analysis", Some(submission("user_abc"))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["remainingCredits"], 10);

    let response = send_json(&app, "POST", "/analysis", Some(submission("user_abc"))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"], "insufficient_credits");
    assert_eq!(body["required"], 20);
    assert_eq!(body["balance"], 10);

    let response = send_json(&app, "GET", "/analysis/user_abc", None).await;
    assert_eq!(body_json(response).await["analyses"].as_array().unwrap().len(), 2);

    let response = send_json(&app, "GET", "/user/user_abc", None).await;
    assert_eq!(body_json(response).await["user"]["credits"], 10);
}

#[tokio::test]
async fn test_submission_for_unknown_user_is_not_found() {
    let (app, _state) = create_test_app().await;

    let response = send_json(&app, "POST", "/analysis", Some(submission("ghost"))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The workflow never provisions users on its own.
    let response = send_json(&app, "GET", "/user/ghost", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_tie_keeps_first_maximum() {
    let (app, _state) = create_test_app().await;
    sync_user(&app, "user_abc").await;

    let body = json!({
        "externalId": "user_abc",
        "imageRef": "https://example.com/scalp.jpg",
        "predictions": [
            { "label": "A", "probability": 0.4 },
            { "label": "B", "probability": 0.9 },
            { "label": "C", "probability": 0.9 }
        ]
    });
    let response = send_json(&app, "POST", "/analysis", Some(body)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["analysis"]["topLabel"], "B");
}

#[tokio::test]
async fn test_invalid_submissions_are_rejected_without_charge() {
    let (app, _state) = create_test_app().await;
    sync_user(&app, "user_abc").await;

    let empty = json!({
        "externalId": "user_abc",
        "imageRef": "img",
        "predictions": []
    });
    let out_of_range = json!({
        "externalId": "user_abc",
        "imageRef": "img",
        "predictions": [{ "label": "A", "probability": 1.5 }]
    });
    let missing_predictions = json!({
        "externalId": "user_abc",
        "imageRef": "img"
    });
    let blank_label = json!({
        "externalId": "user_abc",
        "imageRef": "img",
        "predictions": [{ "label": "   ", "probability": 0.9 }]
    });

    for body in [empty, out_of_range, missing_predictions, blank_label] {
        let response = send_json(&app, "POST", "/analysis", Some(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let response = send_json(&app, "GET", "/user/user_abc", None).await;
    let user = body_json(response).await["user"].clone();
    assert_eq!(user["credits"], 50);
    assert_eq!(user["analysisCount"], 0);
}

#[tokio::test]
async fn test_legacy_frontend_field_names_are_accepted() {
    let (app, _state) = create_test_app().await;
    sync_user(&app, "user_abc").await;

    let body = json!({
        "clerkId": "user_abc",
        "imageUrl": "data:image/png;base64,AAAA",
        "predictions": [
            { "className": "Healthy", "probability": 0.7 },
            { "className": "Oily", "probability": 0.3 }
        ]
    });
    let response = send_json(&app, "POST", "/analysis", Some(body)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let analysis = body_json(response).await["analysis"].clone();
    assert_eq!(analysis["topLabel"], "Healthy");
    assert_eq!(analysis["imageRef"], "data:image/png;base64,AAAA");
}

#[tokio::test]
async fn test_history_limit_returns_newest_first() {
    let config = Config {
        analysis_cost: 1,
        ..Config::default()
    };
    let (app, _state) = create_test_app_with(config).await;
    sync_user(&app, "user_abc").await;

    for i in 0..5 {
        let body = json!({
            "externalId": "user_abc",
            "imageRef": format!("img-{i}"),
            "predictions": [{ "label": format!("label-{i}"), "probability": 0.5 }]
        });
        let response = send_json(&app, "POST", "/analysis", Some(body)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = send_json(&app, "GET", "/analysis/user_abc?limit=2", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let analyses = body_json(response).await["analyses"].clone();
    let labels: Vec<&str> = analyses
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["topLabel"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["label-4", "label-3"]);

    // Default limit is 10; an oversized limit is simply capped by the data.
    let response = send_json(&app, "GET", "/analysis/user_abc", None).await;
    assert_eq!(body_json(response).await["analyses"].as_array().unwrap().len(), 5);
    let response = send_json(&app, "GET", "/analysis/user_abc?limit=1000", None).await;
    assert_eq!(body_json(response).await["analyses"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_history_for_unknown_user_is_not_found() {
    let (app, _state) = create_test_app().await;

    let response = send_json(&app, "GET", "/analysis/ghost?limit=3", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (app, _state) = create_test_app().await;

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/analysis")
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_history_limit_beyond_u32_is_accepted() {
    let (app, _state) = create_test_app().await;
    sync_user(&app, "user_abc").await;
    let response = send_json(&app, "POST", "/analysis", Some(submission("user_abc"))).await;
    assert_eq!(response.status(), StatusCode::OK);

    for uri in [
        "/analysis/user_abc?limit=5000000000",
        "/analysis/user_abc?limit=18446744073709551615",
    ] {
        let response = send_json(&app, "GET", uri, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["analyses"].as_array().unwrap().len(), 1);
    }
}

#[tokio::test]
async fn test_bad_history_limit_is_json_bad_request() {
    let (app, _state) = create_test_app().await;
    sync_user(&app, "user_abc").await;

    for uri in [
        "/analysis/user_abc?limit=abc",
        "/analysis/user_abc?limit=-1",
        "/analysis/user_abc?limit=18446744073709551616",
    ] {
        let response = send_json(&app, "GET", uri, None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "bad_request");
        assert!(body["details"].is_string());
    }
}
