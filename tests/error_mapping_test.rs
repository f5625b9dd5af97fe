mod common;

use common::{start_fake_influx, test_client, test_config};
use influxdb_client::models::Organization;
use influxdb_client::{
    exception_from_response, operations, ApiException, CallOptions, ExceptionFactory,
    InfluxClient, InfluxError, NoAuth,
};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MISSING_ORG: &str = "020f755c3c082000";

/// With the default factory a 404 is data: no error, no body
#[tokio::test]
async fn test_not_found_is_none_by_default() {
    let _ = env_logger::try_init();

    let server = start_fake_influx().await;
    let client = test_client(&server);

    let org = client
        .organizations()
        .get_orgs_id(MISSING_ORG, &CallOptions::default())
        .await
        .expect("404 should not raise without a factory");
    assert!(org.is_none());
}

/// A factory that elects to raise on 404 turns it into a typed error
#[tokio::test]
async fn test_not_found_raises_with_factory() {
    let _ = env_logger::try_init();

    let server = start_fake_influx().await;
    let config = test_config(&server)
        .exception_factory(ExceptionFactory::new(|operation, response| {
            (response.status == 404).then(|| exception_from_response(operation, response))
        }))
        .expect("First registration succeeds")
        .build();
    let client = InfluxClient::new(config).unwrap();

    let err = client
        .organizations()
        .get_orgs_id(MISSING_ORG, &CallOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    match err {
        InfluxError::Api(exception) => {
            assert_eq!(exception.operation, "GetOrgsID");
            assert_eq!(exception.message, "organization not found");
            assert!(exception.body_text().contains("not found"));
            assert!(exception
                .headers
                .get("content-type")
                .is_some_and(|ct| ct.contains("json")));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

/// Factories can build their own exception values per operation
#[tokio::test]
async fn test_factory_sees_operation_name() {
    let server = start_fake_influx().await;
    let config = test_config(&server)
        .exception_factory(ExceptionFactory::new(|operation, response| {
            (operation == "DeleteOrgsID" && response.status == 404).then(|| {
                ApiException::new(
                    operation,
                    response.status,
                    response.headers.clone(),
                    response.body.clone(),
                    "nothing to delete",
                )
            })
        }))
        .unwrap()
        .build();
    let client = InfluxClient::new(config).unwrap();
    let opts = CallOptions::default();

    // GetOrgsID is not raised by this factory
    assert!(client
        .organizations()
        .get_orgs_id(MISSING_ORG, &opts)
        .await
        .unwrap()
        .is_none());

    let err = client
        .organizations()
        .delete_orgs_id(MISSING_ORG, &opts)
        .await
        .unwrap_err();
    assert!(matches!(err, InfluxError::Api(ref e) if e.message == "nothing to delete"));
}

/// A second handler in the slot is rejected before anything is sent
#[tokio::test]
async fn test_double_registration_fails_fast() {
    let server = MockServer::start().await;

    let result = test_config(&server)
        .exception_factory(ExceptionFactory::raise_for_status())
        .and_then(|builder| builder.exception_factory(ExceptionFactory::never()));

    assert!(matches!(result, Err(InfluxError::Config(_))));
    let received = server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
}

/// A success payload with the wrong shape is a deserialization error, not an API error
#[tokio::test]
async fn test_wrong_shape_is_deserialize_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/orgs/0a00000000000001"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_string(r#"{"id": 42, "name": ["not", "a", "string"]}"#),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .invoke::<Organization>(
            &operations::GET_ORGS_ID,
            operations::GET_ORGS_ID
                .request()
                .path_param("orgID", "0a00000000000001"),
            None,
        )
        .await
        .unwrap_err();

    match err {
        InfluxError::Deserialize { status, body, .. } => {
            assert_eq!(status, 200);
            assert!(!body.is_empty());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

/// Connection failures surface as transport errors
#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = influxdb_client::Configuration::builder(format!("http://127.0.0.1:{}", port))
        .unwrap()
        .auth(NoAuth)
        .build();
    let client = InfluxClient::new(config).unwrap();

    let err = client
        .organizations()
        .get_orgs_id(MISSING_ORG, &CallOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, InfluxError::Transport(_)));
    assert!(err.is_transport());
}

/// The configured timeout is enforced and reported distinctly
#[tokio::test]
async fn test_timeout_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
        .mount(&server)
        .await;

    let config = test_config(&server)
        .timeout(Duration::from_millis(200))
        .build();
    let client = InfluxClient::new(config).unwrap();

    let err = client
        .organizations()
        .get_orgs_id(MISSING_ORG, &CallOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, InfluxError::Timeout(_)), "got {err:?}");
}
