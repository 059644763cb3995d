//! Integration tests for `OverpassClient` endpoint fallback using wiremock.

use chrono::{TimeZone, Utc};
use medic_server::discovery::{Discovery, ScanConfig, ScanError, ScanSource};
use medic_server::domain::{Category, Coordinate};
use medic_server::overpass::{FacilityQuery, OverpassClient, OverpassConfig, OverpassError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn trichy() -> Coordinate {
    Coordinate::new(10.8050, 78.6856).unwrap()
}

fn client_for(server: &MockServer, paths: &[&str]) -> OverpassClient {
    let endpoints = paths.iter().map(|p| format!("{}{p}", server.uri()));
    OverpassClient::new(OverpassConfig::new().with_endpoints(endpoints).with_timeout(5))
        .expect("client construction should not fail")
}

fn facilities_body() -> serde_json::Value {
    serde_json::json!({
        "version": 0.6,
        "elements": [
            {
                "type": "node",
                "id": 1,
                "lat": 10.8400,
                "lon": 78.6900,
                "tags": { "amenity": "hospital", "name": "Government Hospital" }
            },
            {
                "type": "way",
                "id": 2,
                "center": { "lat": 10.8060, "lon": 78.6860 },
                "tags": { "amenity": "clinic", "name": "Town Clinic", "phone": "+91 431 000 0000" }
            },
            {
                "type": "node",
                "id": 3,
                "tags": { "amenity": "pharmacy" }
            }
        ]
    })
}

#[tokio::test]
async fn falls_back_until_an_endpoint_answers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/first"))
        .respond_with(ResponseTemplate::new(504).set_body_string("Gateway Timeout"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/second"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/third"))
        .respond_with(ResponseTemplate::new(200).set_body_json(facilities_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/fourth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(facilities_body()))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, &["/first", "/second", "/third", "/fourth"]);
    let batch = client
        .find_facilities(&FacilityQuery::around(trichy(), 10_000))
        .await
        .expect("third endpoint should answer");

    assert!(batch.endpoint.ends_with("/third"));
    // Element 3 has no coordinates and is skipped.
    assert_eq!(batch.facilities.len(), 2);
    assert_eq!(batch.facilities[0].category, Category::Hospital);
    assert_eq!(batch.facilities[1].category, Category::Clinic);
}

#[tokio::test]
async fn sends_query_in_data_parameter() {
    let server = MockServer::start().await;
    let query = FacilityQuery::around(trichy(), 10_000);

    Mock::given(method("GET"))
        .and(path("/api/interpreter"))
        .and(query_param("data", query.to_overpass_ql()))
        .respond_with(ResponseTemplate::new(200).set_body_json(facilities_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, &["/api/interpreter"]);
    let batch = client.find_facilities(&query).await.unwrap();
    assert_eq!(batch.facilities.len(), 2);
}

#[tokio::test]
async fn all_endpoints_failing_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
        .expect(3)
        .mount(&server)
        .await;

    let client = client_for(&server, &["/a", "/b", "/c"]);
    let err = client
        .find_facilities(&FacilityQuery::around(trichy(), 10_000))
        .await
        .unwrap_err();

    assert!(matches!(err, OverpassError::AllEndpointsFailed { attempted: 3 }));
}

#[tokio::test]
async fn empty_elements_is_a_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/only"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "elements": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, &["/only"]);
    let batch = client
        .find_facilities(&FacilityQuery::around(trichy(), 10_000))
        .await
        .unwrap();

    assert!(batch.facilities.is_empty());
    assert_eq!(batch.remark, None);
}

#[tokio::test]
async fn server_remark_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/busy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "elements": [],
            "remark": "runtime error: Query timed out in \"query\" at line 1 after 25 seconds."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, &["/busy"]);
    let batch = client
        .find_facilities(&FacilityQuery::around(trichy(), 10_000))
        .await
        .unwrap();

    assert!(batch.facilities.is_empty());
    assert!(
        batch
            .remark
            .as_deref()
            .is_some_and(|r| r.starts_with("runtime error"))
    );
}

#[tokio::test]
async fn discovery_scan_through_live_client() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/up"))
        .respond_with(ResponseTemplate::new(200).set_body_json(facilities_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, &["/down", "/up"]);
    let discovery = Discovery::new(client, ScanConfig::default());
    let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();

    let first = discovery.scan(trichy(), t0).await.unwrap();
    assert!(matches!(first.source, ScanSource::Remote { ref endpoint } if endpoint.ends_with("/up")));
    // Clinic is closer and has a phone, so it outranks the hospital.
    assert_eq!(first.facilities[0].facility.category, Category::Clinic);
    assert_eq!(first.facilities.len(), 2);

    let blocked = discovery
        .scan(trichy(), t0 + chrono::Duration::seconds(5))
        .await
        .unwrap_err();
    assert!(matches!(blocked, ScanError::CooldownActive { .. }));

    // Same cell after the cooldown is answered from the cache; the mocks'
    // `expect(1)` fails the test if the network is hit again.
    let second = discovery
        .scan(trichy(), t0 + chrono::Duration::seconds(21))
        .await
        .unwrap();
    assert!(second.from_cache());
    assert_eq!(second.facilities, first.facilities);
}

#[tokio::test]
async fn discovery_reports_unavailable_endpoints() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server, &["/a", "/b"]);
    let discovery = Discovery::new(client, ScanConfig::default());
    let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();

    let err = discovery.scan(trichy(), t0).await.unwrap_err();
    assert_eq!(err, ScanError::AllEndpointsUnavailable { attempted: 2 });
    assert_eq!(err.hud_message(), "ALL SERVERS BUSY – TRY LATER");
}
