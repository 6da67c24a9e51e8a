//! End-to-end checks of the reqwest-backed geocoder against a local canned server

use geopin::api::{AddressResolver, NominatimClient};
use geopin::config::GeocoderConfig;
use geopin::domain::{Point, RegionDefaults};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve one HTTP response and hand back the raw request that was received
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        String::from_utf8_lossy(&request).into_owned()
    });

    (base_url, handle)
}

fn resolver_for(base_url: String, timeout_secs: u64) -> AddressResolver<NominatimClient> {
    let config = GeocoderConfig {
        base_url,
        user_agent: "geopin-tests/1.0".to_string(),
        timeout_secs,
        language: Some("es".to_string()),
    };
    AddressResolver::new(NominatimClient::new(&config).unwrap(), RegionDefaults::default())
}

#[tokio::test]
async fn test_resolves_address_and_sends_expected_request() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"display_name":"Calle 20, Ucú, Yucatán","address":{"road":"Calle 20","neighbourhood":"Centro","town":"Ucú"}}"#,
    )
    .await;

    let resolver = resolver_for(base_url, 5);
    let address = resolver
        .resolve(Point::new(21.0317, -89.7464))
        .await
        .expect("address should resolve");

    assert_eq!(address.street, "Calle 20");
    assert_eq!(address.suburb, "Centro");
    assert_eq!(address.city, "Ucú");
    assert_eq!(address.state, "Yucatán");
    assert_eq!(address.postcode, "97357");
    assert_eq!(address.country, "México");
    assert_eq!(address.full_address, "Calle 20, Ucú, Yucatán");

    let request = server.await.unwrap();
    let request_line = request.lines().next().unwrap();
    assert!(request_line.starts_with("GET /reverse?"), "{}", request_line);
    assert!(request_line.contains("lat=21.0317"));
    assert!(request_line.contains("lon=-89.7464"));
    assert!(request_line.contains("zoom=18"));
    assert!(request_line.contains("addressdetails=1"));
    assert!(request_line.contains("accept-language=es"));
    assert!(request.to_ascii_lowercase().contains("user-agent: geopin-tests/1.0"));
}

#[tokio::test]
async fn test_error_status_resolves_to_none() {
    let (base_url, server) = serve_once("503 Service Unavailable", "{}").await;
    let resolver = resolver_for(base_url, 5);

    assert!(resolver.resolve(Point::new(21.03, -89.74)).await.is_none());
    server.await.unwrap();
}

#[tokio::test]
async fn test_malformed_body_resolves_to_none() {
    let (base_url, server) = serve_once("200 OK", "not json at all").await;
    let resolver = resolver_for(base_url, 5);

    assert!(resolver.resolve(Point::new(21.03, -89.74)).await.is_none());
    server.await.unwrap();
}

#[tokio::test]
async fn test_unreachable_geocoder_resolves_to_none() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let resolver = resolver_for(base_url, 5);
    assert!(resolver.resolve(Point::new(21.03, -89.74)).await.is_none());
}

#[tokio::test]
async fn test_timeout_resolves_to_none() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    // Accept the connection but never answer
    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(std::time::Duration::from_secs(5)).await;
        drop(socket);
    });

    let resolver = resolver_for(base_url, 1);
    assert!(resolver.resolve(Point::new(21.03, -89.74)).await.is_none());
    server.abort();
}
