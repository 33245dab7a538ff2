//! End-to-end tests of the TCP transport against an in-process backend

use serde_json::{json, Value};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use infra_inventory::transport::{read_frame, write_frame, TcpConnection};
use infra_inventory::{Connection, InventoryError, Operation, SessionClient, SessionConfig};

const TICKET: &str = "T-4711";

/// Serves framed requests on a local port, answering each with `handler`
fn spawn_backend<F>(handler: F) -> u16
where
    F: Fn(&Value) -> Value + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { break };
            while let Ok(frame) = read_frame(&mut stream) {
                let request: Value = serde_json::from_slice(&frame).unwrap();
                let reply = handler(&request);
                if write_frame(&mut stream, reply.to_string().as_bytes()).is_err() {
                    break;
                }
            }
        }
    });
    port
}

fn login_reply(request: &Value) -> Option<Value> {
    (request["operation"] == "login").then(|| {
        if request["params"]["password"] == "secret" {
            json!({ "status_code": 1000, "ticket": TICKET })
        } else {
            json!({ "status_code": 1120, "status_message": "invalid credentials" })
        }
    })
}

fn config(port: u16) -> SessionConfig {
    SessionConfig::new("127.0.0.1", "admin", "secret")
        .with_port(port)
        .with_request_timeout(Duration::from_secs(2))
}

#[test]
fn test_request_round_trip_carries_ticket() {
    let port = spawn_backend(|request| {
        login_reply(request).unwrap_or_else(|| {
            assert_eq!(request["ticket"], TICKET);
            json!({ "status_code": 1000, "result": ["UPS", "FedEx"] })
        })
    });
    let mut client = SessionClient::new(config(port));

    let carriers = client.carriers();

    assert_eq!(carriers, vec!["UPS", "FedEx"]);
    assert!(!client.has_error());
    assert!(client.last_request().unwrap().contains("get_carrier_list"));
    assert!(client.last_response().unwrap().contains("FedEx"));
    assert!(!client.is_connected());
}

#[test]
fn test_null_result_is_empty_reply() {
    let port = spawn_backend(|request| {
        login_reply(request).unwrap_or_else(|| json!({ "status_code": 1000, "result": null }))
    });
    let mut client = SessionClient::new(config(port));

    assert_eq!(client.customer("Nobody"), None);
    assert!(!client.has_error());
}

#[test]
fn test_bad_credentials_fail_connect() {
    let port = spawn_backend(|request| login_reply(request).unwrap_or(Value::Null));
    let mut client = SessionClient::new(
        SessionConfig::new("127.0.0.1", "admin", "wrong").with_port(port),
    );

    assert!(!client.connect());
    assert!(!client.is_connected());
}

#[test]
fn test_status_reply_is_terminal() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let port = spawn_backend(move |request| {
        login_reply(request).unwrap_or_else(|| {
            counter.fetch_add(1, Ordering::SeqCst);
            json!({ "status_code": 2100, "status_message": "Part not found" })
        })
    });
    let mut client = SessionClient::new(config(port).with_max_retries(3));

    assert_eq!(client.part("NOPE", None), None);

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        client.last_error(),
        Some(&InventoryError::status(2100, "Part not found"))
    );
}

#[test]
fn test_server_reply_is_retried_on_fresh_session() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let port = spawn_backend(move |request| {
        login_reply(request).unwrap_or_else(|| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                json!({ "status_code": 1004, "status_message": "database busy" })
            } else {
                json!({ "status_code": 1000, "result": ["Main Warehouse"] })
            }
        })
    });
    let mut client = SessionClient::new(config(port).with_max_retries(1));

    assert_eq!(client.location_groups(), vec!["Main Warehouse"]);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(!client.has_error());
}

#[test]
fn test_slow_reply_times_out() {
    let port = spawn_backend(|request| {
        login_reply(request).unwrap_or_else(|| {
            thread::sleep(Duration::from_millis(600));
            json!({ "status_code": 1000, "result": [] })
        })
    });
    let mut client = SessionClient::new(
        config(port)
            .with_request_timeout(Duration::from_millis(150))
            .with_max_retries(0),
    );

    assert!(client.carriers().is_empty());
    assert!(matches!(
        client.last_error(),
        Some(InventoryError::Timeout { operation, .. }) if operation == "get_carrier_list"
    ));
}

#[test]
fn test_refused_connection() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let mut client = SessionClient::new(config(port));

    assert!(!client.connect());
    assert!(client.carriers().is_empty());
    assert!(!client.has_error());
}

#[test]
fn test_login_password_is_redacted() {
    let port = spawn_backend(|request| login_reply(request).unwrap_or(Value::Null));
    let mut connection = TcpConnection::new(format!("127.0.0.1:{}", port), Duration::from_secs(2));

    connection.open().unwrap();
    connection.login("admin", "secret").unwrap();

    assert!(connection.is_connected());
    let request = connection.last_request().unwrap();
    assert!(request.contains("login"));
    assert!(!request.contains("secret"));

    connection.close();
    assert!(!connection.is_connected());
    assert_eq!(
        connection.call(Operation::GetCarrierList, json!({})),
        Err(InventoryError::NotConnected)
    );
}

#[test]
fn test_failed_call_clears_previous_response() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        for _ in 0..2 {
            let frame = read_frame(&mut stream).unwrap();
            let request: Value = serde_json::from_slice(&frame).unwrap();
            let reply = login_reply(&request)
                .unwrap_or_else(|| json!({ "status_code": 1000, "result": ["UPS"] }));
            write_frame(&mut stream, reply.to_string().as_bytes()).unwrap();
        }
        // Read the next request and hang up without answering.
        let _ = read_frame(&mut stream);
    });
    let mut connection = TcpConnection::new(format!("127.0.0.1:{}", port), Duration::from_secs(2));
    connection.open().unwrap();
    connection.login("admin", "secret").unwrap();

    assert!(connection.call(Operation::GetCarrierList, json!({})).is_ok());
    assert!(connection.last_response().unwrap().contains("UPS"));

    assert!(connection.call(Operation::GetLocationGroupList, json!({})).is_err());
    assert!(connection.last_request().unwrap().contains("get_location_group_list"));
    assert_eq!(connection.last_response(), None);
}
