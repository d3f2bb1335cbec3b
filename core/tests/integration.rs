//! Accounts client against the live mock server.
//!
//! # Design
//! Each test starts its own mock server on a random port, then exercises the
//! client over real HTTP through the default ureq transport.

mod common;

use std::io::{Read, Write};
use std::net::TcpListener;

use accounts_client::{AccountsError, ErrorKind};
use common::{client_for, fake_account, spawn_server};
use uuid::Uuid;

#[test]
fn fetch_returns_created_account() {
    let client = client_for(&spawn_server());
    let account = fake_account();
    client.create(&account).unwrap();

    let fetched = client.fetch(&account.id).unwrap();
    assert_eq!(fetched.id, account.id);
    assert_eq!(fetched.organisation_id, account.organisation_id);
    assert_eq!(fetched.version, Some(0));
    assert_eq!(fetched.attributes, account.attributes);
}

#[test]
fn fetch_unknown_id_is_not_found() {
    let client = client_for(&spawn_server());
    let id = Uuid::new_v4().to_string();

    let err = client.fetch(&id).unwrap_err();
    assert_eq!(
        err,
        AccountsError::NotFound {
            message: format!("record {id} does not exist")
        }
    );
}

#[test]
fn create_new_account_succeeds() {
    let client = client_for(&spawn_server());
    assert!(client.create(&fake_account()).is_ok());
}

#[test]
fn create_same_account_twice_conflicts() {
    let client = client_for(&spawn_server());
    let account = fake_account();
    client.create(&account).unwrap();

    let err = client.create(&account).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[test]
fn create_rejected_by_validation_is_internal_error() {
    let client = client_for(&spawn_server());
    let mut account = fake_account();
    account.organisation_id = "not-a-uuid".to_string();

    let err = client.create(&account).unwrap_err();
    assert!(matches!(
        err,
        AccountsError::InternalServer { status: Some(400), .. }
    ));
    assert_eq!(
        err.message(),
        "validation failure: organisation_id must be of type uuid"
    );
}

#[test]
fn delete_created_account_then_fetch_is_not_found() {
    let client = client_for(&spawn_server());
    let account = fake_account();
    client.create(&account).unwrap();

    client.delete(&account.id, 0).unwrap();

    let err = client.fetch(&account.id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn delete_unknown_id_is_not_found() {
    let client = client_for(&spawn_server());
    let err = client.delete(&Uuid::new_v4().to_string(), 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn delete_with_wrong_version_is_not_found() {
    let client = client_for(&spawn_server());
    let account = fake_account();
    client.create(&account).unwrap();

    let err = client.delete(&account.id, 10).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    // The account is untouched and still deletable at its real version.
    client.delete(&account.id, 0).unwrap();
}

#[test]
fn one_client_serves_concurrent_callers() {
    let client = client_for(&spawn_server());
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let account = fake_account();
                client.create(&account).unwrap();
                assert_eq!(client.fetch(&account.id).unwrap().id, account.id);
                client.delete(&account.id, 0).unwrap();
            });
        }
    });
}

#[test]
fn connection_refused_is_internal_error_with_cause() {
    // Bind then drop to get a port nothing listens on.
    let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let client = client_for(&format!("http://{addr}"));

    let err = client.fetch(&Uuid::new_v4().to_string()).unwrap_err();
    match err {
        AccountsError::InternalServer {
            message,
            status,
            cause,
        } => {
            assert_eq!(message, "an error occurred when trying to fetch an account");
            assert!(status.is_none());
            assert!(cause.is_some());
        }
        other => panic!("expected InternalServer, got {other:?}"),
    }
}

/// Serve one canned response on a random port, after reading the request head.
fn serve_once(response: &'static [u8]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        stream.write_all(response).unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn redirect_is_not_followed() {
    let base = serve_once(
        b"HTTP/1.1 302 Found\r\nlocation: http://127.0.0.1:1/elsewhere\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
    );
    let client = client_for(&base);

    let err = client.delete(&Uuid::new_v4().to_string(), 0).unwrap_err();
    assert!(matches!(
        err,
        AccountsError::InternalServer { status: Some(302), cause: None, .. }
    ));
}

#[test]
fn truncated_body_is_read_response_body_error() {
    // Promise 100 bytes, send a handful, hang up.
    let base = serve_once(
        b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 100\r\nconnection: close\r\n\r\n{\"data\":",
    );

    let client = client_for(&base);
    let err = client.fetch(&Uuid::new_v4().to_string()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ReadResponseBody);
    assert!(err.cause().is_some());
}
