//! Administrative Command Tests
//!
//! Tests for create/drop/exists/list against a scripted server.

#[path = "../common/mod.rs"]
mod common;

use std::io::Cursor;

use common::{error_response, established, success, test_config, ScriptedTransport};
use odbwire::protocol::{read_byte, read_int, read_string, MAX_FIELD_SIZE};
use odbwire::{Connection, ErrorKind, WireError};

fn fresh() -> Connection<ScriptedTransport> {
    Connection::new(ScriptedTransport::empty(), &test_config())
}

/// Decode the written request as (opcode, session id, string args)
fn written_request(conn: &Connection<ScriptedTransport>) -> (u8, i32, Vec<String>) {
    let bytes = conn.transport().written().to_vec();
    let len = bytes.len() as u64;
    let mut r = Cursor::new(bytes);
    let opcode = read_byte(&mut r).unwrap();
    let session_id = read_int(&mut r).unwrap();
    let mut args = Vec::new();
    while r.position() < len {
        args.push(read_string(&mut r).unwrap());
    }
    (opcode, session_id, args)
}

// =============================================================================
// Precondition Tests
// =============================================================================

#[test]
fn test_commands_require_session() {
    let mut conn = fresh();

    let results = [
        conn.create_database("cars", "document", "plocal").unwrap_err(),
        conn.drop_database("cars", "document").unwrap_err(),
        conn.database_exists("cars", "plocal").unwrap_err(),
        conn.list_databases().unwrap_err(),
    ];

    for err in results {
        assert!(matches!(err, WireError::SessionNotInitialized));
        assert_eq!(err.kind(), ErrorKind::Precondition);
    }
    assert!(conn.transport().written().is_empty());
    assert_eq!(conn.transport().flushes(), 0);
}

#[test]
fn test_invalid_storage_kind_rejected_locally() {
    let mut conn = established(7, Vec::new());

    match conn.database_exists("cars", "tape").unwrap_err() {
        WireError::InvalidStorageKind(value) => assert_eq!(value, "tape"),
        other => panic!("Expected invalid storage kind, got {:?}", other),
    }
    assert!(matches!(
        conn.create_database("cars", "document", "disk").unwrap_err(),
        WireError::InvalidStorageKind(_)
    ));
    assert!(conn.transport().written().is_empty());
}

#[test]
fn test_invalid_database_kind_rejected_locally() {
    let mut conn = established(7, Vec::new());

    match conn.drop_database("cars", "relational").unwrap_err() {
        WireError::InvalidDatabaseKind(value) => assert_eq!(value, "relational"),
        other => panic!("Expected invalid database kind, got {:?}", other),
    }
    assert!(matches!(
        conn.create_database("cars", "kv", "plocal").unwrap_err(),
        WireError::InvalidDatabaseKind(_)
    ));
    assert!(conn.transport().written().is_empty());
}

// =============================================================================
// Round Trip Tests
// =============================================================================

#[test]
fn test_database_exists_round_trip() {
    let mut response = success(7);
    response.put_bool(true);
    let mut conn = established(7, response.finish().to_vec());

    let exists = conn.database_exists("cars", "persistent").unwrap();
    assert!(exists);

    let (opcode, session_id, args) = written_request(&conn);
    assert_eq!(opcode, 6);
    assert_eq!(session_id, 7);
    assert_eq!(args, vec!["cars", "plocal"]);
    assert_eq!(conn.transport().unread(), 0);
}

#[test]
fn test_database_exists_false() {
    let mut response = success(7);
    response.put_bool(false);
    let mut conn = established(7, response.finish().to_vec());

    assert!(!conn.database_exists("trucks", "memory").unwrap());
}

#[test]
fn test_create_database_request() {
    let mut conn = established(7, success(7).finish().to_vec());

    conn.create_database("cars", "graph", "memory").unwrap();

    let (opcode, session_id, args) = written_request(&conn);
    assert_eq!(opcode, 4);
    assert_eq!(session_id, 7);
    assert_eq!(args, vec!["cars", "graph", "memory"]);
    assert_eq!(conn.transport().unread(), 0);
}

#[test]
fn test_drop_database_request() {
    let mut conn = established(7, success(7).finish().to_vec());

    conn.drop_database("cars", "document").unwrap();

    let (opcode, session_id, args) = written_request(&conn);
    assert_eq!(opcode, 7);
    assert_eq!(session_id, 7);
    assert_eq!(args, vec!["cars", "document"]);
}

#[test]
fn test_list_databases_returns_raw_bytes() {
    let payload: Vec<u8> = vec![0, 0, 18, b'd', b'a', b't', b'a', 0xFE, 0x07];
    let mut response = success(7);
    response.put_bytes(&payload).unwrap();
    let mut conn = established(7, response.finish().to_vec());

    let list = conn.list_databases().unwrap();
    assert_eq!(list.as_bytes(), &payload[..]);
    assert_eq!(list.len(), payload.len());

    let (opcode, session_id, args) = written_request(&conn);
    assert_eq!(opcode, 74);
    assert_eq!(session_id, 7);
    assert!(args.is_empty());
}

// =============================================================================
// Failure Tests
// =============================================================================

#[test]
fn test_session_mismatch_is_protocol_violation() {
    let mut response = success(8);
    response.put_bool(true);
    let mut conn = established(7, response.finish().to_vec());

    let err = conn.database_exists("cars", "plocal").unwrap_err();
    assert!(matches!(
        err,
        WireError::SessionMismatch {
            expected: 7,
            actual: 8
        }
    ));
    assert_eq!(err.kind(), ErrorKind::ProtocolViolation);
    assert_ne!(err.kind(), ErrorKind::Server);
    assert!(!err.is_connection_usable());
}

#[test]
fn test_session_mismatch_on_error_status() {
    let script = error_response(8, &[("ClassA", Some("msg1"))]);
    let mut conn = established(7, script);

    let err = conn.drop_database("cars", "document").unwrap_err();
    assert!(matches!(err, WireError::SessionMismatch { .. }));
}

#[test]
fn test_server_error_keeps_all_exceptions() {
    let script = error_response(
        7,
        &[("ClassA", Some("msg1")), ("ClassB", Some("msg2"))],
    );
    let mut conn = established(7, script);

    let err = conn.create_database("cars", "document", "plocal").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Server);
    match err {
        WireError::Server(errors) => {
            let entries: Vec<_> = errors
                .exceptions()
                .iter()
                .map(|e| (e.class_name.as_str(), e.message.as_deref()))
                .collect();
            assert_eq!(
                entries,
                vec![("ClassA", Some("msg1")), ("ClassB", Some("msg2"))]
            );
        }
        other => panic!("Expected server error, got {:?}", other),
    }
}

#[test]
fn test_connection_usable_after_server_error() {
    let mut script = error_response(7, &[("ODatabaseException", Some("exists"))]);
    let mut second = success(7);
    second.put_bool(true);
    script.extend_from_slice(&second.finish());
    let mut conn = established(7, script);

    let err = conn.create_database("cars", "document", "plocal").unwrap_err();
    assert!(err.is_connection_usable());

    assert!(conn.database_exists("cars", "plocal").unwrap());
    assert_eq!(conn.transport().unread(), 0);
}

#[test]
fn test_missing_payload_is_transport_error() {
    let mut conn = established(7, success(7).finish().to_vec());
    let err = conn.database_exists("cars", "plocal").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[test]
fn test_close_sends_nothing() {
    let conn = established(7, Vec::new());
    let transport = conn.close();
    assert!(transport.written().is_empty());
}

// =============================================================================
// Broken Connection Tests
// =============================================================================

#[test]
fn test_session_mismatch_breaks_connection() {
    let mut response = success(8);
    response.put_bytes(&[0, 0, 0, 0, 7, 1]).unwrap();
    let mut conn = established(7, response.finish().to_vec());

    let err = conn.list_databases().unwrap_err();
    assert!(matches!(err, WireError::SessionMismatch { .. }));
    assert!(conn.is_broken());
    conn.transport_mut().clear_written();

    let err = conn.database_exists("cars", "plocal").unwrap_err();
    assert!(matches!(
        err,
        WireError::ConnectionBroken(ErrorKind::ProtocolViolation)
    ));
    assert_eq!(err.kind(), ErrorKind::ProtocolViolation);
    assert!(!err.is_connection_usable());
    assert!(conn.transport().written().is_empty());
}

#[test]
fn test_every_command_refused_after_transport_error() {
    let mut conn = established(7, vec![0, 0, 0]);

    let err = conn.drop_database("cars", "document").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    conn.transport_mut().clear_written();

    let results = [
        conn.create_database("cars", "document", "plocal").unwrap_err(),
        conn.drop_database("cars", "document").unwrap_err(),
        conn.database_exists("cars", "plocal").unwrap_err(),
        conn.list_databases().unwrap_err(),
    ];
    for err in results {
        assert!(matches!(
            err,
            WireError::ConnectionBroken(ErrorKind::Transport)
        ));
    }
    assert!(conn.transport().written().is_empty());
    // handshake + the failed drop
    assert_eq!(conn.transport().flushes(), 2);
}

#[test]
fn test_server_error_does_not_break_connection() {
    let script = error_response(7, &[("ODatabaseException", Some("exists"))]);
    let mut conn = established(7, script);

    conn.create_database("cars", "document", "plocal").unwrap_err();
    assert!(!conn.is_broken());
}

#[test]
fn test_oversized_argument_rejected_locally() {
    let mut conn = established(7, Vec::new());
    let name = "x".repeat(MAX_FIELD_SIZE + 1);

    let err = conn.create_database(&name, "document", "plocal").unwrap_err();
    assert!(matches!(err, WireError::FieldTooLarge { .. }));
    assert_eq!(err.kind(), ErrorKind::Precondition);
    assert!(conn.transport().written().is_empty());
    assert!(!conn.is_broken());
}
