// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;

#[test]
fn request_serializes_with_type_tag() {
    let request = Request::IntervalToggle { period_minutes: 15 };
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["type"], "IntervalToggle");
    assert_eq!(json["period_minutes"], 15);
}

#[test]
fn request_round_trips_through_wire_helpers() {
    let request = Request::AlarmEnable { offset_minutes: 45 };
    let bytes = encode(&request).unwrap();
    let back: Request = decode(&bytes).unwrap();
    assert_eq!(request, back);
}

#[tokio::test]
async fn length_prefixed_read_write_round_trip() {
    let request = Request::Status;
    let mut wire = Vec::new();
    write_message(&mut wire, &encode(&request).unwrap())
        .await
        .unwrap();

    let mut reader = wire.as_slice();
    let back = read_request(&mut reader, DEFAULT_TIMEOUT).await.unwrap();
    assert_eq!(back, Request::Status);
}

#[tokio::test]
async fn read_request_times_out_on_a_silent_peer() {
    // The peer connects but never writes; keep its end alive so the read
    // pends instead of seeing EOF.
    let (mut server, _client) = tokio::io::duplex(64);
    let result = read_request(&mut server, Duration::from_millis(20)).await;
    assert!(matches!(result, Err(ProtocolError::Timeout)));
}

#[tokio::test]
async fn write_response_times_out_when_the_peer_stops_reading() {
    // An 8-byte pipe fills on the first frame, stalling the write the way a
    // full socket buffer does under a reader that went away.
    let (mut server, _client) = tokio::io::duplex(8);
    let result = write_response(&mut server, &Response::Ok, Duration::from_millis(20)).await;
    assert!(matches!(result, Err(ProtocolError::Timeout)));
}

#[tokio::test]
async fn truncated_stream_reports_connection_closed() {
    let mut reader: &[u8] = &[0, 0];
    let result = read_message(&mut reader).await;
    assert!(matches!(result, Err(ProtocolError::ConnectionClosed)));
}

#[tokio::test]
async fn oversized_length_prefix_is_rejected() {
    let mut wire = Vec::new();
    wire.extend_from_slice(&(MAX_MESSAGE_SIZE as u32 + 1).to_be_bytes());
    let mut reader = wire.as_slice();
    let result = read_message(&mut reader).await;
    assert!(matches!(result, Err(ProtocolError::MessageTooLarge { .. })));
}

#[test]
fn status_response_carries_display() {
    let response = Response::Status {
        display: chime_engine::DisplayState {
            interval_line: Some("12:08 (at 14:35)".to_string()),
            alarm_line: None,
            checked_intervals: vec![15],
            checked_alarm_offsets: vec![],
        },
    };
    let bytes = encode(&response).unwrap();
    let back: Response = decode(&bytes).unwrap();
    assert_eq!(response, back);
}
