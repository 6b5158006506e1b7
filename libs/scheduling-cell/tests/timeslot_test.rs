// libs/scheduling-cell/tests/timeslot_test.rs
//
// Integration tests for the slot generator and time-slot materialization,
// against a mocked PostgREST backend.

use chrono::NaiveTime;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scheduling_cell::services::timeslot::TimeSlotService;
use shared_config::AppConfig;

// ==============================================================================
// TEST FIXTURES AND UTILITIES
// ==============================================================================

fn test_config(server: &MockServer) -> AppConfig {
    AppConfig {
        supabase_url: server.uri(),
        supabase_service_key: "test-key".to_string(),
        redis_url: None,
        smtp_host: None,
        smtp_port: 587,
        smtp_username: None,
        smtp_password: None,
        smtp_from: "noreply@test.local".to_string(),
        email_enabled: false,
    }
}

fn t(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
}

fn staff_row(staff_id: i32, outlet_id: i32) -> serde_json::Value {
    json!({
        "staff_id": staff_id,
        "staff_name": format!("Mechanic {}", staff_id),
        "staff_role": "mechanic",
        "staff_phone": null,
        "outlet_id": outlet_id
    })
}

fn slot_row(time_id: i32, clocktime: &str) -> serde_json::Value {
    json!({
        "time_id": time_id,
        "time_year": 2025,
        "time_quarter": 2,
        "time_month": 6,
        "time_day": 20,
        "time_clocktime": clocktime
    })
}

fn scheduled_appointment_row(appointment_id: i32, staff_id: i32, clocktime: &str) -> serde_json::Value {
    json!({
        "appointment_id": appointment_id,
        "cust_id": 1,
        "service_id": 1,
        "outlet_id": 5,
        "veh_id": 1,
        "time_id": 200 + appointment_id,
        "staff_id": staff_id,
        "appointment_cost": 120.0,
        "appointment_duration": 60,
        "appointment_status": "SCHEDULED",
        "estimated_finish_time": null,
        "time_slot": slot_row(200 + appointment_id, clocktime)
    })
}

// ==============================================================================
// SLOT GENERATION
// ==============================================================================

#[tokio::test]
async fn generates_all_free_hours_as_ephemeral_candidates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/staff"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![staff_row(1, 5)]))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/service_appointments"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(vec![scheduled_appointment_row(1, 1, "10:00:00")]),
        )
        .mount(&server)
        .await;

    // No slot rows exist yet for this date.
    Mock::given(method("GET"))
        .and(path("/rest/v1/time_slots"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<serde_json::Value>::new()))
        .mount(&server)
        .await;

    let service = TimeSlotService::new(&test_config(&server));
    let slots = service.get_available_time_slots(2025, 6, 20, 5).await.unwrap();

    // 09:00-17:00 minus the booked 10:00 hour.
    assert_eq!(slots.len(), 7);
    assert!(slots.iter().all(|slot| slot.time_id.is_none()));
    assert!(!slots.iter().any(|slot| slot.time_clocktime == t(10)));

    let mut sorted = slots.clone();
    sorted.sort_by_key(|slot| slot.time_clocktime);
    assert_eq!(
        slots.iter().map(|s| s.time_clocktime).collect::<Vec<_>>(),
        sorted.iter().map(|s| s.time_clocktime).collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn outlet_without_staff_returns_empty_immediately() {
    let server = MockServer::start().await;

    // Only the roster endpoint is mocked: an empty roster must short-circuit
    // before any appointment or slot query is attempted.
    Mock::given(method("GET"))
        .and(path("/rest/v1/staff"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<serde_json::Value>::new()))
        .mount(&server)
        .await;

    let service = TimeSlotService::new(&test_config(&server));
    let slots = service.get_available_time_slots(2025, 6, 20, 5).await.unwrap();

    assert!(slots.is_empty());
}

#[tokio::test]
async fn existing_slot_rows_are_reused_not_duplicated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/staff"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![staff_row(1, 5)]))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/service_appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<serde_json::Value>::new()))
        .mount(&server)
        .await;

    // A row already exists for 09:00; everything else is unmaterialized.
    Mock::given(method("GET"))
        .and(path("/rest/v1/time_slots"))
        .and(query_param("time_clocktime", "eq.09:00:00"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![slot_row(42, "09:00:00")]))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/time_slots"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<serde_json::Value>::new()))
        .mount(&server)
        .await;

    let service = TimeSlotService::new(&test_config(&server));
    let slots = service.get_available_time_slots(2025, 6, 20, 5).await.unwrap();

    assert_eq!(slots.len(), 8);
    assert_eq!(slots[0].time_clocktime, t(9));
    assert_eq!(slots[0].time_id, Some(42));
    assert!(slots[1..].iter().all(|slot| slot.time_id.is_none()));
}

// ==============================================================================
// SLOT MATERIALIZATION
// ==============================================================================

#[tokio::test]
async fn get_or_create_is_idempotent() {
    let server = MockServer::start().await;

    // First lookup misses; every later lookup sees the inserted row.
    Mock::given(method("GET"))
        .and(path("/rest/v1/time_slots"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<serde_json::Value>::new()))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/time_slots"))
        .respond_with(ResponseTemplate::new(201).set_body_json(vec![slot_row(7, "14:00:00")]))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/time_slots"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![slot_row(7, "14:00:00")]))
        .mount(&server)
        .await;

    let service = TimeSlotService::new(&test_config(&server));

    let first = service.get_or_create_time_slot(2025, 6, 20, t(14)).await.unwrap();
    let second = service.get_or_create_time_slot(2025, 6, 20, t(14)).await.unwrap();

    assert_eq!(first.time_id, Some(7));
    assert_eq!(second.time_id, Some(7));
}

#[tokio::test]
async fn get_or_create_recovers_from_concurrent_insert() {
    let server = MockServer::start().await;

    // The lookup misses, the insert loses the race against a concurrent
    // booking (uniqueness violation), and the re-read returns the winner.
    Mock::given(method("GET"))
        .and(path("/rest/v1/time_slots"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<serde_json::Value>::new()))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/time_slots"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": "23505",
            "message": "duplicate key value violates unique constraint"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/time_slots"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![slot_row(9, "14:00:00")]))
        .mount(&server)
        .await;

    let service = TimeSlotService::new(&test_config(&server));
    let slot = service.get_or_create_time_slot(2025, 6, 20, t(14)).await.unwrap();

    assert_eq!(slot.time_id, Some(9));
}
