// libs/booking-cell/tests/booking_test.rs
//
// Integration tests for appointment creation against a mocked PostgREST
// backend.

use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use booking_cell::models::{BookAppointmentRequest, BookingError};
use booking_cell::services::booking::BookingService;
use scheduling_cell::models::{AppointmentStatus, StaffAssignment};
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

async fn mount_directory_mocks(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![json!({
            "cust_id": 1,
            "cust_name": "Jane Doe",
            "cust_phone": "555-0100",
            "cust_email": "jane.doe@test.local",
            "cust_address": null
        })]))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/vehicles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![json!({
            "veh_id": 2,
            "veh_plateno": "WXY 1234",
            "veh_model": "Corolla",
            "veh_brand": "Toyota",
            "veh_type": "sedan",
            "veh_year": 2019,
            "cust_id": 1
        })]))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/service_types"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![json!({
            "service_id": 3,
            "service_type": "Oil Change",
            "service_desc": null,
            "service_category": "maintenance",
            "service_price": 80.0,
            "service_duration": 60
        })]))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/service_outlets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![json!({
            "outlet_id": 5,
            "outlet_name": "Downtown Garage",
            "outlet_address": "1 Main St",
            "outlet_city": "Springfield",
            "outlet_state": null,
            "outlet_postal_code": null
        })]))
        .mount(server)
        .await;
}

fn slot_row(time_id: i32) -> serde_json::Value {
    json!({
        "time_id": time_id,
        "time_year": 2025,
        "time_quarter": 2,
        "time_month": 6,
        "time_day": 20,
        "time_clocktime": "14:00:00"
    })
}

fn inserted_appointment_row() -> serde_json::Value {
    json!({
        "appointment_id": 100,
        "cust_id": 1,
        "service_id": 3,
        "outlet_id": 5,
        "veh_id": 2,
        "time_id": 31,
        "staff_id": null,
        "appointment_cost": 80.0,
        "appointment_duration": 60,
        "appointment_status": "PENDING",
        "estimated_finish_time": null
    })
}

fn booking_request() -> BookAppointmentRequest {
    // Built from raw JSON the way the transport layer would; the stray
    // staff_id has no field to land in and is dropped at the boundary.
    serde_json::from_value(json!({
        "cust_id": 1,
        "veh_id": 2,
        "service_id": 3,
        "outlet_id": 5,
        "staff_id": 55,
        "time_slot": {
            "time_year": 2025,
            "time_month": 6,
            "time_day": 20,
            "time_clocktime": "14:00:00"
        }
    }))
    .unwrap()
}

// ==============================================================================
// BOOKING TESTS
// ==============================================================================

#[tokio::test]
async fn booking_materializes_slot_and_forces_pending_unassigned() {
    let server = MockServer::start().await;
    mount_directory_mocks(&server).await;

    // The slot does not exist yet: exactly one row is created for it.
    Mock::given(method("GET"))
        .and(path("/rest/v1/time_slots"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<serde_json::Value>::new()))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/time_slots"))
        .and(body_partial_json(json!({
            "time_year": 2025,
            "time_quarter": 2,
            "time_month": 6,
            "time_day": 20,
            "time_clocktime": "14:00:00"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(vec![slot_row(31)]))
        .expect(1)
        .mount(&server)
        .await;

    // The insert must carry PENDING and a null staff id, whatever the
    // caller sent.
    Mock::given(method("POST"))
        .and(path("/rest/v1/service_appointments"))
        .and(body_partial_json(json!({
            "appointment_status": "PENDING",
            "staff_id": null,
            "time_id": 31
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(vec![inserted_appointment_row()]))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/notifications"))
        .respond_with(ResponseTemplate::new(201).set_body_json(vec![json!({
            "notification_id": 1,
            "user_id": 1,
            "user_type": "customer",
            "title": "New Appointment Booked",
            "message": "Your appointment for Oil Change on 2025-6-20 at 14:00:00 has been booked successfully.",
            "notification_type": "appointment",
            "link": "/customer/appointments/100",
            "read": false,
            "created_at": "2025-06-01T10:00:00Z"
        })]))
        .expect(1)
        .mount(&server)
        .await;

    let service = BookingService::new(&test_config(&server));
    let appointment = service.create_appointment(booking_request()).await.unwrap();

    assert_eq!(appointment.appointment_status, AppointmentStatus::Pending);
    assert_eq!(appointment.staff_id, StaffAssignment::Unassigned);
    assert_eq!(appointment.time_id, 31);
}

#[tokio::test]
async fn booking_reuses_existing_slot_row() {
    let server = MockServer::start().await;
    mount_directory_mocks(&server).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/time_slots"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![slot_row(31)]))
        .mount(&server)
        .await;

    // No POST /rest/v1/time_slots mock: an insert attempt would fail the
    // booking outright.
    Mock::given(method("POST"))
        .and(path("/rest/v1/service_appointments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(vec![inserted_appointment_row()]))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/notifications"))
        .respond_with(ResponseTemplate::new(201).set_body_json(vec![json!({
            "notification_id": 2,
            "user_id": 1,
            "user_type": "customer",
            "title": "New Appointment Booked",
            "message": "booked",
            "notification_type": "appointment",
            "link": "/customer/appointments/100",
            "read": false,
            "created_at": "2025-06-01T10:00:00Z"
        })]))
        .mount(&server)
        .await;

    let service = BookingService::new(&test_config(&server));
    let appointment = service.create_appointment(booking_request()).await.unwrap();

    assert_eq!(appointment.time_id, 31);
}

#[tokio::test]
async fn booking_with_unknown_customer_is_rejected_before_any_write() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<serde_json::Value>::new()))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/service_appointments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(Vec::<serde_json::Value>::new()))
        .expect(0)
        .mount(&server)
        .await;

    let service = BookingService::new(&test_config(&server));
    let result = service.create_appointment(booking_request()).await;

    assert_matches!(result, Err(BookingError::CustomerNotFound));
}

#[tokio::test]
async fn booking_without_slot_information_is_rejected() {
    let server = MockServer::start().await;
    mount_directory_mocks(&server).await;

    let request: BookAppointmentRequest = serde_json::from_value(json!({
        "cust_id": 1,
        "veh_id": 2,
        "service_id": 3,
        "outlet_id": 5
    }))
    .unwrap();

    let service = BookingService::new(&test_config(&server));
    let result = service.create_appointment(request).await;

    assert_matches!(result, Err(BookingError::MissingTimeSlot));
}

#[tokio::test]
async fn booking_succeeds_even_when_notification_delivery_fails() {
    let server = MockServer::start().await;
    mount_directory_mocks(&server).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/time_slots"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![slot_row(31)]))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/service_appointments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(vec![inserted_appointment_row()]))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/notifications"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "notification store unavailable"
        })))
        .mount(&server)
        .await;

    let service = BookingService::new(&test_config(&server));
    let appointment = service.create_appointment(booking_request()).await.unwrap();

    assert_eq!(appointment.appointment_status, AppointmentStatus::Pending);
}
