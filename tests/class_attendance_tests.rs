mod common;

use axum::http::StatusCode;
use bson::oid::ObjectId;
use common::Part;
use serde_json::json;

async fn lecture_with_class(app: &common::TestApp, class: &str) -> String {
    let (status, body) = app.multipart("POST", "/api/lectures", &[Part::Text("class", class)]).await;
    assert_eq!(status, StatusCode::CREATED);
    body["lecture"]["_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_class_listing_is_distinct_and_sorted() {
    let app = common::spawn_app().await;
    let first_5a = lecture_with_class(&app, "BSCS-5A").await;
    let first_3b = lecture_with_class(&app, "BSSE-3B").await;
    lecture_with_class(&app, "BSCS-5A").await;
    let (status, _) = app.multipart("POST", "/api/lectures", &[Part::Text("venue", "Hall A")]).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.json("GET", "/api/classes", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "_id": first_5a, "name": "BSCS-5A" },
            { "_id": first_3b, "name": "BSSE-3B" },
        ])
    );
}

#[tokio::test]
async fn test_exclusion_mode_hides_marked_class() {
    let app = common::spawn_app().await;
    let id = lecture_with_class(&app, "BSCS-5A").await;
    let uri = format!("/api/classes?excludeAttendedForLecture={}", id);

    let (status, body) = app.json("GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{ "_id": id, "name": "BSCS-5A" }]));

    // The class listing hands out the lecture id, so marking by id counts.
    let mark = json!({ "lectureId": id, "attendedClasses": [id] });
    let (status, _) = app.json("POST", "/api/class-attendance/mark", Some(mark), None).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.json("GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_exclusion_mode_matches_class_name() {
    let app = common::spawn_app().await;
    let id = lecture_with_class(&app, "BSCS-5A").await;
    let mark = json!({ "lectureId": id, "attendedClasses": ["BSCS-5A"] });
    app.json("POST", "/api/class-attendance/mark", Some(mark), None).await;

    let (_, body) = app
        .json("GET", &format!("/api/classes?excludeAttendedForLecture={}", id), None, None)
        .await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_exclusion_mode_errors() {
    let app = common::spawn_app().await;

    let (status, _) = app.json("GET", "/api/classes?excludeAttendedForLecture=bogus", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let unknown = ObjectId::new().to_hex();
    let (status, _) = app
        .json("GET", &format!("/api/classes?excludeAttendedForLecture={}", unknown), None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.multipart("POST", "/api/lectures", &[Part::Text("venue", "Hall A")]).await;
    assert_eq!(status, StatusCode::CREATED);
    let classless = body["lecture"]["_id"].as_str().unwrap().to_string();
    let (status, body) = app
        .json("GET", &format!("/api/classes?excludeAttendedForLecture={}", classless), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_mark_attendance_validation() {
    let app = common::spawn_app().await;
    let id = lecture_with_class(&app, "BSCS-5A").await;

    let cases = [
        json!({ "lectureId": id, "attendedClasses": "BSCS-5A" }),
        json!({ "lectureId": id }),
        json!({ "lectureId": id, "attendedClasses": [42] }),
        json!({ "attendedClasses": ["BSCS-5A"] }),
        json!({ "lectureId": "nope", "attendedClasses": ["BSCS-5A"] }),
        json!({ "lectureId": id, "attendedClasses": ["BSCS-5A"], "date": "not a date" }),
    ];
    for body in cases {
        let (status, _) = app.json("POST", "/api/class-attendance/mark", Some(body.clone()), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "accepted {}", body);
    }
    assert!(app.attendance.records.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_mark_attendance_for_unknown_lecture() {
    let app = common::spawn_app().await;
    let mark = json!({ "lectureId": ObjectId::new().to_hex(), "attendedClasses": ["BSCS-5A"] });
    let (status, _) = app.json("POST", "/api/class-attendance/mark", Some(mark), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_mark_attendance_is_not_deduplicated() {
    let app = common::spawn_app().await;
    let id = lecture_with_class(&app, "BSCS-5A").await;
    let mark = json!({ "lectureId": id, "attendedClasses": ["BSCS-5A"], "date": "2025-03-14" });

    let (status, body) = app.json("POST", "/api/class-attendance/mark", Some(mark.clone()), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["attendanceRecord"]["lectureId"], id.as_str());
    assert_eq!(body["attendanceRecord"]["date"], "2025-03-14T00:00:00.000Z");

    let (status, _) = app.json("POST", "/api/class-attendance/mark", Some(mark), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(app.attendance.records.lock().unwrap().len(), 2);
}
