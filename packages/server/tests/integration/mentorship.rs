use chrono::{DateTime, Utc};
use serde_json::json;

use crate::common::{TestApp, TestUser, routes};

mod requesting {
    use super::*;

    #[tokio::test]
    async fn new_request_is_pending_and_stamped() {
        let app = TestApp::spawn().await;
        let mentor = app.create_mentor("mentor1").await;
        let student = app.create_student("student1").await;
        let started = Utc::now() - chrono::Duration::seconds(1);

        let res = app.request_mentorship(&student, mentor.id).await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["mentor_id"], mentor.id);
        assert_eq!(res.body["student_id"], student.id);
        assert_eq!(res.body["status"], "pending");
        assert!(res.body["responded_at"].is_null());
        let requested_at: DateTime<Utc> = res.body["requested_at"]
            .as_str()
            .unwrap()
            .parse()
            .unwrap();
        assert!(requested_at >= started);
    }

    #[tokio::test]
    async fn second_request_for_the_same_pair_is_a_duplicate() {
        let app = TestApp::spawn().await;
        let mentor = app.create_mentor("mentor1").await;
        let student = app.create_student("student1").await;

        let first = app.request_mentorship(&student, mentor.id).await;
        assert_eq!(first.status, 201, "{}", first.text);

        let res = app.request_mentorship(&student, mentor.id).await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "DUPLICATE_REQUEST");
    }

    #[tokio::test]
    async fn other_students_may_request_the_same_mentor() {
        let app = TestApp::spawn().await;
        let mentor = app.create_mentor("mentor1").await;
        let s1 = app.create_student("student1").await;
        let s2 = app.create_student("student2").await;

        assert_eq!(app.request_mentorship(&s1, mentor.id).await.status, 201);
        assert_eq!(app.request_mentorship(&s2, mentor.id).await.status, 201);
    }

    #[tokio::test]
    async fn concurrent_duplicates_yield_exactly_one_record() {
        let app = TestApp::spawn().await;
        let mentor = app.create_mentor("mentor1").await;
        let student = app.create_student("student1").await;

        let (a, b) = tokio::join!(
            app.request_mentorship(&student, mentor.id),
            app.request_mentorship(&student, mentor.id),
        );

        let mut statuses = [a.status, b.status];
        statuses.sort();
        assert_eq!(statuses, [201, 409]);
    }

    #[tokio::test]
    async fn target_must_be_a_mentor() {
        let app = TestApp::spawn().await;
        let other = app.create_student("student2").await;
        let student = app.create_student("student1").await;

        let res = app.request_mentorship(&student, other.id).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn unknown_mentor_is_not_found() {
        let app = TestApp::spawn().await;
        let student = app.create_student("student1").await;

        let res = app.request_mentorship(&student, 99_999).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn mentors_cannot_request_mentorship() {
        let app = TestApp::spawn().await;
        let m1 = app.create_mentor("mentor1").await;
        let m2 = app.create_mentor("mentor2").await;

        let res = app.request_mentorship(&m1, m2.id).await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }
}

mod answering {
    use super::*;

    async fn pending_request(app: &TestApp) -> (TestUser, TestUser, i32) {
        let mentor = app.create_mentor("mentor1").await;
        let student = app.create_student("student1").await;
        let res = app.request_mentorship(&student, mentor.id).await;
        assert_eq!(res.status, 201, "{}", res.text);
        let id = res.id();
        (mentor, student, id)
    }

    #[tokio::test]
    async fn mentor_accepts_a_pending_request() {
        let app = TestApp::spawn().await;
        let (mentor, _student, id) = pending_request(&app).await;

        let res = app
            .patch_with_token(
                &routes::mentorship_status(id),
                &json!({"status": "accepted"}),
                &mentor.token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["status"], "accepted");
        assert!(res.body["responded_at"].is_string());
    }

    #[tokio::test]
    async fn answers_are_final() {
        let app = TestApp::spawn().await;
        let (mentor, _student, id) = pending_request(&app).await;

        let first = app
            .patch_with_token(
                &routes::mentorship_status(id),
                &json!({"status": "rejected"}),
                &mentor.token,
            )
            .await;
        assert_eq!(first.status, 200, "{}", first.text);

        let res = app
            .patch_with_token(
                &routes::mentorship_status(id),
                &json!({"status": "accepted"}),
                &mentor.token,
            )
            .await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "INVALID_TRANSITION");

        let current = app.get_with_token(&routes::mentorship(id), &mentor.token).await;
        assert_eq!(current.body["status"], "rejected");
    }

    #[tokio::test]
    async fn pending_is_not_a_valid_answer() {
        let app = TestApp::spawn().await;
        let (mentor, _student, id) = pending_request(&app).await;

        let res = app
            .patch_with_token(
                &routes::mentorship_status(id),
                &json!({"status": "pending"}),
                &mentor.token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn status_outside_the_enum_is_a_validation_error() {
        let app = TestApp::spawn().await;
        let (mentor, _student, id) = pending_request(&app).await;

        let res = app
            .patch_with_token(
                &routes::mentorship_status(id),
                &json!({"status": "maybe"}),
                &mentor.token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn student_cannot_answer_their_own_request() {
        let app = TestApp::spawn().await;
        let (_mentor, student, id) = pending_request(&app).await;

        let res = app
            .patch_with_token(
                &routes::mentorship_status(id),
                &json!({"status": "accepted"}),
                &student.token,
            )
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn strangers_do_not_see_the_request() {
        let app = TestApp::spawn().await;
        let (_mentor, _student, id) = pending_request(&app).await;
        let stranger = app.create_student("student9").await;

        let res = app.get_with_token(&routes::mentorship(id), &stranger.token).await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn admin_can_answer_on_behalf_of_the_mentor() {
        let app = TestApp::spawn().await;
        let (_mentor, _student, id) = pending_request(&app).await;
        let admin = app.create_admin("admin1").await;

        let res = app
            .patch_with_token(
                &routes::mentorship_status(id),
                &json!({"status": "accepted"}),
                &admin.token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
    }

    #[tokio::test]
    async fn duplicate_is_still_rejected_after_an_answer() {
        let app = TestApp::spawn().await;
        let (mentor, student, id) = pending_request(&app).await;
        app.patch_with_token(
            &routes::mentorship_status(id),
            &json!({"status": "rejected"}),
            &mentor.token,
        )
        .await;

        let res = app.request_mentorship(&student, mentor.id).await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "DUPLICATE_REQUEST");
    }
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn each_party_sees_the_request_from_their_side() {
        let app = TestApp::spawn().await;
        let mentor = app.create_mentor("mentor1").await;
        let student = app.create_student("student1").await;
        app.request_mentorship(&student, mentor.id).await;

        let as_student = app
            .get_with_token(routes::MENTORSHIPS, &student.token)
            .await;
        assert_eq!(as_student.status, 200);
        assert_eq!(as_student.body["pagination"]["total"], 1);

        let as_mentor = app
            .get_with_token(
                &format!("{}?role=mentor", routes::MENTORSHIPS),
                &mentor.token,
            )
            .await;
        assert_eq!(as_mentor.body["pagination"]["total"], 1);
        assert_eq!(as_mentor.body["data"][0]["student_id"], student.id);

        // The mentor sent no requests of their own.
        let mentor_as_student = app.get_with_token(routes::MENTORSHIPS, &mentor.token).await;
        assert_eq!(mentor_as_student.body["pagination"]["total"], 0);
    }

    #[tokio::test]
    async fn status_filter_narrows_the_list() {
        let app = TestApp::spawn().await;
        let m1 = app.create_mentor("mentor1").await;
        let m2 = app.create_mentor("mentor2").await;
        let student = app.create_student("student1").await;
        let first = app.request_mentorship(&student, m1.id).await.id();
        app.request_mentorship(&student, m2.id).await;
        app.patch_with_token(
            &routes::mentorship_status(first),
            &json!({"status": "accepted"}),
            &m1.token,
        )
        .await;

        let res = app
            .get_with_token(
                &format!("{}?status=pending", routes::MENTORSHIPS),
                &student.token,
            )
            .await;

        assert_eq!(res.body["pagination"]["total"], 1);
        assert_eq!(res.body["data"][0]["mentor_id"], m2.id);
    }

    #[tokio::test]
    async fn unknown_status_filter_is_rejected() {
        let app = TestApp::spawn().await;
        let student = app.create_student("student1").await;

        let res = app
            .get_with_token(
                &format!("{}?status=approved", routes::MENTORSHIPS),
                &student.token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod paging {
    use super::*;

    #[tokio::test]
    async fn absurd_page_number_returns_an_empty_page() {
        let app = TestApp::spawn().await;
        let mentor = app.create_mentor("mentor1").await;
        let student = app.create_student("student1").await;
        app.request_mentorship(&student, mentor.id).await;

        let res = app
            .get_with_token(
                &format!("{}?page={}", routes::MENTORSHIPS, u64::MAX),
                &student.token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["data"].as_array().unwrap().len(), 0);
        assert_eq!(res.body["pagination"]["total"], 1);
    }
}
