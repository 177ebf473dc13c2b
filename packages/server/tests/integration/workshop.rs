use serde_json::json;

use crate::common::{TestApp, TestUser, routes};

mod catalogue {
    use super::*;

    #[tokio::test]
    async fn admin_creates_and_everyone_reads() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("admin1").await;
        let student = app.create_student("student1").await;

        let id = app.create_workshop(&admin, "Intro to Rust").await;

        let res = app.get_with_token(&routes::workshop(id), &student.token).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["title"], "Intro to Rust");

        let list = app.get_with_token(routes::WORKSHOPS, &student.token).await;
        assert_eq!(list.status, 200);
        assert_eq!(list.body["pagination"]["total"], 1);
    }

    #[tokio::test]
    async fn students_cannot_create_workshops() {
        let app = TestApp::spawn().await;
        let student = app.create_student("student1").await;

        let res = app
            .post_with_token(
                routes::WORKSHOPS,
                &json!({
                    "title": "Unofficial",
                    "description": "",
                    "starts_at": "2099-03-01T09:00:00Z",
                }),
                &student.token,
            )
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn blank_title_is_rejected() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("admin1").await;

        let res = app
            .post_with_token(
                routes::WORKSHOPS,
                &json!({
                    "title": "   ",
                    "description": "",
                    "starts_at": "2099-03-01T09:00:00Z",
                }),
                &admin.token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn unknown_workshop_is_not_found() {
        let app = TestApp::spawn().await;
        let student = app.create_student("student1").await;

        let res = app.get_with_token(&routes::workshop(99_999), &student.token).await;

        assert_eq!(res.status, 404);
    }
}

mod registering {
    use super::*;

    #[tokio::test]
    async fn new_registration_is_registered() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("admin1").await;
        let student = app.create_student("student1").await;
        let workshop_id = app.create_workshop(&admin, "Intro to Rust").await;

        let res = app.register_for_workshop(&student, workshop_id).await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["workshop_id"], workshop_id);
        assert_eq!(res.body["student_id"], student.id);
        assert_eq!(res.body["status"], "registered");
        assert!(res.body["registration_date"].is_string());
    }

    #[tokio::test]
    async fn registering_twice_is_a_duplicate() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("admin1").await;
        let student = app.create_student("student1").await;
        let workshop_id = app.create_workshop(&admin, "Intro to Rust").await;

        let first = app.register_for_workshop(&student, workshop_id).await;
        assert_eq!(first.status, 201, "{}", first.text);

        let res = app.register_for_workshop(&student, workshop_id).await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "DUPLICATE_REGISTRATION");
    }

    #[tokio::test]
    async fn concurrent_registrations_yield_exactly_one_record() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("admin1").await;
        let student = app.create_student("student1").await;
        let workshop_id = app.create_workshop(&admin, "Intro to Rust").await;

        let (a, b) = tokio::join!(
            app.register_for_workshop(&student, workshop_id),
            app.register_for_workshop(&student, workshop_id),
        );

        let mut statuses = [a.status, b.status];
        statuses.sort();
        assert_eq!(statuses, [201, 409]);

        let mine = app.get_with_token(routes::REGISTRATIONS, &student.token).await;
        assert_eq!(mine.body["pagination"]["total"], 1);
    }

    #[tokio::test]
    async fn unknown_workshop_is_not_found() {
        let app = TestApp::spawn().await;
        let student = app.create_student("student1").await;

        let res = app.register_for_workshop(&student, 99_999).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn requires_a_token() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(&routes::workshop_registrations(1), &json!({}))
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }
}

mod cancelling {
    use super::*;

    struct Registered {
        admin: TestUser,
        student: TestUser,
        workshop_id: i32,
        id: i32,
    }

    async fn registered(app: &TestApp) -> Registered {
        let admin = app.create_admin("admin1").await;
        let student = app.create_student("student1").await;
        let workshop_id = app.create_workshop(&admin, "Intro to Rust").await;
        let res = app.register_for_workshop(&student, workshop_id).await;
        assert_eq!(res.status, 201, "{}", res.text);
        let id = res.id();
        Registered {
            admin,
            student,
            workshop_id,
            id,
        }
    }

    #[tokio::test]
    async fn student_cancels_their_registration() {
        let app = TestApp::spawn().await;
        let Registered { student, id, .. } = registered(&app).await;

        let res = app
            .post_with_token(&routes::registration_cancel(id), &json!({}), &student.token)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["status"], "cancelled");
    }

    #[tokio::test]
    async fn cancelling_is_final() {
        let app = TestApp::spawn().await;
        let Registered {
            student,
            workshop_id,
            id,
            ..
        } = registered(&app).await;
        app.post_with_token(&routes::registration_cancel(id), &json!({}), &student.token)
            .await;

        let again = app
            .post_with_token(&routes::registration_cancel(id), &json!({}), &student.token)
            .await;
        assert_eq!(again.status, 409);
        assert_eq!(again.body["code"], "INVALID_TRANSITION");

        // The cancelled row still occupies the (workshop, student) pair.
        let re_register = app.register_for_workshop(&student, workshop_id).await;
        assert_eq!(re_register.status, 409);
        assert_eq!(re_register.body["code"], "DUPLICATE_REGISTRATION");
    }

    #[tokio::test]
    async fn admin_can_cancel_for_a_student() {
        let app = TestApp::spawn().await;
        let Registered { admin, id, .. } = registered(&app).await;

        let res = app
            .post_with_token(&routes::registration_cancel(id), &json!({}), &admin.token)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["status"], "cancelled");
    }

    #[tokio::test]
    async fn other_students_cannot_see_or_cancel() {
        let app = TestApp::spawn().await;
        let Registered { id, .. } = registered(&app).await;
        let other = app.create_student("student2").await;

        let get = app.get_with_token(&routes::registration(id), &other.token).await;
        assert_eq!(get.status, 404);

        let cancel = app
            .post_with_token(&routes::registration_cancel(id), &json!({}), &other.token)
            .await;
        assert_eq!(cancel.status, 404);
    }
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn workshop_roster_requires_manage_permission() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("admin1").await;
        let student = app.create_student("student1").await;
        let workshop_id = app.create_workshop(&admin, "Intro to Rust").await;
        app.register_for_workshop(&student, workshop_id).await;

        let denied = app
            .get_with_token(&routes::workshop_registrations(workshop_id), &student.token)
            .await;
        assert_eq!(denied.status, 403);

        let roster = app
            .get_with_token(&routes::workshop_registrations(workshop_id), &admin.token)
            .await;
        assert_eq!(roster.status, 200);
        assert_eq!(roster.body["pagination"]["total"], 1);
        assert_eq!(roster.body["data"][0]["student_id"], student.id);
    }

    #[tokio::test]
    async fn my_registrations_filter_by_status() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("admin1").await;
        let student = app.create_student("student1").await;
        let w1 = app.create_workshop(&admin, "Intro to Rust").await;
        let w2 = app.create_workshop(&admin, "Async Rust").await;
        let first = app.register_for_workshop(&student, w1).await.id();
        app.register_for_workshop(&student, w2).await;
        app.post_with_token(&routes::registration_cancel(first), &json!({}), &student.token)
            .await;

        let all = app.get_with_token(routes::REGISTRATIONS, &student.token).await;
        assert_eq!(all.body["pagination"]["total"], 2);

        let active = app
            .get_with_token(
                &format!("{}?status=registered", routes::REGISTRATIONS),
                &student.token,
            )
            .await;
        assert_eq!(active.body["pagination"]["total"], 1);
        assert_eq!(active.body["data"][0]["workshop_id"], w2);
    }
}
