use chrono::{Duration, Utc};
use serde_json::json;

use crate::common::{Role, TestApp};

fn valid_contest_body(name: &str, category: &str) -> serde_json::Value {
    json!({
        "name": name,
        "description": "A contest description.",
        "category": category,
        "fee": 25.0,
        "deadline": (Utc::now() + Duration::days(30)).to_rfc3339(),
    })
}

mod creation {
    use super::*;

    #[tokio::test]
    async fn creator_can_create_a_contest() {
        let app = TestApp::spawn().await;
        let cookie = app.create_user_with_role("creator@example.com", Role::Creator).await;

        let res = app
            .post_with_cookie("/contests", &valid_contest_body("Art Battle", "art"), &cookie)
            .await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["name"], "Art Battle");
        assert_eq!(res.body["creator_email"], "creator@example.com");
        assert_eq!(res.body["status"], "draft");
        assert_eq!(res.body["participants_count"], 0);
        assert!(res.body["winner"].is_null());
    }

    #[tokio::test]
    async fn admin_can_create_a_contest() {
        let app = TestApp::spawn().await;
        let cookie = app.create_user_with_role("admin@example.com", Role::Admin).await;

        let res = app
            .post_with_cookie("/contests", &valid_contest_body("Admin Cup", "code"), &cookie)
            .await;

        assert_eq!(res.status, 201);
    }

    #[tokio::test]
    async fn plain_user_cannot_create_a_contest() {
        let app = TestApp::spawn().await;
        let cookie = app.create_user_with_role("user@example.com", Role::User).await;

        let res = app
            .post_with_cookie("/contests", &valid_contest_body("Nope", "art"), &cookie)
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn unauthenticated_create_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_cookie("/contests", &valid_contest_body("Nope", "art"))
            .await;

        assert_eq!(res.status, 401);
    }

    #[tokio::test]
    async fn past_deadline_is_rejected() {
        let app = TestApp::spawn().await;
        let cookie = app.create_user_with_role("creator@example.com", Role::Creator).await;

        let mut body = valid_contest_body("Late", "art");
        body["deadline"] = json!((Utc::now() - Duration::days(1)).to_rfc3339());
        let res = app.post_with_cookie("/contests", &body, &cookie).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn non_positive_fee_is_rejected() {
        let app = TestApp::spawn().await;
        let cookie = app.create_user_with_role("creator@example.com", Role::Creator).await;

        let mut body = valid_contest_body("Free", "art");
        body["fee"] = json!(0.0);
        let res = app.post_with_cookie("/contests", &body, &cookie).await;

        assert_eq!(res.status, 400);
    }
}

mod listing {
    use super::*;

    async fn seed_categories(app: &TestApp) {
        let cookie = app.create_user_with_role("creator@example.com", Role::Creator).await;
        for (name, category) in [
            ("Sketching", "Art and Design"),
            ("Oils", "art"),
            ("Marathon", "Sports"),
        ] {
            app.create_contest(&cookie, name, category, 10.0).await;
        }
    }

    #[tokio::test]
    async fn sentinel_all_returns_everything() {
        let app = TestApp::spawn().await;
        seed_categories(&app).await;

        let all = app.get_without_cookie("/contests?search=All").await;
        assert_eq!(all.status, 200);
        assert_eq!(all.body.as_array().unwrap().len(), 3);

        let unfiltered = app.get_without_cookie("/contests").await;
        assert_eq!(unfiltered.body.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn search_matches_category_substring_case_insensitively() {
        let app = TestApp::spawn().await;
        seed_categories(&app).await;

        let res = app.get_without_cookie("/contests?search=ART").await;
        assert_eq!(res.status, 200);

        let contests = res.body.as_array().unwrap();
        assert_eq!(contests.len(), 2);
        for contest in contests {
            let category = contest["category"].as_str().unwrap().to_lowercase();
            assert!(category.contains("art"));
        }
    }

    #[tokio::test]
    async fn unmatched_search_returns_empty() {
        let app = TestApp::spawn().await;
        seed_categories(&app).await;

        let res = app.get_without_cookie("/contests?search=chess").await;
        assert_eq!(res.body.as_array().unwrap().len(), 0);
    }
}

mod fetch_and_delete {
    use super::*;

    #[tokio::test]
    async fn get_returns_the_contest() {
        let app = TestApp::spawn().await;
        let cookie = app.create_user_with_role("creator@example.com", Role::Creator).await;
        let id = app.create_contest(&cookie, "Fetch Me", "art", 12.5).await;

        let res = app.get_without_cookie(&format!("/contests/{id}")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["name"], "Fetch Me");
        assert_eq!(res.body["fee"], 12.5);
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .get_without_cookie(&format!("/contests/{}", uuid::Uuid::new_v4()))
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn delete_requires_admin() {
        let app = TestApp::spawn().await;
        let creator = app.create_user_with_role("creator@example.com", Role::Creator).await;
        let id = app.create_contest(&creator, "Keep Me", "art", 10.0).await;

        let res = app.delete_with_cookie(&format!("/contests/{id}"), &creator).await;
        assert_eq!(res.status, 403);

        let admin = app.create_user_with_role("admin@example.com", Role::Admin).await;
        let res = app.delete_with_cookie(&format!("/contests/{id}"), &admin).await;
        assert_eq!(res.status, 204);

        let gone = app.get_without_cookie(&format!("/contests/{id}")).await;
        assert_eq!(gone.status, 404);
    }
}

mod status_transitions {
    use super::*;

    #[tokio::test]
    async fn admin_can_publish_a_contest() {
        let app = TestApp::spawn().await;
        let creator = app.create_user_with_role("creator@example.com", Role::Creator).await;
        let id = app.create_contest(&creator, "Publish Me", "art", 10.0).await;
        let admin = app.create_user_with_role("admin@example.com", Role::Admin).await;

        let res = app
            .patch_with_cookie(
                &format!("/admin-contests/{id}"),
                &json!({ "status": "published" }),
                &admin,
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["status"], "published");
    }

    #[tokio::test]
    async fn non_admin_cannot_change_status() {
        let app = TestApp::spawn().await;
        let creator = app.create_user_with_role("creator@example.com", Role::Creator).await;
        let id = app.create_contest(&creator, "Mine", "art", 10.0).await;

        let res = app
            .patch_with_cookie(
                &format!("/admin-contests/{id}"),
                &json!({ "status": "published" }),
                &creator,
            )
            .await;

        assert_eq!(res.status, 403);
    }

    #[tokio::test]
    async fn unrecognized_status_is_rejected() {
        let app = TestApp::spawn().await;
        let creator = app.create_user_with_role("creator@example.com", Role::Creator).await;
        let id = app.create_contest(&creator, "Odd", "art", 10.0).await;
        let admin = app.create_user_with_role("admin@example.com", Role::Admin).await;

        let res = app
            .patch_with_cookie(
                &format!("/admin-contests/{id}"),
                &json!({ "status": "accepted" }),
                &admin,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert!(res.text.contains("accepted"));
    }

    #[tokio::test]
    async fn status_change_for_unknown_contest_is_not_found() {
        let app = TestApp::spawn().await;
        let admin = app.create_user_with_role("admin@example.com", Role::Admin).await;

        let res = app
            .patch_with_cookie(
                &format!("/admin-contests/{}", uuid::Uuid::new_v4()),
                &json!({ "status": "closed" }),
                &admin,
            )
            .await;

        assert_eq!(res.status, 404);
    }
}

mod rankings {
    use super::*;

    #[tokio::test]
    async fn top_contests_is_capped_and_non_increasing() {
        let app = TestApp::spawn().await;
        for participants in [3, 12, 7, 0, 25, 9, 1] {
            app.seed_contest(participants, None).await;
        }

        let res = app.get_without_cookie("/top-contests").await;
        assert_eq!(res.status, 200);

        let contests = res.body.as_array().unwrap();
        assert_eq!(contests.len(), 5);
        let counts: Vec<u64> = contests
            .iter()
            .map(|c| c["participants_count"].as_u64().unwrap())
            .collect();
        assert!(counts.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(counts[0], 25);
    }

    #[tokio::test]
    async fn top_contests_handles_fewer_entries_than_the_cap() {
        let app = TestApp::spawn().await;
        app.seed_contest(4, None).await;
        app.seed_contest(8, None).await;

        let res = app.get_without_cookie("/top-contests").await;
        let contests = res.body.as_array().unwrap();
        assert_eq!(contests.len(), 2);
        assert_eq!(contests[0]["participants_count"], 8);
    }

    #[tokio::test]
    async fn top_winner_only_lists_decided_contests() {
        let app = TestApp::spawn().await;
        app.seed_contest(50, None).await; // undecided, must not appear
        for participants in [3, 30, 11, 7] {
            app.seed_contest(
                participants,
                Some(crate::common::Winner {
                    name: "Champ".to_string(),
                    email: format!("champ{participants}@example.com"),
                    image_url: "https://img.example/champ.png".to_string(),
                }),
            )
            .await;
        }

        let res = app.get_without_cookie("/top-winner").await;
        assert_eq!(res.status, 200);

        let entries = res.body.as_array().unwrap();
        assert_eq!(entries.len(), 3);
        let counts: Vec<u64> = entries
            .iter()
            .map(|e| e["participants_count"].as_u64().unwrap())
            .collect();
        assert_eq!(counts, vec![30, 11, 7]);
        for entry in entries {
            assert!(entry["winner"]["email"].as_str().is_some());
        }
    }
}

mod my_contests {
    use super::*;

    #[tokio::test]
    async fn lists_only_the_callers_contests() {
        let app = TestApp::spawn().await;
        let mine = app.create_user_with_role("mine@example.com", Role::Creator).await;
        let other = app.create_user_with_role("other@example.com", Role::Creator).await;
        app.create_contest(&mine, "Mine A", "art", 10.0).await;
        app.create_contest(&mine, "Mine B", "art", 10.0).await;
        app.create_contest(&other, "Not Mine", "art", 10.0).await;

        let res = app
            .get_with_cookie("/my-created-contests?creator=mine@example.com", &mine)
            .await;

        assert_eq!(res.status, 200);
        let contests = res.body.as_array().unwrap();
        assert_eq!(contests.len(), 2);
        for contest in contests {
            assert_eq!(contest["creator_email"], "mine@example.com");
        }
    }

    #[tokio::test]
    async fn creator_param_must_match_the_caller() {
        let app = TestApp::spawn().await;
        let cookie = app.create_user_with_role("mine@example.com", Role::Creator).await;

        let res = app
            .get_with_cookie("/my-created-contests?creator=other@example.com", &cookie)
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }
}

mod winner_declaration {
    use super::*;

    /// Creator, published contest, one registered participant.
    async fn contest_with_registrant(app: &TestApp) -> (String, uuid::Uuid) {
        let creator = app.create_user_with_role("creator@example.com", Role::Creator).await;
        let id = app.create_contest(&creator, "Decided", "art", 10.0).await;
        app.publish_contest(id).await;

        let participant = app.auth_cookie("winner@example.com").await;
        app.register(id, "winner@example.com", &participant).await;

        (creator, id)
    }

    fn winner_body() -> serde_json::Value {
        json!({
            "winner_name": "The Winner",
            "winner_email": "winner@example.com",
            "winner_image": "https://img.example/winner.png",
        })
    }

    #[tokio::test]
    async fn owner_declares_winner_with_all_fields() {
        let app = TestApp::spawn().await;
        let (creator, id) = contest_with_registrant(&app).await;

        let res = app
            .patch_with_cookie(&format!("/my-created-contests/{id}"), &winner_body(), &creator)
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["winner"]["name"], "The Winner");
        assert_eq!(res.body["winner"]["email"], "winner@example.com");
        assert_eq!(res.body["winner"]["image_url"], "https://img.example/winner.png");
        assert_eq!(res.body["status"], "winner_declared");
    }

    #[tokio::test]
    async fn redeclaration_is_a_conflict() {
        let app = TestApp::spawn().await;
        let (creator, id) = contest_with_registrant(&app).await;

        let first = app
            .patch_with_cookie(&format!("/my-created-contests/{id}"), &winner_body(), &creator)
            .await;
        assert_eq!(first.status, 200);

        let second = app
            .patch_with_cookie(&format!("/my-created-contests/{id}"), &winner_body(), &creator)
            .await;
        assert_eq!(second.status, 409);
        assert_eq!(second.body["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn draft_contest_cannot_have_a_winner() {
        let app = TestApp::spawn().await;
        let creator = app.create_user_with_role("creator@example.com", Role::Creator).await;
        let id = app.create_contest(&creator, "Still Draft", "art", 10.0).await;

        let res = app
            .patch_with_cookie(&format!("/my-created-contests/{id}"), &winner_body(), &creator)
            .await;

        assert_eq!(res.status, 409);
    }

    #[tokio::test]
    async fn winner_must_be_a_registrant() {
        let app = TestApp::spawn().await;
        let creator = app.create_user_with_role("creator@example.com", Role::Creator).await;
        let id = app.create_contest(&creator, "Empty", "art", 10.0).await;
        app.publish_contest(id).await;

        let res = app
            .patch_with_cookie(&format!("/my-created-contests/{id}"), &winner_body(), &creator)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn another_creator_cannot_declare() {
        let app = TestApp::spawn().await;
        let (_creator, id) = contest_with_registrant(&app).await;
        let interloper = app.create_user_with_role("other@example.com", Role::Creator).await;

        let res = app
            .patch_with_cookie(&format!("/my-created-contests/{id}"), &winner_body(), &interloper)
            .await;

        assert_eq!(res.status, 403);
    }
}
