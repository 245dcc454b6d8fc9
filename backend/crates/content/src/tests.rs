//! Scenario tests for the content crate

#[cfg(test)]
mod support {
    use std::sync::Arc;

    use auth::domain::value_object::UserName;
    use auth::{Principal, SessionRegistry};
    use kernel::id::UserId;

    use crate::application::{CommentUseCase, FavoriteUseCase, GetPostUseCase, ListPostsUseCase};
    use crate::{ContentConfig, MemoryContentRepository};

    pub struct Harness {
        pub repo: Arc<MemoryContentRepository>,
        pub sessions: Arc<SessionRegistry>,
        pub config: Arc<ContentConfig>,
    }

    pub fn harness() -> Harness {
        let repo = MemoryContentRepository::new();
        repo.insert_post(1, "kickflip", "Kickflip", "Flick the board.");
        repo.insert_post(7, "ollie", "Ollie", "Pop the tail.");

        Harness {
            repo: Arc::new(repo),
            sessions: Arc::new(SessionRegistry::default()),
            config: Arc::new(ContentConfig::default()),
        }
    }

    impl Harness {
        /// Open a session for a fresh user, returning (user id, token)
        pub fn sign_in(&self, name: &str) -> (UserId, String) {
            let principal = Principal::new(UserId::new(), UserName::new(name).unwrap());
            let user_id = principal.user_id;
            (user_id, self.sessions.create(principal).into_inner())
        }

        pub fn comments(&self) -> CommentUseCase<MemoryContentRepository> {
            CommentUseCase::new(self.repo.clone(), self.sessions.clone(), self.config.clone())
        }

        pub fn favorites(&self) -> FavoriteUseCase<MemoryContentRepository> {
            FavoriteUseCase::new(self.repo.clone(), self.sessions.clone(), self.config.clone())
        }

        pub fn list_posts(&self) -> ListPostsUseCase<MemoryContentRepository> {
            ListPostsUseCase::new(self.repo.clone(), self.sessions.clone(), self.config.clone())
        }

        pub fn get_post(&self) -> GetPostUseCase<MemoryContentRepository> {
            GetPostUseCase::new(self.repo.clone(), self.config.clone())
        }
    }
}

#[cfg(test)]
mod post_tests {
    use super::support::*;
    use crate::ContentError;
    use crate::domain::value_object::PostId;

    #[tokio::test]
    async fn test_anonymous_listing_has_no_favorites() {
        let h = harness();
        let listing = h.list_posts().execute(None).await.unwrap();
        assert_eq!(listing.posts.len(), 2);
        assert!(listing.favorites.is_none());

        let listing = h.list_posts().execute(Some("forged-token")).await.unwrap();
        assert!(listing.favorites.is_none());
    }

    #[tokio::test]
    async fn test_listing_marks_callers_favorites() {
        let h = harness();
        let (_, token) = h.sign_in("bob");
        h.favorites().add(Some(&token), PostId::new(7)).await.unwrap();

        let listing = h.list_posts().execute(Some(&token)).await.unwrap();
        let favorites = listing.favorites.unwrap();
        assert!(favorites.contains(&PostId::new(7)));
        assert!(!favorites.contains(&PostId::new(1)));

        // Someone else sees their own (empty) set
        let (_, other) = h.sign_in("alice");
        let listing = h.list_posts().execute(Some(&other)).await.unwrap();
        assert!(listing.favorites.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_post_not_found() {
        let h = harness();
        let err = h.get_post().execute("nollie").await.unwrap_err();
        assert!(matches!(err, ContentError::PostNotFound));
    }

    #[tokio::test]
    async fn test_store_outage_is_persistence_error() {
        let h = harness();
        h.repo.set_unavailable(true);
        let err = h.get_post().execute("ollie").await.unwrap_err();
        assert!(matches!(err, ContentError::Persistence(_)));
        assert_eq!(err.kind(), kernel::ErrorKind::ServiceUnavailable);
    }
}

#[cfg(test)]
mod comment_tests {
    use super::support::*;
    use crate::ContentError;
    use kernel::id::CommentId;

    #[tokio::test]
    async fn test_add_comment_snapshots_author() {
        let h = harness();
        let (user_id, token) = h.sign_in("bob");

        let comment_id = h
            .comments()
            .add(Some(&token), "ollie", "  nice one  ")
            .await
            .unwrap();

        let detail = h.get_post().execute("ollie").await.unwrap();
        assert_eq!(detail.comments.len(), 1);
        let comment = &detail.comments[0];
        assert_eq!(comment.comment_id, comment_id);
        assert_eq!(comment.author_user_id, user_id);
        assert_eq!(comment.author_user_name.as_str(), "bob");
        assert_eq!(comment.body.as_str(), "nice one");
    }

    #[tokio::test]
    async fn test_add_comment_requires_session() {
        let h = harness();
        let err = h.comments().add(None, "ollie", "hi").await.unwrap_err();
        assert!(matches!(err, ContentError::Unauthenticated));
        assert_eq!(h.repo.comment_count(), 0);
    }

    #[tokio::test]
    async fn test_add_comment_with_unknown_token_is_unauthenticated() {
        let h = harness();
        let err = h
            .comments()
            .add(Some("forged-token"), "ollie", "hi")
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::Unauthenticated));
        assert_eq!(h.repo.comment_count(), 0);
    }

    #[tokio::test]
    async fn test_add_comment_validation() {
        let h = harness();
        let (_, token) = h.sign_in("bob");

        let err = h.comments().add(Some(&token), "ollie", "   ").await.unwrap_err();
        assert!(matches!(err, ContentError::EmptyComment));

        let long = "x".repeat(h.config.max_comment_len + 1);
        let err = h.comments().add(Some(&token), "ollie", &long).await.unwrap_err();
        assert!(matches!(err, ContentError::CommentTooLong { .. }));

        let err = h.comments().add(Some(&token), "nollie", "hi").await.unwrap_err();
        assert!(matches!(err, ContentError::PostNotFound));
        assert_eq!(h.repo.comment_count(), 0);
    }

    #[tokio::test]
    async fn test_comments_listed_oldest_first() {
        let h = harness();
        let (_, bob) = h.sign_in("bob");
        let (_, alice) = h.sign_in("alice");

        h.comments().add(Some(&bob), "ollie", "first").await.unwrap();
        h.comments().add(Some(&alice), "ollie", "second").await.unwrap();
        h.comments().add(Some(&bob), "ollie", "third").await.unwrap();
        h.comments().add(Some(&bob), "kickflip", "elsewhere").await.unwrap();

        let bodies: Vec<String> = h
            .get_post()
            .execute("ollie")
            .await
            .unwrap()
            .comments
            .into_iter()
            .map(|c| c.body.into_inner())
            .collect();
        assert_eq!(bodies, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_only_author_can_delete() {
        let h = harness();
        let (_, bob) = h.sign_in("bob");
        let (_, eve) = h.sign_in("eve");
        let comment_id = h.comments().add(Some(&bob), "ollie", "mine").await.unwrap();

        assert!(!h.comments().delete(Some(&eve), &comment_id).await.unwrap());
        assert!(!h.comments().delete(None, &comment_id).await.unwrap());
        assert_eq!(h.get_post().execute("ollie").await.unwrap().comments.len(), 1);

        assert!(h.comments().delete(Some(&bob), &comment_id).await.unwrap());
        assert!(h.get_post().execute("ollie").await.unwrap().comments.is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_comment_is_noop() {
        let h = harness();
        let (_, bob) = h.sign_in("bob");
        assert!(!h.comments().delete(Some(&bob), &CommentId::new()).await.unwrap());
    }

    #[tokio::test]
    async fn test_same_name_new_account_cannot_delete() {
        let h = harness();
        let (_, first) = h.sign_in("bob");
        let comment_id = h.comments().add(Some(&first), "ollie", "hi").await.unwrap();

        // Ownership follows the user id, not the displayed name
        let (_, second) = h.sign_in("bob");
        assert!(!h.comments().delete(Some(&second), &comment_id).await.unwrap());
        assert_eq!(h.repo.comment_count(), 1);
    }
}

#[cfg(test)]
mod favorite_tests {
    use std::sync::Arc;

    use super::support::*;
    use crate::ContentError;
    use crate::domain::value_object::PostId;

    #[tokio::test]
    async fn test_add_twice_keeps_one_row() {
        let h = harness();
        let (_, token) = h.sign_in("bob");

        h.favorites().add(Some(&token), PostId::new(7)).await.unwrap();
        h.favorites().add(Some(&token), PostId::new(7)).await.unwrap();

        assert_eq!(h.repo.favorite_count(), 1);
        assert_eq!(h.favorites().list(Some(&token)).await.unwrap(), [PostId::new(7)]);
    }

    #[tokio::test]
    async fn test_concurrent_adds_keep_one_row() {
        let h = harness();
        let (_, token) = h.sign_in("bob");
        let use_case = Arc::new(h.favorites());

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let use_case = use_case.clone();
                let token = token.clone();
                tokio::spawn(async move { use_case.add(Some(&token), PostId::new(7)).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(h.repo.favorite_count(), 1);
    }

    #[tokio::test]
    async fn test_remove_missing_is_noop() {
        let h = harness();
        let (_, token) = h.sign_in("bob");
        h.favorites().remove(Some(&token), PostId::new(7)).await.unwrap();

        h.favorites().add(Some(&token), PostId::new(7)).await.unwrap();
        h.favorites().remove(Some(&token), PostId::new(7)).await.unwrap();
        assert!(h.favorites().list(Some(&token)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_anonymous_is_rejected() {
        let h = harness();
        assert!(matches!(
            h.favorites().add(None, PostId::new(7)).await,
            Err(ContentError::Unauthenticated)
        ));
        assert!(matches!(
            h.favorites().remove(None, PostId::new(7)).await,
            Err(ContentError::Unauthenticated)
        ));
        assert!(matches!(
            h.favorites().list(None).await,
            Err(ContentError::Unauthenticated)
        ));
        assert_eq!(h.favorites().status(None, PostId::new(7)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unknown_post() {
        let h = harness();
        let (_, token) = h.sign_in("bob");
        let err = h.favorites().add(Some(&token), PostId::new(404)).await.unwrap_err();
        assert!(matches!(err, ContentError::PostNotFound));
    }

    #[tokio::test]
    async fn test_status_and_isolation() {
        let h = harness();
        let (_, bob) = h.sign_in("bob");
        let (_, alice) = h.sign_in("alice");
        h.favorites().add(Some(&bob), PostId::new(7)).await.unwrap();

        assert_eq!(h.favorites().status(Some(&bob), PostId::new(7)).await.unwrap(), Some(true));
        assert_eq!(h.favorites().status(Some(&alice), PostId::new(7)).await.unwrap(), Some(false));

        h.favorites().remove(Some(&alice), PostId::new(7)).await.unwrap();
        assert_eq!(h.repo.favorite_count(), 1);
    }

    #[tokio::test]
    async fn test_revoked_session_loses_access() {
        let h = harness();
        let (_, token) = h.sign_in("bob");
        h.favorites().add(Some(&token), PostId::new(7)).await.unwrap();

        h.sessions.revoke(&token);
        assert!(matches!(
            h.favorites().add(Some(&token), PostId::new(1)).await,
            Err(ContentError::Unauthenticated)
        ));
    }
}

#[cfg(test)]
mod http_tests {
    use std::sync::Arc;

    use auth::{AuthAppState, AuthConfig, MemoryAuthRepository, SessionRegistry, auth_router, capture_session_token};
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use axum::response::Response;
    use platform::notify::LogNotifier;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::{ContentAppState, ContentConfig, MemoryContentRepository, content_router};

    /// Both routers behind one cookie middleware, as the binary wires them
    fn app() -> (Router, MemoryContentRepository) {
        let config = AuthConfig::development();
        let sessions = Arc::new(SessionRegistry::new(config.session_policy()));
        let cookie_name: Arc<str> = Arc::from(config.session_cookie_name.as_str());

        let content = MemoryContentRepository::new();
        content.insert_post(7, "ollie", "Ollie", "Pop the tail.");

        let auth_state =
            AuthAppState::new(MemoryAuthRepository::new(), LogNotifier, sessions.clone(), config)
                .unwrap();
        let content_state = ContentAppState::new(content.clone(), sessions, ContentConfig::default());

        let router = Router::new()
            .nest("/api/auth", auth_router(auth_state))
            .nest("/api/content", content_router(content_state))
            .layer(axum::middleware::from_fn_with_state(
                cookie_name,
                capture_session_token,
            ));
        (router, content)
    }

    fn request(method: Method, uri: &str, body: Option<Value>, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_bob_scenario() {
        let (app, content) = app();

        let response = app
            .clone()
            .oneshot(request(
                Method::POST,
                "/api/auth/register",
                Some(json!({"userName": "bob", "email": "bob@x.com", "password": "secret", "confirmPassword": "secret"})),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(request(
                Method::POST,
                "/api/auth/login",
                Some(json!({"userName": "bob", "password": "wrong"})),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .clone()
            .oneshot(request(
                Method::POST,
                "/api/auth/login",
                Some(json!({"userName": "bob", "password": "secret"})),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        let cookie = set_cookie.split(';').next().unwrap().to_string();

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(request(Method::PUT, "/api/content/favorites/7", None, Some(&cookie)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NO_CONTENT);
        }
        assert_eq!(content.favorite_count(), 1);

        let listing = json_body(
            app.clone()
                .oneshot(request(Method::GET, "/api/content/posts", None, Some(&cookie)))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(listing["posts"][0]["favorite"], true);

        let response = app
            .clone()
            .oneshot(request(Method::POST, "/api/auth/logout", None, Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        // The old cookie is anonymous now
        let response = app
            .clone()
            .oneshot(request(Method::PUT, "/api/content/favorites/7", None, Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let listing = json_body(
            app.clone()
                .oneshot(request(Method::GET, "/api/content/posts", None, Some(&cookie)))
                .await
                .unwrap(),
        )
        .await;
        assert!(listing["posts"][0].get("favorite").is_none());
    }

    #[tokio::test]
    async fn test_comment_lifecycle_over_http() {
        let (app, _content) = app();

        let mut cookies = Vec::new();
        for name in ["bob", "eve"] {
            let email = format!("{name}@x.com");
            app.clone()
                .oneshot(request(
                    Method::POST,
                    "/api/auth/register",
                    Some(json!({"userName": name, "email": email, "password": "pw", "confirmPassword": "pw"})),
                    None,
                ))
                .await
                .unwrap();
            let response = app
                .clone()
                .oneshot(request(
                    Method::POST,
                    "/api/auth/login",
                    Some(json!({"userName": name, "password": "pw"})),
                    None,
                ))
                .await
                .unwrap();
            let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
            cookies.push(set_cookie.split(';').next().unwrap().to_string());
        }
        let (bob, eve) = (cookies[0].as_str(), cookies[1].as_str());

        let anonymous = app
            .clone()
            .oneshot(request(
                Method::POST,
                "/api/content/posts/ollie/comments",
                Some(json!({"body": "hi"})),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

        let missing = app
            .clone()
            .oneshot(request(
                Method::POST,
                "/api/content/posts/nollie/comments",
                Some(json!({"body": "hi"})),
                Some(bob),
            ))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let created = app
            .clone()
            .oneshot(request(
                Method::POST,
                "/api/content/posts/ollie/comments",
                Some(json!({"body": "hi"})),
                Some(bob),
            ))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        let comment_id = json_body(created).await["commentId"]
            .as_str()
            .unwrap()
            .to_string();

        // Not the author: still 204, comment survives
        let response = app
            .clone()
            .oneshot(request(
                Method::DELETE,
                &format!("/api/content/comments/{comment_id}"),
                None,
                Some(eve),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let detail = json_body(
            app.clone()
                .oneshot(request(Method::GET, "/api/content/posts/ollie", None, None))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(detail["comments"].as_array().unwrap().len(), 1);
        assert_eq!(detail["comments"][0]["authorUserName"], "bob");

        app.clone()
            .oneshot(request(
                Method::DELETE,
                &format!("/api/content/comments/{comment_id}"),
                None,
                Some(bob),
            ))
            .await
            .unwrap();

        let detail = json_body(
            app.clone()
                .oneshot(request(Method::GET, "/api/content/posts/ollie", None, Some(bob)))
                .await
                .unwrap(),
        )
        .await;
        assert!(detail["comments"].as_array().unwrap().is_empty());
        assert_eq!(detail["favorite"], false);
    }
}
