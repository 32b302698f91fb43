//! Backend and dispatcher tests against a local mock HTTP server.

use postline::app::models::NewComment;
use postline::app::services::Backend;
use postline::{ApiCompletion, ApiRequest, ApiService, Flow, NetworkError, RequestTag, RestClient};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> RestClient {
    RestClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn users_should_be_listed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Leanne Graham", "email": "Sincere@april.biz", "phone": "1-770-736-8031"},
            {"id": 2, "name": "Ervin Howell", "email": "Shanna@melissa.tv", "phone": "010-692-6593"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let users = client(&server).users().await.unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[0].name, "Leanne Graham");
    assert_eq!(users[1].email, "Shanna@melissa.tv");
}

#[tokio::test]
async fn posts_should_be_filtered_by_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(query_param("userId", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 21, "userId": 3, "title": "asperiores ea ipsam", "body": "quia et suscipit"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let posts = client(&server).posts_for_user(3).await.unwrap();

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].user_id, 3);
    assert_eq!(posts[0].title, "asperiores ea ipsam");
}

#[tokio::test]
async fn empty_collection_should_be_a_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/comments"))
        .and(query_param("postId", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let comments = client(&server).comments_for_post(7).await.unwrap();

    assert!(comments.is_empty());
}

#[tokio::test]
async fn new_comment_should_be_posted_as_camel_case_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/comments"))
        .and(body_json(json!({
            "postId": 1,
            "name": "Ann",
            "email": "ann@example.com",
            "body": "Nice post"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 501,
            "postId": 1,
            "name": "Ann",
            "email": "ann@example.com",
            "body": "Nice post"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client(&server)
        .create_comment(&NewComment {
            post_id: 1,
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            body: "Nice post".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(created.id, 501);
    assert_eq!(created.post_id, 1);
}

#[tokio::test]
async fn comment_should_be_deleted_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/comments/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).delete_comment(4).await.unwrap();
}

#[tokio::test]
async fn non_success_status_should_be_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/comments/9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client(&server);

    assert_eq!(client.users().await, Err(NetworkError::Status(503)));
    assert_eq!(client.delete_comment(9).await, Err(NetworkError::Status(404)));
}

#[tokio::test]
async fn malformed_body_should_be_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client(&server).users().await;

    assert!(matches!(result, Err(NetworkError::Decode(_))));
}

#[tokio::test]
async fn unreachable_server_should_be_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = RestClient::new(&uri, Duration::from_secs(1)).unwrap();
    let result = client.users().await;

    assert!(matches!(result, Err(NetworkError::Transport(_))));
}

#[tokio::test]
async fn dispatcher_should_return_completion_with_request_tag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(query_param("userId", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "userId": 1, "title": "sunt aut facere", "body": "quia et suscipit"}
        ])))
        .mount(&server)
        .await;

    let mut service = ApiService::new(Arc::new(client(&server)));
    let tag = RequestTag::new(Flow::Posts, Some(1), 4);

    service.dispatch(ApiRequest::LoadPosts { tag, user_id: 1 });
    assert_eq!(service.in_flight(), 1);

    let completion = tokio::time::timeout(Duration::from_secs(5), service.next_completion())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(service.in_flight(), 0);
    assert_eq!(completion.tag(), tag);
    match completion {
        ApiCompletion::PostsLoaded { result, .. } => {
            let posts = result.unwrap();
            assert_eq!(posts.len(), 1);
            assert_eq!(posts[0].title, "sunt aut facere");
        }
        other => panic!("unexpected completion: {other:?}"),
    }
}

#[tokio::test]
async fn dispatcher_should_report_failed_delete_with_comment_id() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/comments/2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut service = ApiService::new(Arc::new(client(&server)));
    let tag = RequestTag::new(Flow::CommentMutation, Some(1), 0);
    service.dispatch(ApiRequest::DeleteComment { tag, comment_id: 2 });

    let completion = tokio::time::timeout(Duration::from_secs(5), service.next_completion())
        .await
        .unwrap()
        .unwrap();

    assert!(completion.is_error());
    assert_eq!(
        completion,
        ApiCompletion::CommentDeleted {
            tag,
            comment_id: 2,
            result: Err(NetworkError::Status(500)),
        }
    );
}
