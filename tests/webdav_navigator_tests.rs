use davplay::errors::RemoteListingError;
use davplay::models::WebDavServer;
use davplay::services::webdav::{WebDavConnectionConfig, WebDavNavigator};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server_url: &str) -> WebDavConnectionConfig {
    let server = WebDavServer {
        title: "test".to_string(),
        server_url: server_url.to_string(),
        user_name: "testuser".to_string(),
        password: "testpass".to_string(),
    };
    WebDavConnectionConfig::from_server(&server, 30)
}

fn response_entry(href: &str, display_name: &str, is_collection: bool) -> String {
    let resourcetype = if is_collection {
        "<d:resourcetype><d:collection/></d:resourcetype>"
    } else {
        "<d:resourcetype/>"
    };
    format!(
        r#"<d:response>
            <d:href>{href}</d:href>
            <d:propstat>
                <d:prop>
                    <d:displayname>{display_name}</d:displayname>
                    {resourcetype}
                </d:prop>
                <d:status>HTTP/1.1 200 OK</d:status>
            </d:propstat>
        </d:response>"#
    )
}

fn multistatus(entries: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
        <d:multistatus xmlns:d="DAV:">{}</d:multistatus>"#,
        entries.join("\n")
    )
}

#[tokio::test]
async fn test_list_filters_self_entry_and_empty_names_and_sorts() {
    let mock_server = MockServer::start().await;

    let body = multistatus(&[
        // The directory itself, always first in a Depth-1 response.
        response_entry("/dav/videos/", "videos", true),
        response_entry("/dav/videos/z.mp4", "z.mp4", false),
        response_entry("/dav/videos/b/", "b", true),
        response_entry("/dav/videos/a.mp4", "a.mp4", false),
        // Empty display name gets dropped.
        response_entry("/dav/videos/ghost/", "", true),
    ]);

    Mock::given(method("PROPFIND"))
        .and(path("/dav/videos/"))
        .respond_with(ResponseTemplate::new(207).set_body_string(body))
        .mount(&mock_server)
        .await;

    let config = config_for(&format!("{}/dav", mock_server.uri()));
    let navigator = WebDavNavigator::new(config, "/videos/").expect("navigator");
    let resources = navigator.list().await.expect("listing");

    // Collections first, then display name ascending.
    let names: Vec<&str> = resources.iter().map(|r| r.display_name.as_str()).collect();
    assert_eq!(names, vec!["b", "a.mp4", "z.mp4"]);
    assert!(resources[0].is_collection);
    assert!(!resources[1].is_collection);

    // URIs come back absolute, rooted at the mock server.
    for resource in &resources {
        assert!(resource.uri.starts_with(&mock_server.uri()));
    }
}

#[tokio::test]
async fn test_listed_directory_descends_and_file_becomes_playlist_entry() {
    let mock_server = MockServer::start().await;

    let body = multistatus(&[
        response_entry("/dav/", "dav", true),
        response_entry("/dav/movies/", "movies", true),
        response_entry("/dav/intro.mp4", "intro.mp4", false),
    ]);

    Mock::given(method("PROPFIND"))
        .and(path("/dav/"))
        .respond_with(ResponseTemplate::new(207).set_body_string(body))
        .mount(&mock_server)
        .await;

    let config = config_for(&format!("{}/dav", mock_server.uri()));
    let navigator = WebDavNavigator::root(config).expect("navigator");
    let resources = navigator.list().await.expect("listing");
    assert_eq!(resources.len(), 2);

    let dir = &resources[0];
    assert_eq!(navigator.child_path(dir).unwrap(), "/movies/");
    let child = navigator.descend(dir).expect("child navigator");
    assert_eq!(
        child.resolve_absolute_url(),
        format!("{}/dav/movies/", mock_server.uri())
    );

    let file = &resources[1];
    let entry = navigator.to_playlist_entry(file).unwrap();
    assert_eq!(entry.title, "intro.mp4");
    assert_eq!(entry.url, format!("{}/dav/intro.mp4", mock_server.uri()));
}

#[tokio::test]
async fn test_listing_with_only_the_self_entry_is_empty_not_an_error() {
    let mock_server = MockServer::start().await;

    let body = multistatus(&[response_entry("/dav/empty/", "empty", true)]);

    Mock::given(method("PROPFIND"))
        .and(path("/dav/empty/"))
        .respond_with(ResponseTemplate::new(207).set_body_string(body))
        .mount(&mock_server)
        .await;

    let config = config_for(&format!("{}/dav", mock_server.uri()));
    let navigator = WebDavNavigator::new(config, "/empty/").expect("navigator");
    let resources = navigator.list().await.expect("listing");
    assert!(resources.is_empty());
}

#[tokio::test]
async fn test_auth_failure_surfaces_the_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PROPFIND"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server.uri());
    let navigator = WebDavNavigator::root(config).expect("navigator");

    match navigator.list().await {
        Err(RemoteListingError::Status { status, .. }) => assert_eq!(status, 401),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_server_is_a_transport_error() {
    // Discard port, nothing listens there.
    let config = config_for("http://127.0.0.1:9");
    let navigator = WebDavNavigator::root(config).expect("navigator");

    assert!(matches!(
        navigator.list().await,
        Err(RemoteListingError::Transport { .. })
    ));
}

#[tokio::test]
async fn test_garbage_body_is_an_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PROPFIND"))
        .respond_with(
            ResponseTemplate::new(207).set_body_string("<d:multistatus><d:response></d:oops>"),
        )
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server.uri());
    let navigator = WebDavNavigator::root(config).expect("navigator");

    assert!(matches!(
        navigator.list().await,
        Err(RemoteListingError::InvalidResponse { .. })
    ));
}

#[tokio::test]
async fn test_invalid_server_url_is_rejected_up_front() {
    let config = config_for("not-a-url");
    assert!(matches!(
        WebDavNavigator::root(config),
        Err(RemoteListingError::InvalidConfiguration { .. })
    ));
}
