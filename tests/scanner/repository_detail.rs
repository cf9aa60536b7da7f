//! Repository detail scans

use crate::common::*;
use reposcan::scanner::api::{RepositoryResponse, ScanError};
use serde_json::json;

#[tokio::test]
async fn test_detail_document() {
    let fake = repository(
        account(vec![]),
        "u",
        "a",
        vec![file("deploy.yml")],
        vec![hook("ci", true), hook("legacy", false)],
    )
    .respond(
        &url("/repos/u/a/contents/deploy.yml"),
        json!({"type": "file", "encoding": "base64", "content": "a2V5OiB2\nYWx1ZQ==\n"}),
    );
    let (manager, _) = build_manager(fake);

    let detail = manager
        .get_repository_detail(&token(), "u", "a")
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_value(RepositoryResponse {
            repository: Some(detail)
        })
        .unwrap(),
        json!({
            "repository": {
                "name": "a",
                "owner": "u",
                "size": 64,
                "isPrivate": false,
                "fileCount": 1,
                "ymlContent": "key: value",
                "activeWebhooks": [{"name": "ci"}]
            }
        })
    );
}

#[tokio::test]
async fn test_nested_tree_counts_every_file() {
    let fake = repository(
        account(vec![]),
        "u",
        "deep",
        vec![file("a.txt"), dir("src"), dir("docs")],
        vec![],
    )
    .respond(
        &url("/repos/u/deep/contents/src"),
        json!([file("src/lib.rs"), dir("src/bin")]),
    )
    .respond(
        &url("/repos/u/deep/contents/src/bin"),
        json!([file("src/bin/main.rs"), file("src/bin/config.yaml")]),
    )
    .respond(&url("/repos/u/deep/contents/docs"), json!([]))
    .respond(
        &url("/repos/u/deep/contents/src/bin/config.yaml"),
        json!({"encoding": "base64", "content": "cG9ydDogODA4MA=="}),
    );
    let (manager, _) = build_manager(fake);

    let detail = manager
        .get_repository_detail(&token(), "u", "deep")
        .await
        .unwrap();

    assert_eq!(detail.file_count, 4);
    assert_eq!(detail.yml_content.as_deref(), Some("port: 8080"));
    assert!(detail.active_webhooks.is_empty());
}

#[tokio::test]
async fn test_rejected_token_on_any_call_is_invalid_token() {
    for failing in ["/repos/u/a", "/repos/u/a/contents", "/repos/u/a/hooks"] {
        let fake = repository(account(vec![]), "u", "a", vec![file("x")], vec![]).fail(
            &url(failing),
            401,
            "Bad credentials",
        );
        let (manager, _) = build_manager(fake);

        let error = manager
            .get_repository_detail(&token(), "u", "a")
            .await
            .unwrap_err();

        assert_eq!(error, ScanError::InvalidToken, "401 on {}", failing);
    }
}

#[tokio::test]
async fn test_unknown_repository() {
    let (manager, _) = build_manager(account(vec![]));

    let error = manager
        .get_repository_detail(&token(), "u", "nope")
        .await
        .unwrap_err();

    assert_eq!(error, ScanError::RepoNotFound);
}

#[tokio::test]
async fn test_hooks_without_admin_rights() {
    let fake = repository(account(vec![]), "u", "a", vec![file("x")], vec![]).fail(
        &url("/repos/u/a/hooks"),
        404,
        "Not Found",
    );
    let (manager, _) = build_manager(fake);

    // hooks answer 404 without admin rights, which reads as a missing repository
    let error = manager
        .get_repository_detail(&token(), "u", "a")
        .await
        .unwrap_err();

    assert_eq!(error, ScanError::RepoNotFound);

    let fake = repository(account(vec![]), "u", "a", vec![file("x")], vec![]).fail(
        &url("/repos/u/a/hooks"),
        403,
        "Must have admin rights to Repository.",
    );
    let (manager, _) = build_manager(fake);

    let error = manager
        .get_repository_detail(&token(), "u", "a")
        .await
        .unwrap_err();

    assert_eq!(error, ScanError::WebhookAccessDenied);
}

#[tokio::test]
async fn test_yaml_fetch_failure_keeps_detail() {
    let fake = repository(
        account(vec![]),
        "u",
        "a",
        vec![file("ci.yml")],
        vec![hook("ci", true)],
    )
    .fail(&url("/repos/u/a/contents/ci.yml"), 502, "Bad Gateway");
    let (manager, _) = build_manager(fake);

    let detail = manager
        .get_repository_detail(&token(), "u", "a")
        .await
        .unwrap();

    assert_eq!(detail.file_count, 1);
    assert_eq!(detail.yml_content, None);
    assert_eq!(detail.active_webhooks.len(), 1);
}

#[tokio::test]
async fn test_failing_subdirectory_aborts_scan() {
    let fake = repository(
        account(vec![]),
        "u",
        "a",
        vec![file("a.yml"), dir("secret")],
        vec![],
    )
    .fail(&url("/repos/u/a/contents/secret"), 403, "Forbidden");
    let (manager, fake) = build_manager(fake);

    let error = manager
        .get_repository_detail(&token(), "u", "a")
        .await
        .unwrap_err();

    assert_eq!(error, ScanError::RepoAccessDenied);
    assert!(!fake
        .requested()
        .contains(&url("/repos/u/a/contents/a.yml")));
    assert_eq!(manager.gate().in_use(), 0);
}
