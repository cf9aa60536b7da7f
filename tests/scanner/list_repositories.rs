//! Listing repositories visible to a token

use crate::common::*;
use reposcan::scanner::api::ScanError;
use reposcan::scanner::testing::FakeGitHub;
use serde_json::json;

#[tokio::test]
async fn test_lists_every_repository() {
    let (manager, _) = build_manager(account(vec![
        repo_record("u", "a", 10, false),
        repo_record("u", "b", 20, true),
    ]));

    let list = manager.list_repositories(&token()).await.unwrap();

    assert_eq!(
        serde_json::to_value(&list).unwrap(),
        json!({
            "repositories": [
                {"name": "a", "owner": "u", "size": 10},
                {"name": "b", "owner": "u", "size": 20}
            ],
            "total": 2
        })
    );
}

#[tokio::test]
async fn test_full_pages_keep_provider_order() {
    let page_one: Vec<_> = (0..100)
        .map(|i| repo_record("u", &format!("r{:03}", i), i, false))
        .collect();
    let page_two: Vec<_> = (100..150)
        .map(|i| repo_record("u", &format!("r{:03}", i), i, false))
        .collect();
    let fake = FakeGitHub::new()
        .respond(&url("/user/orgs"), json!([]))
        .respond(&repos_page(100, 1), json!(page_one))
        .respond(&repos_page(100, 2), json!(page_two))
        .respond(&repos_page(100, 3), json!([]));
    let (manager, fake) = build_manager(fake);

    let list = manager.list_repositories(&token()).await.unwrap();

    assert_eq!(list.total, 150);
    assert_eq!(list.repositories.first().unwrap().name, "r000");
    assert_eq!(list.repositories.last().unwrap().name, "r149");
    assert_eq!(
        fake.requested(),
        vec![
            url("/user/orgs"),
            repos_page(100, 1),
            repos_page(100, 2),
            repos_page(100, 3)
        ]
    );
}

#[tokio::test]
async fn test_wrong_token_is_invalid_token() {
    let (manager, _) = build_manager(account(vec![]).require_token("ghp_other"));

    let error = manager.list_repositories(&token()).await.unwrap_err();

    assert_eq!(error, ScanError::InvalidToken);
    assert_eq!(
        error.to_string(),
        "Invalid GitHub token. Please provide a valid token."
    );
}

#[tokio::test]
async fn test_missing_org_scope_is_org_access_denied() {
    let fake = account(vec![]).fail(&url("/user/orgs"), 403, "Resource not accessible");
    let (manager, _) = build_manager(fake);

    let error = manager.list_repositories(&token()).await.unwrap_err();

    assert_eq!(error, ScanError::OrgAccessDenied);
}

#[tokio::test]
async fn test_rate_limited_listing() {
    let fake = account(vec![]).fail(
        &url("/user/orgs"),
        403,
        "API rate limit exceeded for 203.0.113.7.",
    );
    let (manager, _) = build_manager(fake);

    let error = manager.list_repositories(&token()).await.unwrap_err();

    assert_eq!(error, ScanError::RateLimitExceeded);
}
