//! Running commands and rendering JSON output

use crate::common::*;
use reposcan::app::cli::Command;
use reposcan::app::startup::execute;
use reposcan::scanner::api::ScanError;
use serde_json::{json, Value};

#[tokio::test]
async fn test_list_output() {
    let (manager, _) = build_manager(account(vec![
        repo_record("u", "a", 10, false),
        repo_record("u", "b", 20, false),
    ]));

    let output = execute(&manager, &token(), &Command::List).await.unwrap();

    let document: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(document["total"], 2);
    assert_eq!(document["repositories"][1], json!({"name": "b", "owner": "u", "size": 20}));
}

#[tokio::test]
async fn test_detail_output() {
    let fake = repository(account(vec![]), "u", "a", vec![file("README.md")], vec![]);
    let (manager, _) = build_manager(fake);

    let output = execute(
        &manager,
        &token(),
        &Command::Detail {
            owner: "u".to_string(),
            name: "a".to_string(),
        },
    )
    .await
    .unwrap();

    let document: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(document["repository"]["fileCount"], 1);
    assert_eq!(document["repository"]["ymlContent"], Value::Null);
    assert_eq!(document["repository"]["activeWebhooks"], json!([]));
}

#[tokio::test]
async fn test_failure_surfaces_domain_error() {
    let (manager, _) = build_manager(account(vec![]));

    let error = execute(
        &manager,
        &token(),
        &Command::Detail {
            owner: "u".to_string(),
            name: "missing".to_string(),
        },
    )
    .await
    .unwrap_err();

    assert_eq!(error, ScanError::RepoNotFound);
}
