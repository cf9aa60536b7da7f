//! Scan gate and walk fan-out

use crate::common::*;
use futures::future::join_all;
use reposcan::scanner::api::{
    GitHubUrls, ScanGate, ScanSettings, ScannerManager, DEFAULT_SCAN_SLOTS,
};
use reposcan::scanner::testing::FakeGitHub;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn five_repositories() -> FakeGitHub {
    (0..5).fold(account(vec![]), |fake, i| {
        let name = format!("r{}", i);
        repository(fake, "u", &name, vec![file("a.txt"), dir("lib")], vec![hook("ci", true)])
            .respond(
                &url(&format!("/repos/u/{}/contents/lib", name)),
                json!([file("lib/b.txt")]),
            )
            .delay(&url(&format!("/repos/u/{}", name)), Duration::from_millis(15))
            .delay(
                &url(&format!("/repos/u/{}/contents", name)),
                Duration::from_millis(15),
            )
    })
}

#[tokio::test]
async fn test_concurrent_detail_scans_are_gated() {
    let (manager, fake) = build_manager(five_repositories());
    let token = token();

    let names: Vec<String> = (0..5).map(|i| format!("r{}", i)).collect();
    let results = join_all(
        names
            .iter()
            .map(|name| manager.get_repository_detail(&token, "u", name)),
    )
    .await;

    for result in &results {
        let detail = result.as_ref().unwrap();
        assert_eq!(detail.file_count, 2);
    }
    // each admitted scan has at most two requests in flight (walk and hooks)
    assert!(fake.max_in_flight() <= 2 * DEFAULT_SCAN_SLOTS);
    assert!(fake.max_in_flight() >= 2);
    assert_eq!(manager.gate().in_use(), 0);
}

#[tokio::test]
async fn test_gate_is_shared_between_managers() {
    let gate = ScanGate::default();
    let fake = Arc::new(five_repositories());
    let first = ScannerManager::new(
        fake.clone(),
        GitHubUrls::new(API),
        gate.clone(),
        ScanSettings::default(),
    );
    let second = ScannerManager::new(
        fake.clone(),
        GitHubUrls::new(API),
        gate,
        ScanSettings::default(),
    );
    let token = token();

    let (a, b, c, d) = tokio::join!(
        first.get_repository_detail(&token, "u", "r0"),
        second.get_repository_detail(&token, "u", "r1"),
        first.get_repository_detail(&token, "u", "r2"),
        second.get_repository_detail(&token, "u", "r3"),
    );

    assert!(a.is_ok() && b.is_ok() && c.is_ok() && d.is_ok());
    assert!(fake.max_in_flight() <= 2 * DEFAULT_SCAN_SLOTS);
}

#[tokio::test]
async fn test_walk_expands_siblings_concurrently() {
    let subdirectories: Vec<_> = (0..6).map(|i| dir(&format!("d{}", i))).collect();
    let fake = (0..6).fold(
        repository(account(vec![]), "u", "wide", subdirectories, vec![]),
        |fake, i| {
            let listing = url(&format!("/repos/u/wide/contents/d{}", i));
            fake.respond(&listing, json!([file(&format!("d{}/f", i))]))
                .delay(&listing, Duration::from_millis(20))
        },
    );
    let (manager, fake) = build_manager(fake);

    let detail = manager
        .get_repository_detail(&token(), "u", "wide")
        .await
        .unwrap();

    assert_eq!(detail.file_count, 6);
    assert!(fake.max_in_flight() >= 6);
}

#[tokio::test]
async fn test_walk_ceiling_bounds_listing_calls() {
    let subdirectories: Vec<_> = (0..6).map(|i| dir(&format!("d{}", i))).collect();
    let fake = (0..6).fold(
        repository(account(vec![]), "u", "wide", subdirectories, vec![]),
        |fake, i| {
            let listing = url(&format!("/repos/u/wide/contents/d{}", i));
            fake.respond(&listing, json!([file(&format!("d{}/f", i))]))
                .delay(&listing, Duration::from_millis(10))
        },
    );
    let fake = Arc::new(fake);
    let manager = ScannerManager::new(
        fake.clone(),
        GitHubUrls::new(API),
        ScanGate::default(),
        ScanSettings {
            walk_concurrency: Some(2),
            ..ScanSettings::default()
        },
    );

    let detail = manager
        .get_repository_detail(&token(), "u", "wide")
        .await
        .unwrap();

    assert_eq!(detail.file_count, 6);
    // two listings plus the webhook request running beside the walk
    assert!(fake.max_in_flight() <= 3);
}
