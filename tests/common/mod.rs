//! Common test utilities and helpers
//!
//! Builders for a fake GitHub account so integration tests can drive the scanner
//! without network access.

#![allow(dead_code)]

use reposcan::scanner::api::{AccessToken, GitHubUrls, ScanGate, ScanSettings, ScannerManager};
use reposcan::scanner::testing::FakeGitHub;
use serde_json::{json, Value};
use std::sync::Arc;

pub const API: &str = "https://api.fake";

pub fn token() -> AccessToken {
    AccessToken::new("ghp_integration")
}

pub fn url(path: &str) -> String {
    format!("{}{}", API, path)
}

pub fn repos_page(page_size: u32, page: u32) -> String {
    url(&format!("/user/repos?per_page={}&page={}", page_size, page))
}

pub fn repo_record(owner: &str, name: &str, size: u64, private: bool) -> Value {
    json!({
        "id": 1,
        "name": name,
        "full_name": format!("{}/{}", owner, name),
        "size": size,
        "private": private,
        "owner": {"login": owner, "type": "User"}
    })
}

pub fn file(path: &str) -> Value {
    let name = path.rsplit('/').next().unwrap_or(path);
    json!({"name": name, "path": path, "type": "file"})
}

pub fn dir(path: &str) -> Value {
    let name = path.rsplit('/').next().unwrap_or(path);
    json!({"name": name, "path": path, "type": "dir"})
}

pub fn hook(name: &str, active: bool) -> Value {
    json!({"type": "Repository", "name": name, "active": active})
}

/// Account with the org check and repository list answered
pub fn account(repos: Vec<Value>) -> FakeGitHub {
    FakeGitHub::new()
        .respond(&url("/user/orgs"), json!([{"login": "acme"}]))
        .respond(&repos_page(100, 1), Value::Array(repos))
        .respond(&repos_page(100, 2), json!([]))
}

/// Repository `owner/name` with a root listing, hooks and no subdirectories
pub fn repository(
    fake: FakeGitHub,
    owner: &str,
    name: &str,
    root: Vec<Value>,
    hooks: Vec<Value>,
) -> FakeGitHub {
    let base = format!("/repos/{}/{}", owner, name);
    fake.respond(&url(&base), repo_record(owner, name, 64, false))
        .respond(&url(&format!("{}/contents", base)), Value::Array(root))
        .respond(&url(&format!("{}/hooks", base)), Value::Array(hooks))
}

pub fn build_manager(fake: FakeGitHub) -> (ScannerManager, Arc<FakeGitHub>) {
    let fake = Arc::new(fake);
    let manager = ScannerManager::new(
        fake.clone(),
        GitHubUrls::new(API),
        ScanGate::default(),
        ScanSettings::default(),
    );
    (manager, fake)
}
