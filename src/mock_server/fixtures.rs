//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use std::collections::HashMap;

use chrono::{TimeZone, Utc};

use crate::{
    ComponentsOverview, ComponentsOverviewEntry, ImgScanOverview, Project, RepoRecord, Signature,
    TagConfig, TagDetail, TagResp,
};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Project Fixtures
    // =========================================================================

    /// Create a project owned by `admin`.
    pub fn project(project_id: i64, name: &str, public: bool) -> Project {
        let created = Utc.with_ymd_and_hms(2018, 3, 1, 8, 0, 0).single();
        Project {
            project_id,
            owner_id: 1,
            name: name.to_string(),
            creation_time: created,
            update_time: created,
            deleted: serde_json::Value::from(0),
            owner_name: "admin".to_string(),
            togglable: true,
            role: 1,
            repo_count: 0,
            metadata: HashMap::from([("public".to_string(), public.to_string())]),
        }
    }

    // =========================================================================
    // Repository Fixtures
    // =========================================================================

    /// Create a repository record.
    pub fn repository(repository_id: i64, name: &str, project_id: i64) -> RepoRecord {
        RepoRecord {
            repository_id,
            name: name.to_string(),
            project_id,
            description: String::new(),
            pull_count: 0,
            star_count: 0,
            creation_time: Utc.with_ymd_and_hms(2018, 3, 2, 8, 0, 0).single(),
            update_time: None,
        }
    }

    // =========================================================================
    // Tag Fixtures
    // =========================================================================

    /// Create an unsigned, unscanned tag.
    pub fn tag(name: &str) -> TagResp {
        TagResp {
            detail: TagDetail {
                digest: format!("sha256:{:0>64}", name.len()),
                name: name.to_string(),
                size: 2048,
                architecture: "amd64".to_string(),
                os: "linux".to_string(),
                docker_version: "17.12.0-ce".to_string(),
                author: String::new(),
                created: Utc.with_ymd_and_hms(2018, 3, 3, 8, 0, 0).single(),
                config: Some(TagConfig {
                    labels: HashMap::from([("maintainer".to_string(), "ops".to_string())]),
                }),
            },
            signature: None,
            scan_overview: None,
        }
    }

    /// Create a signed tag with a finished scan.
    pub fn signed_tag(name: &str) -> TagResp {
        let mut tag = Self::tag(name);
        tag.signature = Some(Signature {
            tag: name.to_string(),
            hashes: HashMap::from([("sha256".to_string(), vec![0xde, 0xad, 0xbe, 0xef])]),
        });
        tag.scan_overview = Some(ImgScanOverview {
            digest: tag.detail.digest.clone(),
            status: "finished".to_string(),
            job_id: 1,
            severity: 2,
            components: Some(ComponentsOverview {
                total: 10,
                summary: vec![
                    ComponentsOverviewEntry { severity: 1, count: 8 },
                    ComponentsOverviewEntry { severity: 2, count: 2 },
                ],
            }),
            details_key: "details".to_string(),
            creation_time: None,
            update_time: None,
        });
        tag
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// Create a default scenario with a public and a private project.
    pub fn default_scenario() -> DefaultScenario {
        let mut library = Self::project(1, "library", true);
        library.repo_count = 2;
        let mut team = Self::project(2, "team", false);
        team.repo_count = 1;
        team.owner_name = "dev".to_string();

        DefaultScenario {
            projects: vec![library, team],
            repositories: vec![
                Self::repository(10, "library/nginx", 1),
                Self::repository(11, "library/redis", 1),
                Self::repository(20, "team/app", 2),
            ],
            tags: vec![
                (
                    "library/nginx".to_string(),
                    vec![Self::tag("latest"), Self::signed_tag("1.25")],
                ),
                ("library/redis".to_string(), vec![Self::tag("7")]),
                ("team/app".to_string(), vec![Self::tag("v1")]),
            ],
        }
    }
}

/// A complete test scenario.
pub struct DefaultScenario {
    pub projects: Vec<Project>,
    pub repositories: Vec<RepoRecord>,
    /// Tags per repository name.
    pub tags: Vec<(String, Vec<TagResp>)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_fixture_is_public() {
        assert!(Fixtures::project(1, "library", true).is_public());
        assert!(!Fixtures::project(2, "team", false).is_public());
    }

    #[test]
    fn test_signed_tag_fixture() {
        let tag = Fixtures::signed_tag("1.25");
        assert!(tag.is_signed());
        assert_eq!(tag.scan_overview.unwrap().status, "finished");
    }

    #[test]
    fn test_default_scenario_consistent() {
        let scenario = Fixtures::default_scenario();
        for (repository, _) in &scenario.tags {
            assert!(scenario.repositories.iter().any(|r| &r.name == repository));
        }
    }
}
