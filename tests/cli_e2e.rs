//! End-to-end CLI tests for the labsite binary.

mod support;

use assert_cmd::Command;
use predicates::prelude::*;

use support::{INDEX_HTML, SiteFixture};

/// Binary invocation rooted at the fixture, isolated from user config.
fn labsite(site: &SiteFixture) -> Command {
    let mut cmd = Command::cargo_bin("labsite").unwrap();
    cmd.arg("--root")
        .arg(site.root())
        .env("XDG_CONFIG_HOME", site.path("xdg"))
        .env("HOME", site.root())
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// Test that --help displays usage information and exits with code 0.
#[test]
fn test_binary_help_displays_usage() {
    let mut cmd = Command::cargo_bin("labsite").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: labsite"))
        .stdout(predicate::str::contains("publications"));
}

/// Test that --version displays version and exits with code 0.
#[test]
fn test_binary_version_displays_version() {
    let mut cmd = Command::cargo_bin("labsite").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("labsite"));
}

/// Test that invalid flags cause non-zero exit.
#[test]
fn test_binary_invalid_flag_returns_error() {
    let mut cmd = Command::cargo_bin("labsite").unwrap();
    cmd.arg("--invalid-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_publications_updates_index_with_backup() {
    let site = SiteFixture::new();

    labsite(&site)
        .arg("publications")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered 3 publications"))
        .stdout(predicate::str::contains("Topic distribution:"))
        .stdout(predicate::str::contains("regions: publications, stats, impact"));

    let html = site.read("index.html");
    assert!(html.contains("Federated Learning on Medical Images"));
    assert!(!html.contains("placeholder list"));
    assert!(!html.contains("placeholder stats"));
    assert!(!html.contains("placeholder impact"));
    assert!(html.contains("placeholder news"));

    let backups = site.backups();
    assert_eq!(backups.len(), 1, "{backups:?}");
    assert!(backups[0].starts_with("index_backup_"));
}

#[test]
fn test_publications_second_run_reports_up_to_date() {
    let site = SiteFixture::new();
    labsite(&site).arg("publications").assert().success();
    let first = site.read("index.html");

    labsite(&site)
        .arg("publications")
        .assert()
        .success()
        .stdout(predicate::str::contains("already up to date"));

    assert_eq!(site.read("index.html"), first);
    assert_eq!(site.backups().len(), 1);
}

#[test]
fn test_publications_skip_metrics_and_no_backup() {
    let site = SiteFixture::new();

    labsite(&site)
        .args(["publications", "--skip-metrics", "--no-backup"])
        .assert()
        .success();

    let html = site.read("index.html");
    assert!(!html.contains("placeholder list"));
    assert!(html.contains("placeholder stats"));
    assert!(html.contains("placeholder impact"));
    assert!(site.backups().is_empty());
}

#[test]
fn test_publications_dry_run_prints_fragment_only() {
    let site = SiteFixture::new();

    labsite(&site)
        .args(["publications", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<!-- Publication Categories -->"))
        .stdout(predicate::str::contains("Vision Transformers"));

    assert_eq!(site.read("index.html"), INDEX_HTML);
    assert!(site.backups().is_empty());
}

#[test]
fn test_publications_missing_marker_fails_without_writing() {
    let site = SiteFixture::new();
    let broken = INDEX_HTML.replace("                <!-- Publication Categories -->\n", "");
    site.write("index.html", &broken);

    labsite(&site)
        .arg("publications")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("start marker"));

    assert_eq!(site.read("index.html"), broken);
    assert!(site.backups().is_empty());
}

#[test]
fn test_metrics_uses_metrics_backup_context() {
    let site = SiteFixture::new();

    labsite(&site)
        .arg("metrics")
        .assert()
        .success()
        .stdout(predicate::str::contains("h-index: 2"));

    let html = site.read("index.html");
    assert!(html.contains("placeholder list"));
    assert!(!html.contains("placeholder stats"));
    let backups = site.backups();
    assert_eq!(backups.len(), 1);
    assert!(backups[0].starts_with("index_metrics_backup_"));
}

#[test]
fn test_metrics_prints_venue_and_impact_report() {
    let site = SiteFixture::new();

    labsite(&site)
        .args(["metrics", "--no-backup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Publications: 3, citations: 182, h-index: 2"))
        .stdout(predicate::str::contains("IEEE Transactions: 1"))
        .stdout(predicate::str::contains("Journals: 2, conferences: 1"))
        .stdout(predicate::str::contains("High-impact papers (50+ citations): 2"))
        .stdout(predicate::str::contains("Average citations: 60.7"))
        .stdout(predicate::str::contains("First-author papers: 2"))
        .stdout(predicate::str::contains("Key venues: 1 IEEE, 1 journals, 1 conferences"));
}

#[test]
fn test_publications_summary_includes_metrics_unless_skipped() {
    let site = SiteFixture::new();

    labsite(&site)
        .args(["publications", "--no-backup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Average citations: 60.7"))
        .stdout(predicate::str::contains("IEEE Transactions: 1"));

    labsite(&site)
        .args(["publications", "--skip-metrics", "--no-backup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Average citations").not());
}

#[test]
fn test_publications_tolerates_loose_number_fields() {
    let site = SiteFixture::new();
    site.write(
        "publications.json",
        r#"[
  {"title": "String Year", "authors": "A", "venue": "J", "year": "2021", "citations": 3.0},
  {"title": "Null Citations", "authors": "B", "venue": "J", "year": 2022, "citations": null}
]"#,
    );

    labsite(&site)
        .args(["publications", "--no-backup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered 2 publications"));

    let html = site.read("index.html");
    assert!(html.contains("String Year"));
    assert!(html.contains("2021"));
}

#[test]
fn test_news_add_then_render() {
    let site = SiteFixture::new();

    labsite(&site)
        .args([
            "news",
            "add",
            "--title",
            "Lab Retreat",
            "--description",
            "Annual retreat in the mountains.",
            "--date",
            "2025-07-15",
            "--icon",
            "globe",
            "--category",
            "team",
            "--featured",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added news-003"));

    let news = site.read("data/news.json");
    assert!(news.find("news-003").unwrap() < news.find("news-002").unwrap());
    assert!(news.contains("\"month\": \"Jul\""));
    assert!(news.contains("fas fa-globe"));
    assert!(site.backups()[0].starts_with("news_backup_"));

    labsite(&site)
        .args(["news", "render", "--no-backup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered 3 news items (2 featured, 1 past)"));

    let html = site.read("index.html");
    assert!(html.contains("Lab Retreat"));
    assert!(!html.contains("placeholder news"));
}

#[test]
fn test_news_add_rejects_bad_date() {
    let site = SiteFixture::new();

    labsite(&site)
        .args([
            "news",
            "add",
            "--title",
            "T",
            "--description",
            "D",
            "--date",
            "15/07/2025",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid news date"));

    assert_eq!(site.read("data/news.json"), support::NEWS_JSON);
}

#[test]
fn test_merge_adds_new_titles_and_stamps_profile() {
    let site = SiteFixture::new();
    site.write(
        "fetched.json",
        r#"[
  {"title": "federated learning on medical images", "authors": "Wei Li", "venue": "AAAI", "year": 2023},
  {"title": "Self-Supervised Point Clouds", "authors": "Chen Zhang", "venue": "CVPR", "year": 2025, "citations": 0}
]"#,
    );

    labsite(&site)
        .args(["merge", "fetched.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 new, 4 total"));

    let store = site.read("publications.json");
    assert!(store.contains("Self-Supervised Point Clouds"));
    assert!(store.find("Self-Supervised").unwrap() < store.find("Vision Transformers").unwrap());
    assert!(site.read("data/scholar_config.json").contains("last_update"));
    assert!(site.backups().iter().any(|b| b.starts_with("publications_backup_")));
}

#[test]
fn test_backup_copies_every_site_file() {
    let site = SiteFixture::new();

    labsite(&site).arg("backup").assert().success();

    let backups = site.backups();
    assert_eq!(backups.len(), 4, "{backups:?}");
    assert!(backups.iter().all(|b| b.contains("_manual_")));
}

#[test]
fn test_backup_fails_when_nothing_exists() {
    let site = SiteFixture::new();
    for file in [
        "index.html",
        "publications.json",
        "data/news.json",
        "data/scholar_config.json",
    ] {
        std::fs::remove_file(site.path(file)).unwrap();
    }

    labsite(&site)
        .arg("backup")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Nothing to back up"));
}

#[test]
fn test_restore_reverts_last_render() {
    let site = SiteFixture::new();
    labsite(&site).arg("publications").assert().success();
    assert_ne!(site.read("index.html"), INDEX_HTML);

    labsite(&site)
        .arg("restore")
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored"));

    assert_eq!(site.read("index.html"), INDEX_HTML);
    assert!(site.backups().iter().any(|b| b.contains("_pre_restore_")));
}

#[test]
fn test_restore_without_backups_fails() {
    let site = SiteFixture::new();

    labsite(&site).arg("restore").assert().code(1);
    assert_eq!(site.read("index.html"), INDEX_HTML);
}

#[test]
fn test_validate_exit_codes() {
    let site = SiteFixture::new();

    labsite(&site)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Checked 2 news items and 3 publications"));

    // The fixture page is smaller than a real site, which is a warning
    labsite(&site).args(["validate", "--strict"]).assert().code(2);

    site.write("data/news.json", r#"[{"id": "news-001"}]"#);
    labsite(&site)
        .arg("validate")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("error:"));
}

#[test]
fn test_status_summarises_site() {
    let site = SiteFixture::new();

    labsite(&site)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("total = 2, visible = 2, featured = 1"))
        .stdout(predicate::str::contains("total = 3, citations = 182"))
        .stdout(predicate::str::contains("author = Chen Zhang"));
}

#[test]
fn test_config_show_defaults_and_site_file() {
    let site = SiteFixture::new();

    labsite(&site)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config_file = not found (using defaults)"))
        .stdout(predicate::str::contains("featured_news_limit = 5"));

    site.write("labsite.toml", "featured_news_limit = 3\nbackups = false\n");
    labsite(&site)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config_file = loaded"))
        .stdout(predicate::str::contains("featured_news_limit = 3"))
        .stdout(predicate::str::contains("backups = false"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let site = SiteFixture::new();
    site.write("labsite.toml", "featured_news_limit = 99\n");

    labsite(&site)
        .arg("status")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("featured_news_limit"));
}

#[test]
fn test_config_backups_false_disables_backups() {
    let site = SiteFixture::new();
    site.write("labsite.toml", "backups = false\n");

    labsite(&site).arg("publications").assert().success();

    assert!(site.backups().is_empty());
}
