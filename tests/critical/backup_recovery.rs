//! Recovering the template from backups after a bad rewrite.

use chrono::NaiveDate;
use labsite_core::backup::{BackupContext, BackupError, BackupStore};

use crate::support::{INDEX_HTML, SiteFixture};

fn at(hour: u32, minute: u32, second: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 5, 1)
        .unwrap()
        .and_hms_opt(hour, minute, second)
        .unwrap()
}

#[test]
fn p0_restore_recovers_overwritten_template() {
    let site = SiteFixture::new();
    let index = site.path("index.html");
    let store = BackupStore::new(site.path("backups"));
    store.create_at(&index, BackupContext::Backup, at(9, 0, 0)).unwrap();

    site.write("index.html", "<html>truncated");
    let outcome = store.restore_latest(&index).unwrap();

    assert_eq!(site.read("index.html"), INDEX_HTML);
    let safety = outcome.safety_backup.unwrap();
    assert_eq!(std::fs::read_to_string(safety).unwrap(), "<html>truncated");
}

#[test]
fn p0_repeated_restore_uses_same_source() {
    let site = SiteFixture::new();
    let index = site.path("index.html");
    let store = BackupStore::new(site.path("backups"));
    store.create_at(&index, BackupContext::Backup, at(9, 0, 0)).unwrap();
    site.write("index.html", "<html>broken</html>");

    let first = store.restore_latest(&index).unwrap();
    let second = store.restore_latest(&index).unwrap();

    assert_eq!(first.restored_from, second.restored_from);
    assert_eq!(site.read("index.html"), INDEX_HTML);
}

#[test]
fn p0_restore_picks_newest_across_contexts() {
    let site = SiteFixture::new();
    let index = site.path("index.html");
    let store = BackupStore::new(site.path("backups"));

    store.create_at(&index, BackupContext::Backup, at(9, 0, 0)).unwrap();
    site.write("index.html", "<html>metrics run</html>");
    store.create_at(&index, BackupContext::MetricsBackup, at(10, 0, 0)).unwrap();
    site.write("index.html", "<html>latest broken</html>");

    store.restore_latest(&index).unwrap();

    assert_eq!(site.read("index.html"), "<html>metrics run</html>");
}

#[test]
fn p0_same_second_backups_do_not_overwrite() {
    let site = SiteFixture::new();
    let index = site.path("index.html");
    let store = BackupStore::new(site.path("backups"));

    let first = store.create_at(&index, BackupContext::Manual, at(12, 0, 0)).unwrap();
    site.write("index.html", "<html>second</html>");
    let second = store.create_at(&index, BackupContext::Manual, at(12, 0, 0)).unwrap();

    assert_ne!(first, second);
    assert_eq!(std::fs::read_to_string(&first).unwrap(), INDEX_HTML);
    assert_eq!(std::fs::read_to_string(&second).unwrap(), "<html>second</html>");
    let latest = store.latest(&index, Some(BackupContext::Manual)).unwrap().unwrap();
    assert_eq!(latest.path, second);
}

#[test]
fn p0_restore_without_backups_leaves_target_untouched() {
    let site = SiteFixture::new();
    let index = site.path("index.html");
    let store = BackupStore::new(site.path("backups"));

    let err = store.restore_latest(&index).unwrap_err();

    assert!(matches!(err, BackupError::NoBackups { .. }));
    assert_eq!(site.read("index.html"), INDEX_HTML);
    assert!(site.backups().is_empty());
}
