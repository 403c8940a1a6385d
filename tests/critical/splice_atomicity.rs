//! A template rewrite either lands completely or leaves the file untouched.

use std::fs;

use labsite_core::backup::{BackupContext, BackupStore};
use labsite_core::splice::{BackupPolicy, RegionEdit, TemplateDocument, TemplateError};
use labsite_core::MarkerSet;

use crate::support::{INDEX_HTML, SiteFixture};

fn dir_entries(site: &SiteFixture) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(site.root())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn p0_successful_apply_leaves_no_temp_files() {
    let site = SiteFixture::new();
    let before = dir_entries(&site);
    let markers = MarkerSet::default();
    let region = markers.news_region();
    let edits = [RegionEdit {
        spec: &region,
        fragment: format!("{}\n        <p>fresh</p>", region.start),
    }];

    let mut template = TemplateDocument::read(&site.path("index.html")).unwrap();
    template.apply(&edits, None).unwrap();

    assert_eq!(dir_entries(&site), before);
    assert!(site.read("index.html").contains("<p>fresh</p>"));
}

#[test]
fn p0_failed_splice_writes_nothing() {
    let site = SiteFixture::new();
    let broken = INDEX_HTML.replace("        <!-- News Section -->\n", "");
    site.write("index.html", &broken);
    let before = dir_entries(&site);
    let markers = MarkerSet::default();
    let stats = markers.stats_region();
    let news = markers.news_region();
    let edits = [
        RegionEdit {
            spec: &stats,
            fragment: format!("{}\n        <p>stats</p>", stats.start),
        },
        RegionEdit {
            spec: &news,
            fragment: format!("{}\n        <p>news</p>", news.start),
        },
    ];
    let store = BackupStore::new(site.path("backups"));

    let mut template = TemplateDocument::read(&site.path("index.html")).unwrap();
    let result = template.apply(
        &edits,
        Some(BackupPolicy {
            store: &store,
            context: BackupContext::Backup,
        }),
    );

    assert!(matches!(result, Err(TemplateError::Splice { .. })));
    assert_eq!(site.read("index.html"), broken);
    assert_eq!(template.text(), broken);
    // Located-but-unwritten regions do not trigger a backup either
    assert_eq!(dir_entries(&site), before);
}

#[test]
fn p0_backup_failure_blocks_the_write() {
    let site = SiteFixture::new();
    // A regular file where the backup directory should be
    site.write("backups", "not a directory");
    let markers = MarkerSet::default();
    let region = markers.news_region();
    let edits = [RegionEdit {
        spec: &region,
        fragment: format!("{}\n        <p>fresh</p>", region.start),
    }];
    let store = BackupStore::new(site.path("backups"));

    let mut template = TemplateDocument::read(&site.path("index.html")).unwrap();
    let result = template.apply(
        &edits,
        Some(BackupPolicy {
            store: &store,
            context: BackupContext::Backup,
        }),
    );

    assert!(matches!(result, Err(TemplateError::Backup(_))));
    assert_eq!(site.read("index.html"), INDEX_HTML);
}
