//! Shared fixtures: a small lab site laid out the way the CLI expects.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Index page carrying every default region marker once.
pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<body>
    <main>
        <!-- Statistics -->
        <section class="stats">placeholder stats</section>
        <!-- Statistics End -->

        <!-- News Section -->
        <section id="news">placeholder news</section>

        <!-- Recent Publications -->
        <section id="publications">
                <!-- Publication Categories -->
                <div class="publications-list">placeholder list</div>

                <!-- Publication Impact -->
                <div class="impact">placeholder impact</div>
                <!-- Publication Impact End -->
        </section>
    </main>
</body>
</html>
"#;

pub const PUBLICATIONS_JSON: &str = r#"[
  {
    "title": "Vision Transformers for Remote Sensing Segmentation",
    "authors": "Chen Zhang and Wei Li and Anna Smith",
    "venue": "IEEE Transactions on Geoscience and Remote Sensing",
    "year": 2024,
    "citations": 120,
    "eprint_url": "https://arxiv.org/abs/2401.00001",
    "abstract": "A transformer network for satellite image segmentation."
  },
  {
    "title": "Federated Learning on Medical Images",
    "authors": "Wei Li and Chen Zhang",
    "venue": "Proceedings of the AAAI Conference on Artificial Intelligence",
    "year": 2023,
    "citations": 55,
    "url": "https://example.org/fl-medical"
  },
  {
    "title": "Graph Neural Networks for Traffic Forecasting",
    "authors": "Chen Zhang",
    "venue": "Neural Networks Journal",
    "year": 2019,
    "citations": 7,
    "doi": "10.1000/gnn-traffic"
  }
]
"#;

pub const NEWS_JSON: &str = r#"[
  {
    "id": "news-002",
    "date": "2025-03-10",
    "month": "Mar",
    "day": "10",
    "year": "2025",
    "icon": "fas fa-trophy",
    "category": "award",
    "title": "Best Paper Award",
    "description": "Our transformer paper won the best paper award.",
    "visible": true,
    "featured": true
  },
  {
    "id": "news-001",
    "date": "2024-09-01",
    "month": "Sep",
    "day": "1",
    "year": "2024",
    "icon": "fas fa-users",
    "category": "team",
    "title": "New PhD Students",
    "description": "Three students joined the lab.",
    "visible": true,
    "featured": false
  }
]
"#;

pub const PROFILE_JSON: &str = r#"{
  "author_name": "Chen Zhang",
  "affiliation": "Example University",
  "settings": {
    "use_proxy": false,
    "delay_between_requests": 2
  }
}
"#;

/// A temporary site root with index, publications, news and profile.
pub struct SiteFixture {
    pub dir: TempDir,
}

impl SiteFixture {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp site root");
        let fixture = Self { dir };
        fixture.write("index.html", INDEX_HTML);
        fixture.write("publications.json", PUBLICATIONS_JSON);
        fixture.write("data/news.json", NEWS_JSON);
        fixture.write("data/scholar_config.json", PROFILE_JSON);
        fixture
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn write(&self, relative: &str, contents: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture directory");
        }
        fs::write(path, contents).expect("write fixture file");
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).expect("read fixture file")
    }

    /// Names of the files in the backup directory, sorted.
    pub fn backups(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.path("backups")) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .map(|entry| {
                entry
                    .expect("read backup entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }
}
