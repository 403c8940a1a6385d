//! Site layout: where the data files live and which markers delimit the
//! template regions.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::splice::RegionSpec;

pub const DEFAULT_INDEX: &str = "index.html";
pub const DEFAULT_PUBLICATIONS: &str = "publications.json";
pub const DEFAULT_NEWS: &str = "data/news.json";
pub const DEFAULT_PROFILE: &str = "data/scholar_config.json";
pub const DEFAULT_BACKUP_DIR: &str = "backups";

/// Region names, used in logs and error messages.
pub const NEWS_REGION: &str = "news";
pub const PUBLICATIONS_REGION: &str = "publications";
pub const STATS_REGION: &str = "stats";
pub const IMPACT_REGION: &str = "impact";

/// Literal marker comments of the four template regions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkerSet {
    pub news_start: String,
    pub news_end: String,
    pub publications_start: String,
    /// End candidates in priority order.
    pub publications_end: Vec<String>,
    pub stats_start: String,
    pub stats_end: String,
    pub impact_start: String,
    pub impact_end: String,
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self {
            news_start: "        <!-- News Section -->".to_string(),
            news_end: "        <!-- Recent Publications -->".to_string(),
            publications_start: "                <!-- Publication Categories -->".to_string(),
            publications_end: vec![
                "                <!-- Publication Stats -->".to_string(),
                "                <!-- Publication Impact -->".to_string(),
            ],
            stats_start: "        <!-- Statistics -->".to_string(),
            stats_end: "        <!-- Statistics End -->".to_string(),
            impact_start: "                <!-- Publication Impact -->".to_string(),
            impact_end: "                <!-- Publication Impact End -->".to_string(),
        }
    }
}

impl MarkerSet {
    #[must_use]
    pub fn news_region(&self) -> RegionSpec {
        RegionSpec::new(NEWS_REGION, &self.news_start, vec![self.news_end.clone()])
    }

    #[must_use]
    pub fn publications_region(&self) -> RegionSpec {
        RegionSpec::new(
            PUBLICATIONS_REGION,
            &self.publications_start,
            self.publications_end.clone(),
        )
    }

    #[must_use]
    pub fn stats_region(&self) -> RegionSpec {
        RegionSpec::new(STATS_REGION, &self.stats_start, vec![self.stats_end.clone()])
            .with_separator("\n")
    }

    #[must_use]
    pub fn impact_region(&self) -> RegionSpec {
        RegionSpec::new(IMPACT_REGION, &self.impact_start, vec![self.impact_end.clone()])
            .with_separator("\n")
    }

    /// All regions, in document order of the default template.
    #[must_use]
    pub fn regions(&self) -> Vec<RegionSpec> {
        vec![
            self.news_region(),
            self.stats_region(),
            self.publications_region(),
            self.impact_region(),
        ]
    }
}

/// Resolved locations of the site's files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitePaths {
    pub root: PathBuf,
    pub index: PathBuf,
    pub publications: PathBuf,
    pub news: PathBuf,
    pub profile: PathBuf,
    pub backup_dir: PathBuf,
}

impl SitePaths {
    /// Default layout under `root`.
    #[must_use]
    pub fn under(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            index: root.join(DEFAULT_INDEX),
            publications: root.join(DEFAULT_PUBLICATIONS),
            news: root.join(DEFAULT_NEWS),
            profile: root.join(DEFAULT_PROFILE),
            backup_dir: root.join(DEFAULT_BACKUP_DIR),
        }
    }

    /// Joins `path` onto the root unless it is already absolute.
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splice::locate;

    #[test]
    fn test_default_regions_are_valid() {
        for region in MarkerSet::default().regions() {
            assert!(region.validate().is_ok(), "{}", region.name);
        }
    }

    #[test]
    fn test_default_markers_are_distinct() {
        let markers = MarkerSet::default();
        let starts = [
            &markers.news_start,
            &markers.publications_start,
            &markers.stats_start,
            &markers.impact_start,
        ];
        for (i, a) in starts.iter().enumerate() {
            for b in &starts[i + 1..] {
                assert!(!a.contains(b.as_str()) && !b.contains(a.as_str()));
            }
        }
    }

    #[test]
    fn test_publications_region_ends_at_impact_marker() {
        let markers = MarkerSet::default();
        let doc = format!(
            "{}\nlist\n{}\nimpact\n{}\n",
            markers.publications_start, markers.impact_start, markers.impact_end
        );
        let region = locate(&doc, &markers.publications_region()).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(&doc[region.end..region.end + markers.impact_start.len()], markers.impact_start);
    }

    #[test]
    fn test_site_paths_resolve() {
        let paths = SitePaths::under(Path::new("/site"));
        assert_eq!(paths.news, PathBuf::from("/site/data/news.json"));
        assert_eq!(paths.resolve(Path::new("x/y.json")), PathBuf::from("/site/x/y.json"));
        assert_eq!(paths.resolve(Path::new("/abs.json")), PathBuf::from("/abs.json"));
    }
}
