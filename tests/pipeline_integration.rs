//! End-to-end library pipeline: merge a fetched batch, classify, compute
//! metrics, add news, and validate the resulting site.

mod support;

use chrono::NaiveDate;
use labsite_core::model::{
    NewsCategory, NewsDraft, NewsIcon, NewsItem, Publication, ScholarProfile, add_news_item,
    merge_publications, next_news_id,
};
use labsite_core::render::{PublicationMetrics, partition_news};
use labsite_core::store::{load_document, load_records, save_json};
use labsite_core::topics::{Classifier, VenueCategory};
use labsite_core::{MarkerSet, ValidationReport, Validator};

use support::SiteFixture;

#[test]
fn test_merge_then_save_keeps_unknown_fields_and_order() {
    let site = SiteFixture::new();
    let store = site.path("publications.json");
    let existing: Vec<Publication> = load_records(&store).unwrap();
    let fetched = vec![
        Publication::new(
            "graph neural networks for traffic forecasting",
            "Chen Zhang",
            "Neural Networks Journal",
            2019,
        ),
        Publication::new("Diffusion Models for Weather", "Anna Smith", "NeurIPS", 2025),
    ];

    let outcome = merge_publications(existing, fetched);
    save_json(&store, &outcome.publications).unwrap();

    assert_eq!(outcome.added, 1);
    let reloaded: Vec<Publication> = load_records(&store).unwrap();
    assert_eq!(reloaded.len(), 4);
    assert_eq!(reloaded[0].title, "Diffusion Models for Weather");
    let gnn = reloaded
        .iter()
        .find(|p| p.title.starts_with("Graph Neural"))
        .unwrap();
    assert_eq!(gnn.extra["doi"], "10.1000/gnn-traffic");
}

#[test]
fn test_classification_and_metrics_over_fixture() {
    let site = SiteFixture::new();
    let publications: Vec<Publication> = load_records(&site.path("publications.json")).unwrap();
    let profile: ScholarProfile = load_document(&site.path("data/scholar_config.json")).unwrap();
    let classifier = Classifier::default();

    let venues: Vec<VenueCategory> = publications
        .iter()
        .map(|p| classifier.classify(p).venue)
        .collect();
    assert_eq!(
        venues,
        vec![
            VenueCategory::Ieee,
            VenueCategory::Conferences,
            VenueCategory::Journals
        ]
    );

    let distribution = classifier.topic_distribution(&publications);
    assert_eq!(distribution[0].0, "deep-learning");
    assert!(distribution[0].1 >= 2);

    let metrics = PublicationMetrics::compute(&publications, 2025, profile.lead_author());
    assert_eq!(metrics.total_publications, 3);
    assert_eq!(metrics.total_citations, 182);
    assert_eq!(metrics.h_index, 2);
    assert_eq!(metrics.ieee_transactions, 1);
    assert_eq!(metrics.high_impact_publications, 2);
    assert_eq!(metrics.first_author_papers, 2);
}

#[test]
fn test_news_add_assigns_next_id_and_renders_first() {
    let site = SiteFixture::new();
    let path = site.path("data/news.json");
    let mut items: Vec<NewsItem> = load_records(&path).unwrap();

    let id = next_news_id(&items).unwrap();
    assert_eq!(id, "news-003");
    let item = NewsItem::new(
        id,
        NewsDraft {
            date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            icon: NewsIcon::Microscope,
            category: NewsCategory::Grant,
            title: "New Grant".to_string(),
            description: "Funding for three years.".to_string(),
            visible: true,
            featured: true,
        },
    );
    add_news_item(&mut items, item).unwrap();
    save_json(&path, &items).unwrap();

    let reloaded: Vec<NewsItem> = load_records(&path).unwrap();
    assert_eq!(reloaded[0].id, "news-003");
    assert_eq!(reloaded[0].month, "Jun");
    assert_eq!(reloaded[0].day, "2");
    assert_eq!(reloaded[0].icon, "fas fa-microscope");

    let partition = partition_news(&reloaded, 1);
    assert_eq!(partition.featured.len(), 1);
    assert_eq!(partition.featured[0].id, "news-003");
    assert_eq!(partition.past.len(), 1);
}

#[test]
fn test_validation_of_fixture_has_no_errors() {
    let site = SiteFixture::new();
    let validator = Validator::new(2025, MarkerSet::default().regions());
    let mut report = ValidationReport::default();

    let news = validator.check_news_file(&site.path("data/news.json"), &mut report);
    let publications =
        validator.check_publications_file(&site.path("publications.json"), &mut report);
    validator.check_profile_file(&site.path("data/scholar_config.json"), &mut report);
    validator.check_template_file(&site.path("index.html"), &mut report);

    assert_eq!(news, 2);
    assert_eq!(publications, 3);
    assert!(!report.has_errors(), "{:?}", report.findings);
    // The fixture template is far below the expected page size
    assert!(report.warnings().any(|w| w.source.ends_with("index.html")));
}
