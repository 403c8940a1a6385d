//! News items as stored in `data/news.json`.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Literal prefix of every news id.
pub const NEWS_ID_PREFIX: &str = "news-";

/// Storage format of [`NewsItem::date`].
pub const NEWS_DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors for news collection edits.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NewsError {
    /// The date string is not a valid `YYYY-MM-DD` calendar date.
    #[error("invalid news date '{date}' (expected YYYY-MM-DD)")]
    InvalidDate { date: String },
    /// An item with the same id already exists.
    #[error("news id '{id}' already exists")]
    DuplicateId { id: String },
    /// The highest existing id number leaves no room for another item.
    #[error("news id space exhausted: '{last}' is the largest id available")]
    IdSpaceExhausted { last: String },
}

/// Icon shown next to a news item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewsIcon {
    Trophy,
    GraduationCap,
    Microscope,
    Users,
    BookOpen,
    Medal,
    Globe,
    LaptopCode,
    Lightbulb,
    #[default]
    Newspaper,
}

impl NewsIcon {
    pub const ALL: [Self; 10] = [
        Self::Trophy,
        Self::GraduationCap,
        Self::Microscope,
        Self::Users,
        Self::BookOpen,
        Self::Medal,
        Self::Globe,
        Self::LaptopCode,
        Self::Lightbulb,
        Self::Newspaper,
    ];

    /// CSS class list stored in the record.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Trophy => "fas fa-trophy",
            Self::GraduationCap => "fas fa-graduation-cap",
            Self::Microscope => "fas fa-microscope",
            Self::Users => "fas fa-users",
            Self::BookOpen => "fas fa-book-open",
            Self::Medal => "fas fa-medal",
            Self::Globe => "fas fa-globe",
            Self::LaptopCode => "fas fa-laptop-code",
            Self::Lightbulb => "fas fa-lightbulb",
            Self::Newspaper => "fas fa-newspaper",
        }
    }

    /// Looks up an icon by its stored CSS class list.
    #[must_use]
    pub fn from_css_class(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|icon| icon.css_class() == value)
    }
}

/// Category tag of a news item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewsCategory {
    Award,
    Team,
    Grant,
    Collaboration,
    Publication,
    Presentation,
    Opensource,
    #[default]
    Other,
}

impl NewsCategory {
    pub const ALL: [Self; 8] = [
        Self::Award,
        Self::Team,
        Self::Grant,
        Self::Collaboration,
        Self::Publication,
        Self::Presentation,
        Self::Opensource,
        Self::Other,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Award => "award",
            Self::Team => "team",
            Self::Grant => "grant",
            Self::Collaboration => "collaboration",
            Self::Publication => "publication",
            Self::Presentation => "presentation",
            Self::Opensource => "opensource",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NewsCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| format!("invalid news category: {s}"))
    }
}

/// A single news record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(default)]
    pub id: String,
    /// Calendar date, `YYYY-MM-DD`.
    #[serde(default)]
    pub date: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub month: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub day: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub year: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_visible", deserialize_with = "visible_flag")]
    pub visible: bool,
    #[serde(default, deserialize_with = "featured_flag")]
    pub featured: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fields for a new news item; display fields are derived from `date`.
#[derive(Debug, Clone)]
pub struct NewsDraft {
    pub date: NaiveDate,
    pub icon: NewsIcon,
    pub category: NewsCategory,
    pub title: String,
    pub description: String,
    pub visible: bool,
    pub featured: bool,
}

impl NewsItem {
    /// Builds a record from a draft, deriving month/day/year from the date.
    #[must_use]
    pub fn new(id: String, draft: NewsDraft) -> Self {
        let mut item = Self {
            id,
            date: draft.date.format(NEWS_DATE_FORMAT).to_string(),
            month: String::new(),
            day: String::new(),
            year: String::new(),
            icon: draft.icon.css_class().to_string(),
            category: draft.category.as_str().to_string(),
            title: draft.title,
            description: draft.description,
            visible: draft.visible,
            featured: draft.featured,
            extra: Map::new(),
        };
        item.set_display_fields(draft.date);
        item
    }

    /// Parses the stored date.
    ///
    /// # Errors
    /// Returns [`NewsError::InvalidDate`] if `date` is not `YYYY-MM-DD`.
    pub fn parsed_date(&self) -> Result<NaiveDate, NewsError> {
        parse_news_date(&self.date)
    }

    /// Recomputes month abbreviation, day number and year from `date`.
    ///
    /// # Errors
    /// Returns [`NewsError::InvalidDate`] and leaves the item untouched when
    /// the date does not parse.
    pub fn refresh_display_fields(&mut self) -> Result<(), NewsError> {
        let date = self.parsed_date()?;
        self.set_display_fields(date);
        Ok(())
    }

    /// True when the item is rendered in the always-visible block.
    #[must_use]
    pub fn is_featured_and_visible(&self) -> bool {
        self.featured && self.visible
    }

    fn set_display_fields(&mut self, date: NaiveDate) {
        self.month = date.format("%b").to_string();
        self.day = date.day().to_string();
        self.year = date.year().to_string();
    }
}

/// Parses a `YYYY-MM-DD` news date.
///
/// # Errors
/// Returns [`NewsError::InvalidDate`] for anything else.
pub fn parse_news_date(raw: &str) -> Result<NaiveDate, NewsError> {
    NaiveDate::parse_from_str(raw.trim(), NEWS_DATE_FORMAT).map_err(|_| NewsError::InvalidDate {
        date: raw.to_string(),
    })
}

/// Extracts the numeric part of a `news-NNN` id.
#[must_use]
pub fn news_id_number(id: &str) -> Option<u32> {
    let digits = id.strip_prefix(NEWS_ID_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Formats a news id with a zero-padded three digit number.
#[must_use]
pub fn format_news_id(number: u32) -> String {
    format!("{NEWS_ID_PREFIX}{number:03}")
}

/// Next id for the collection: highest existing number plus one.
///
/// Ids that do not follow the `news-NNN` format are ignored.
///
/// # Errors
/// Returns [`NewsError::IdSpaceExhausted`] when the highest number is `u32::MAX`.
pub fn next_news_id(items: &[NewsItem]) -> Result<String, NewsError> {
    let Some(max) = items.iter().filter_map(|item| news_id_number(&item.id)).max() else {
        return Ok(format_news_id(1));
    };
    max.checked_add(1)
        .map(format_news_id)
        .ok_or_else(|| NewsError::IdSpaceExhausted {
            last: format_news_id(max),
        })
}

/// Prepends `item` to the collection (newest insertion first).
///
/// # Errors
/// Returns [`NewsError::DuplicateId`] if the id is already used.
pub fn add_news_item(items: &mut Vec<NewsItem>, item: NewsItem) -> Result<(), NewsError> {
    if items.iter().any(|existing| existing.id == item.id) {
        return Err(NewsError::DuplicateId { id: item.id });
    }
    items.insert(0, item);
    Ok(())
}

fn default_visible() -> bool {
    true
}

fn coerce_bool(value: &Value, fallback: bool) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_i64().map_or(fallback, |n| n != 0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "1" => true,
            "false" | "no" | "n" | "0" => false,
            _ => fallback,
        },
        _ => fallback,
    }
}

fn visible_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_bool(&value, true))
}

fn featured_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_bool(&value, false))
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}
