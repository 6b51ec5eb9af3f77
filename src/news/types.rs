//! News items as served by `GET /news`

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One news record.
///
/// Field names on the wire follow the API (`_id`, `titulo`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Opaque identifier
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    /// Headline
    #[serde(rename = "titulo", alias = "title")]
    pub title: String,

    /// Short standfirst shown under the headline
    #[serde(rename = "subtitulo", alias = "subtitle", default)]
    pub subtitle: Option<String>,

    /// Body text, used for the card summary when there is no subtitle
    #[serde(rename = "descricao", alias = "description", default)]
    pub description: Option<String>,

    /// Category label
    #[serde(rename = "categoria", alias = "category", default)]
    pub category: Option<String>,

    /// Image reference
    #[serde(rename = "imagem", alias = "image", default)]
    pub image: Option<String>,

    /// Publication timestamp as sent by the API
    #[serde(rename = "dataPublicacao", alias = "publishedAt", default)]
    pub published_at: Option<String>,
}

impl Item {
    /// Parse the publication timestamp.
    ///
    /// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (taken as midnight UTC).
    pub fn published(&self) -> Option<DateTime<Utc>> {
        let raw = self.published_at.as_deref()?.trim();
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}

/// Envelope of `GET /news`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsResponse {
    /// The news list; missing means empty
    #[serde(default)]
    pub news: Option<Vec<Item>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use serde_json::json;

    #[test]
    fn deserializes_api_field_names() {
        let item: Item = serde_json::from_value(json!({
            "_id": "66a1",
            "titulo": "Headline",
            "subtitulo": "Standfirst",
            "categoria": "Politics",
            "imagem": "https://cdn.example.com/a.jpg",
            "dataPublicacao": "2025-03-14T10:00:00.000Z",
            "autor": "ignored"
        }))
        .unwrap();

        assert_eq!(item.id, "66a1");
        assert_eq!(item.title, "Headline");
        assert_eq!(item.subtitle.as_deref(), Some("Standfirst"));
        assert_eq!(item.description, None);
        assert_eq!(item.published().map(|d| d.day()), Some(14));
    }

    #[test]
    fn bare_dates_and_garbage_dates() {
        let mut item: Item = serde_json::from_value(json!({ "id": "1", "title": "T" })).unwrap();
        assert_eq!(item.published(), None);

        item.published_at = Some("2024-12-31".to_string());
        assert_eq!(item.published().map(|d| d.year()), Some(2024));

        item.published_at = Some("yesterday".to_string());
        assert_eq!(item.published(), None);
    }

    #[test]
    fn missing_news_key_is_none() {
        let body: NewsResponse = serde_json::from_value(json!({})).unwrap();
        assert!(body.news.is_none());
    }
}
