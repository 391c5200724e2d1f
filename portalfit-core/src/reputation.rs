//! External recruiting-service reputation ratings.

use serde::{Deserialize, Serialize};

use crate::stat::lenient;
use crate::{EntityKey, Stat};

/// One external rating row, joined to candidates by name.
///
/// Serialises as the reputation metadata attached to composite records.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExternalRating {
    /// Display name.
    #[serde(deserialize_with = "lenient::required_text", skip_serializing)]
    pub name: String,
    /// Rating on the service's scale.
    pub rating: Stat,
    /// Listed position.
    #[serde(
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub position: Option<String>,
    /// Listed height.
    #[serde(
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub height: Option<String>,
    /// Listed weight.
    #[serde(
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub weight: Option<String>,
    /// Portal status such as `Committed` or `Available`.
    #[serde(
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,
    /// Profile image URL.
    #[serde(
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
    /// Profile page URL.
    #[serde(
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub player_url: Option<String>,
}

impl ExternalRating {
    /// Construct a rating with no metadata.
    #[must_use]
    pub fn new(name: &str, rating: f64) -> Self {
        Self {
            name: name.to_owned(),
            rating: Stat::new(rating),
            ..Self::default()
        }
    }

    /// Normalised join key.
    #[must_use]
    pub fn key(&self) -> EntityKey {
        EntityKey::new(&self.name)
    }

    /// Rating rescaled into `0.0..=1.0`.
    ///
    /// Values above one are read as percentages.
    ///
    /// # Examples
    /// ```
    /// use portalfit_core::ExternalRating;
    ///
    /// assert_eq!(ExternalRating::new("A", 0.89).normalised_rating(), Some(0.89));
    /// assert_eq!(ExternalRating::new("B", 91.0).normalised_rating(), Some(0.91));
    /// ```
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "percentage ratings are divided into the unit interval"
    )]
    pub fn normalised_rating(&self) -> Option<f64> {
        self.rating.value().map(|rating| {
            let unit = if rating > 1.0 { rating / 100.0 } else { rating };
            unit.clamp(0.0, 1.0)
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn reads_rating_rows_and_skips_blank_metadata() {
        let rating: ExternalRating = serde_json::from_str(
            r#"{"name":"Tre White","rating":"0.8966","position":"SF","status":"","imageUrl":null}"#,
        )
        .expect("parse rating");

        assert_eq!(rating.key(), EntityKey::new("tre white"));
        assert_eq!(rating.rating.value(), Some(0.8966));
        assert_eq!(rating.position.as_deref(), Some("SF"));
        assert_eq!(rating.status, None);
        assert_eq!(rating.image_url, None);
    }

    #[rstest]
    fn metadata_omits_name_and_absent_fields() {
        let mut rating = ExternalRating::new("Tre White", 0.9);
        rating.position = Some("SF".to_owned());

        let value = serde_json::to_value(&rating).expect("serialise rating");

        assert_eq!(value, serde_json::json!({ "rating": 0.9, "position": "SF" }));
    }

    #[rstest]
    #[case(-0.5, 0.0)]
    #[case(150.0, 1.0)]
    fn normalised_rating_is_clamped(#[case] raw: f64, #[case] expected: f64) {
        assert_eq!(ExternalRating::new("A", raw).normalised_rating(), Some(expected));
    }
}
