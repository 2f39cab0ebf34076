use serde::{Deserialize, Serialize};

/// Aggregated movie record served by the API.
///
/// Optional upstream data is left out of the JSON entirely instead of
/// being written as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub title_text: String,
    pub title_type: String,
    pub release_year: i32,
    pub release_date: String,
    pub genres: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_image: Option<PrimaryImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratings_summary: Option<RatingsSummary>,
    pub main_actors: Vec<Actor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub streaming_options: Vec<StreamingOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryImage {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingsSummary {
    pub aggregate_rating: f64,
    pub vote_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamingOption {
    pub service: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
}

/// Base title information as returned by the metadata provider.
/// Every field may be missing or `null` upstream.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TitleInfo {
    pub id: Option<String>,
    pub title_text: Option<String>,
    pub title_type: Option<String>,
    pub release_year: Option<i32>,
    pub release_date: Option<String>,
    pub genres: Option<Vec<String>>,
    pub primary_image: Option<PrimaryImage>,
    pub ratings_summary: Option<RatingsSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bare_movie() -> Movie {
        Movie {
            id: "tt0111161".to_string(),
            title_text: "The Shawshank Redemption".to_string(),
            title_type: "movie".to_string(),
            release_year: 1994,
            release_date: "1994-10-14".to_string(),
            genres: vec!["Drama".to_string()],
            primary_image: None,
            ratings_summary: None,
            main_actors: vec![],
            streaming_options: vec![],
        }
    }

    #[test]
    fn absent_optionals_are_omitted() {
        let value = serde_json::to_value(bare_movie()).unwrap();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("ratingsSummary"));
        assert!(!obj.contains_key("primaryImage"));
        assert!(!obj.contains_key("streamingOptions"));
        assert_eq!(obj.get("mainActors"), Some(&json!([])));
        assert_eq!(obj.get("releaseYear"), Some(&json!(1994)));
    }

    #[test]
    fn present_optionals_use_camel_case() {
        let movie = Movie {
            primary_image: Some(PrimaryImage {
                url: "https://img.example/poster.jpg".to_string(),
            }),
            ratings_summary: Some(RatingsSummary {
                aggregate_rating: 9.3,
                vote_count: 2_900_000,
            }),
            streaming_options: vec![StreamingOption {
                service: "netflix".to_string(),
                url: "https://netflix.example/title/1".to_string(),
                price: None,
                quality: Some("hd".to_string()),
            }],
            ..bare_movie()
        };
        let value = serde_json::to_value(movie).unwrap();
        assert_eq!(value["ratingsSummary"]["aggregateRating"], json!(9.3));
        assert_eq!(value["ratingsSummary"]["voteCount"], json!(2_900_000));
        assert_eq!(value["primaryImage"]["url"], "https://img.example/poster.jpg");
        let option = value["streamingOptions"][0].as_object().unwrap();
        assert_eq!(option.get("quality"), Some(&json!("hd")));
        assert!(!option.contains_key("price"));
    }

    #[test]
    fn title_info_tolerates_nulls_and_gaps() {
        let info: TitleInfo = serde_json::from_value(json!({
            "id": "tt1",
            "titleText": "Partial",
            "genres": null,
            "ratingsSummary": null
        }))
        .unwrap();
        assert_eq!(info.id.as_deref(), Some("tt1"));
        assert_eq!(info.title_text.as_deref(), Some("Partial"));
        assert!(info.genres.is_none());
        assert!(info.release_year.is_none());
        assert!(info.ratings_summary.is_none());
    }
}
