use juststream_models::MediaType;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_SORT: &str = "popularity.desc";

/// Which search endpoint to query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    #[default]
    All,
    Movie,
    Tv,
}

impl SearchScope {
    pub fn endpoint(&self) -> &'static str {
        match self {
            SearchScope::All => "/search/multi",
            SearchScope::Movie => "/search/movie",
            SearchScope::Tv => "/search/tv",
        }
    }

    /// Media type implied by the scope, `None` for mixed results
    pub fn media_type(&self) -> Option<MediaType> {
        match self {
            SearchScope::All => None,
            SearchScope::Movie => Some(MediaType::Movie),
            SearchScope::Tv => Some(MediaType::Tv),
        }
    }
}

impl FromStr for SearchScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "multi" => Ok(SearchScope::All),
            "movie" => Ok(SearchScope::Movie),
            "tv" => Ok(SearchScope::Tv),
            other => Err(format!("Invalid search type: {}. Use 'all', 'movie' or 'tv'", other)),
        }
    }
}

impl fmt::Display for SearchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SearchScope::All => "all",
            SearchScope::Movie => "movie",
            SearchScope::Tv => "tv",
        })
    }
}

/// Trending time window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeWindow {
    #[default]
    Day,
    Week,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
        }
    }
}

impl FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(TimeWindow::Day),
            "week" => Ok(TimeWindow::Week),
            other => Err(format!("Invalid time window: {}. Use 'day' or 'week'", other)),
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Narrowing applied to a discover listing. Unset fields add no parameter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscoverFilters {
    pub genre_id: Option<u64>,
    pub year: Option<u32>,
    pub start_year: Option<u32>,
    pub end_year: Option<u32>,
    /// ISO 639-1 original language
    pub language: Option<String>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    pub sort_by: Option<String>,
}

impl DiscoverFilters {
    pub fn with_genre(genre_id: u64) -> Self {
        Self {
            genre_id: Some(genre_id),
            ..Default::default()
        }
    }

    /// Query parameters for `/discover/{movie|tv}`
    pub fn to_params(&self, media_type: MediaType) -> Vec<(&'static str, String)> {
        let (year_key, date_gte, date_lte) = match media_type {
            MediaType::Movie => ("primary_release_year", "primary_release_date.gte", "primary_release_date.lte"),
            MediaType::Tv => ("first_air_date_year", "first_air_date.gte", "first_air_date.lte"),
        };

        let sort_by = self
            .sort_by
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SORT);

        let mut params = vec![("sort_by", sort_by.to_string())];

        if let Some(genre) = self.genre_id {
            params.push(("with_genres", genre.to_string()));
        }
        if let Some(year) = self.year {
            params.push((year_key, year.to_string()));
        }
        if let Some(start) = self.start_year {
            params.push((date_gte, format!("{}-01-01", start)));
        }
        if let Some(end) = self.end_year {
            params.push((date_lte, format!("{}-12-31", end)));
        }
        if let Some(language) = self.language.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
            params.push(("with_original_language", language.to_string()));
        }
        if let Some(min) = self.min_rating {
            params.push(("vote_average.gte", min.to_string()));
        }
        if let Some(max) = self.max_rating {
            params.push(("vote_average.lte", max.to_string()));
        }

        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filters_only_sort() {
        let params = DiscoverFilters::default().to_params(MediaType::Movie);
        assert_eq!(params, vec![("sort_by", "popularity.desc".to_string())]);
    }

    #[test]
    fn test_movie_filters() {
        let filters = DiscoverFilters {
            genre_id: Some(28),
            start_year: Some(1990),
            end_year: Some(1999),
            language: Some("en".to_string()),
            min_rating: Some(7.5),
            sort_by: Some("vote_average.desc".to_string()),
            ..Default::default()
        };
        let params = filters.to_params(MediaType::Movie);

        assert!(params.contains(&("sort_by", "vote_average.desc".to_string())));
        assert!(params.contains(&("with_genres", "28".to_string())));
        assert!(params.contains(&("primary_release_date.gte", "1990-01-01".to_string())));
        assert!(params.contains(&("primary_release_date.lte", "1999-12-31".to_string())));
        assert!(params.contains(&("with_original_language", "en".to_string())));
        assert!(params.contains(&("vote_average.gte", "7.5".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "vote_average.lte"));
    }

    #[test]
    fn test_tv_filters_use_air_dates() {
        let filters = DiscoverFilters {
            year: Some(2019),
            start_year: Some(2010),
            ..Default::default()
        };
        let params = filters.to_params(MediaType::Tv);
        assert!(params.contains(&("first_air_date_year", "2019".to_string())));
        assert!(params.contains(&("first_air_date.gte", "2010-01-01".to_string())));
    }

    #[test]
    fn test_scope_parsing() {
        assert_eq!("tv".parse::<SearchScope>().unwrap(), SearchScope::Tv);
        assert_eq!("ALL".parse::<SearchScope>().unwrap().endpoint(), "/search/multi");
        assert!("person".parse::<SearchScope>().is_err());
        assert_eq!("week".parse::<TimeWindow>().unwrap(), TimeWindow::Week);
    }
}
