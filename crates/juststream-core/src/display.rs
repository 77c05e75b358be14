//! Display strings for catalog cards, the watch page and history rows.

use crate::links::{details_page_url, ImageUrls};
use juststream_models::{
    EpisodeRef, MediaType, MovieDetails, TitleSummary, TvDetails, WatchHistoryEntry, NOT_AVAILABLE,
};
use serde::Serialize;

pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// User-facing message for a section whose lookup failed
pub const LOAD_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Four-digit year from an ISO date, `N/A` otherwise
pub fn display_year(date: Option<&str>) -> String {
    date.and_then(|d| d.get(..4))
        .filter(|y| y.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Vote average to one decimal. A zero average means "no votes".
pub fn display_rating(vote_average: Option<f64>) -> String {
    match vote_average {
        Some(v) if v != 0.0 && v.is_finite() => format!("{:.1}", v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Rating as shown on the watch page, e.g. `8.4/10`
pub fn watch_rating(vote_average: Option<f64>) -> String {
    let rating = display_rating(vote_average);
    if rating == NOT_AVAILABLE {
        rating
    } else {
        format!("{}/10", rating)
    }
}

pub fn format_runtime(minutes: Option<u32>) -> String {
    match minutes {
        Some(m) if m > 0 => {
            let (hours, mins) = (m / 60, m % 60);
            if hours > 0 {
                format!("{}h {}m", hours, mins)
            } else {
                format!("{}m", mins)
            }
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub fn episode_title(show: &str, episode: EpisodeRef) -> String {
    format!("{} {}", show, episode)
}

pub fn display_title(summary: &TitleSummary) -> &str {
    [&summary.title, &summary.name]
        .into_iter()
        .filter_map(|t| t.as_deref())
        .find(|t| !t.is_empty())
        .unwrap_or(UNKNOWN_TITLE)
}

/// Drop results that are not movies or shows (people in multi search)
pub fn titles_only(results: Vec<TitleSummary>) -> Vec<TitleSummary> {
    results.into_iter().filter(|r| r.resolved_media_type().is_some()).collect()
}

/// A title rendered for a listing row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaCard {
    pub id: u64,
    pub media_type: MediaType,
    pub title: String,
    pub year: String,
    pub rating: String,
    pub poster_url: String,
    pub details_url: String,
}

impl MediaCard {
    /// `None` for results that are neither movie nor show
    pub fn from_summary(summary: &TitleSummary, images: &ImageUrls) -> Option<Self> {
        let media_type = summary.resolved_media_type()?;
        Some(Self {
            id: summary.id,
            media_type,
            title: display_title(summary).to_string(),
            year: display_year(summary.date()),
            rating: display_rating(summary.vote_average),
            poster_url: images.poster(summary.poster_path.as_deref()),
            details_url: details_page_url(media_type, summary.id),
        })
    }

    /// Cards for the playable titles of a listing, with an explicit type for
    /// listings that do not carry one
    pub fn from_listing(results: &[TitleSummary], images: &ImageUrls, media_type: Option<MediaType>) -> Vec<Self> {
        results
            .iter()
            .filter_map(|summary| {
                let mut card = Self::from_summary(summary, images)?;
                if summary.media_type.is_none() {
                    if let Some(media_type) = media_type {
                        card.media_type = media_type;
                        card.details_url = details_page_url(media_type, summary.id);
                    }
                }
                Some(card)
            })
            .collect()
    }
}

/// Turns title details into history entries the way the watch page does.
pub struct HistoryEntryBuilder<'a> {
    images: &'a ImageUrls,
}

impl<'a> HistoryEntryBuilder<'a> {
    pub fn new(images: &'a ImageUrls) -> Self {
        Self { images }
    }

    pub fn movie(&self, details: &MovieDetails) -> WatchHistoryEntry {
        WatchHistoryEntry::new(
            details.id,
            MediaType::Movie,
            non_empty_or_unknown(&details.title),
            self.images.poster(details.poster_path.as_deref()),
        )
        .with_year(display_year(details.release_date.as_deref()))
        .with_rating(display_rating(details.vote_average))
    }

    pub fn episode(&self, details: &TvDetails, episode: EpisodeRef) -> WatchHistoryEntry {
        WatchHistoryEntry::new(
            details.id,
            MediaType::Tv,
            episode_title(non_empty_or_unknown(&details.name), episode),
            self.images.poster(details.poster_path.as_deref()),
        )
        .with_year(display_year(details.first_air_date.as_deref()))
        .with_rating(display_rating(details.vote_average))
        .with_episode(episode)
    }
}

fn non_empty_or_unknown(value: &str) -> &str {
    if value.trim().is_empty() {
        UNKNOWN_TITLE
    } else {
        value
    }
}
