use super::ui::with_spinner;
use super::{history_manager, load_config, title_lookup_failure, tmdb_client};
use crate::output::{new_table, Output};
use color_eyre::Result;
use comfy_table::Cell;
use juststream_config::PathManager;
use juststream_core::display::{format_runtime, watch_rating};
use juststream_core::{links, EmbedUrls, HistoryEntryBuilder, ImageUrls};
use juststream_models::{EmbedSource, EpisodeRef, MediaType, SeasonDetails, WatchHistoryEntry};
use juststream_tmdb::{CatalogSource, TmdbError};
use serde::Serialize;
use tracing::warn;

/// Episode to play. Shows start at S1E1 and a season without an episode
/// starts at its first episode; movies never carry one.
pub fn resolve_episode(media_type: MediaType, season: Option<u32>, episode: Option<u32>) -> Option<EpisodeRef> {
    match media_type {
        MediaType::Movie => None,
        MediaType::Tv => Some(EpisodeRef::new(
            season.filter(|s| *s > 0).unwrap_or(1),
            episode.filter(|e| *e > 0).unwrap_or(1),
        )),
    }
}

/// Everything the watch page shows for one title
#[derive(Debug, Serialize)]
pub struct WatchView {
    pub id: u64,
    pub media_type: MediaType,
    pub title: String,
    pub rating: String,
    pub runtime: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode: Option<EpisodeRef>,
    pub source: EmbedSource,
    pub player_url: String,
    pub sources: Vec<(EmbedSource, String)>,
    /// Regular season numbers, for shows
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub seasons: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season_details: Option<SeasonDetails>,
    #[serde(skip)]
    pub history_entry: Option<WatchHistoryEntry>,
}

/// Look the title up and build the player links. The history entry is only
/// produced once the details lookup succeeded.
pub async fn load_watch<S: CatalogSource + ?Sized>(
    source: &S,
    images: &ImageUrls,
    embeds: &EmbedUrls,
    media_type: MediaType,
    id: u64,
    episode: Option<EpisodeRef>,
    player: EmbedSource,
) -> Result<WatchView, TmdbError> {
    let builder = HistoryEntryBuilder::new(images);
    let player_url = embeds.url(player, media_type, id, episode);
    let sources = embeds.all(media_type, id, episode);

    match (media_type, episode) {
        (MediaType::Tv, Some(ep)) => {
            let (show, season) = futures::join!(source.tv_details(id), source.season(id, ep.season));
            let show = show?;
            let season_details = match season {
                Ok(season) => Some(season),
                Err(e) => {
                    warn!("Failed to load season {} of {}: {}", ep.season, id, e);
                    None
                }
            };
            let runtime = season_details
                .as_ref()
                .and_then(|s| s.episodes.iter().find(|e| e.episode_number == ep.episode))
                .and_then(|e| e.runtime)
                .or_else(|| show.episode_run_time.first().copied());

            Ok(WatchView {
                id,
                media_type,
                title: show.name.clone(),
                rating: watch_rating(show.vote_average),
                runtime: format_runtime(runtime),
                episode: Some(ep),
                source: player,
                player_url,
                sources,
                seasons: show.regular_seasons().map(|s| s.season_number).collect(),
                season_details,
                history_entry: Some(builder.episode(&show, ep)),
            })
        }
        _ => {
            let movie = source.movie_details(id).await?;
            Ok(WatchView {
                id,
                media_type: MediaType::Movie,
                title: movie.title.clone(),
                rating: watch_rating(movie.vote_average),
                runtime: format_runtime(movie.runtime),
                episode: None,
                source: player,
                player_url,
                sources,
                seasons: Vec::new(),
                season_details: None,
                history_entry: Some(builder.movie(&movie)),
            })
        }
    }
}

pub async fn run_watch(
    media_type: MediaType,
    id: u64,
    season: Option<u32>,
    episode: Option<u32>,
    source: Option<EmbedSource>,
    output: &Output,
) -> Result<()> {
    let paths = PathManager::default();
    let config = load_config(&paths)?;
    let client = tmdb_client(&config)?;
    let images = ImageUrls::from_config(&config.tmdb);
    let embeds = EmbedUrls::from_config(&config.embed);
    let player = source.unwrap_or(config.embed.default_source);
    if media_type == MediaType::Movie && (season.is_some() || episode.is_some()) {
        warn!("Ignoring season/episode for movie {}", id);
    }
    let episode = resolve_episode(media_type, season, episode);

    let spin = !output.is_quiet() && !output.is_json();
    let mut view = with_spinner(
        "Loading title...",
        spin,
        load_watch(&client, &images, &embeds, media_type, id, episode, player),
    )
    .await
    .map_err(|e| title_lookup_failure(media_type, id, &e))?;

    if let Some(entry) = view.history_entry.take() {
        let mut history = history_manager(&paths);
        history.record(entry);
    }

    if output.is_json() {
        output.data(&view);
        return Ok(());
    }

    render_watch(&view, output);
    Ok(())
}

fn render_watch(view: &WatchView, output: &Output) {
    let heading = match view.episode {
        Some(ep) => format!("{} {}", view.title, ep),
        None => view.title.clone(),
    };
    output.heading(&heading);
    output.info(format!("Rating: {}   Runtime: {}", view.rating, view.runtime));
    output.success(format!("{}: {}", view.source.label(), view.player_url));

    let others: Vec<_> = view.sources.iter().filter(|(s, _)| *s != view.source).collect();
    if !others.is_empty() {
        output.info("Other servers:");
        for (source, url) in others {
            output.info(format!("  {}: {}", source.label(), url));
        }
    }

    if let (Some(ep), Some(season)) = (view.episode, &view.season_details) {
        output.heading(&format!("Season {} of {}", ep.season, view.seasons.len()));
        let mut table = new_table(&["", "#", "Episode", "Runtime"]);
        for episode in &season.episodes {
            let marker = if episode.episode_number == ep.episode { "▶" } else { "" };
            table.add_row(vec![
                Cell::new(marker),
                Cell::new(episode.episode_number),
                Cell::new(&episode.name),
                Cell::new(format_runtime(episode.runtime)),
            ]);
        }
        output.table(&table);

        if let Some(next) = next_episode(season, ep) {
            output.info(format!("Next: {}", links::watch_page_url(MediaType::Tv, view.id, Some(next))));
        }
    }
}

/// The following episode of the same season, if the season lists it
fn next_episode(season: &SeasonDetails, ep: EpisodeRef) -> Option<EpisodeRef> {
    let number = ep.episode.checked_add(1)?;
    season
        .episodes
        .iter()
        .any(|e| e.episode_number == number)
        .then(|| EpisodeRef::new(ep.season, number))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use async_trait::async_trait;
    use juststream_models::{
        Credits, Episode, GenreList, Language, MovieDetails, Page, SeasonSummary, TitleSummary, TvDetails, VideoList,
    };
    use juststream_tmdb::{DiscoverFilters, SearchScope, TimeWindow};

    /// Only details and season lookups are answered; season 9 is missing
    struct ShowCatalog;

    fn not_found(endpoint: &str) -> TmdbError {
        TmdbError::Status {
            status: 404,
            endpoint: endpoint.to_string(),
            body: String::new(),
        }
    }

    #[async_trait]
    impl CatalogSource for ShowCatalog {
        fn source_name(&self) -> &str {
            "show"
        }

        async fn trending(&self, _: Option<MediaType>, _: TimeWindow, _: u32) -> Result<Page<TitleSummary>, TmdbError> {
            Err(not_found("/trending"))
        }

        async fn popular(&self, _: MediaType, _: u32) -> Result<Page<TitleSummary>, TmdbError> {
            Err(not_found("/popular"))
        }

        async fn top_rated(&self, _: MediaType, _: u32) -> Result<Page<TitleSummary>, TmdbError> {
            Err(not_found("/top_rated"))
        }

        async fn upcoming_movies(&self, _: u32) -> Result<Page<TitleSummary>, TmdbError> {
            Err(not_found("/upcoming"))
        }

        async fn genres(&self, _: MediaType) -> Result<GenreList, TmdbError> {
            Err(not_found("/genre"))
        }

        async fn languages(&self) -> Result<Vec<Language>, TmdbError> {
            Err(not_found("/configuration/languages"))
        }

        async fn movie_details(&self, id: u64) -> Result<MovieDetails, TmdbError> {
            if id == 0 {
                return Err(not_found("/movie/0"));
            }
            Ok(MovieDetails {
                id,
                title: "Fight Club".to_string(),
                runtime: Some(139),
                vote_average: Some(8.4),
                ..Default::default()
            })
        }

        async fn tv_details(&self, id: u64) -> Result<TvDetails, TmdbError> {
            Ok(TvDetails {
                id,
                name: "Dark".to_string(),
                first_air_date: Some("2017-12-01".to_string()),
                episode_run_time: vec![55],
                seasons: vec![
                    SeasonSummary { season_number: 0, ..Default::default() },
                    SeasonSummary { season_number: 1, episode_count: 2, ..Default::default() },
                    SeasonSummary { season_number: 2, episode_count: 8, ..Default::default() },
                ],
                ..Default::default()
            })
        }

        async fn season(&self, _: u64, season_number: u32) -> Result<SeasonDetails, TmdbError> {
            if season_number == 9 {
                return Err(not_found("/season/9"));
            }
            Ok(SeasonDetails {
                season_number,
                name: format!("Season {}", season_number),
                episodes: vec![
                    Episode { episode_number: 1, runtime: Some(51), ..Default::default() },
                    Episode { episode_number: 2, runtime: Some(44), ..Default::default() },
                ],
            })
        }

        async fn credits(&self, _: MediaType, _: u64) -> Result<Credits, TmdbError> {
            Err(not_found("/credits"))
        }

        async fn videos(&self, _: MediaType, _: u64) -> Result<VideoList, TmdbError> {
            Err(not_found("/videos"))
        }

        async fn similar(&self, _: MediaType, _: u64, _: u32) -> Result<Page<TitleSummary>, TmdbError> {
            Err(not_found("/similar"))
        }

        async fn search(&self, _: SearchScope, _: &str, _: u32) -> Result<Page<TitleSummary>, TmdbError> {
            Err(not_found("/search"))
        }

        async fn suggestions(&self, _: &str) -> Result<Vec<TitleSummary>, TmdbError> {
            Err(not_found("/search/multi"))
        }

        async fn discover(&self, _: MediaType, _: &DiscoverFilters, _: u32) -> Result<Page<TitleSummary>, TmdbError> {
            Err(not_found("/discover"))
        }
    }

    #[test]
    fn test_resolve_episode() {
        assert_eq!(resolve_episode(MediaType::Tv, None, None), Some(EpisodeRef::new(1, 1)));
        assert_eq!(resolve_episode(MediaType::Tv, Some(3), None), Some(EpisodeRef::new(3, 1)));
        assert_eq!(resolve_episode(MediaType::Tv, Some(2), Some(5)), Some(EpisodeRef::new(2, 5)));
        assert_eq!(resolve_episode(MediaType::Tv, Some(0), Some(0)), Some(EpisodeRef::new(1, 1)));
        assert_eq!(resolve_episode(MediaType::Movie, Some(2), Some(5)), None);
    }

    #[tokio::test]
    async fn test_episode_watch_view() {
        let images = ImageUrls::default();
        let embeds = EmbedUrls::default();
        let ep = EpisodeRef::new(1, 2);

        let view = load_watch(&ShowCatalog, &images, &embeds, MediaType::Tv, 70523, Some(ep), EmbedSource::VidSrc)
            .await
            .unwrap();

        assert_eq!(view.player_url, "https://vidsrc.to/embed/tv/70523/1/2");
        assert_eq!(view.runtime, "44m");
        assert_eq!(view.seasons, vec![1, 2]);
        assert_eq!(view.sources.len(), EmbedSource::ALL.len());

        let entry = view.history_entry.unwrap();
        assert_eq!(entry.title, "Dark S1E2");
        assert_eq!(entry.episode(), Some(ep));
    }

    #[tokio::test]
    async fn test_missing_season_falls_back_to_show_runtime() {
        let images = ImageUrls::default();
        let embeds = EmbedUrls::default();

        let view = load_watch(
            &ShowCatalog,
            &images,
            &embeds,
            MediaType::Tv,
            70523,
            Some(EpisodeRef::new(9, 1)),
            EmbedSource::Vip,
        )
        .await
        .unwrap();

        assert!(view.season_details.is_none());
        assert_eq!(view.runtime, "55m");
    }

    #[tokio::test]
    async fn test_movie_watch_view() {
        let images = ImageUrls::default();
        let embeds = EmbedUrls::default();

        let view = load_watch(&ShowCatalog, &images, &embeds, MediaType::Movie, 550, None, EmbedSource::Multiembed)
            .await
            .unwrap();

        assert_eq!(view.player_url, "https://multiembed.mov/?video_id=550&tmdb=1");
        assert_eq!(view.rating, "8.4/10");
        assert_eq!(view.history_entry.unwrap().title, "Fight Club");
    }

    #[tokio::test]
    async fn test_unknown_title_produces_no_history_entry() {
        let images = ImageUrls::default();
        let embeds = EmbedUrls::default();

        let err = load_watch(&ShowCatalog, &images, &embeds, MediaType::Movie, 0, None, EmbedSource::Vip)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_next_episode() {
        let season = SeasonDetails {
            season_number: 1,
            name: "Season 1".to_string(),
            episodes: vec![
                Episode { episode_number: 1, ..Default::default() },
                Episode { episode_number: 2, ..Default::default() },
                Episode { episode_number: u32::MAX, ..Default::default() },
            ],
        };

        assert_eq!(next_episode(&season, EpisodeRef::new(1, 1)), Some(EpisodeRef::new(1, 2)));
        assert_eq!(next_episode(&season, EpisodeRef::new(1, 2)), None);
        assert_eq!(next_episode(&season, EpisodeRef::new(1, u32::MAX)), None);
    }

    #[tokio::test]
    async fn test_render_last_possible_episode() {
        let images = ImageUrls::default();
        let embeds = EmbedUrls::default();

        let view = load_watch(
            &ShowCatalog,
            &images,
            &embeds,
            MediaType::Tv,
            70523,
            Some(EpisodeRef::new(1, u32::MAX)),
            EmbedSource::VidSrc,
        )
        .await
        .unwrap();

        assert!(view.season_details.is_some());
        render_watch(&view, &Output::new(OutputFormat::Human, true));
    }
}
