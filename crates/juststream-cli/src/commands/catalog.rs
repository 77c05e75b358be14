use super::ui::with_spinner;
use super::{history::list_history, history_manager, load_config, lookup_failure, tmdb_client};
use crate::output::{new_table, Output};
use crate::CatalogCommands;
use color_eyre::Result;
use comfy_table::Cell;
use juststream_config::PathManager;
use juststream_core::display::{display_year, format_runtime, watch_rating};
use juststream_core::{links, normalize_query, Debouncer, ImageUrls, MediaCard, DISPLAY_LIMIT, LOAD_ERROR_MESSAGE, MAX_SUGGESTIONS};
use juststream_models::{EpisodeRef, MediaType, Page, TitleSummary};
use juststream_tmdb::{CatalogSource, DiscoverFilters, SearchScope, TimeWindow, TmdbError};
use serde::Serialize;
use serde_json::json;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing::{error, warn};

const CAST_LIMIT: usize = 10;
const SIMILAR_LIMIT: usize = 10;

pub async fn run_catalog(cmd: CatalogCommands, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config = load_config(&paths)?;
    let client = tmdb_client(&config)?;
    let images = ImageUrls::from_config(&config.tmdb);
    let spin = !output.is_quiet() && !output.is_json();

    match cmd {
        CatalogCommands::Home => {
            let sections = with_spinner("Loading home page...", spin, load_home(&client)).await;
            render_home(&sections, &images, output);

            let history = history_manager(&paths);
            list_history(&history, Some(DISPLAY_LIMIT), output);
            Ok(())
        }
        CatalogCommands::Trending { media_type, window, page } => {
            let result = with_spinner("Loading trending titles...", spin, client.trending(media_type, window, page)).await;
            show_listing("Trending", result, &images, media_type, output)
        }
        CatalogCommands::Popular { media_type, page } => {
            let result = with_spinner("Loading popular titles...", spin, client.popular(media_type, page)).await;
            show_listing(&format!("Popular {}", section_noun(media_type)), result, &images, Some(media_type), output)
        }
        CatalogCommands::TopRated { media_type, page } => {
            let result = with_spinner("Loading top rated titles...", spin, client.top_rated(media_type, page)).await;
            show_listing(&format!("Top Rated {}", section_noun(media_type)), result, &images, Some(media_type), output)
        }
        CatalogCommands::Upcoming { page } => {
            let result = with_spinner("Loading upcoming movies...", spin, client.upcoming_movies(page)).await;
            show_listing("Upcoming Movies", result, &images, Some(MediaType::Movie), output)
        }
        CatalogCommands::Search { query, scope, page } => {
            let query = query.trim();
            if query.is_empty() {
                output.warn("Please enter a search term");
                return Ok(());
            }
            let result = with_spinner(format!("Searching for \"{}\"...", query), spin, client.search(scope, query, page)).await;
            show_search(query, scope, result, &images, output)
        }
        CatalogCommands::Suggest { query, interactive } => {
            if interactive {
                interactive_suggestions(client, images, *output).await
            } else {
                let query = query.unwrap_or_default();
                match normalize_query(&query) {
                    Some(query) => {
                        let result = client.suggestions(&query).await;
                        render_suggestions(&query, result, &images, output);
                    }
                    None => output.info("Type at least 2 characters to get suggestions"),
                }
                Ok(())
            }
        }
        CatalogCommands::Details { media_type, id } => {
            let details = with_spinner("Loading details...", spin, load_details(&client, &images, media_type, id)).await?;
            render_details(&details, output);
            Ok(())
        }
        CatalogCommands::Genres { media_type } => {
            let genres = client.genres(media_type).await.map_err(|e| lookup_failure("genres", &e))?;
            if output.is_json() {
                output.data(&genres.genres);
            } else {
                let mut table = new_table(&["Id", "Genre"]);
                for genre in &genres.genres {
                    table.add_row(vec![Cell::new(genre.id), Cell::new(&genre.name)]);
                }
                output.heading(&format!("{} Genres", section_noun(media_type)));
                output.table(&table);
            }
            Ok(())
        }
        CatalogCommands::Languages => {
            let mut languages = client.languages().await.map_err(|e| lookup_failure("languages", &e))?;
            languages.sort_by(|a, b| a.english_name.cmp(&b.english_name));
            if output.is_json() {
                output.data(&languages);
            } else {
                let mut table = new_table(&["Code", "Language"]);
                for language in &languages {
                    table.add_row(vec![Cell::new(&language.iso_639_1), Cell::new(&language.english_name)]);
                }
                output.table(&table);
            }
            Ok(())
        }
        CatalogCommands::Discover {
            media_type,
            genre,
            year,
            from,
            to,
            language,
            min_rating,
            max_rating,
            sort,
            page,
        } => {
            let filters = DiscoverFilters {
                genre_id: genre,
                year,
                start_year: from,
                end_year: to,
                language,
                min_rating,
                max_rating,
                sort_by: sort,
            };
            let result = with_spinner("Discovering titles...", spin, client.discover(media_type, &filters, page)).await;
            show_listing(&format!("Discover {}", section_noun(media_type)), result, &images, Some(media_type), output)
        }
        CatalogCommands::Season { id, season } => {
            let details = client.season(id, season).await.map_err(|e| lookup_failure("season", &e))?;
            if output.is_json() {
                output.data(&details);
                return Ok(());
            }

            let mut table = new_table(&["#", "Episode", "Air Date", "Runtime", "Watch"]);
            for episode in &details.episodes {
                table.add_row(vec![
                    Cell::new(episode.episode_number),
                    Cell::new(&episode.name),
                    Cell::new(episode.air_date.as_deref().unwrap_or("N/A")),
                    Cell::new(format_runtime(episode.runtime)),
                    Cell::new(links::watch_page_url(
                        MediaType::Tv,
                        id,
                        Some(EpisodeRef::new(season, episode.episode_number)),
                    )),
                ]);
            }
            output.heading(&details.name);
            output.table(&table);
            Ok(())
        }
    }
}

fn section_noun(media_type: MediaType) -> &'static str {
    match media_type {
        MediaType::Movie => "Movies",
        MediaType::Tv => "TV Shows",
    }
}

/// Rows of the home page. Each row fails on its own.
pub struct HomeSections {
    pub trending_movies: Result<Page<TitleSummary>, TmdbError>,
    pub top_rated_movies: Result<Page<TitleSummary>, TmdbError>,
    pub popular_tv: Result<Page<TitleSummary>, TmdbError>,
}

pub async fn load_home<S: CatalogSource + ?Sized>(source: &S) -> HomeSections {
    let (trending_movies, top_rated_movies, popular_tv) = futures::join!(
        source.trending(Some(MediaType::Movie), TimeWindow::Day, 1),
        source.top_rated(MediaType::Movie, 1),
        source.popular(MediaType::Tv, 1),
    );

    HomeSections {
        trending_movies,
        top_rated_movies,
        popular_tv,
    }
}

/// Cards for a loaded row, or the user-facing error message
pub fn section_cards(
    name: &str,
    result: &Result<Page<TitleSummary>, TmdbError>,
    images: &ImageUrls,
    media_type: Option<MediaType>,
) -> Result<Vec<MediaCard>, &'static str> {
    match result {
        Ok(page) => Ok(MediaCard::from_listing(&page.results, images, media_type)),
        Err(e) => {
            error!("Error loading {}: {}", name, e);
            Err(LOAD_ERROR_MESSAGE)
        }
    }
}

fn render_home(sections: &HomeSections, images: &ImageUrls, output: &Output) {
    let rows = [
        ("trending_movies", "Trending Movies", &sections.trending_movies, MediaType::Movie),
        ("top_rated_movies", "Top Rated Movies", &sections.top_rated_movies, MediaType::Movie),
        ("popular_tv", "Popular TV Shows", &sections.popular_tv, MediaType::Tv),
    ];

    let mut payload = serde_json::Map::new();
    for (key, title, result, media_type) in rows {
        let cards = section_cards(title, result, images, Some(media_type));
        if output.is_json() {
            let value = match &cards {
                Ok(cards) => json!({ "results": cards }),
                Err(message) => json!({ "error": message }),
            };
            payload.insert(key.to_string(), value);
            continue;
        }

        output.heading(title);
        match cards {
            Ok(cards) if cards.is_empty() => output.info("Nothing to show right now"),
            Ok(cards) => output.table(&cards_table(&cards)),
            Err(message) => output.error(message),
        }
    }

    if output.is_json() {
        output.data(&payload);
    }
}

fn cards_table(cards: &[MediaCard]) -> comfy_table::Table {
    let mut table = new_table(&["#", "Title", "Type", "Year", "Rating", "Id"]);
    for (index, card) in cards.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&card.title),
            Cell::new(card.media_type),
            Cell::new(&card.year),
            Cell::new(&card.rating),
            Cell::new(card.id),
        ]);
    }
    table
}

#[derive(Serialize)]
struct ListingPayload<'a> {
    page: u32,
    total_pages: u32,
    total_results: u32,
    results: &'a [MediaCard],
}

fn show_listing(
    title: &str,
    result: Result<Page<TitleSummary>, TmdbError>,
    images: &ImageUrls,
    media_type: Option<MediaType>,
    output: &Output,
) -> Result<()> {
    let page = result.map_err(|e| lookup_failure(title, &e))?;
    let cards = MediaCard::from_listing(&page.results, images, media_type);

    if output.is_json() {
        output.data(&ListingPayload {
            page: page.page,
            total_pages: page.total_pages,
            total_results: page.total_results,
            results: &cards,
        });
        return Ok(());
    }

    output.heading(title);
    if cards.is_empty() {
        output.info("No titles found");
        return Ok(());
    }
    output.table(&cards_table(&cards));
    if page.has_more() {
        output.info(format!("Page {} of {}. Use --page {} to load more.", page.page, page.total_pages, page.page + 1));
    }
    Ok(())
}

fn show_search(
    query: &str,
    scope: SearchScope,
    result: Result<Page<TitleSummary>, TmdbError>,
    images: &ImageUrls,
    output: &Output,
) -> Result<()> {
    if let Ok(page) = &result {
        if page.results.is_empty() && page.page <= 1 && !output.is_json() {
            output.info(format!("No results found for \"{}\"", query));
            return Ok(());
        }
    }
    show_listing(&format!("Search results for \"{}\"", query), result, images, scope.media_type(), output)
}

fn render_suggestions(query: &str, result: Result<Vec<TitleSummary>, TmdbError>, images: &ImageUrls, output: &Output) {
    let results = match result {
        Ok(results) => results,
        Err(e) => {
            // Suggestions are best effort; the full search still works
            warn!("Failed to fetch suggestions for {:?}: {}", query, e);
            return;
        }
    };

    let cards: Vec<MediaCard> = results
        .iter()
        .filter_map(|r| MediaCard::from_summary(r, images))
        .take(MAX_SUGGESTIONS)
        .collect();

    if output.is_json() {
        output.data(&json!({ "query": query, "suggestions": cards }));
        return;
    }

    output.heading(&format!("Suggestions for \"{}\"", query));
    if cards.is_empty() {
        output.info("No suggestions");
        return;
    }
    for card in &cards {
        output.info(format!("  {} ({}) [{}]  {}", card.title, card.year, card.media_type, card.details_url));
    }
    output.info(format!("  See all results: {}", links::search_page_url(query)));
}

/// One query per stdin line. A line only triggers a lookup once no newer
/// line has arrived within the quiet period.
async fn interactive_suggestions<S>(client: S, images: ImageUrls, output: Output) -> Result<()>
where
    S: CatalogSource + Clone + 'static,
{
    output.info("Type a title and press Enter. Ctrl-D to quit.");
    suggest_from_lines(BufReader::new(tokio::io::stdin()), Debouncer::default(), client, images, output).await
}

/// One debounced lookup per input line. Returns once input ends and every
/// outstanding lookup has rendered.
async fn suggest_from_lines<R, S>(input: R, debouncer: Debouncer, client: S, images: ImageUrls, output: Output) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    S: CatalogSource + Clone + 'static,
{
    let mut lines = input.lines();
    let mut tasks = JoinSet::new();

    while let Some(line) = lines.next_line().await? {
        reap_finished(&mut tasks);

        let debouncer = debouncer.clone();
        let client = client.clone();
        let images = images.clone();
        tasks.spawn(async move {
            if let Some(query) = debouncer.settle(&line).await {
                let result = client.suggestions(&query).await;
                render_suggestions(&query, result, &images, &output);
            }
        });
    }

    while let Some(res) = tasks.join_next().await {
        if let Err(e) = res {
            warn!("Suggestion task failed: {}", e);
        }
    }
    Ok(())
}

/// Drop tasks that already completed so the set only tracks pending lookups
fn reap_finished(tasks: &mut JoinSet<()>) {
    while let Some(res) = tasks.try_join_next() {
        if let Err(e) = res {
            warn!("Suggestion task failed: {}", e);
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CastView {
    pub name: String,
    pub character: String,
    pub profile_url: String,
}

#[derive(Debug, Serialize)]
pub struct DetailsView {
    pub id: u64,
    pub media_type: MediaType,
    pub title: String,
    pub tagline: Option<String>,
    pub year: String,
    pub rating: String,
    pub runtime: String,
    pub genres: Vec<String>,
    pub overview: String,
    pub poster_url: String,
    pub backdrop_url: String,
    /// `(season number, label)` for every regular season
    pub seasons: Vec<(u32, String)>,
    pub cast: Vec<CastView>,
    pub trailer_url: Option<String>,
    pub similar: Vec<MediaCard>,
    pub watch_url: String,
}

/// Details plus cast, trailer and similar titles. Only the details lookup is
/// required; the extras are dropped with a warning when they fail.
pub async fn load_details<S: CatalogSource + ?Sized>(
    source: &S,
    images: &ImageUrls,
    media_type: MediaType,
    id: u64,
) -> Result<DetailsView> {
    let (credits, videos, similar) = futures::join!(
        source.credits(media_type, id),
        source.videos(media_type, id),
        source.similar(media_type, id, 1),
    );

    let mut view = match media_type {
        MediaType::Movie => {
            let movie = source.movie_details(id).await.map_err(|e| lookup_failure("movie details", &e))?;
            DetailsView {
                id,
                media_type,
                title: movie.title.clone(),
                tagline: movie.tagline.clone().filter(|t| !t.is_empty()),
                year: display_year(movie.release_date.as_deref()),
                rating: watch_rating(movie.vote_average),
                runtime: format_runtime(movie.runtime),
                genres: movie.genres.iter().map(|g| g.name.clone()).collect(),
                overview: overview_or_default(movie.overview.as_deref()),
                poster_url: images.poster(movie.poster_path.as_deref()),
                backdrop_url: images.backdrop(movie.backdrop_path.as_deref()),
                seasons: Vec::new(),
                cast: Vec::new(),
                trailer_url: None,
                similar: Vec::new(),
                watch_url: links::watch_page_url(MediaType::Movie, id, None),
            }
        }
        MediaType::Tv => {
            let show = source.tv_details(id).await.map_err(|e| lookup_failure("TV details", &e))?;
            DetailsView {
                id,
                media_type,
                title: show.name.clone(),
                tagline: show.tagline.clone().filter(|t| !t.is_empty()),
                year: display_year(show.first_air_date.as_deref()),
                rating: watch_rating(show.vote_average),
                runtime: format_runtime(show.episode_run_time.first().copied()),
                genres: show.genres.iter().map(|g| g.name.clone()).collect(),
                overview: overview_or_default(show.overview.as_deref()),
                poster_url: images.poster(show.poster_path.as_deref()),
                backdrop_url: images.backdrop(show.backdrop_path.as_deref()),
                seasons: show
                    .regular_seasons()
                    .map(|s| (s.season_number, format!("{} ({} episodes)", s.name, s.episode_count)))
                    .collect(),
                cast: Vec::new(),
                trailer_url: None,
                similar: Vec::new(),
                watch_url: links::watch_page_url(MediaType::Tv, id, None),
            }
        }
    };

    match credits {
        Ok(credits) => {
            view.cast = credits
                .cast
                .iter()
                .take(CAST_LIMIT)
                .map(|member| CastView {
                    name: member.name.clone(),
                    character: member.character.clone().unwrap_or_default(),
                    profile_url: images.profile(member.profile_path.as_deref()),
                })
                .collect();
        }
        Err(e) => warn!("Failed to load cast for {} {}: {}", media_type, id, e),
    }

    match videos {
        Ok(videos) => view.trailer_url = links::trailer_url(&videos.results),
        Err(e) => warn!("Failed to load trailer for {} {}: {}", media_type, id, e),
    }

    match similar {
        Ok(page) => {
            view.similar = MediaCard::from_listing(&page.results, images, Some(media_type));
            view.similar.truncate(SIMILAR_LIMIT);
        }
        Err(e) => warn!("Failed to load similar titles for {} {}: {}", media_type, id, e),
    }

    Ok(view)
}

fn overview_or_default(overview: Option<&str>) -> String {
    overview
        .filter(|o| !o.trim().is_empty())
        .unwrap_or("No overview available.")
        .to_string()
}

fn render_details(view: &DetailsView, output: &Output) {
    if output.is_json() {
        output.data(view);
        return;
    }

    output.heading(&view.title);
    if let Some(tagline) = &view.tagline {
        output.info(format!("\"{}\"", tagline));
    }

    let mut facts = new_table(&["Year", "Rating", "Runtime", "Genres"]);
    facts.add_row(vec![
        Cell::new(&view.year),
        Cell::new(&view.rating),
        Cell::new(&view.runtime),
        Cell::new(view.genres.join(", ")),
    ]);
    output.table(&facts);
    output.info(&view.overview);

    if !view.seasons.is_empty() {
        output.heading("Seasons");
        for (_, label) in &view.seasons {
            output.info(format!("  {}", label));
        }
    }

    if !view.cast.is_empty() {
        output.heading("Cast");
        let mut cast = new_table(&["Name", "Character"]);
        for member in &view.cast {
            cast.add_row(vec![Cell::new(&member.name), Cell::new(&member.character)]);
        }
        output.table(&cast);
    }

    if let Some(trailer) = &view.trailer_url {
        output.info(format!("Trailer: {}", trailer));
    }

    output.heading(match view.media_type {
        MediaType::Movie => "Similar Movies",
        MediaType::Tv => "Similar TV Shows",
    });
    if view.similar.is_empty() {
        output.info(match view.media_type {
            MediaType::Movie => "No similar movies found.",
            MediaType::Tv => "No similar TV shows found.",
        });
    } else {
        output.table(&cards_table(&view.similar));
    }

    output.info(format!("Watch: {}", view.watch_url));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use async_trait::async_trait;
    use std::time::Duration;
    use juststream_models::{Credits, GenreList, Language, MovieDetails, SeasonDetails, TvDetails, Video, VideoList};

    /// Canned catalog: top rated listings fail, everything else succeeds
    #[derive(Clone, Default)]
    struct StubCatalog;

    fn listing(ids: &[u64]) -> Page<TitleSummary> {
        Page {
            page: 1,
            results: ids
                .iter()
                .map(|id| TitleSummary {
                    id: *id,
                    title: Some(format!("Title {}", id)),
                    vote_average: Some(7.3),
                    ..Default::default()
                })
                .collect(),
            total_pages: 1,
            total_results: ids.len() as u32,
        }
    }

    fn unavailable(endpoint: &str) -> TmdbError {
        TmdbError::Status {
            status: 503,
            endpoint: endpoint.to_string(),
            body: "Service Unavailable".to_string(),
        }
    }

    #[async_trait]
    impl CatalogSource for StubCatalog {
        fn source_name(&self) -> &str {
            "stub"
        }

        async fn trending(&self, _: Option<MediaType>, _: TimeWindow, _: u32) -> Result<Page<TitleSummary>, TmdbError> {
            Ok(listing(&[1, 2, 3]))
        }

        async fn popular(&self, _: MediaType, _: u32) -> Result<Page<TitleSummary>, TmdbError> {
            Ok(listing(&[10, 11]))
        }

        async fn top_rated(&self, _: MediaType, _: u32) -> Result<Page<TitleSummary>, TmdbError> {
            Err(unavailable("/movie/top_rated"))
        }

        async fn upcoming_movies(&self, _: u32) -> Result<Page<TitleSummary>, TmdbError> {
            Ok(listing(&[]))
        }

        async fn genres(&self, _: MediaType) -> Result<GenreList, TmdbError> {
            Ok(GenreList::default())
        }

        async fn languages(&self) -> Result<Vec<Language>, TmdbError> {
            Ok(Vec::new())
        }

        async fn movie_details(&self, id: u64) -> Result<MovieDetails, TmdbError> {
            Ok(MovieDetails {
                id,
                title: "Fight Club".to_string(),
                release_date: Some("1999-10-15".to_string()),
                runtime: Some(139),
                vote_average: Some(8.4),
                ..Default::default()
            })
        }

        async fn tv_details(&self, _: u64) -> Result<TvDetails, TmdbError> {
            Err(unavailable("/tv"))
        }

        async fn season(&self, _: u64, _: u32) -> Result<SeasonDetails, TmdbError> {
            Ok(SeasonDetails::default())
        }

        async fn credits(&self, _: MediaType, _: u64) -> Result<Credits, TmdbError> {
            Err(unavailable("/credits"))
        }

        async fn videos(&self, _: MediaType, _: u64) -> Result<VideoList, TmdbError> {
            Ok(VideoList {
                results: vec![Video {
                    key: "SUXWAEX2jlg".to_string(),
                    site: "YouTube".to_string(),
                    kind: "Trailer".to_string(),
                    ..Default::default()
                }],
            })
        }

        async fn similar(&self, _: MediaType, _: u64, _: u32) -> Result<Page<TitleSummary>, TmdbError> {
            Ok(listing(&(100..115).collect::<Vec<_>>()))
        }

        async fn search(&self, _: SearchScope, _: &str, _: u32) -> Result<Page<TitleSummary>, TmdbError> {
            Ok(listing(&[]))
        }

        async fn suggestions(&self, _: &str) -> Result<Vec<TitleSummary>, TmdbError> {
            Ok(Vec::new())
        }

        async fn discover(&self, _: MediaType, _: &DiscoverFilters, _: u32) -> Result<Page<TitleSummary>, TmdbError> {
            Ok(listing(&[]))
        }
    }

    #[tokio::test]
    async fn test_home_sections_fail_independently() {
        let images = ImageUrls::default();
        let sections = load_home(&StubCatalog).await;

        let trending = section_cards("Trending", &sections.trending_movies, &images, Some(MediaType::Movie)).unwrap();
        assert_eq!(trending.len(), 3);
        assert_eq!(trending[0].rating, "7.3");

        let top_rated = section_cards("Top Rated", &sections.top_rated_movies, &images, Some(MediaType::Movie));
        assert_eq!(top_rated.unwrap_err(), LOAD_ERROR_MESSAGE);

        let popular_tv = section_cards("Popular TV", &sections.popular_tv, &images, Some(MediaType::Tv)).unwrap();
        assert!(popular_tv.iter().all(|card| card.media_type == MediaType::Tv));
    }

    #[tokio::test]
    async fn test_details_tolerate_missing_extras() {
        let images = ImageUrls::default();
        let view = load_details(&StubCatalog, &images, MediaType::Movie, 550).await.unwrap();

        assert_eq!(view.title, "Fight Club");
        assert_eq!(view.year, "1999");
        assert_eq!(view.rating, "8.4/10");
        assert_eq!(view.runtime, "2h 19m");
        assert_eq!(view.overview, "No overview available.");
        assert!(view.cast.is_empty());
        assert_eq!(view.trailer_url.as_deref(), Some("https://www.youtube.com/embed/SUXWAEX2jlg"));
        assert_eq!(view.similar.len(), SIMILAR_LIMIT);
        assert_eq!(view.watch_url, "watch.html?type=movie&id=550");
    }

    #[tokio::test]
    async fn test_details_fail_without_main_record() {
        let images = ImageUrls::default();
        assert!(load_details(&StubCatalog, &images, MediaType::Tv, 1399).await.is_err());
    }

    #[tokio::test]
    async fn test_reap_keeps_only_pending_tasks() {
        let mut tasks = JoinSet::new();
        for _ in 0..3 {
            tasks.spawn(async {});
        }
        tasks.spawn(std::future::pending::<()>());

        tokio::time::sleep(Duration::from_millis(20)).await;
        reap_finished(&mut tasks);
        assert_eq!(tasks.len(), 1);

        tasks.abort_all();
    }

    #[tokio::test]
    async fn test_suggestions_drain_before_returning() {
        let input: &[u8] = b"d\ndu\ndun\ndune\n";
        let output = Output::new(OutputFormat::Human, true);

        let result = suggest_from_lines(
            input,
            Debouncer::new(Duration::from_millis(10)),
            StubCatalog,
            ImageUrls::default(),
            output,
        )
        .await;
        assert!(result.is_ok());
    }
}
