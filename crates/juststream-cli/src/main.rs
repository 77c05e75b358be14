use clap::{ArgAction, Parser, Subcommand};
use juststream_models::{EmbedSource, MediaType};
use juststream_tmdb::{SearchScope, TimeWindow};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

use commands::{catalog, config, history, serve, watch};

#[derive(Parser)]
#[command(name = "juststream")]
#[command(about = "JustStream - Browse movies and TV, play them, and remember what you watched")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the browser front end
    #[command(long_about = "Serve the JustStream web pages from a directory. Unknown .html pages fall back to index.html so client-side routing keeps working. The port comes from --port, then the PORT environment variable, then the config file (default 3000).")]
    Serve {
        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,

        /// Directory containing index.html
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,

        /// Write logs to a daily-rotated file instead of stderr
        #[arg(long, value_name = "PATH")]
        log_file: Option<PathBuf>,
    },
    /// Show, record or clear recently watched titles
    History {
        #[command(subcommand)]
        cmd: HistoryCommands,
    },
    /// Browse the movie and TV catalog
    Catalog {
        #[command(subcommand)]
        cmd: CatalogCommands,
    },
    /// Get a player link for a title and remember it in the watch history
    #[command(long_about = "Look up a movie or TV episode, print its player URL and record it in the watch history. TV shows default to season 1, episode 1.")]
    Watch {
        /// Media type: movie or tv
        #[arg(long = "type", value_name = "TYPE")]
        media_type: MediaType,

        /// Catalog id of the title
        #[arg(long)]
        id: u64,

        /// Season number (TV only)
        #[arg(long)]
        season: Option<u32>,

        /// Episode number (TV only)
        #[arg(long)]
        episode: Option<u32>,

        /// Player to use: vip, multiembed or vidsrc
        #[arg(long)]
        source: Option<EmbedSource>,
    },
    /// Manage configuration
    #[command(long_about = "Manage the JustStream configuration file. Running without a subcommand shows the current configuration.")]
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
pub enum HistoryCommands {
    /// List recently watched titles, most recent first
    List {
        /// Maximum number of entries to show
        #[arg(long, default_value_t = juststream_core::DISPLAY_LIMIT, conflicts_with = "all")]
        limit: usize,

        /// Show every remembered entry
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,
    },
    /// Record a viewing without looking it up
    Record {
        #[arg(long)]
        id: u64,

        #[arg(long = "type", value_name = "TYPE")]
        media_type: MediaType,

        #[arg(long)]
        title: String,

        /// Catalog image path such as /abc.jpg
        #[arg(long)]
        poster_path: Option<String>,

        #[arg(long)]
        year: Option<String>,

        #[arg(long)]
        rating: Option<String>,

        #[arg(long)]
        progress: Option<String>,

        #[arg(long, requires = "episode")]
        season: Option<u32>,

        #[arg(long, requires = "season")]
        episode: Option<u32>,
    },
    /// Forget every remembered title
    Clear {
        /// Do not ask for confirmation
        #[arg(short, long, action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// Home page rows: trending movies, top rated movies and popular TV
    Home,
    /// Trending titles
    Trending {
        /// movie or tv; both when omitted
        #[arg(long = "type", value_name = "TYPE")]
        media_type: Option<MediaType>,

        #[arg(long, default_value = "day")]
        window: TimeWindow,

        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Popular titles
    Popular {
        #[arg(long = "type", value_name = "TYPE", default_value = "movie")]
        media_type: MediaType,

        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Top rated titles
    TopRated {
        #[arg(long = "type", value_name = "TYPE", default_value = "movie")]
        media_type: MediaType,

        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Upcoming movies
    Upcoming {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Search movies and TV shows
    Search {
        query: String,

        /// all, movie or tv
        #[arg(long = "type", value_name = "TYPE", default_value = "all")]
        scope: SearchScope,

        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Search-as-you-type suggestions
    #[command(long_about = "Print up to 8 suggestions for a query. With --interactive, read queries line by line from stdin and only look up a query once no newer line arrives for 300ms.")]
    Suggest {
        #[arg(required_unless_present = "interactive")]
        query: Option<String>,

        #[arg(long, action = ArgAction::SetTrue)]
        interactive: bool,
    },
    /// Details, cast, trailer and similar titles
    Details {
        #[arg(long = "type", value_name = "TYPE")]
        media_type: MediaType,

        #[arg(long)]
        id: u64,
    },
    /// Genre list
    Genres {
        #[arg(long = "type", value_name = "TYPE", default_value = "movie")]
        media_type: MediaType,
    },
    /// Original languages known to the catalog
    Languages,
    /// Filtered listing
    Discover {
        #[arg(long = "type", value_name = "TYPE", default_value = "movie")]
        media_type: MediaType,

        /// Genre id (see `catalog genres`)
        #[arg(long)]
        genre: Option<u64>,

        #[arg(long)]
        year: Option<u32>,

        /// Earliest release year
        #[arg(long)]
        from: Option<u32>,

        /// Latest release year
        #[arg(long)]
        to: Option<u32>,

        /// Original language (ISO 639-1, e.g. en)
        #[arg(long)]
        language: Option<String>,

        #[arg(long)]
        min_rating: Option<f64>,

        #[arg(long)]
        max_rating: Option<f64>,

        /// Sort order, e.g. popularity.desc or vote_average.desc
        #[arg(long)]
        sort: Option<String>,

        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Episodes of a TV season
    Season {
        #[arg(long)]
        id: u64,

        #[arg(long)]
        season: u32,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Interactive setup
    Init,
    /// Store the TMDB API key
    SetApiKey {
        /// API key (prompted for when omitted)
        key: Option<String>,
    },
    /// Print the config, storage and log locations
    Path,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_file = match &cli.command {
        Commands::Serve { log_file, .. } => log_file.clone(),
        _ => None,
    };
    let settings = commands::logging_settings();
    let log_file = log_file.or_else(|| settings.file.clone());
    logging::init_logging_with_file(cli.verbose, cli.quiet, &settings, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Serve { port, root, .. } => serve::run_serve(port, root, &output).await,
        Commands::History { cmd } => history::run_history(cmd, &output),
        Commands::Catalog { cmd } => catalog::run_catalog(cmd, &output).await,
        Commands::Watch {
            media_type,
            id,
            season,
            episode,
            source,
        } => watch::run_watch(media_type, id, season, episode, source, &output).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &output)
        }
    }
}
