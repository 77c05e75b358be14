use super::{history_manager, load_config, prompts};
use crate::output::{new_table, Output};
use crate::HistoryCommands;
use chrono::{Local, TimeZone};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Cell;
use juststream_config::PathManager;
use juststream_core::{links, ImageUrls, KeyValueStore, WatchHistoryManager};
use juststream_models::{EpisodeRef, WatchHistoryEntry};
use std::io::IsTerminal;

pub fn run_history(cmd: HistoryCommands, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let mut history = history_manager(&paths);

    match cmd {
        HistoryCommands::List { limit, all } => {
            let limit = if all { None } else { Some(limit) };
            list_history(&history, limit, output);
            Ok(())
        }
        HistoryCommands::Record {
            id,
            media_type,
            title,
            poster_path,
            year,
            rating,
            progress,
            season,
            episode,
        } => {
            let config = load_config(&paths)?;
            let images = ImageUrls::from_config(&config.tmdb);

            let mut entry = WatchHistoryEntry::new(id, media_type, title, images.poster(poster_path.as_deref()));
            if let Some(year) = year {
                entry = entry.with_year(year);
            }
            if let Some(rating) = rating {
                entry = entry.with_rating(rating);
            }
            if let Some(progress) = progress {
                entry = entry.with_progress(progress);
            }
            if let (Some(season), Some(episode)) = (season, episode) {
                entry = entry.with_episode(EpisodeRef::new(season, episode));
            }

            let label = entry_label(&entry);
            history
                .try_record(entry)
                .map_err(|e| eyre!("Failed to record {}: {}", label, e))?;
            output.success(format!("Added {} to watch history", label));
            Ok(())
        }
        HistoryCommands::Clear { yes } => {
            let interactive = std::io::stdin().is_terminal() && !output.is_json();
            if !yes
                && interactive
                && !history.is_empty()
                && !prompts::prompt_yes_no("Clear your entire watch history?", Some(false))?
            {
                output.info("Watch history left unchanged");
                return Ok(());
            }

            if clear_history(&mut history)? {
                output.success("Watch history cleared");
            } else {
                output.info("Watch history is already empty");
            }
            Ok(())
        }
    }
}

/// Remove the stored history, including a value that no longer parses.
/// Returns whether there were readable entries to clear.
fn clear_history<S: KeyValueStore>(history: &mut WatchHistoryManager<S>) -> Result<bool> {
    let had_entries = !history.is_empty();
    history.try_clear().map_err(|e| eyre!("Failed to clear watch history: {}", e))?;
    Ok(had_entries)
}

/// Render the most recent entries. An empty history is a message, not an error.
pub fn list_history<S: KeyValueStore>(history: &WatchHistoryManager<S>, limit: Option<usize>, output: &Output) {
    let entries = history.list(limit);

    if output.is_json() {
        output.data(&entries);
        return;
    }

    if entries.is_empty() {
        output.info("No watch history yet. Titles you watch will show up here.");
        return;
    }

    output.heading("Continue Watching");
    output.table(&history_table(&entries));
}

fn history_table(entries: &[WatchHistoryEntry]) -> comfy_table::Table {
    let mut table = new_table(&["#", "Title", "Type", "Year", "Rating", "Progress", "Watched", "Resume"]);
    for (index, entry) in entries.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&entry.title),
            Cell::new(entry.media_type),
            Cell::new(&entry.year),
            Cell::new(&entry.rating),
            Cell::new(&entry.progress),
            Cell::new(watched_at(entry.timestamp)),
            Cell::new(links::watch_page_url(entry.media_type, entry.id, entry.episode())),
        ]);
    }
    table
}

fn watched_at(timestamp_millis: i64) -> String {
    Local
        .timestamp_millis_opt(timestamp_millis)
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn entry_label(entry: &WatchHistoryEntry) -> String {
    match entry.episode() {
        Some(episode) if !entry.title.ends_with(&episode.to_string()) => format!("\"{}\" {}", entry.title, episode),
        _ => format!("\"{}\"", entry.title),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use juststream_core::{MemoryStore, WATCH_HISTORY_KEY};
    use juststream_models::MediaType;

    #[test]
    fn test_history_table_rows() {
        let mut history = WatchHistoryManager::new(MemoryStore::new());
        history.record(WatchHistoryEntry::new(550, MediaType::Movie, "Fight Club", "").with_year("1999"));
        history.record(
            WatchHistoryEntry::new(1399, MediaType::Tv, "Game of Thrones S1E2", "").with_episode(EpisodeRef::new(1, 2)),
        );

        let rendered = history_table(&history.list(None)).to_string();
        assert!(rendered.contains("Fight Club"));
        assert!(rendered.contains("watch.html?type=tv&id=1399&season=1&episode=2"));
    }

    #[test]
    fn test_entry_label() {
        let movie = WatchHistoryEntry::new(1, MediaType::Movie, "Heat", "");
        assert_eq!(entry_label(&movie), "\"Heat\"");

        let show = WatchHistoryEntry::new(2, MediaType::Tv, "Dark", "").with_episode(EpisodeRef::new(2, 3));
        assert_eq!(entry_label(&show), "\"Dark\" S2E3");

        let titled = WatchHistoryEntry::new(2, MediaType::Tv, "Dark S2E3", "").with_episode(EpisodeRef::new(2, 3));
        assert_eq!(entry_label(&titled), "\"Dark S2E3\"");
    }

    #[test]
    fn test_watched_at_out_of_range() {
        assert_eq!(watched_at(i64::MAX), "-");
    }

    #[test]
    fn test_clear_removes_unreadable_history() {
        let mut history = WatchHistoryManager::new(MemoryStore::new().with_entry(WATCH_HISTORY_KEY, "{not json"));
        assert!(history.is_empty());

        assert!(!clear_history(&mut history).unwrap());
        assert_eq!(history.store().get(WATCH_HISTORY_KEY).unwrap(), None);
    }

    #[test]
    fn test_clear_reports_removed_entries() {
        let mut history = WatchHistoryManager::new(MemoryStore::new());
        history.record(WatchHistoryEntry::new(550, MediaType::Movie, "Fight Club", ""));

        assert!(clear_history(&mut history).unwrap());
        assert!(history.is_empty());
        assert!(!clear_history(&mut history).unwrap());
    }
}
