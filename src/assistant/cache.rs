//! File-based cache for assistant suggestions.
//!
//! Generating a suggestion costs a model round trip, so both alt-text and
//! link-text results are cached in ~/.cache/accesscheck/suggestions/ with a
//! TTL. The in-memory layer serves repeats within a run; the file layer
//! survives across runs.

use directories::ProjectDirs;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// In-memory + file-based cache for suggestion text.
pub struct SuggestionCache {
    memory: RwLock<HashMap<String, CacheEntry>>,
    cache_dir: Option<PathBuf>,
    ttl_hours: u32,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    text: String,
    timestamp: u64,
}

impl SuggestionCache {
    /// Create a cache with the given TTL.
    pub fn new(ttl_hours: u32) -> Self {
        let cache_dir =
            ProjectDirs::from("", "", "accesscheck").map(|dirs| dirs.cache_dir().join("suggestions"));

        if let Some(ref dir) = cache_dir {
            let _ = fs::create_dir_all(dir);
        }

        Self {
            memory: RwLock::new(HashMap::new()),
            cache_dir,
            ttl_hours,
        }
    }

    /// Get a cached suggestion if present and not expired.
    pub fn get(&self, key: &str) -> Option<String> {
        let now = current_timestamp();
        let ttl_secs = (self.ttl_hours as u64) * 3600;

        {
            let cache = self.memory.read().ok()?;
            if let Some(entry) = cache.get(key) {
                if now - entry.timestamp < ttl_secs {
                    return Some(entry.text.clone());
                }
            }
        }

        if let Some(entry) = self.read_file_cache(key) {
            if now - entry.timestamp < ttl_secs {
                if let Ok(mut cache) = self.memory.write() {
                    cache.insert(key.to_string(), entry.clone());
                }
                return Some(entry.text);
            }
        }

        None
    }

    /// Store a suggestion.
    pub fn set(&self, key: &str, text: &str) {
        let entry = CacheEntry {
            text: text.to_string(),
            timestamp: current_timestamp(),
        };

        if let Ok(mut cache) = self.memory.write() {
            cache.insert(key.to_string(), entry.clone());
        }

        self.write_file_cache(key, &entry);
    }

    fn read_file_cache(&self, key: &str) -> Option<CacheEntry> {
        let path = self.cache_file_path(key)?;
        let content = fs::read_to_string(path).ok()?;
        parse_cache_entry(&content)
    }

    fn write_file_cache(&self, key: &str, entry: &CacheEntry) {
        if let Some(path) = self.cache_file_path(key) {
            let _ = fs::write(path, format_cache_entry(entry));
        }
    }

    fn cache_file_path(&self, key: &str) -> Option<PathBuf> {
        self.cache_dir.as_ref().map(|dir| {
            let filename: String = key
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '.' { c } else { '_' })
                .take(120)
                .collect();
            dir.join(format!("{}.cache", filename))
        })
    }
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_secs()
}

/// First line is the timestamp; the rest is the suggestion text verbatim.
fn format_cache_entry(entry: &CacheEntry) -> String {
    format!("{}\n{}", entry.timestamp, entry.text)
}

fn parse_cache_entry(content: &str) -> Option<CacheEntry> {
    let (timestamp_line, text) = content.split_once('\n')?;
    let timestamp = timestamp_line.trim().parse().ok()?;
    Some(CacheEntry {
        text: text.to_string(),
        timestamp,
    })
}
