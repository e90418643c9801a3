//! Mentor directory seed for runs without a database.

use serde::Deserialize;
use std::path::PathBuf;
use uuid::Uuid;

use super::error::ConfigError;
use crate::domain::foundation::MentorId;
use crate::ports::Mentor;

/// Source of the in-memory mentor directory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MentorsConfig {
    /// JSON array of `{ "id", "name", "avatar" }` objects.
    pub seed_file: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct SeedMentor {
    id: Uuid,
    name: String,
    #[serde(default)]
    avatar: Option<String>,
}

impl MentorsConfig {
    /// Reads the seed file; no file configured means no mentors.
    pub fn load_seed(&self) -> Result<Vec<Mentor>, ConfigError> {
        let Some(path) = &self.seed_file else {
            return Ok(Vec::new());
        };
        let seed_error = |reason: String| ConfigError::MentorSeed {
            path: path.display().to_string(),
            reason,
        };
        let raw = std::fs::read_to_string(path).map_err(|e| seed_error(e.to_string()))?;
        parse_seed(&raw).map_err(seed_error)
    }
}

fn parse_seed(raw: &str) -> Result<Vec<Mentor>, String> {
    let entries: Vec<SeedMentor> = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    entries
        .into_iter()
        .map(|entry| {
            let name = entry.name.trim();
            if name.is_empty() {
                return Err(format!("mentor {} has a blank name", entry.id));
            }
            Ok(Mentor {
                id: MentorId::from_uuid(entry.id),
                name: name.to_string(),
                avatar: entry.avatar.filter(|a| !a.trim().is_empty()),
            })
        })
        .collect()
}
