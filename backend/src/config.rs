use std::path::PathBuf;
use rocket::figment::{providers::Env, Figment};
use serde::Deserialize;
use shared::validation::ValidationPolicy;

/// What `GET /votes/<id>` answers for an id that has no record.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MissingVote {
    /// 200 with `{}`.
    #[default]
    Empty,
    /// 404 with an error body.
    NotFound,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub static_dir: PathBuf,
    pub missing_vote: MissingVote,
    pub strict_updates: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("votes.json"),
            static_dir: PathBuf::from("frontend/dist"),
            missing_vote: MissingVote::Empty,
            strict_updates: false,
        }
    }
}

impl AppConfig {
    pub fn from_figment(figment: &Figment) -> Result<Self, rocket::figment::Error> {
        figment.extract()
    }

    pub fn policy(&self) -> ValidationPolicy {
        if self.strict_updates {
            ValidationPolicy::strict()
        } else {
            ValidationPolicy::lenient()
        }
    }
}

/// Rocket's own sources (`Rocket.toml`, `ROCKET_*`), plus a bare `PORT`.
pub fn figment() -> Figment {
    rocket::Config::figment().merge(Env::raw().only(&["PORT"]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_settings() {
        let config = AppConfig::from_figment(&Figment::new()).unwrap();
        assert_eq!(config.data_file, PathBuf::from("votes.json"));
        assert_eq!(config.missing_vote, MissingVote::Empty);
        assert!(!config.strict_updates);
    }

    #[test]
    fn settings_override_defaults() {
        let figment = Figment::new()
            .merge(("data_file", "/var/lib/votes/state.json"))
            .merge(("missing_vote", "not_found"))
            .merge(("strict_updates", true));

        let config = AppConfig::from_figment(&figment).unwrap();
        assert_eq!(config.data_file, PathBuf::from("/var/lib/votes/state.json"));
        assert_eq!(config.static_dir, PathBuf::from("frontend/dist"));
        assert_eq!(config.missing_vote, MissingVote::NotFound);
        assert!(config.strict_updates);
    }

    #[test]
    fn unknown_missing_vote_mode_is_rejected() {
        let figment = Figment::new().merge(("missing_vote", "teapot"));
        assert!(AppConfig::from_figment(&figment).is_err());
    }
}
