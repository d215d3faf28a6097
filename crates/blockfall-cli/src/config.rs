use std::{fs, path::Path};

use anyhow::Context;
use blockfall_engine::PieceSeed;
use log::warn;
use serde::{Deserialize, Serialize};

pub const DEFAULT_FPS: u32 = 60;

/// Settings for a play session.
///
/// Read from a JSON file; missing keys take their default values.
///
/// ```json
/// { "fps": 30, "seed": "000102030405060708090a0b0c0d0e0f", "ghost": true }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayConfig {
    /// Tick and frame rate of the terminal loop.
    pub fps: u32,
    /// Seed of the piece sequence. A random seed is used when unset.
    pub seed: Option<PieceSeed>,
    /// Show where the falling piece would land.
    pub ghost: bool,
    /// Start with music on.
    pub music: bool,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            seed: None,
            ghost: false,
            music: false,
        }
    }
}

/// Command line values that take precedence over the configuration file.
#[derive(Default, Debug, Clone, clap::Args)]
pub struct ConfigOverrides {
    /// Tick and frame rate (frames per second)
    #[clap(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: Option<u32>,
    /// Seed for the piece sequence (32 hex digits)
    #[clap(long)]
    pub seed: Option<PieceSeed>,
    /// Show the ghost piece (`--ghost=false` hides it)
    #[clap(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub ghost: Option<bool>,
    /// Start with music on (`--music=false` starts with it off)
    #[clap(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub music: Option<bool>,
}

impl PlayConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn parse(content: &str) -> anyhow::Result<Self> {
        // `#[serde(default)]` would also accept a JSON array.
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(content)?;
        let config: Self = serde_json::from_value(serde_json::Value::Object(object))?;
        Ok(config.sanitized())
    }

    fn sanitized(self) -> Self {
        if self.fps == 0 {
            warn!("config: fps must be positive, using {DEFAULT_FPS}");
            return Self {
                fps: DEFAULT_FPS,
                ..self
            };
        }
        self
    }

    #[must_use]
    pub fn with_overrides(self, overrides: &ConfigOverrides) -> Self {
        Self {
            fps: overrides.fps.unwrap_or(self.fps),
            seed: overrides.seed.or(self.seed),
            ghost: overrides.ghost.unwrap_or(self.ghost),
            music: overrides.music.unwrap_or(self.music),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::iter;

    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct OverridesCli {
        #[clap(flatten)]
        overrides: ConfigOverrides,
    }

    fn parse_overrides(args: &[&str]) -> ConfigOverrides {
        OverridesCli::try_parse_from(iter::once("blockfall").chain(args.iter().copied()))
            .unwrap()
            .overrides
    }

    const SEED_HEX: &str = "000102030405060708090a0b0c0d0e0f";

    fn seed() -> PieceSeed {
        SEED_HEX.parse().unwrap()
    }

    #[test]
    fn test_parse_full_config() {
        let config = PlayConfig::parse(&format!(
            r#"{{ "fps": 30, "seed": "{SEED_HEX}", "ghost": true, "music": true }}"#
        ))
        .unwrap();
        assert_eq!(
            config,
            PlayConfig {
                fps: 30,
                seed: Some(seed()),
                ghost: true,
                music: true,
            }
        );
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        assert_eq!(PlayConfig::parse("{}").unwrap(), PlayConfig::default());
        let config = PlayConfig::parse(r#"{ "ghost": true }"#).unwrap();
        assert_eq!(config.fps, DEFAULT_FPS);
        assert!(config.ghost);
    }

    #[test]
    fn test_invalid_config() {
        assert!(PlayConfig::parse(r#"{ "speed": 3 }"#).is_err());
        assert!(PlayConfig::parse(r#"{ "seed": "123" }"#).is_err());
        assert!(PlayConfig::parse("[]").is_err());
        assert!(PlayConfig::parse("[30, null, true, false]").is_err());
        assert!(PlayConfig::parse("30").is_err());
    }

    #[test]
    fn test_zero_fps_falls_back_to_default() {
        let config = PlayConfig::parse(r#"{ "fps": 0 }"#).unwrap();
        assert_eq!(config.fps, DEFAULT_FPS);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let file = PlayConfig {
            fps: 30,
            seed: None,
            ghost: true,
            music: false,
        };

        let merged = file.clone().with_overrides(&ConfigOverrides::default());
        assert_eq!(merged, file);

        let merged = file.with_overrides(&ConfigOverrides {
            fps: Some(120),
            seed: Some(seed()),
            ghost: None,
            music: Some(true),
        });
        assert_eq!(merged.fps, 120);
        assert_eq!(merged.seed, Some(seed()));
        assert!(merged.ghost);
        assert!(merged.music);
    }

    #[test]
    fn test_flag_values() {
        let overrides = parse_overrides(&[]);
        assert_eq!((overrides.ghost, overrides.music), (None, None));

        let overrides = parse_overrides(&["--ghost", "--music=false"]);
        assert_eq!((overrides.ghost, overrides.music), (Some(true), Some(false)));

        let overrides = parse_overrides(&["--ghost=false", "--fps", "30"]);
        assert_eq!(overrides.ghost, Some(false));
        assert_eq!(overrides.fps, Some(30));
    }

    #[test]
    fn test_overrides_can_switch_off() {
        let file = PlayConfig {
            ghost: true,
            music: true,
            ..PlayConfig::default()
        };
        let merged = file.with_overrides(&ConfigOverrides {
            ghost: Some(false),
            music: Some(false),
            ..ConfigOverrides::default()
        });
        assert!(!merged.ghost);
        assert!(!merged.music);
    }

    #[test]
    fn test_load_reports_path() {
        let err = PlayConfig::load(Path::new("/nonexistent/blockfall.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/blockfall.json"));
    }

    #[test]
    fn test_serialize_round_trip() {
        let config = PlayConfig {
            seed: Some(seed()),
            ..PlayConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(SEED_HEX));
        assert_eq!(PlayConfig::parse(&json).unwrap(), config);
    }
}
