use anyhow::{anyhow, Result};
use std::{path::PathBuf, time::Duration};
use tokio::io::AsyncReadExt;

const CONFIG_PATH_REL_HOME: &str = ".config/bukibot/config.toml";

/// Bot configuration
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Config {
    pub general: General,
    #[serde(default)]
    pub roll: Roll,
}

#[derive(serde::Serialize, serde::Deserialize)]
pub struct General {
    pub discord_token: String,
    pub bot_owners: Vec<String>,
    pub command_prefix: String,
}

#[derive(serde::Serialize, serde::Deserialize)]
pub struct Roll {
    /// How long the reroll reaction stays valid after a roll is posted.
    #[serde(default = "default_reroll_window_ms")]
    pub reroll_window_ms: u64,
    /// Upper bound on voice channel occupants a roll will serve.
    #[serde(default = "default_max_players")]
    pub max_players: usize,
}

fn default_reroll_window_ms() -> u64 {
    20_000
}

fn default_max_players() -> usize {
    10
}

impl Default for Roll {
    fn default() -> Self {
        Self {
            reroll_window_ms: default_reroll_window_ms(),
            max_players: default_max_players(),
        }
    }
}

impl Roll {
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.reroll_window_ms)
    }
}

impl Config {
    fn config_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|p| p.join(CONFIG_PATH_REL_HOME))
            .ok_or(anyhow!("Could not find home directory"))
    }

    pub async fn load() -> Result<Self> {
        let path = Self::config_path()?;

        let mut file = tokio::fs::File::open(&path).await.map_err(|e| {
            anyhow!(
                "Could not open configuration at `{}`: {}",
                path.to_string_lossy(),
                e
            )
        })?;

        let mut contents = String::new();
        file.read_to_string(&mut contents).await.map_err(|e| {
            anyhow!(
                "Could not read configuration at `{}`: {}",
                path.to_string_lossy(),
                e
            )
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow!(
                "Could not parse configuration at `{}`: {}",
                path.to_string_lossy(),
                e
            )
        })?;

        config.validate()?;

        Ok(config)
    }

    pub async fn reload(&mut self) -> Result<()> {
        let new = Self::load().await?;
        *self = new;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.general.discord_token.is_empty() {
            return Err(anyhow!("`general.discord_token` must be set"));
        }
        if self.roll.reroll_window_ms > 300_000 {
            return Err(anyhow!(
                "`roll.reroll_window_ms` must be at most 300000 (5 minutes), got {}",
                self.roll.reroll_window_ms
            ));
        }
        if self.roll.max_players == 0 || self.roll.max_players > 20 {
            return Err(anyhow!(
                "`roll.max_players` must be between 1 and 20, got {}",
                self.roll.max_players
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_roll(roll: Roll) -> Config {
        Config {
            general: General {
                discord_token: "token".to_string(),
                bot_owners: Vec::new(),
                command_prefix: ";".to_string(),
            },
            roll,
        }
    }

    #[test]
    fn roll_section_defaults_match_the_documented_window() {
        let config: Config = toml::from_str(
            "[general]\n\
             discord_token = \"token\"\n\
             bot_owners = []\n\
             command_prefix = \";\"\n",
        )
        .unwrap();

        assert_eq!(config.roll.reroll_window_ms, 20_000);
        assert_eq!(config.roll.window(), Duration::from_secs(20));
        assert_eq!(config.roll.max_players, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let too_long = config_with_roll(Roll {
            reroll_window_ms: 300_001,
            max_players: 10,
        });
        assert!(too_long.validate().is_err());

        let zero_players = config_with_roll(Roll {
            reroll_window_ms: 20_000,
            max_players: 0,
        });
        assert!(zero_players.validate().is_err());

        let too_many_players = config_with_roll(Roll {
            reroll_window_ms: 20_000,
            max_players: 21,
        });
        assert!(too_many_players.validate().is_err());
    }
}
