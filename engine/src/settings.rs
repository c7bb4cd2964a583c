use serde::{Deserialize, Serialize};

pub const DEFAULT_GRID_SIZE: usize = 4;
pub const DEFAULT_TARGET_VALUE: u32 = 2048;
pub const DEFAULT_FOUR_TILE_PROBABILITY: f64 = 0.1;

/// Session settings for one game. Loaded from a YAML file when the
/// frontend provides one, otherwise defaults apply.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub grid_size: usize,
    pub target_value: u32,
    pub four_tile_probability: f64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            target_value: DEFAULT_TARGET_VALUE,
            four_tile_probability: DEFAULT_FOUR_TILE_PROBABILITY,
        }
    }
}

impl GameSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_size < 2 || self.grid_size > 10 {
            return Err(format!(
                "Grid size must be between 2 and 10, got {}",
                self.grid_size
            ));
        }
        if self.target_value < 8 {
            return Err(format!(
                "Target value must be at least 8, got {}",
                self.target_value
            ));
        }
        if !self.target_value.is_power_of_two() {
            return Err(format!(
                "Target value must be a power of 2, got {}",
                self.target_value
            ));
        }
        if !(0.0..=1.0).contains(&self.four_tile_probability) {
            return Err(format!(
                "Four-tile probability must be within [0, 1], got {}",
                self.four_tile_probability
            ));
        }
        Ok(())
    }

    pub fn from_yaml_file(path: &str) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read settings file {}: {}", path, e))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, String> {
        let settings: GameSettings = serde_yaml_ng::from_str(content)
            .map_err(|e| format!("Failed to deserialize settings: {}", e))?;
        settings
            .validate()
            .map_err(|e| format!("Settings validation error: {}", e))?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(GameSettings::default().validate().is_ok());
    }

    fn with_grid_size(grid_size: usize) -> GameSettings {
        GameSettings {
            grid_size,
            ..GameSettings::default()
        }
    }

    #[test]
    fn test_grid_size_out_of_bounds_rejected() {
        assert!(with_grid_size(1).validate().is_err());
        assert!(with_grid_size(11).validate().is_err());
        assert!(with_grid_size(2).validate().is_ok());
        assert!(with_grid_size(10).validate().is_ok());
    }

    #[test]
    fn test_target_must_be_power_of_two() {
        let mut settings = GameSettings::default();
        for target_value in [100, 4, 6] {
            settings.target_value = target_value;
            assert!(settings.validate().is_err());
        }
        settings.target_value = 64;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_probability_range_enforced() {
        for four_tile_probability in [1.5, -0.1] {
            let settings = GameSettings {
                four_tile_probability,
                ..GameSettings::default()
            };
            assert!(settings.validate().is_err());
        }
    }

    #[test]
    fn test_from_yaml_partial_overrides() {
        let settings = GameSettings::from_yaml("grid_size: 5\n").unwrap();
        assert_eq!(settings.grid_size, 5);
        assert_eq!(settings.target_value, DEFAULT_TARGET_VALUE);
    }

    #[test]
    fn test_from_yaml_invalid_rejected() {
        assert!(GameSettings::from_yaml("target_value: 1000\n").is_err());
    }
}
