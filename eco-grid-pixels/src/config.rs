use sim_grid::{EngineError, GridSize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleChoice {
    Biome,
    Life,
}

/// Startup settings. Defaults match the classic 1000x1000 window of
/// 10-pixel cells; the command line may override the rule set and seed.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub cell_size: u32,
    pub seed: u64,
    pub blob_centers: usize,
    pub influence_radius: f32,
    pub tick_millis: u64,
    pub rules: RuleChoice,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            window_width: 1000,
            window_height: 1000,
            cell_size: 10,
            seed: 42,
            blob_centers: 40,
            influence_radius: 8.0,
            tick_millis: 400,
            rules: RuleChoice::Biome,
        }
    }
}

impl SimConfig {
    /// `eco-grid-pixels [biome|life] [seed]`
    pub fn from_args<I>(mut args: I) -> Result<Self, EngineError>
    where
        I: Iterator<Item = String>,
    {
        let mut config = Self::default();
        if let Some(name) = args.next() {
            config.rules = match name.as_str() {
                "biome" => RuleChoice::Biome,
                "life" => RuleChoice::Life,
                other => {
                    return Err(EngineError::invalid_configuration(format!(
                        "unknown rule set {other:?}, expected \"biome\" or \"life\""
                    )));
                }
            };
        }
        if let Some(seed) = args.next() {
            config.seed = seed.parse().map_err(|_| {
                EngineError::invalid_configuration(format!(
                    "seed {seed:?} is not an unsigned integer"
                ))
            })?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(EngineError::invalid_configuration(format!(
                "window dimensions must be positive, got {}x{}",
                self.window_width, self.window_height
            )));
        }
        if self.cell_size == 0 {
            return Err(EngineError::invalid_configuration(
                "cell size must be positive",
            ));
        }
        if self.window_width % self.cell_size != 0 || self.window_height % self.cell_size != 0 {
            return Err(EngineError::invalid_configuration(format!(
                "window {}x{} is not divisible by cell size {}",
                self.window_width, self.window_height, self.cell_size
            )));
        }
        Ok(())
    }

    pub fn grid_size(&self) -> GridSize {
        GridSize::new(
            self.window_width / self.cell_size,
            self.window_height / self.cell_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate_and_divide_into_cells() {
        let config = SimConfig::default();
        config.validate().unwrap();
        assert_eq!(config.grid_size(), GridSize::new(100, 100));
    }

    #[test]
    fn indivisible_window_is_rejected() {
        let config = SimConfig {
            window_width: 1005,
            ..SimConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfiguration { .. }));
    }

    #[test]
    fn zero_cell_size_is_rejected() {
        let config = SimConfig {
            cell_size: 0,
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn args_select_rule_set_and_seed() {
        let config =
            SimConfig::from_args(["life".to_string(), "7".to_string()].into_iter()).unwrap();
        assert_eq!(config.rules, RuleChoice::Life);
        assert_eq!(config.seed, 7);

        let default = SimConfig::from_args(std::iter::empty()).unwrap();
        assert_eq!(default, SimConfig::default());
    }

    #[test]
    fn bad_args_are_configuration_errors() {
        assert!(SimConfig::from_args(["swamp".to_string()].into_iter()).is_err());
        assert!(
            SimConfig::from_args(["life".to_string(), "soon".to_string()].into_iter()).is_err()
        );
    }
}
