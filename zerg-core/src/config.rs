use thiserror::Error;

/// Tunables for a swarm. Supplied once at initialization, never mutated while running.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct SwarmConfig {
    /// Distance an agent covers per tick.
    pub speed: f64,
    /// Scan radii stay strictly below this.
    pub vision: f64,
    /// Starting life of every target, in ticks of destruction.
    pub life: u32,
    /// Elements whose area reaches this are never targeted.
    pub max_target_area: f64,
    pub tick_period_ms: u32,
    /// Side length of an agent sprite at rest.
    pub agent_size: f64,
    /// Side length of an agent sprite at the peak of a pulse.
    pub pulse_size: f64,
    pub fade_out_ms: u32,
    /// Agents spawn inside `[0, spawn_extent)` on each axis.
    pub spawn_extent: f64,
    pub scan_start_radius: f64,
    pub scan_radius_step: f64,
    pub scan_degree_step: u32,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            speed: 3.0,
            vision: 1000.0,
            life: 50,
            max_target_area: 50_000.0,
            tick_period_ms: 30,
            agent_size: 10.0,
            pulse_size: 14.0,
            fade_out_ms: 100,
            spawn_extent: 100.0,
            scan_start_radius: 10.0,
            scan_radius_step: 50.0,
            scan_degree_step: 45,
        }
    }
}

impl SwarmConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.speed > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "speed",
                value: self.speed,
            });
        }
        if !(self.vision > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "vision",
                value: self.vision,
            });
        }
        if !(self.scan_radius_step > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "scan_radius_step",
                value: self.scan_radius_step,
            });
        }
        if !(self.max_target_area > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "max_target_area",
                value: self.max_target_area,
            });
        }
        if self.life == 0 {
            return Err(ConfigError::ZeroLife);
        }
        if self.tick_period_ms == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }
        if self.scan_degree_step == 0 || 360 % self.scan_degree_step != 0 {
            return Err(ConfigError::DegreeStep(self.scan_degree_step));
        }
        Ok(())
    }

    /// Offset applied to the sprite origin so a pulse grows around the agent's centre.
    pub fn pulse_offset(&self) -> f64 {
        (self.pulse_size - self.agent_size) / 2.0
    }
}

/// Errors reported when validating a [`SwarmConfig`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("target life must be at least one tick")]
    ZeroLife,

    #[error("tick period must be at least one millisecond")]
    ZeroTickPeriod,

    #[error("scan degree step must evenly divide 360, got {0}")]
    DegreeStep(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SwarmConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.pulse_offset(), 2.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        let config = SwarmConfig {
            speed: 0.0,
            ..SwarmConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "speed", .. })
        ));

        let config = SwarmConfig {
            life: 0,
            ..SwarmConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroLife));

        let config = SwarmConfig {
            scan_degree_step: 50,
            ..SwarmConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::DegreeStep(50)));

        let config = SwarmConfig {
            vision: f64::NAN,
            ..SwarmConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: SwarmConfig =
            serde_json::from_str(r#"{"speed": 5, "tickPeriodMs": 16}"#).unwrap();
        assert_eq!(config.speed, 5.0);
        assert_eq!(config.tick_period_ms, 16);
        assert_eq!(config.life, 50);
        assert_eq!(config.max_target_area, 50_000.0);
    }
}
