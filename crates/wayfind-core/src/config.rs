use crate::geometry::ScrollOptions;
use crate::input::Direction;
use crate::keymap::NavKeyMap;

/// Row tolerance used when none is configured, in layout units.
pub const DEFAULT_ROW_TOLERANCE: f64 = 20.0;

/// Errors reported by [`NavConfig::validate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The row tolerance is NaN or infinite.
    #[error("row tolerance must be finite, got {0}")]
    NonFiniteTolerance(f64),
    /// The row tolerance is below zero.
    #[error("row tolerance must not be negative, got {0}")]
    NegativeTolerance(f64),
    /// A direction has no enabled key.
    #[error("no key bound for direction {0}")]
    UnboundDirection(Direction),
    /// Activation has no enabled key.
    #[error("no key bound for activation")]
    UnboundActivation,
}

/// Tuning for a navigation engine instance.
///
/// All fields have sensible defaults (see [`Default`] impl). Use struct
/// update syntax to override only the options you need:
///
/// ```
/// use wayfind_core::NavConfig;
///
/// let config = NavConfig {
///     row_tolerance: 1.0,
///     ..NavConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NavConfig {
    /// Maximum distance between vertical centers for two nodes to count as
    /// the same row during left/right moves (default: 20.0).
    pub row_tolerance: f64,
    /// Options sent with every scroll-into-view request (default: smooth,
    /// centered on both axes).
    pub scroll: ScrollOptions,
    /// Focus the first visible node when a scope activates with nothing
    /// focused inside it (default: true).
    pub cold_start_focus: bool,
    /// Pull focus back when a focus-change notification lands outside the
    /// scope (default: true).
    pub restore_on_drift: bool,
    /// Key bindings for the five relevant inputs.
    pub keymap: NavKeyMap,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            row_tolerance: DEFAULT_ROW_TOLERANCE,
            scroll: ScrollOptions::default(),
            cold_start_focus: true,
            restore_on_drift: true,
            keymap: NavKeyMap::default(),
        }
    }
}

impl NavConfig {
    /// Check the configuration for values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.row_tolerance.is_finite() {
            return Err(ConfigError::NonFiniteTolerance(self.row_tolerance));
        }
        if self.row_tolerance < 0.0 {
            return Err(ConfigError::NegativeTolerance(self.row_tolerance));
        }
        if let Some(direction) = Direction::ALL
            .into_iter()
            .find(|d| !self.keymap.direction(*d).is_bound())
        {
            return Err(ConfigError::UnboundDirection(direction));
        }
        if !self.keymap.activate.is_bound() {
            return Err(ConfigError::UnboundActivation);
        }
        Ok(())
    }
}
