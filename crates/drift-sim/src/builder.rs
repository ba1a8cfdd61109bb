//! Fluent builder for constructing an [`Engine`].

use drift_core::{EngineConfig, SimRng};
use drift_source::AmbientSource;

use crate::{Engine, EngineResult};

/// Builder for [`Engine`].
///
/// The engine always starts in lightweight mode with a single
/// [`AmbientSource`] seeded from the config's master seed.
///
/// # Example
///
/// ```rust,ignore
/// let mut engine = EngineBuilder::new(EngineConfig::default())
///     .initial_parcels(700)
///     .build()?;
/// ```
pub struct EngineBuilder {
    config: EngineConfig,
    initial_parcels: usize,
}

impl EngineBuilder {
    pub fn new(config: EngineConfig) -> Self {
        Self { config, initial_parcels: 0 }
    }

    /// Scatter `n` random parcels before the first step so the view is not
    /// empty at startup.  Default: 0.
    pub fn initial_parcels(mut self, n: usize) -> Self {
        self.initial_parcels = n;
        self
    }

    /// Validate the config and construct the engine.
    pub fn build(self) -> EngineResult<Engine> {
        self.config.validate()?;

        // Master RNG hands each source its own child stream so sources stay
        // statistically independent and runs stay reproducible.
        let mut master = SimRng::new(self.config.seed);
        let mut ambient = AmbientSource::new(&self.config, master.child(0));
        ambient.scatter(self.initial_parcels);

        Ok(Engine::new(self.config, vec![Box::new(ambient)]))
    }
}
