//! Builder pattern for [`EncodeConfig`](s2tc_encoder::EncodeConfig).

use s2tc_common::ColorDistMetric;
use s2tc_encoder::{CandidateMode, DxtMode, EncodeConfig, RefineMode};

/// Builder for an [`EncodeConfig`] with convenient defaults.
///
/// Defaults: [`DxtMode::Dxt1`], [`ColorDistMetric::Wavg`], [`CandidateMode::Normal`],
/// [`RefineMode::Loop`].
#[derive(Debug, Clone, Copy)]
pub struct EncodeConfigBuilder {
    dxt_mode: Option<DxtMode>,
    metric: Option<ColorDistMetric>,
    candidates: Option<CandidateMode>,
    refine: Option<RefineMode>,
}

impl EncodeConfigBuilder {
    /// Creates a new config builder with no overrides set.
    pub fn new() -> Self {
        Self { dxt_mode: None, metric: None, candidates: None, refine: None }
    }

    /// Sets which block layout to emit.
    pub fn dxt_mode(mut self, mode: DxtMode) -> Self {
        self.dxt_mode = Some(mode);
        self
    }

    /// Sets the color distance metric the selector and refinement driver optimize against.
    pub fn metric(mut self, metric: ColorDistMetric) -> Self {
        self.metric = Some(metric);
        self
    }

    /// Sets how the endpoint selector builds its candidate set.
    pub fn candidates(mut self, candidates: CandidateMode) -> Self {
        self.candidates = Some(candidates);
        self
    }

    /// Sets how many refinement iterations the driver performs.
    pub fn refine(mut self, refine: RefineMode) -> Self {
        self.refine = Some(refine);
        self
    }

    /// Builds the config. Does not validate the combination; [`encode_image`](crate::encode_image)
    /// and [`encode_image_allocating`](crate::encode_image_allocating) validate it for you.
    pub fn build(self) -> EncodeConfig {
        EncodeConfig {
            dxt_mode: self.dxt_mode.unwrap_or(DxtMode::Dxt1),
            metric: self.metric.unwrap_or(ColorDistMetric::Wavg),
            candidates: self.candidates.unwrap_or(CandidateMode::Normal),
            refine: self.refine.unwrap_or(RefineMode::Loop),
        }
    }
}

impl Default for EncodeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EncodeConfigBuilder::new().build();
        assert_eq!(config.dxt_mode, DxtMode::Dxt1);
        assert_eq!(config.metric, ColorDistMetric::Wavg);
        assert_eq!(config.candidates, CandidateMode::Normal);
        assert_eq!(config.refine, RefineMode::Loop);
    }

    #[test]
    fn overrides_are_applied() {
        let config = EncodeConfigBuilder::new()
            .dxt_mode(DxtMode::Dxt5)
            .metric(ColorDistMetric::Rgb)
            .candidates(CandidateMode::Random { count: 4, seed: 7 })
            .refine(RefineMode::Never)
            .build();
        assert_eq!(config.dxt_mode, DxtMode::Dxt5);
        assert_eq!(config.metric, ColorDistMetric::Rgb);
        assert_eq!(config.candidates, CandidateMode::Random { count: 4, seed: 7 });
        assert_eq!(config.refine, RefineMode::Never);
    }
}
