use super::segment::Segment;
use crate::config::{ConfigError, SceneConfig};
use glam::{Vec2, Vec3};

/// Ordered segments, index 0 is the head.
#[derive(Debug, Clone)]
pub struct Chain {
    pub(crate) segments: Vec<Segment>,
    pub(crate) spacing: f32,
    pub(crate) speed: f32,
    /// Pre-step planar positions, reused between frames.
    pub(crate) snapshot: Vec<Vec2>,
}

impl Chain {
    pub fn builder() -> ChainBuilder {
        ChainBuilder::new()
    }

    /// Chain from explicit positions, mostly useful for scripted scenarios.
    pub fn from_positions(
        positions: impl IntoIterator<Item = Vec3>,
        spacing: f32,
        speed: f32,
    ) -> Result<Self, ConfigError> {
        let segments: Vec<Segment> = positions.into_iter().map(Segment::new).collect();
        validate(segments.len(), spacing, speed)?;

        Ok(Self {
            snapshot: Vec::with_capacity(segments.len()),
            segments,
            spacing,
            speed,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn head(&self) -> Option<&Segment> {
        self.segments.first()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.segments.iter().map(|s| s.position)
    }

    /// Largest planar gap between neighbouring segments.
    pub fn max_gap(&self) -> f32 {
        self.segments
            .windows(2)
            .map(|w| (w[0].planar() - w[1].planar()).length())
            .fold(0.0, f32::max)
    }
}

fn validate(count: usize, spacing: f32, speed: f32) -> Result<(), ConfigError> {
    if count == 0 {
        return Err(ConfigError::InvalidChain("at least one segment is required"));
    }
    if !(spacing.is_finite() && spacing > 0.0) {
        return Err(ConfigError::InvalidChain("segment spacing must be positive"));
    }
    if !(speed.is_finite() && speed >= 0.0) {
        return Err(ConfigError::InvalidChain("head speed must be non-negative"));
    }
    Ok(())
}

/// Lays segments out in a straight line trailing the head along -X.
pub struct ChainBuilder {
    segment_count: usize,
    spacing: f32,
    speed: f32,
    height: f32,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self {
            segment_count: 10,
            spacing: 1.0,
            speed: 0.1,
            height: 3.0,
        }
    }

    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            segment_count: config.segment_count,
            spacing: config.segment_spacing,
            speed: config.head_speed,
            height: config.segment_height,
        }
    }

    pub fn segment_count(mut self, segment_count: usize) -> Self {
        self.segment_count = segment_count;
        self
    }

    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    pub fn build(self) -> Result<Chain, ConfigError> {
        let positions = (0..self.segment_count)
            .map(|i| Vec3::new(-(i as f32) * self.spacing, self.height, 0.0));
        Chain::from_positions(positions, self.spacing, self.speed)
    }
}

impl Default for ChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_lays_out_along_negative_x() {
        let chain = Chain::builder().segment_count(4).spacing(1.5).height(2.0).build().unwrap();
        let positions: Vec<Vec3> = chain.positions().collect();
        assert_eq!(
            positions,
            vec![
                Vec3::new(0.0, 2.0, 0.0),
                Vec3::new(-1.5, 2.0, 0.0),
                Vec3::new(-3.0, 2.0, 0.0),
                Vec3::new(-4.5, 2.0, 0.0),
            ]
        );
        assert!((chain.max_gap() - 1.5).abs() < 1e-6);
    }

    #[test]
    fn defaults_match_scene_config() {
        let from_config = ChainBuilder::from_config(&SceneConfig::default()).build().unwrap();
        let default = Chain::builder().build().unwrap();
        assert_eq!(from_config.segments(), default.segments());
        assert_eq!(default.len(), 10);
        assert_eq!(default.head().unwrap().position, Vec3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn rejects_invalid_layouts() {
        assert!(Chain::builder().segment_count(0).build().is_err());
        assert!(Chain::builder().spacing(0.0).build().is_err());
        assert!(Chain::builder().speed(-1.0).build().is_err());
    }
}
