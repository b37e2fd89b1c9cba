//! Per-frame statistics.

use std::fmt;

use crate::pass_graph::PassKind;

/// What a rendered frame did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Zero-based index of the frame.
    pub frame_index: u64,
    /// Passes that ran, in order.
    pub passes: Vec<PassKind>,
    pub shadow_draws: u32,
    pub entity_draws: u32,
    pub sky_draws: u32,
    pub post_draws: u32,
    /// Lights uploaded to the entity pass.
    pub light_count: usize,
    pub enabled_lights: usize,
}

impl FrameStats {
    pub fn total_draws(&self) -> u32 {
        self.shadow_draws + self.entity_draws + self.sky_draws + self.post_draws
    }

    pub fn ran(&self, pass: PassKind) -> bool {
        self.passes.contains(&pass)
    }
}

impl fmt::Display for FrameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "frame {}: {} draws (shadow {}, entity {}, sky {}, post {}), {}/{} lights on",
            self.frame_index,
            self.total_draws(),
            self.shadow_draws,
            self.entity_draws,
            self.sky_draws,
            self.post_draws,
            self.enabled_lights,
            self.light_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_draws() {
        let stats = FrameStats {
            shadow_draws: 3,
            entity_draws: 3,
            post_draws: 1,
            passes: vec![PassKind::Shadow, PassKind::Geometry],
            ..Default::default()
        };
        assert_eq!(stats.total_draws(), 7);
        assert!(stats.ran(PassKind::Shadow));
        assert!(!stats.ran(PassKind::Sky));
    }
}
