use super::chain::Chain;
use crate::math::GroundPoint;

/// Outcome of a single relaxation step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub head_moved: bool,
    /// Body segments that had to be pulled back within spacing.
    pub corrected: usize,
}

/// Follow-the-leader solver: the head walks toward the target at a fixed
/// speed and every body segment is pulled back within `spacing` of where its
/// leader stood at the start of the frame.
///
/// One pass per frame, no iteration. Under fast motion the chain stretches by
/// up to one frame of leader motion and settles over the following frames.
pub struct FollowSolver;

impl FollowSolver {
    pub fn step(chain: &mut Chain, target: GroundPoint) -> StepReport {
        if chain.segments.is_empty() {
            return StepReport::default();
        }

        chain.snapshot.clear();
        chain
            .snapshot
            .extend(chain.segments.iter().map(|s| s.planar()));

        let head_moved = Self::advance_head(chain, target);
        let corrected = Self::relax_body(chain);

        StepReport {
            head_moved,
            corrected,
        }
    }

    fn advance_head(chain: &mut Chain, target: GroundPoint) -> bool {
        let speed = chain.speed;
        let head = &mut chain.segments[0];

        let offset = target.to_vec2() - head.planar();
        let magnitude = offset.length();
        if magnitude == 0.0 || !magnitude.is_finite() {
            return false;
        }

        head.translate_planar(offset / magnitude * speed);
        true
    }

    fn relax_body(chain: &mut Chain) -> usize {
        let spacing = chain.spacing;
        let mut corrected = 0;

        for i in 1..chain.segments.len() {
            let leader = chain.snapshot[i - 1];
            let segment = &mut chain.segments[i];

            let offset = leader - segment.planar();
            let distance = offset.length();

            if distance > spacing {
                let adjustment = (distance - spacing) / distance;
                segment.translate_planar(offset * adjustment);
                corrected += 1;
            }
        }

        corrected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    const EPSILON: f32 = 1e-5;

    fn three_in_a_row() -> Chain {
        Chain::from_positions(
            [
                Vec3::new(0.0, 3.0, 0.0),
                Vec3::new(-1.0, 3.0, 0.0),
                Vec3::new(-2.0, 3.0, 0.0),
            ],
            1.0,
            0.1,
        )
        .unwrap()
    }

    #[test]
    fn head_advances_by_speed_and_body_waits() {
        let mut chain = three_in_a_row();
        let report = FollowSolver::step(&mut chain, GroundPoint::new(5.0, 0.0));

        let pos: Vec<Vec3> = chain.positions().collect();
        assert!(pos[0].abs_diff_eq(Vec3::new(0.1, 3.0, 0.0), EPSILON));
        assert_eq!(pos[1], Vec3::new(-1.0, 3.0, 0.0));
        assert_eq!(pos[2], Vec3::new(-2.0, 3.0, 0.0));
        assert_eq!(
            report,
            StepReport {
                head_moved: true,
                corrected: 0
            }
        );
    }

    #[test]
    fn second_step_pulls_first_body_segment() {
        let mut chain = three_in_a_row();
        FollowSolver::step(&mut chain, GroundPoint::new(5.0, 0.0));
        let report = FollowSolver::step(&mut chain, GroundPoint::new(5.0, 0.0));

        let pos: Vec<Vec3> = chain.positions().collect();
        assert!(pos[0].abs_diff_eq(Vec3::new(0.2, 3.0, 0.0), EPSILON));
        // Distance 1.1 to the leader's snapshot, pulled by (1.1 - 1.0) / 1.1 of it.
        assert!(pos[1].abs_diff_eq(Vec3::new(-0.9, 3.0, 0.0), EPSILON));
        assert_eq!(pos[2], Vec3::new(-2.0, 3.0, 0.0));
        assert_eq!(report.corrected, 1);
    }

    #[test]
    fn target_on_head_leaves_chain_untouched() {
        let mut chain = three_in_a_row();
        let before = chain.segments().to_vec();
        let report = FollowSolver::step(&mut chain, GroundPoint::new(0.0, 0.0));
        assert_eq!(chain.segments(), before.as_slice());
        assert!(!report.head_moved);
    }

    #[test]
    fn body_stays_within_spacing_of_leader_snapshot() {
        let mut chain = Chain::builder().segment_count(10).build().unwrap();

        for frame in 0..400 {
            let angle = frame as f32 * 0.37;
            let radius = 4.0 + (frame % 7) as f32;
            let target = GroundPoint::new(radius * angle.cos(), radius * angle.sin());

            let before: Vec<_> = chain.segments().iter().map(|s| s.planar()).collect();
            FollowSolver::step(&mut chain, target);

            for i in 1..chain.len() {
                let gap = (chain.segments()[i].planar() - before[i - 1]).length();
                assert!(gap <= chain.spacing() + 1e-4, "frame {frame} segment {i}: {gap}");
            }
            assert!(chain.max_gap() <= chain.spacing() + chain.speed() + 1e-4);
        }
    }

    #[test]
    fn heights_never_change() {
        let mut chain = Chain::builder().height(4.5).build().unwrap();
        for _ in 0..50 {
            FollowSolver::step(&mut chain, GroundPoint::new(-3.0, 8.0));
        }
        assert!(chain.positions().all(|p| p.y == 4.5));
    }

    #[test]
    fn stretched_chain_is_pulled_in_one_pass() {
        let mut chain = Chain::from_positions(
            [Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 5.0)],
            1.0,
            0.0,
        )
        .unwrap();
        FollowSolver::step(&mut chain, GroundPoint::new(0.0, 0.0));
        assert!(chain.segments()[1]
            .position
            .abs_diff_eq(Vec3::new(0.0, 0.0, 1.0), EPSILON));
    }

    #[test]
    fn single_segment_chain_only_moves_head() {
        let mut chain = Chain::from_positions([Vec3::ZERO], 1.0, 0.5).unwrap();
        let report = FollowSolver::step(&mut chain, GroundPoint::new(0.0, -2.0));
        assert!(chain.segments()[0]
            .position
            .abs_diff_eq(Vec3::new(0.0, 0.0, -0.5), EPSILON));
        assert_eq!(report.corrected, 0);
    }
}
