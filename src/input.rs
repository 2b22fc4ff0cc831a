//! Host input boundary: device pixels and keys in, NDC and directions out.

use crate::view::Direction;
use glam::Vec2;
use winit::keyboard::KeyCode;

/// Maps a pointer position in device pixels to normalized device coordinates.
///
/// x runs from -1 at the left edge to +1 at the right edge; y runs from -1 at
/// the bottom edge to +1 at the top, the reverse of screen space. Returns `None`
/// for an empty viewport.
pub fn pointer_to_ndc(x: f64, y: f64, width: u32, height: u32) -> Option<Vec2> {
    if width == 0 || height == 0 {
        return None;
    }

    let ndc_x = (x / width as f64) * 2.0 - 1.0;
    let ndc_y = 1.0 - (y / height as f64) * 2.0;
    Some(Vec2::new(ndc_x as f32, ndc_y as f32))
}

pub fn direction_for_key(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::ArrowUp => Some(Direction::Up),
        KeyCode::ArrowDown => Some(Direction::Down),
        KeyCode::ArrowLeft => Some(Direction::Left),
        KeyCode::ArrowRight => Some(Direction::Right),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_map_to_unit_square() {
        assert_eq!(pointer_to_ndc(0.0, 0.0, 800, 600), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(pointer_to_ndc(800.0, 600.0, 800, 600), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(pointer_to_ndc(400.0, 300.0, 800, 600), Some(Vec2::ZERO));
    }

    #[test]
    fn y_axis_is_flipped() {
        let upper = pointer_to_ndc(400.0, 100.0, 800, 600).unwrap();
        let lower = pointer_to_ndc(400.0, 500.0, 800, 600).unwrap();
        assert!(upper.y > 0.0);
        assert!(lower.y < 0.0);
    }

    #[test]
    fn empty_viewport_has_no_ndc() {
        assert_eq!(pointer_to_ndc(10.0, 10.0, 0, 600), None);
        assert_eq!(pointer_to_ndc(10.0, 10.0, 800, 0), None);
    }

    #[test]
    fn arrows_map_to_directions() {
        assert_eq!(direction_for_key(KeyCode::ArrowUp), Some(Direction::Up));
        assert_eq!(direction_for_key(KeyCode::ArrowDown), Some(Direction::Down));
        assert_eq!(direction_for_key(KeyCode::ArrowLeft), Some(Direction::Left));
        assert_eq!(direction_for_key(KeyCode::ArrowRight), Some(Direction::Right));
        assert_eq!(direction_for_key(KeyCode::KeyW), None);
    }
}
