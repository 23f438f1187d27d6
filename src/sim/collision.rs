//! Collision detection and response for circular bodies
//!
//! Everything in the arena is a circle inside an axis-aligned rectangle, so
//! the geometry stays small: circle-circle overlap with a contact normal,
//! and per-axis wall reflection for the obstacles.

use glam::Vec2;

/// Result of an overlap test between two circles.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Unit normal pointing from the second body toward the first.
    pub normal: Vec2,
    /// Overlap depth along the normal.
    pub penetration: f32,
}

/// Overlap test between two circles.
///
/// Returns `None` when the circles are apart, and also when their centers
/// coincide exactly: there is no usable normal then, so the caller skips
/// resolution for that tick.
pub fn circle_contact(pos_a: Vec2, radius_a: f32, pos_b: Vec2, radius_b: f32) -> Option<Contact> {
    let delta = pos_a - pos_b;
    let reach = radius_a + radius_b;
    let dist_sq = delta.length_squared();
    if dist_sq >= reach * reach {
        return None;
    }
    let dist = dist_sq.sqrt();
    if dist == 0.0 {
        return None;
    }
    Some(Contact {
        normal: delta / dist,
        penetration: reach - dist,
    })
}

/// Whether two points are closer than `reach`. Pickup collection needs only
/// the predicate, not a contact normal.
#[inline]
pub fn within_reach(a: Vec2, b: Vec2, reach: f32) -> bool {
    a.distance_squared(b) < reach * reach
}

/// Keep a circle inside `[radius, bound - radius]` on each axis, negating
/// the matching velocity component when an edge would cross a wall.
pub fn reflect_in_rect(pos: &mut Vec2, vel: &mut Vec2, radius: f32, width: f32, height: f32) {
    if pos.x - radius < 0.0 {
        pos.x = radius;
        vel.x = -vel.x;
    } else if pos.x + radius > width {
        pos.x = width - radius;
        vel.x = -vel.x;
    }
    if pos.y - radius < 0.0 {
        pos.y = radius;
        vel.y = -vel.y;
    } else if pos.y + radius > height {
        pos.y = height - radius;
        vel.y = -vel.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_contact_overlap() {
        // Circles of radius 10 with centers 15 apart overlap by 5
        let contact = circle_contact(Vec2::new(15.0, 0.0), 10.0, Vec2::ZERO, 10.0)
            .expect("overlapping circles must produce a contact");
        assert!((contact.penetration - 5.0).abs() < 1e-5);
        // Normal points from the second body toward the first
        assert!((contact.normal - Vec2::X).length() < 1e-5);
    }

    #[test]
    fn test_circle_contact_apart() {
        assert!(circle_contact(Vec2::new(25.0, 0.0), 10.0, Vec2::ZERO, 10.0).is_none());
        // Exactly touching is not a contact
        assert!(circle_contact(Vec2::new(20.0, 0.0), 10.0, Vec2::ZERO, 10.0).is_none());
    }

    #[test]
    fn test_circle_contact_coincident_centers() {
        // No usable normal; resolution is skipped rather than dividing by zero
        assert!(circle_contact(Vec2::ZERO, 10.0, Vec2::ZERO, 10.0).is_none());
    }

    #[test]
    fn test_reflect_left_wall() {
        let mut pos = Vec2::new(5.0, 50.0);
        let mut vel = Vec2::new(-3.0, 1.0);
        reflect_in_rect(&mut pos, &mut vel, 16.0, 800.0, 600.0);
        assert_eq!(pos.x, 16.0);
        assert_eq!(vel.x, 3.0);
        assert_eq!(vel.y, 1.0);
    }

    #[test]
    fn test_reflect_bottom_wall() {
        let mut pos = Vec2::new(400.0, 595.0);
        let mut vel = Vec2::new(2.0, 4.0);
        reflect_in_rect(&mut pos, &mut vel, 16.0, 800.0, 600.0);
        assert_eq!(pos.y, 584.0);
        assert_eq!(vel.y, -4.0);
        assert_eq!(vel.x, 2.0);
    }

    #[test]
    fn test_reflect_no_wall() {
        let mut pos = Vec2::new(400.0, 300.0);
        let mut vel = Vec2::new(2.0, -1.0);
        reflect_in_rect(&mut pos, &mut vel, 16.0, 800.0, 600.0);
        assert_eq!(pos, Vec2::new(400.0, 300.0));
        assert_eq!(vel, Vec2::new(2.0, -1.0));
    }

    #[test]
    fn test_within_reach() {
        assert!(within_reach(Vec2::ZERO, Vec2::new(3.0, 4.0), 5.1));
        assert!(!within_reach(Vec2::ZERO, Vec2::new(3.0, 4.0), 5.0));
    }
}
