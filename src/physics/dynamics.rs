// src/physics/dynamics.rs
use crate::math::algorithms::metaballs::influence::MetaballSource;
use crate::math::types::Bounds3D;
use bevy::log::trace;

/// Achsen, an denen ein Metaball im letzten Schritt abgeprallt ist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BounceAxes {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl BounceAxes {
    pub fn any(&self) -> bool {
        self.x || self.y || self.z
    }
}

/// Reflektiert eine einzelne Koordinate an `[min + radius, max - radius]`.
/// Gibt `true` zurück, wenn die Geschwindigkeit umgedreht wurde.
fn reflect_axis(position: &mut f32, velocity: &mut f32, radius: f32, min: f32, max: f32) -> bool {
    if *position - radius < min || *position + radius > max {
        *velocity = -*velocity;
        let low = min + radius;
        let high = (max - radius).max(low);
        *position = position.clamp(low, high);
        true
    } else {
        false
    }
}

/// Bewegt einen Metaball um `velocity * dt` und lässt ihn elastisch an den Wänden
/// von `bounds` abprallen. Kollisionen zwischen Metabällen gibt es nicht.
pub fn step_metaball(ball: &mut MetaballSource, bounds: &Bounds3D, dt: f32) -> BounceAxes {
    let radius = ball.radius();
    let mut position = ball.position + ball.velocity * dt;
    let mut velocity = ball.velocity;

    let bounced = BounceAxes {
        x: reflect_axis(
            &mut position.x,
            &mut velocity.x,
            radius,
            bounds.min.x,
            bounds.max.x,
        ),
        y: reflect_axis(
            &mut position.y,
            &mut velocity.y,
            radius,
            bounds.min.y,
            bounds.max.y,
        ),
        z: reflect_axis(
            &mut position.z,
            &mut velocity.z,
            radius,
            bounds.min.z,
            bounds.max.z,
        ),
    };

    ball.position = position;
    ball.velocity = velocity;
    bounced
}

/// Ein Tick für alle Metabälle. Gibt die Anzahl der Abpraller zurück.
pub fn step_metaballs(balls: &mut [MetaballSource], bounds: &Bounds3D, dt: f32) -> usize {
    let mut bounce_count = 0;
    for (index, ball) in balls.iter_mut().enumerate() {
        let bounced = step_metaball(ball, bounds, dt);
        if bounced.any() {
            trace!("Metaball {} bounced: {:?}", index, bounced);
            bounce_count += 1;
        }
    }
    bounce_count
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec3;

    fn unit_box(edge: f32) -> Bounds3D {
        Bounds3D::cube(Vec3::ZERO, edge).unwrap()
    }

    #[test]
    fn test_free_flight() {
        let bounds = unit_box(10.0);
        let mut ball = MetaballSource::new(Vec3::splat(5.0), 1.0, Vec3::new(0.5, -0.25, 0.0));
        let bounced = step_metaball(&mut ball, &bounds, 1.0);

        assert!(!bounced.any());
        assert_eq!(ball.position, Vec3::new(5.5, 4.75, 5.0));
        assert_eq!(ball.velocity, Vec3::new(0.5, -0.25, 0.0));
    }

    #[test]
    fn test_bounce_at_upper_wall() {
        let bounds = unit_box(10.0);
        let mut ball = MetaballSource::new(Vec3::new(8.5, 5.0, 5.0), 1.0, Vec3::new(1.0, 0.0, 0.0));
        let bounced = step_metaball(&mut ball, &bounds, 1.0);

        assert!(bounced.x && !bounced.y && !bounced.z);
        assert!(ball.velocity.x < 0.0);
        assert_eq!(ball.position.x, 9.0);

        // Nächster Tick bewegt sich wieder nach innen
        let bounced = step_metaball(&mut ball, &bounds, 1.0);
        assert!(!bounced.any());
        assert_eq!(ball.position.x, 8.0);
    }

    #[test]
    fn test_bounce_at_lower_wall() {
        let bounds = unit_box(10.0);
        let mut ball =
            MetaballSource::new(Vec3::new(5.0, 5.0, 2.0), 1.5, Vec3::new(0.0, 0.0, -2.0));
        let bounced = step_metaball(&mut ball, &bounds, 1.0);

        assert!(bounced.z);
        assert_eq!(ball.velocity.z, 2.0);
        assert_eq!(ball.position.z, 1.5);
    }

    #[test]
    fn test_stays_inside_over_many_ticks() {
        let bounds = unit_box(8.0);
        let mut balls = vec![
            MetaballSource::new(Vec3::splat(4.0), 1.0, Vec3::new(0.7, 1.3, -0.9)),
            MetaballSource::new(Vec3::splat(2.0), 0.5, Vec3::new(-1.1, 0.2, 2.4)),
        ];
        let mut total_bounces = 0;
        for _ in 0..500 {
            total_bounces += step_metaballs(&mut balls, &bounds, 1.0);
            for ball in &balls {
                let inner = bounds.shrink(ball.radius());
                assert!(inner.contains_point(ball.position));
            }
        }
        assert!(total_bounces > 0);
    }
}
