//! Spray can: speckles random dots under the brush on a fixed timer.

use super::{ToolBehavior, ToolContext};
use crate::draw::{DrawingContext, MAX_LINE_WIDTH};
use crate::error::Result;
use crate::input::{Point, PointerEvent, relative_pos};
use rand::Rng;
use rand::rngs::StdRng;
use std::cell::Cell;
use std::f64::consts::PI;
use std::rc::Rc;

/// Number of dots sprayed per tick for a brush of the given width.
///
/// The brush is a disk of radius `width / 2`; one dot is placed for every
/// `area_per_dot` square pixels of it, rounded up. Dot count depends only on
/// the brush, never on pointer speed. Widths beyond [`MAX_LINE_WIDTH`] count
/// as the widest brush.
pub fn dots_per_tick(line_width: f64, area_per_dot: f64) -> u32 {
    let radius = line_width.min(MAX_LINE_WIDTH) / 2.0;
    let area = radius * radius * PI;
    (area / area_per_dot).ceil().max(0.0) as u32
}

/// Returns a point distributed uniformly over the disk of `radius`.
///
/// Samples the square [-1, 1]² until a point lands inside the unit circle,
/// then scales it. Scaling a square sample directly would pile dots into the
/// corners; scaling a random angle and distance would pile them at the center.
pub fn random_point_in_radius<R: Rng + ?Sized>(rng: &mut R, radius: f64) -> (f64, f64) {
    loop {
        let x: f64 = rng.random::<f64>() * 2.0 - 1.0;
        let y: f64 = rng.random::<f64>() * 2.0 - 1.0;
        if x * x + y * y <= 1.0 {
            return (x * radius, y * radius);
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Nozzle {
    position: Point,
    // Nothing is sprayed until the pointer has moved at least once
    armed: bool,
}

/// Sprays dots around the pointer while the button is held.
#[derive(Debug, Clone, Copy, Default)]
pub struct SprayTool;

impl ToolBehavior for SprayTool {
    fn start(&self, event: &PointerEvent, tool: &mut ToolContext<'_>) -> Result<()> {
        let radius = tool.cx.line_width() / 2.0;
        let dots = dots_per_tick(tool.cx.line_width(), tool.settings.spray_area_per_dot);
        let nozzle = Rc::new(Cell::new(Nozzle {
            position: relative_pos(event, tool.cx.canvas_bounds()),
            armed: false,
        }));
        log::debug!("Spray started: radius {radius:.1}, {dots} dots per tick");

        let follow = Rc::clone(&nozzle);
        tool.drag
            .start_drag(
                move |event: &PointerEvent, cx: &mut DrawingContext| {
                    follow.set(Nozzle {
                        position: relative_pos(event, cx.canvas_bounds()),
                        armed: true,
                    });
                },
                None,
            )
            .every(
                tool.settings.spray_period,
                tool.now,
                move |cx: &mut DrawingContext, rng: &mut StdRng| {
                    let nozzle = nozzle.get();
                    if !nozzle.armed {
                        return;
                    }
                    for _ in 0..dots {
                        let (dx, dy) = random_point_in_radius(rng, radius);
                        cx.fill_rect(
                            f64::from(nozzle.position.x) + dx,
                            f64::from(nozzle.position.y) + dy,
                            1.0,
                            1.0,
                        );
                    }
                },
            );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn dot_density_follows_brush_area() {
        // radius 4: area ~50.3
        assert_eq!(dots_per_tick(8.0, 30.0), 2);
        // radius 12.5: area ~490.9
        assert_eq!(dots_per_tick(25.0, 30.0), 17);
        assert_eq!(dots_per_tick(1.0, 30.0), 1);
        assert_eq!(dots_per_tick(100.0, 30.0), 262);
        assert_eq!(dots_per_tick(1e6, 30.0), 262);
    }

    #[test]
    fn samples_stay_inside_the_disk() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let (x, y) = random_point_in_radius(&mut rng, 1.0);
            assert!(x * x + y * y <= 1.0);
        }
    }

    #[test]
    fn samples_are_uniform_over_the_disk() {
        let mut rng = StdRng::seed_from_u64(42);
        let samples: Vec<(f64, f64)> = (0..10_000)
            .map(|_| random_point_in_radius(&mut rng, 1.0))
            .collect();
        let n = samples.len() as f64;

        // Uniform density: the inner disk of radius 1/sqrt(2) holds half the area
        let inner = samples
            .iter()
            .filter(|(x, y)| x * x + y * y <= 0.5)
            .count() as f64;
        assert!((inner / n - 0.5).abs() < 0.03, "inner fraction {}", inner / n);

        // Outer ring between r=0.9 and r=1.0 holds 19% of the area
        let rim = samples
            .iter()
            .filter(|(x, y)| x * x + y * y > 0.81)
            .count() as f64;
        assert!((rim / n - 0.19).abs() < 0.03, "rim fraction {}", rim / n);

        // No quadrant is favored
        for (sx, sy) in [(1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0), (1.0, -1.0)] {
            let count = samples
                .iter()
                .filter(|(x, y)| x * sx >= 0.0 && y * sy >= 0.0)
                .count() as f64;
            assert!((count / n - 0.25).abs() < 0.03);
        }

        let mean_x = samples.iter().map(|(x, _)| x).sum::<f64>() / n;
        let mean_y = samples.iter().map(|(_, y)| y).sum::<f64>() / n;
        assert!(mean_x.abs() < 0.03 && mean_y.abs() < 0.03);
    }

    #[test]
    fn samples_scale_with_radius() {
        let mut rng = StdRng::seed_from_u64(3);
        let max = (0..2_000)
            .map(|_| {
                let (x, y) = random_point_in_radius(&mut rng, 12.5);
                (x * x + y * y).sqrt()
            })
            .fold(0.0, f64::max);
        assert!(max <= 12.5);
        assert!(max > 11.0);
    }
}
