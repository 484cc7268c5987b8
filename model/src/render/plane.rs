use geom::Pt2D;

use super::{build_scene, Frame, RenderSurface, Scene, SurfaceStyle};
use crate::LatLng;

const STYLE: SurfaceStyle = SurfaceStyle {
    playing_stroke: (2.0, 0.7),
    paused_stroke: (3.0, 0.9),
    start_radius: 5.0,
    end_half_side: 4.0,
    current_radius: 6.0,
};

const PADDING: f64 = 40.0;
// The smallest drawable area, even in a tiny viewport
const GUTTER: f64 = 20.0;

/// Plots longitude against latitude on a plain plane, fit to whatever is being shown. No
/// projection, no map underneath.
pub struct PlaneSurface {
    pub width: f64,
    pub height: f64,
}

struct DataBounds {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl PlaneSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn data_bounds(frame: &Frame) -> Option<DataBounds> {
        let mut bounds: Option<DataBounds> = None;
        for path in &frame.paths {
            for s in path.samples.iter() {
                let b = bounds.get_or_insert(DataBounds {
                    min_x: s.longitude,
                    max_x: s.longitude,
                    min_y: s.latitude,
                    max_y: s.latitude,
                });
                b.min_x = b.min_x.min(s.longitude);
                b.max_x = b.max_x.max(s.longitude);
                b.min_y = b.min_y.min(s.latitude);
                b.max_y = b.max_y.max(s.latitude);
            }
        }

        let mut b = bounds?;
        if b.min_x == b.max_x {
            b.min_x -= 0.5;
            b.max_x += 0.5;
        }
        if b.min_y == b.max_y {
            b.min_y -= 0.5;
            b.max_y += 0.5;
        }
        Some(b)
    }
}

impl RenderSurface for PlaneSurface {
    fn dims(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn render(&self, frame: &Frame) -> Scene {
        let b = match Self::data_bounds(frame) {
            Some(b) => b,
            None => {
                return Scene::default();
            }
        };
        if self.width <= 0.0 || self.height <= 0.0 {
            return Scene::default();
        }

        let drawable_width = (self.width - 2.0 * PADDING).max(GUTTER);
        let drawable_height = (self.height - 2.0 * PADDING).max(GUTTER);
        let range_x = b.max_x - b.min_x;
        let range_y = b.max_y - b.min_y;
        // Same scale on both axes, so shapes aren't distorted
        let scale = (drawable_width / range_x).min(drawable_height / range_y);
        let offset_x = (drawable_width - range_x * scale) / 2.0 + PADDING;
        let offset_y = (drawable_height - range_y * scale) / 2.0 + PADDING;

        build_scene(frame, &STYLE, 1.0, |pos: LatLng| {
            Pt2D::new(
                offset_x + (pos.lng - b.min_x) * scale,
                // Latitude grows up, the surface grows down
                offset_y + (b.max_y - pos.lat) * scale,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use store::EntityName;

    use super::*;
    use crate::render::tests::{kinds, registry};
    use crate::render::MarkerKind;
    use crate::{EntityID, EntityTrack, PathRegistry, PositionSample, Trajectory};

    fn close(pt: Pt2D, x: f64, y: f64) -> bool {
        (pt.x() - x).abs() < 1e-3 && (pt.y() - y).abs() < 1e-3
    }

    #[test]
    fn fits_and_centers() {
        let tracks = vec![EntityTrack {
            id: EntityID(0),
            name: EntityName::new("square"),
            trajectory: Trajectory::new(vec![
                PositionSample::new(0.0, 0.0, 0.0),
                PositionSample::new(10.0, 10.0, 10.0),
            ])
            .unwrap(),
        }];
        let registry = PathRegistry::new(&tracks, 5.0);
        let surface = PlaneSurface::new(280.0, 180.0);

        let paused = surface.render(&Frame {
            paths: registry.paths().iter().collect(),
            playback_active: false,
        });
        // Drawable area is 200x100, so the scale is 10 and the data is centered horizontally
        let pts = &paused.strokes[0].points;
        assert!(close(pts[0], 90.0, 140.0));
        assert!(close(pts[1], 190.0, 40.0));
        assert_eq!(paused.strokes[0].width, 3.0);
        assert_eq!(paused.markers[1].size, 4.0);

        let playing = surface.render(&Frame {
            paths: registry.paths().iter().collect(),
            playback_active: true,
        });
        assert_eq!(playing.markers.len(), 1);
        assert!(close(playing.markers[0].center, 140.0, 90.0));
        assert_eq!(playing.markers[0].size, 6.0);
        assert_eq!(playing.strokes[0].opacity, 0.7);
    }

    #[test]
    fn refits_to_a_new_size() {
        let tracks = vec![EntityTrack {
            id: EntityID(0),
            name: EntityName::new("square"),
            trajectory: Trajectory::new(vec![
                PositionSample::new(0.0, 0.0, 0.0),
                PositionSample::new(10.0, 10.0, 10.0),
            ])
            .unwrap(),
        }];
        let registry = PathRegistry::new(&tracks, 5.0);
        let frame = Frame {
            paths: registry.paths().iter().collect(),
            playback_active: false,
        };

        let narrow = PlaneSurface::new(280.0, 180.0).render(&frame);
        assert!(close(narrow.strokes[0].points[0], 90.0, 140.0));

        // A wider window keeps the scale, limited by height, and re-centers horizontally
        let wide = PlaneSurface::new(480.0, 180.0);
        assert_eq!(wide.dims(), (480.0, 180.0));
        let pts = &wide.render(&frame).strokes[0].points;
        assert!(close(pts[0], 190.0, 140.0));
        assert!(close(pts[1], 290.0, 40.0));
    }

    #[test]
    fn single_point_is_padded() {
        let registry = registry(0.0);
        let surface = PlaneSurface::new(100.0, 100.0);
        let parked = registry.get(&EntityName::new("parked")).unwrap();
        let scene = surface.render(&Frame {
            paths: vec![parked],
            playback_active: false,
        });
        assert_eq!(kinds(&scene), vec![("parked", MarkerKind::Start)]);
        // Tiny viewport, so the 20 pixel gutter kicks in; the point sits in the middle of it
        assert!(close(scene.markers[0].center, 50.0, 50.0));
    }

    #[test]
    fn nothing_to_draw() {
        let registry = registry(0.0);
        let surface = PlaneSurface::new(800.0, 600.0);
        assert!(surface
            .render(&Frame {
                paths: Vec::new(),
                playback_active: true,
            })
            .is_empty());
        let missing = registry.get(&EntityName::new("missing")).unwrap();
        assert!(surface
            .render(&Frame {
                paths: vec![missing],
                playback_active: false,
            })
            .is_empty());
        assert!(PlaneSurface::new(0.0, 0.0)
            .render(&Frame {
                paths: registry.paths().iter().collect(),
                playback_active: false,
            })
            .is_empty());
    }
}
