use geom::{Circle, Distance, PolyLine, Polygon, Pt2D};
use widgetry::{Color, GeomBatch};

use model::render::{MarkerKind, MarkerShape, Scene};

/// Scenes are already in map-space, so this just turns each piece into polygons.
pub fn scene(scene: &Scene) -> GeomBatch {
    let mut batch = GeomBatch::new();

    for stroke in &scene.strokes {
        let pts = Pt2D::approx_dedupe(stroke.points.clone(), Distance::meters(0.01));
        if pts.len() < 2 {
            continue;
        }
        match PolyLine::new(pts) {
            Ok(pl) => {
                batch.push(
                    Color::hex(stroke.color).alpha(stroke.opacity as f32),
                    pl.make_polygons(Distance::meters(stroke.width)),
                );
            }
            Err(err) => {
                debug!("Not drawing path for {}: {err}", stroke.id);
            }
        }
    }

    // Markers go on top of every line
    for marker in &scene.markers {
        let size = Distance::meters(marker.size);
        let polygon = match marker.shape() {
            MarkerShape::Circle => Circle::new(marker.center, size).to_polygon(),
            MarkerShape::Square => {
                Polygon::rectangle(2.0 * marker.size, 2.0 * marker.size).translate(
                    marker.center.x() - marker.size,
                    marker.center.y() - marker.size,
                )
            }
        };
        batch.push(Color::hex(marker.color), polygon);

        if marker.kind == MarkerKind::Current {
            if let Ok(outline) = Circle::new(marker.center, size).to_outline(size * 0.3) {
                batch.push(Color::WHITE, outline);
            }
        }
    }

    batch
}
