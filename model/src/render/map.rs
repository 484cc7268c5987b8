use anyhow::Result;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use geom::{Bounds, GPSBounds, LonLat};

use super::{build_scene, Frame, RenderSurface, Scene, SurfaceStyle};
use crate::{LatLng, PathRegistry};

const STYLE: SurfaceStyle = SurfaceStyle {
    playing_stroke: (4.0, 0.5),
    paused_stroke: (6.0, 0.9),
    start_radius: 7.0,
    end_half_side: 5.0,
    current_radius: 9.0,
};

// When there's nothing to show, center on the continental US
const DEFAULT_CENTER: (f64, f64) = (-95.7129, 37.0902);
// Degrees added around a dataset that's just one point, or a straight line
const MIN_PADDING: f64 = 0.005;

/// Draws paths over a map, projecting longitude and latitude into meters within the bounds of
/// everything loaded. Sizes scale with the map, so markers stay visible at any extent.
pub struct GeoMapSurface {
    gps_bounds: GPSBounds,
    bounds: Bounds,
}

impl GeoMapSurface {
    pub fn new(registry: &PathRegistry) -> Self {
        let mut gps_bounds = GPSBounds::new();
        let mut any = false;
        for path in registry.paths() {
            for sample in path.samples.iter() {
                gps_bounds.update(LonLat::new(sample.longitude, sample.latitude));
                any = true;
            }
        }
        if !any {
            gps_bounds.update(LonLat::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1));
        }
        if gps_bounds.max_lon - gps_bounds.min_lon < MIN_PADDING
            || gps_bounds.max_lat - gps_bounds.min_lat < MIN_PADDING
        {
            let (min_lon, min_lat) = (gps_bounds.min_lon, gps_bounds.min_lat);
            let (max_lon, max_lat) = (gps_bounds.max_lon, gps_bounds.max_lat);
            gps_bounds.update(LonLat::new(min_lon - MIN_PADDING, min_lat - MIN_PADDING));
            gps_bounds.update(LonLat::new(max_lon + MIN_PADDING, max_lat + MIN_PADDING));
        }
        let bounds = gps_bounds.to_bounds();
        Self { gps_bounds, bounds }
    }

    pub fn gps_bounds(&self) -> &GPSBounds {
        &self.gps_bounds
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    // Style sizes are pixels on a 1000 pixel wide map
    fn scale(&self) -> f64 {
        self.bounds.max_x.max(self.bounds.max_y) / 1000.0
    }

    /// The same frame as GeoJSON, in plain longitude and latitude: one LineString per path with
    /// at least two samples, and one Point per marker.
    pub fn to_geojson(&self, frame: &Frame) -> GeoJson {
        let mut features = Vec::new();
        for path in &frame.paths {
            if path.samples.len() > 1 {
                let mut feature = Feature {
                    bbox: None,
                    geometry: Some(Geometry::new(Value::LineString(
                        path.samples
                            .iter()
                            .map(|s| vec![s.longitude, s.latitude])
                            .collect(),
                    ))),
                    id: None,
                    properties: None,
                    foreign_members: None,
                };
                feature.set_property("id", path.name.to_string());
                feature.set_property("color", path.color);
                feature.set_property("kind", "path");
                features.push(feature);
            }
        }

        for marker in self.render(frame).markers {
            let pos = marker.center.to_gps(&self.gps_bounds);
            let mut feature = Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Point(vec![pos.x(), pos.y()]))),
                id: None,
                properties: None,
                foreign_members: None,
            };
            feature.set_property("id", marker.id.to_string());
            feature.set_property("color", marker.color);
            feature.set_property("kind", marker.kind.describe());
            features.push(feature);
        }

        GeoJson::FeatureCollection(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    pub fn to_geojson_string(&self, frame: &Frame) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_geojson(frame))?)
    }
}

impl RenderSurface for GeoMapSurface {
    fn dims(&self) -> (f64, f64) {
        (self.bounds.max_x, self.bounds.max_y)
    }

    fn render(&self, frame: &Frame) -> Scene {
        build_scene(frame, &STYLE, self.scale(), |pos: LatLng| {
            LonLat::new(pos.lng, pos.lat).to_pt(&self.gps_bounds)
        })
    }
}
