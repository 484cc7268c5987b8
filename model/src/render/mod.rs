//! Turns positioned paths into something drawable. A surface doesn't know how to draw; it produces
//! a [`Scene`] of strokes and markers in its own coordinate space (y grows downward), and the UI
//! turns that into geometry.

mod map;
mod plane;

use geom::Pt2D;
use store::EntityName;

use crate::{LatLng, RenderedPath};

pub use self::map::GeoMapSurface;
pub use self::plane::PlaneSurface;

/// What every surface consumes: the selected paths, and whether playback is running.
pub struct Frame<'a> {
    pub paths: Vec<&'a RenderedPath>,
    pub playback_active: bool,
}

pub trait RenderSurface {
    /// Width and height of the space the scene lives in
    fn dims(&self) -> (f64, f64);

    fn render(&self, frame: &Frame) -> Scene;
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub strokes: Vec<Stroke>,
    pub markers: Vec<Marker>,
}

impl Scene {
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty() && self.markers.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct Stroke {
    pub id: EntityName,
    pub color: &'static str,
    pub points: Vec<Pt2D>,
    pub width: f64,
    pub opacity: f64,
}

#[derive(Clone, Debug)]
pub struct Marker {
    pub id: EntityName,
    pub color: &'static str,
    pub kind: MarkerKind,
    pub center: Pt2D,
    /// Radius for circles, half the side length for squares
    pub size: f64,
}

impl Marker {
    pub fn shape(&self) -> MarkerShape {
        match self.kind {
            MarkerKind::Start | MarkerKind::Current => MarkerShape::Circle,
            MarkerKind::End => MarkerShape::Square,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerKind {
    Start,
    End,
    Current,
}

impl MarkerKind {
    pub fn describe(self) -> &'static str {
        match self {
            MarkerKind::Start => "start",
            MarkerKind::End => "end",
            MarkerKind::Current => "current",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerShape {
    Circle,
    Square,
}

/// Sizes in surface units, before any scaling.
pub(crate) struct SurfaceStyle {
    /// (width, opacity) while playing
    pub playing_stroke: (f64, f64),
    /// (width, opacity) while paused
    pub paused_stroke: (f64, f64),
    pub start_radius: f64,
    pub end_half_side: f64,
    pub current_radius: f64,
}

/// While playing, every path gets a thin stroke and one marker where the entity is now. While
/// paused, a bolder stroke with start and end markers.
pub(crate) fn build_scene<F: Fn(LatLng) -> Pt2D>(
    frame: &Frame,
    style: &SurfaceStyle,
    scale: f64,
    project: F,
) -> Scene {
    let mut scene = Scene::default();
    let (width, opacity) = if frame.playback_active {
        style.playing_stroke
    } else {
        style.paused_stroke
    };

    for path in &frame.paths {
        if path.samples.is_empty() {
            continue;
        }
        let points: Vec<Pt2D> = path.samples.iter().map(|s| project(s.position())).collect();

        let marker = |kind, center, size: f64| Marker {
            id: path.name.clone(),
            color: path.color,
            kind,
            center,
            size: size * scale,
        };
        match (frame.playback_active, path.current_position) {
            (true, Some(pos)) => {
                scene.markers.push(marker(
                    MarkerKind::Current,
                    project(pos),
                    style.current_radius,
                ));
            }
            _ => {
                scene
                    .markers
                    .push(marker(MarkerKind::Start, points[0], style.start_radius));
                if points.len() > 1 {
                    scene.markers.push(marker(
                        MarkerKind::End,
                        points[points.len() - 1],
                        style.end_half_side,
                    ));
                }
            }
        }

        scene.strokes.push(Stroke {
            id: path.name.clone(),
            color: path.color,
            points,
            width: width * scale,
            opacity,
        });
    }
    scene
}
