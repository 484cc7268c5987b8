use std::rc::Rc;

use store::EntityName;

use crate::color::color_for;
use crate::trajectory::project;
use crate::{EntityID, EntityTrack, LatLng, PositionSample};

/// What the render surfaces consume for one entity.
#[derive(Clone, Debug)]
pub struct RenderedPath {
    pub id: EntityID,
    pub name: EntityName,
    pub color: &'static str,
    /// Shared with the entity's track
    pub samples: Rc<[PositionSample]>,
    /// None only when there are no samples
    pub current_position: Option<LatLng>,
}

/// Every entity's path and current position, in the order of the loaded id list. Only the
/// playback engine mutates this; everyone else sees a read-only view.
#[derive(Clone, Debug, Default)]
pub struct PathRegistry {
    paths: Vec<RenderedPath>,
}

impl PathRegistry {
    pub fn new(tracks: &[EntityTrack], time: f64) -> Self {
        let mut registry = Self {
            paths: tracks
                .iter()
                .enumerate()
                .map(|(idx, track)| RenderedPath {
                    id: track.id,
                    name: track.name.clone(),
                    color: color_for(idx),
                    samples: track.trajectory.shared(),
                    current_position: None,
                })
                .collect(),
        };
        registry.project_all(time);
        registry
    }

    pub fn paths(&self) -> &[RenderedPath] {
        &self.paths
    }

    pub fn get(&self, name: &EntityName) -> Option<&RenderedPath> {
        self.paths.iter().find(|path| &path.name == name)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Recalculates every current position at some time.
    pub(crate) fn project_all(&mut self, time: f64) {
        for path in &mut self.paths {
            path.current_position = project(&path.samples, time);
        }
    }

    /// Puts everybody at their last sample, regardless of when that was.
    pub(crate) fn snap_to_end(&mut self) {
        for path in &mut self.paths {
            path.current_position = path.samples.last().map(|s| s.position());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Trajectory;

    fn track(idx: usize, name: &str, samples: Vec<(f64, f64, f64)>) -> EntityTrack {
        EntityTrack {
            id: EntityID(idx),
            name: EntityName::new(name),
            trajectory: Trajectory::new(
                samples
                    .into_iter()
                    .map(|(t, lat, lng)| PositionSample::new(t, lat, lng))
                    .collect(),
            )
            .unwrap(),
        }
    }

    #[test]
    fn positions_follow_time() {
        let tracks = vec![
            track(0, "early", vec![(0.0, 0.0, 0.0), (10.0, 10.0, 10.0)]),
            track(1, "late", vec![(20.0, 1.0, 1.0), (30.0, 2.0, 2.0)]),
            track(2, "nothing", Vec::new()),
        ];
        let mut registry = PathRegistry::new(&tracks, 0.0);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.paths()[0].current_position, Some(LatLng::new(0.0, 0.0)));
        assert_eq!(registry.paths()[1].current_position, Some(LatLng::new(1.0, 1.0)));
        assert_eq!(registry.paths()[2].current_position, None);

        registry.project_all(25.0);
        assert_eq!(registry.paths()[0].current_position, Some(LatLng::new(10.0, 10.0)));
        assert_eq!(registry.paths()[1].current_position, Some(LatLng::new(1.5, 1.5)));

        registry.snap_to_end();
        assert_eq!(registry.paths()[1].current_position, Some(LatLng::new(2.0, 2.0)));
        assert_eq!(registry.paths()[2].current_position, None);
    }

    #[test]
    fn colors_and_shared_samples() {
        let tracks: Vec<EntityTrack> = (0..9)
            .map(|idx| track(idx, &format!("e{idx}"), vec![(0.0, 0.0, 0.0)]))
            .collect();
        let registry = PathRegistry::new(&tracks, 0.0);
        assert_eq!(registry.paths()[0].color, registry.paths()[7].color);
        assert_ne!(registry.paths()[0].color, registry.paths()[1].color);
        assert!(Rc::ptr_eq(
            &registry.paths()[3].samples,
            &tracks[3].trajectory.shared()
        ));
        assert_eq!(
            registry.get(&EntityName::new("e8")).map(|path| path.id),
            Some(EntityID(8))
        );
    }
}
