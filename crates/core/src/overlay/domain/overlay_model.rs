use std::sync::Arc;

use crate::detection::domain::face_observation::FaceObservation;
use crate::gaze::domain::coordinate_mapper::{CoordinateMapper, ProjectedGeometry};
use crate::overlay::domain::shape::{Shape, ShapeKind};
use crate::shared::geometry::Size;

/// Renderable outlines for the most recently evaluated frame.
///
/// Every [`replace_frame`](Self::replace_frame) swaps in a brand-new shape
/// set; nothing from the previous frame survives. Consumers hold an
/// `Arc<[Shape]>` snapshot, so they always see one whole frame.
pub struct OverlayModel {
    mapper: CoordinateMapper,
    shapes: Arc<[Shape]>,
}

impl OverlayModel {
    pub fn new(mapper: CoordinateMapper) -> Self {
        Self {
            mapper,
            shapes: Arc::from(Vec::new()),
        }
    }

    /// Projects and installs this frame's shapes: one rectangle per face,
    /// plus one polygon per eye when both eyes have landmarks. Faces with
    /// non-finite geometry draw nothing.
    pub fn replace_frame(&mut self, observations: &[FaceObservation], view: Size) -> &[Shape] {
        let geometries: Vec<ProjectedGeometry> = observations
            .iter()
            .enumerate()
            .filter_map(|(face_index, obs)| {
                let geometry = self.mapper.try_project(obs, view);
                if geometry.is_none() {
                    log::debug!("Face {face_index} not drawn: non-finite geometry");
                }
                geometry
            })
            .collect();
        self.replace_with_geometry(&geometries)
    }

    /// Installs shapes for geometry that has already been projected.
    pub fn replace_with_geometry(&mut self, geometries: &[ProjectedGeometry]) -> &[Shape] {
        let mut shapes = Vec::with_capacity(geometries.len() * 3);
        for geometry in geometries {
            shapes.push(Shape::face(geometry.face_path.clone()));
            shapes.extend(geometry.eye_paths.iter().cloned().map(Shape::eye));
        }
        self.shapes = Arc::from(shapes);
        &self.shapes
    }

    pub fn clear(&mut self) {
        self.shapes = Arc::from(Vec::new());
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn snapshot(&self) -> Arc<[Shape]> {
        Arc::clone(&self.shapes)
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn count_of(&self, kind: ShapeKind) -> usize {
        self.shapes.iter().filter(|s| s.kind == kind).count()
    }
}

impl Default for OverlayModel {
    fn default() -> Self {
        Self::new(CoordinateMapper::default())
    }
}
