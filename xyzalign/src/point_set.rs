//! Ordered, labelled 3-D points.

use nalgebra::{Matrix3, Vector3};

/// One atom: an opaque label (usually the element symbol) and its position.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub label: String,
    pub position: Vector3<f64>,
}

impl Point {
    pub fn new(label: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            label: label.into(),
            position: Vector3::new(x, y, z),
        }
    }
}

/// Ordered collection of points.
///
/// Each point is identified by its 1-based position in the sequence. Points are
/// never added, removed or reordered once the set is built; transforms only
/// touch positions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Point with the given 1-based identifier
    pub fn get(&self, id: usize) -> Option<&Point> {
        id.checked_sub(1).and_then(|i| self.points.get(i))
    }

    pub fn positions(&self) -> Vec<Vector3<f64>> {
        self.points.iter().map(|p| p.position).collect()
    }

    /// Subtracts `origin` from every position.
    pub fn center_on(&mut self, origin: &Vector3<f64>) {
        self.translate(&-origin);
    }

    /// Adds `offset` to every position.
    pub fn translate(&mut self, offset: &Vector3<f64>) {
        for p in &mut self.points {
            p.position += offset;
        }
    }

    /// Row-vector points times `Rᵗ`, i.e. `p ← R × p`.
    pub fn apply_rotation(&mut self, rotation: &Matrix3<f64>) {
        for p in &mut self.points {
            p.position = rotation * p.position;
        }
    }

    /// Row-vector points times `M` as given, i.e. `p ← Mᵗ × p`.
    ///
    /// Note the transpose relative to [`PointSet::apply_rotation`]. `M` is not
    /// checked for orthogonality.
    pub fn apply_matrix(&mut self, matrix: &Matrix3<f64>) {
        let m_t = matrix.transpose();
        for p in &mut self.points {
            p.position = m_t * p.position;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn water() -> PointSet {
        PointSet::new(vec![
            Point::new("O", 0.0, 0.0, 0.0),
            Point::new("H", 0.9572, 0.0, 0.0),
            Point::new("H", -0.24, 0.9266, 0.0),
        ])
    }

    #[test]
    fn test_one_based_lookup() {
        let set = water();
        assert_eq!(set.get(1).unwrap().label, "O");
        assert_eq!(set.get(3).unwrap().position.y, 0.9266);
        assert!(set.get(0).is_none());
        assert!(set.get(4).is_none());
    }

    #[test]
    fn test_translate_is_exact() {
        let mut set = water();
        let before = set.positions();
        let offset = Vector3::new(2.11, 0.0, -3.0);
        set.translate(&offset);
        for (p, b) in set.positions().iter().zip(&before) {
            assert_eq!(*p, b + offset);
        }
    }

    #[test]
    fn test_matrix_is_applied_untransposed() {
        let mut set = PointSet::new(vec![Point::new("C", 1.0, 0.0, 0.0)]);
        // Row-major [[0, 1, 0], [0, 0, 1], [1, 0, 0]]: row vector (1, 0, 0) · M = (0, 1, 0)
        let m = Matrix3::new(0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0);
        set.apply_matrix(&m);
        assert_relative_eq!(set.points()[0].position, Vector3::y(), epsilon = 1e-15);

        let mut set = PointSet::new(vec![Point::new("C", 1.0, 0.0, 0.0)]);
        set.apply_rotation(&m);
        assert_relative_eq!(set.points()[0].position, Vector3::z(), epsilon = 1e-15);
    }

    #[test]
    fn test_labels_and_order_survive_transforms() {
        let mut set = water();
        set.center_on(&Vector3::new(1.0, 1.0, 1.0));
        set.apply_matrix(&-Matrix3::identity());
        let labels: Vec<&str> = set.points().iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["O", "H", "H"]);
    }
}
