//! NURBS trajectory shape checks

use crate::error::{ValidationError, ValidationResult};
use crate::protocol::common::Trajectory;

/// Check the structural consistency of a trajectory attached to `edge_id`
///
/// Without a degree (allowed in 2.0.0) the knot vector length cannot be
/// derived and only the remaining checks apply.
pub fn check_trajectory(edge_id: &str, trajectory: &Trajectory) -> ValidationResult<()> {
    if trajectory.control_points.is_empty() {
        return Err(ValidationError::malformed_trajectory(edge_id, "no control points"));
    }

    if let Some(degree) = trajectory.degree {
        let expected = trajectory.control_points.len() + degree as usize + 1;
        if trajectory.knot_vector.len() != expected {
            return Err(ValidationError::malformed_trajectory(
                edge_id,
                format!(
                    "knot vector has {} entries, expected {}",
                    trajectory.knot_vector.len(),
                    expected
                ),
            ));
        }
    }

    if let Some(index) = trajectory
        .knot_vector
        .windows(2)
        .position(|pair| pair[1] < pair[0])
    {
        return Err(ValidationError::malformed_trajectory(
            edge_id,
            format!("knot vector decreases at index {}", index + 1),
        ));
    }

    if let Some(index) = trajectory
        .control_points
        .iter()
        .position(|cp| cp.effective_weight().is_nan() || cp.effective_weight() <= 0.0)
    {
        return Err(ValidationError::malformed_trajectory(
            edge_id,
            format!("control point {index} has a non-positive weight"),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::common::ControlPoint;

    fn cp(x: f64, y: f64) -> ControlPoint {
        ControlPoint { x, y, weight: None }
    }

    fn cubic() -> Trajectory {
        Trajectory {
            degree: Some(3),
            knot_vector: vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0],
            control_points: vec![cp(0.0, 0.0), cp(1.0, 0.0), cp(2.0, 1.0), cp(3.0, 1.0)],
        }
    }

    #[test]
    fn test_valid_cubic() {
        assert!(check_trajectory("e1", &cubic()).is_ok());
    }

    #[test]
    fn test_knot_count_mismatch() {
        let mut trajectory = cubic();
        trajectory.knot_vector.pop();
        let err = check_trajectory("e1", &trajectory).unwrap_err();
        assert_eq!(
            err,
            ValidationError::malformed_trajectory("e1", "knot vector has 7 entries, expected 8")
        );
    }

    #[test]
    fn test_missing_degree_skips_length_check() {
        let mut trajectory = cubic();
        trajectory.degree = None;
        trajectory.knot_vector.pop();
        assert!(check_trajectory("e1", &trajectory).is_ok());
    }

    #[test]
    fn test_decreasing_knots() {
        let mut trajectory = cubic();
        trajectory.knot_vector[4] = -1.0;
        assert!(matches!(
            check_trajectory("e1", &trajectory),
            Err(ValidationError::MalformedTrajectory { .. })
        ));
    }

    #[test]
    fn test_zero_weight() {
        let mut trajectory = cubic();
        trajectory.control_points[2].weight = Some(0.0);
        let err = check_trajectory("e7", &trajectory).unwrap_err();
        assert!(err.to_string().contains("control point 2"));
        assert!(err.to_string().contains("\"e7\""));
    }

    #[test]
    fn test_empty_control_points() {
        let trajectory = Trajectory {
            degree: Some(1),
            knot_vector: vec![0.0, 1.0],
            control_points: Vec::new(),
        };
        assert!(check_trajectory("e1", &trajectory).is_err());
    }
}
