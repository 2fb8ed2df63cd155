//! Circular-arc geometry for curved directed edges.

/// Arc radius as a multiple of the straight-line endpoint distance.
pub const CURVE_FACTOR: f64 = 1.5;

/// A circular arc between two node positions, in the form the canvas
/// `arc` call wants: center, radius and the two endpoint angles. Sweeping
/// from `start_angle` to `end_angle` with increasing angle traces the
/// minor arc from source to target.
#[derive(Clone, Copy, Debug)]
pub struct LinkArc {
	pub cx: f64,
	pub cy: f64,
	pub radius: f64,
	pub start_angle: f64,
	pub end_angle: f64,
}

impl LinkArc {
	/// Arc from `(x1, y1)` to `(x2, y2)`. `None` when the endpoints
	/// (nearly) coincide and no arc exists.
	pub fn between(x1: f64, y1: f64, x2: f64, y2: f64) -> Option<LinkArc> {
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return None;
		}
		let radius = CURVE_FACTOR * dist;
		let (ux, uy) = (dx / dist, dy / dist);
		// Center sits to the right of the source->target direction (screen
		// coordinates, y down), so the minor arc bulges to the left.
		let h = (radius * radius - (dist * dist) / 4.0).sqrt();
		let (cx, cy) = (x1 + dx / 2.0 - uy * h, y1 + dy / 2.0 + ux * h);

		Some(LinkArc {
			cx,
			cy,
			radius,
			start_angle: (y1 - cy).atan2(x1 - cx),
			end_angle: (y2 - cy).atan2(x2 - cx),
		})
	}

	/// Point on the arc at `angle`.
	pub fn point_at(&self, angle: f64) -> (f64, f64) {
		(
			self.cx + self.radius * angle.cos(),
			self.cy + self.radius * angle.sin(),
		)
	}

	/// Unit tangent at the target endpoint, pointing in the direction of
	/// travel. Orients the arrowhead.
	pub fn end_tangent(&self) -> (f64, f64) {
		(-self.end_angle.sin(), self.end_angle.cos())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn assert_close(a: (f64, f64), b: (f64, f64)) {
		assert!(
			(a.0 - b.0).abs() < 1e-6 && (a.1 - b.1).abs() < 1e-6,
			"{a:?} != {b:?}"
		);
	}

	#[test]
	fn radius_is_curve_factor_times_distance() {
		// 3-4-5 triangle, distance 50
		let arc = LinkArc::between(0.0, 0.0, 30.0, 40.0).unwrap();
		assert!((arc.radius - CURVE_FACTOR * 50.0).abs() < 1e-9);
	}

	#[test]
	fn arc_passes_through_both_endpoints() {
		let arc = LinkArc::between(12.0, -7.0, 98.0, 33.0).unwrap();
		assert_close(arc.point_at(arc.start_angle), (12.0, -7.0));
		assert_close(arc.point_at(arc.end_angle), (98.0, 33.0));
	}

	#[test]
	fn coincident_endpoints_have_no_arc() {
		assert!(LinkArc::between(5.0, 5.0, 5.0, 5.0).is_none());
	}

	#[test]
	fn arc_bulges_left_of_travel() {
		// Eastward edge in screen coordinates: center below the chord,
		// arc above it.
		let arc = LinkArc::between(0.0, 0.0, 100.0, 0.0).unwrap();
		assert!(arc.cy > 0.0);
	}

	#[test]
	fn end_tangent_is_unit_and_perpendicular_to_radius() {
		let arc = LinkArc::between(3.0, 4.0, 60.0, -20.0).unwrap();
		let (tx, ty) = arc.end_tangent();
		assert!((tx * tx + ty * ty - 1.0).abs() < 1e-9);

		let (px, py) = arc.point_at(arc.end_angle);
		let dot = tx * (px - arc.cx) + ty * (py - arc.cy);
		assert!(dot.abs() < 1e-6);
	}

	#[test]
	fn end_tangent_points_towards_target() {
		let arc = LinkArc::between(0.0, 0.0, 100.0, 0.0).unwrap();
		let (tx, _) = arc.end_tangent();
		assert!(tx > 0.0);
	}
}
