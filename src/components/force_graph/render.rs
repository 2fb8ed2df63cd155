use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::DefaultNodeIdx;
use web_sys::CanvasRenderingContext2d;

use super::geometry::LinkArc;
use super::state::{ForceGraphState, NODE_RADIUS};
use crate::data::LinkKind;

const BACKGROUND: &str = "#ffffff";
const NODE_FILL: &str = "#000";
const NODE_STROKE: &str = "#fff";
const LABEL_FILL: &str = "#333";
const LABEL_FONT: &str = "10px sans-serif";
const STROKE_WIDTH: f64 = 1.5;
const ARROW_SIZE: f64 = 8.0;

const LEGEND_X: f64 = 20.0;
const LEGEND_Y: f64 = 20.0;
const LEGEND_ROW: f64 = 20.0;
const LEGEND_SWATCH: f64 = 12.0;

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.set_font(LABEL_FONT);
	ctx.set_text_baseline("middle");

	let positions = state.positions();
	draw_edges(state, ctx, &positions);
	draw_nodes(state, ctx);
	draw_legend(ctx);
}

fn draw_edges(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	positions: &HashMap<DefaultNodeIdx, (f64, f64)>,
) {
	ctx.set_line_width(STROKE_WIDTH);

	for edge in state.edges() {
		let (Some(&(x1, y1)), Some(&(x2, y2))) =
			(positions.get(&edge.source), positions.get(&edge.target))
		else {
			continue;
		};
		let Some(arc) = LinkArc::between(x1, y1, x2, y2) else {
			continue;
		};
		let color = edge.kind.color();

		ctx.set_stroke_style_str(color);
		ctx.begin_path();
		let _ = ctx.arc(arc.cx, arc.cy, arc.radius, arc.start_angle, arc.end_angle);
		ctx.stroke();

		// Arrowhead at the target end, pulled back along the arc tangent
		// so it clears the node circle.
		let (tx, ty) = arc.end_tangent();
		let (tip_x, tip_y) = (
			x2 - tx * (NODE_RADIUS + STROKE_WIDTH),
			y2 - ty * (NODE_RADIUS + STROKE_WIDTH),
		);
		let (back_x, back_y) = (tip_x - tx * ARROW_SIZE, tip_y - ty * ARROW_SIZE);
		let (px, py) = (-ty * ARROW_SIZE * 0.5, tx * ARROW_SIZE * 0.5);

		ctx.set_fill_style_str(color);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_line_width(STROKE_WIDTH);

	state.graph.visit_nodes(|node| {
		let (x, y) = (node.x() as f64, node.y() as f64);

		ctx.begin_path();
		let _ = ctx.arc(x, y, NODE_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(NODE_FILL);
		ctx.fill();
		ctx.set_stroke_style_str(NODE_STROKE);
		ctx.stroke();

		ctx.set_fill_style_str(LABEL_FILL);
		let _ = ctx.fill_text(&node.data.user_data.id, x + 6.0, y);
	});
}

fn draw_legend(ctx: &CanvasRenderingContext2d) {
	for (i, kind) in LinkKind::ALL.iter().enumerate() {
		let y = LEGEND_Y + (i as f64) * LEGEND_ROW;
		ctx.set_fill_style_str(kind.color());
		ctx.fill_rect(LEGEND_X, y, LEGEND_SWATCH, LEGEND_SWATCH);
		ctx.set_fill_style_str(LABEL_FILL);
		let _ = ctx.fill_text(kind.label(), LEGEND_X + 18.0, y + LEGEND_SWATCH / 2.0);
	}
}
