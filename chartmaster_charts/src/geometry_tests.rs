// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::vec;
use alloc::vec::Vec;
use core::f64::consts::{FRAC_PI_2, TAU};

use chartmaster_data::{Dataset, Record};
use kurbo::{Point, Rect};

use crate::{
    AxisStyle, BarChartSpec, ChartConfig, ChartGeometry, ChartLayout, ChartLayoutSpec,
    ChartSpec, InteractionConfig, LineChartSpec, PieChartSpec, Primitive, ScatterChartSpec,
    Size, Theme, ViewEvent, ViewState, hit_test, tooltip_at, z_order,
};

fn assert_close(a: f64, b: f64, what: &str) {
    assert!((a - b).abs() < 1e-9, "{what}: {a} != {b}");
}

fn rects(g: &ChartGeometry) -> Vec<Rect> {
    g.marks
        .iter()
        .filter_map(|m| match m.primitive {
            Primitive::Rect { rect, .. } => Some(rect),
            _ => None,
        })
        .collect()
}

#[test]
fn line_points_span_the_plot_width() {
    let data = Dataset::new(vec![
        Record::new().with("x", 0.0).with("y", 10.0),
        Record::new().with("x", 1.0).with("y", 15.0),
        Record::new().with("x", 2.0).with("y", 35.0),
    ]);
    let plot = Rect::new(0.0, 0.0, 300.0, 200.0);
    let g = ChartSpec::from(LineChartSpec::new("x", "y"))
        .build(&data, plot, &Theme::light())
        .unwrap();
    let Primitive::Polyline { points, .. } = &g.marks[0].primitive else {
        panic!("line charts start with their polyline");
    };
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    assert_eq!(xs, [0.0, 150.0, 300.0]);
    // y runs from zero, so the largest value touches the top of the plot.
    assert_close(points[2].y, 0.0, "max y");
    assert_close(points[0].y, 200.0 - 200.0 * 10.0 / 35.0, "first y");
}

#[test]
fn bars_fill_bands_with_padding_gaps() {
    let data = Dataset::new(vec![
        Record::new().with("k", "A").with("v", 1.0),
        Record::new().with("k", "B").with("v", 2.0),
        Record::new().with("k", "C").with("v", 3.0),
    ]);
    let plot = Rect::new(0.0, 0.0, 300.0, 100.0);
    let g = ChartSpec::from(BarChartSpec::new("k", "v"))
        .build(&data, plot, &Theme::light())
        .unwrap();
    let bars = rects(&g);
    assert_eq!(bars.len(), 3);
    for bar in &bars {
        assert_close(bar.width(), 300.0 / 3.3, "bandwidth");
        assert_close(bar.y1, 100.0, "baseline");
    }
    assert_close(bars[1].x0 - bars[0].x1, 300.0 / 3.3 * 0.1, "gap");
    let total: f64 = bars.iter().map(|b| b.width()).sum::<f64>() * 1.1;
    assert_close(total, 300.0, "bands plus gaps");
}

#[test]
fn pie_arcs_close_the_circle() {
    let data = Dataset::new(
        [3.0, 1.0, 4.0, 1.0, 5.0]
            .into_iter()
            .enumerate()
            .map(|(i, v)| Record::new().with("k", alloc::format!("s{i}").as_str()).with("v", v))
            .collect(),
    );
    let g = ChartSpec::from(PieChartSpec::new("v", "k"))
        .build(&data, Rect::new(0.0, 0.0, 200.0, 200.0), &Theme::light())
        .unwrap();
    let arcs: Vec<(f64, f64)> = g
        .marks
        .iter()
        .filter_map(|m| match m.primitive {
            Primitive::Arc {
                start_angle,
                end_angle,
                ..
            } => Some((start_angle, end_angle)),
            _ => None,
        })
        .collect();
    assert_eq!(arcs.len(), 5);
    assert_close(arcs[0].0, -FRAC_PI_2, "first start");
    let sweep: f64 = arcs.iter().map(|(a, b)| b - a).sum();
    assert_close(sweep, TAU, "total sweep");
    for pair in arcs.windows(2) {
        assert_eq!(pair[0].1, pair[1].0, "slices are contiguous");
    }
}

#[test]
fn scene_is_in_paint_order() {
    let data = Dataset::new(vec![
        Record::new().with("x", 1.0).with("y", 2.0),
        Record::new().with("x", 3.0).with("y", 5.0),
    ]);
    let theme = Theme::light();
    let g = ChartSpec::from(ScatterChartSpec::new("x", "y"))
        .build(&data, Rect::new(0.0, 0.0, 200.0, 100.0), &theme)
        .unwrap();
    let scene = g.scene(&AxisStyle::from_theme(&theme));
    assert!(scene.len() > g.marks.len(), "axes add marks");
    assert!(scene.windows(2).all(|w| w[0].z_index <= w[1].z_index));
    assert_eq!(scene[0].z_index, z_order::GRID_LINES);
}

#[test]
fn toggled_groups_disappear_without_recoloring() {
    let data = Dataset::new(vec![
        Record::new().with("x", 1.0).with("y", 1.0).with("g", "a"),
        Record::new().with("x", 2.0).with("y", 2.0).with("g", "b"),
        Record::new().with("x", 3.0).with("y", 3.0).with("g", "c"),
    ]);
    let theme = Theme::light();
    let plot = Rect::new(0.0, 0.0, 200.0, 200.0);
    let spec = ChartSpec::from(ScatterChartSpec::new("x", "y").with_group("g"));
    let cfg = InteractionConfig::default();

    let view = ViewState::default().apply(&ViewEvent::ToggleSeries(0), &cfg);
    let g = spec.build_view(&data, plot, &theme, &view).unwrap();
    assert_eq!(g.marks.len(), 2);
    assert!(g.marks_for_row(0).next().is_none(), "group a is hidden");
    let Primitive::Circle { fill, .. } = &g.marks_for_row(2).next().unwrap().primitive else {
        panic!("scatter marks are circles");
    };
    assert_eq!(*fill, Some(theme.categorical[2].into()));

    let view = view.apply(&ViewEvent::ToggleSeries(0), &cfg);
    let g = spec.build_view(&data, plot, &theme, &view).unwrap();
    assert_eq!(g.marks.len(), 3);
    assert!(g.legend.unwrap().items.iter().all(|i| i.active));
}

#[test]
fn layout_build_hover_and_tooltip() {
    let data = Dataset::new(vec![
        Record::new().with("month", "Jan").with("sales", 40.0),
        Record::new().with("month", "Feb").with("sales", 80.0),
    ]);
    let spec = ChartSpec::from(BarChartSpec::new("month", "sales"));
    let layout = ChartLayout::arrange(&ChartLayoutSpec::new(
        Size::new(460.0, 250.0),
        spec.margins(),
    ));
    assert_eq!(layout.plot, Rect::new(40.0, 20.0, 440.0, 220.0));

    let g = spec.build(&data, layout.plot, &Theme::light()).unwrap();
    let feb = rects(&g)[1];
    assert_eq!(hit_test(&g, feb.center()), Some(1));
    assert_eq!(hit_test(&g, Point::new(41.0, 21.0)), None);

    let tip = tooltip_at(&spec, &g, &data, feb.center(), &InteractionConfig::default()).unwrap();
    assert_eq!(tip.lines, ["month: Feb", "sales: 80"]);
}

#[test]
fn config_colors_flow_into_geometry() {
    let mut config = ChartConfig::default();
    config.set("style.seriesColor", "#10B981").unwrap();
    config.set("style.strokeWidth", 4.0).unwrap();
    let theme = config.apply_to_theme(&Theme::light());
    let data = Dataset::new(vec![
        Record::new().with("x", 0.0).with("y", 1.0),
        Record::new().with("x", 1.0).with("y", 3.0),
    ]);
    let g = ChartSpec::from(LineChartSpec::new("x", "y"))
        .with_config(&config)
        .build(&data, Rect::new(0.0, 0.0, 100.0, 100.0), &theme)
        .unwrap();
    let Primitive::Polyline { stroke, .. } = &g.marks[0].primitive else {
        panic!("line charts start with their polyline");
    };
    assert_eq!(stroke.stroke_width, 4.0);
    // Default opacity 0.8 rides along on the series color.
    let expected = peniko::Color::from_rgb8(0x10, 0xB9, 0x81).with_alpha(0.8);
    assert_eq!(stroke.brush, expected.into());
}
