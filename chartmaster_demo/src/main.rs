// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Builds every ChartMaster chart type from sample data and writes an HTML report.
//!
//! Set `RUST_LOG=debug` to see chart builds and view-state transitions.

mod html;
mod svg;

use std::error::Error;

use chartmaster_charts::{
    Annotations, AreaChartSpec, BarChartSpec, BubbleChartSpec, CandlestickChartSpec,
    ChartConfig, ChartKind, ChartLayout, ChartLayoutSpec, ChartSpec, HeuristicTextMeasurer,
    LegendPlacement, LineChartSpec, PieChartSpec, PieSort, RadarChartSpec, ScatterChartSpec,
    Size, Theme, ThemeMode, ViewEvent, ViewState, hit_test, tooltip_at,
};
use chartmaster_data::{Dataset, Record, SortState, Summary, Value, days_from_civil};
use kurbo::Point;

use crate::html::Section;
use crate::svg::SvgScene;

const VIEW_SIZE: Size = Size::new(460.0, 300.0);
const MS_PER_DAY: i64 = 86_400_000;

/// One chart in the report.
struct Demo {
    title: &'static str,
    spec: ChartSpec,
    data: Dataset,
    mode: ThemeMode,
    events: Vec<ViewEvent>,
    notes: Vec<(&'static str, Point)>,
    /// Pointer position, relative to the plot center, used to demo hover and tooltips.
    hover: Option<Point>,
}

impl Demo {
    fn new(title: &'static str, spec: impl Into<ChartSpec>, data: Dataset) -> Self {
        Self {
            title,
            spec: spec.into(),
            data,
            mode: ThemeMode::Light,
            events: Vec::new(),
            notes: Vec::new(),
            hover: None,
        }
    }

    fn with_mode(mut self, mode: ThemeMode) -> Self {
        self.mode = mode;
        self
    }

    fn with_events(mut self, events: impl IntoIterator<Item = ViewEvent>) -> Self {
        self.events.extend(events);
        self
    }

    fn with_note(mut self, text: &'static str, at: Point) -> Self {
        self.notes.push((text, at));
        self
    }

    fn with_hover(mut self, offset: Point) -> Self {
        self.hover = Some(offset);
        self
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_default_env().init();

    let mut config = ChartConfig::default();
    config.set("style.strokeWidth", 2.5)?;
    config.set("axes.tick_size", 6.0)?;

    let demos = vec![
        Demo::new(
            "Monthly sales (line)",
            LineChartSpec::new("index", "sales").with_points(4.0),
            sales(),
        )
        .with_note("Best month", Point::new(300.0, 40.0)),
        Demo::new("Monthly sales (bar)", BarChartSpec::new("month", "sales"), sales())
            .with_hover(Point::new(-10.0, 80.0)),
        Demo::new(
            "Browser share (pie, one series hidden)",
            PieChartSpec::new("share", "browser").with_sort(PieSort::Descending),
            browsers(),
        )
        .with_events([ViewEvent::ToggleSeries(1)])
        .with_hover(Point::new(30.0, -30.0)),
        Demo::new(
            "Monthly profit (area, zoomed)",
            AreaChartSpec::new("index", "profit"),
            sales(),
        )
        .with_events([
            ViewEvent::ZoomIn,
            ViewEvent::ZoomIn,
            ViewEvent::Pan { dx: 20.0, dy: 0.0 },
        ]),
        Demo::new(
            "Height vs weight (scatter)",
            ScatterChartSpec::new("height", "weight").with_group("group"),
            measurements(),
        )
        .with_hover(Point::ZERO),
        Demo::new(
            "Countries (bubble)",
            BubbleChartSpec::new("gdp", "life", "population")
                .with_category("continent")
                .with_label("country"),
            countries(),
        )
        .with_hover(Point::ZERO),
        Demo::new("Stock prices (candlestick)", CandlestickChartSpec::new(), stock())
            .with_hover(Point::ZERO),
        Demo::new(
            "Stock prices (candlestick, dark)",
            CandlestickChartSpec::new().with_volume(None),
            stock(),
        )
        .with_mode(ThemeMode::Dark),
        Demo::new("Player skills (radar)", RadarChartSpec::new("player"), players())
            .with_events([ViewEvent::ToggleSeries(2), ViewEvent::ToggleSeries(2)]),
    ];

    let mut sections = Vec::with_capacity(demos.len() + 2);
    for (i, demo) in demos.iter().enumerate() {
        sections.push(render_demo(i, demo, &config)?);
    }
    sections.push(table_section()?);
    sections.push(Section {
        title: "Settings".into(),
        body: String::new(),
        notes: vec![
            serde_json::to_string_pretty(&config)?,
            format!("chart types: {}", ChartKind::ALL.map(ChartKind::name).join(", ")),
        ],
    });

    let html = html::render_report("ChartMaster demo", &sections);
    std::fs::write("chartmaster_demo.html", html)?;
    println!("wrote chartmaster_demo.html");
    Ok(())
}

fn render_demo(
    index: usize,
    demo: &Demo,
    config: &ChartConfig,
) -> Result<Section, Box<dyn Error>> {
    let theme = config.apply_to_theme(&Theme::for_mode(demo.mode));
    let spec = demo.spec.clone().with_config(config);
    let view = ViewState::default().replay(&demo.events, &config.interaction);

    // Arrange once without a legend, then again once the legend size is known.
    let mut layout_spec = ChartLayoutSpec::new(VIEW_SIZE, spec.margins());
    let mut layout = ChartLayout::arrange(&layout_spec);
    let mut geometry = spec.build_view(&demo.data, layout.plot, &theme, &view)?;
    if let Some(legend) = &geometry.legend {
        let size = legend.measure(&HeuristicTextMeasurer);
        layout_spec = layout_spec.with_legend(size, LegendPlacement::default());
        layout = ChartLayout::arrange(&layout_spec);
        geometry = spec.build_view(&demo.data, layout.plot, &theme, &view)?;
    }
    config.apply_to_geometry(&mut geometry);

    let mut scene = SvgScene::new(layout.view, theme.background);
    let transform = view.transform(layout.center());
    scene.set_view_transform(transform, layout.plot, &format!("plot{index}"));
    scene.extend_content(geometry.scene(&config.axis_style(&theme)));
    if let (Some(legend), Some(rect)) = (&geometry.legend, layout.legend) {
        scene.extend_overlay(legend.marks(rect.origin()));
    }

    let mut annotations = Annotations::new();
    for (text, at) in &demo.notes {
        annotations.add(text, *at);
    }
    scene.extend_overlay(annotations.marks(&theme));

    let mut notes = vec![format!("view: {}", serde_json::to_string(&view)?)];
    if let Some(offset) = demo.hover {
        // Screen position to plot position through the inverse view transform.
        let screen = layout.center() + offset.to_vec2();
        let pt = transform.inverse() * screen;
        let hovered = view.apply(
            &ViewEvent::Hover(hit_test(&geometry, pt)),
            &config.interaction,
        );
        match tooltip_at(&spec, &geometry, &demo.data, pt, &config.interaction) {
            Some(tip) => {
                notes.push(format!("hovered row {:?}", hovered.hovered_id));
                notes.extend(tip.lines);
            }
            None => notes.push("nothing under the pointer".into()),
        }
    }

    Ok(Section {
        title: demo.title.into(),
        body: scene.to_svg_string(),
        notes,
    })
}

fn table_section() -> Result<Section, Box<dyn Error>> {
    let mut data = sales();
    // A user edit: text that parses as a number is stored as one.
    data.set_cell(2, "sales", " 61 ")?;
    let sort = SortState::default().toggle("sales").toggle("sales");
    let columns = ["month", "sales", "profit"];

    let mut body = String::from("<table><tr>");
    for c in columns {
        body.push_str(&format!("<th>{c}</th>"));
    }
    body.push_str("</tr>");
    for row in sort.sorted_rows(&data) {
        let Some(record) = data.record(row) else {
            continue;
        };
        body.push_str("<tr>");
        for c in columns {
            let cell = record.get(c).map(Value::to_string).unwrap_or_default();
            body.push_str(&format!("<td>{}</td>", svg::escape_xml(&cell)));
        }
        body.push_str("</tr>");
    }
    body.push_str("</table>");

    let notes = match Summary::of(&data, "sales") {
        Some(s) => vec![
            format!("count {}  sum {}  mean {:.2}", s.count, s.sum, s.mean),
            format!("median {}  std dev {:.2}", s.median, s.std_dev),
            format!("min {}  max {}", s.min, s.max),
        ],
        None => vec!["no numeric sales".into()],
    };
    Ok(Section {
        title: format!("Sales table (sorted {:?})", sort.order),
        body,
        notes,
    })
}

fn sales() -> Dataset {
    let months = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];
    let sales = [42.0, 55.0, 48.0, 70.0, 66.0, 81.0];
    let profit = [12.0, 18.0, 9.0, 25.0, 21.0, 30.0];
    Dataset::new(
        months
            .iter()
            .zip(sales.iter().zip(profit))
            .enumerate()
            .map(|(i, (m, (s, p)))| {
                Record::new()
                    .with("index", i32::try_from(i).unwrap_or_default())
                    .with("month", *m)
                    .with("sales", *s)
                    .with("profit", p)
            })
            .collect(),
    )
}

fn browsers() -> Dataset {
    Dataset::new(
        [
            ("Chrome", 64.0),
            ("Safari", 19.0),
            ("Edge", 5.0),
            ("Firefox", 3.0),
            ("Other", 9.0),
        ]
        .into_iter()
        .map(|(b, s)| Record::new().with("browser", b).with("share", s))
        .collect(),
    )
}

fn measurements() -> Dataset {
    let groups = ["A", "B", "C"];
    Dataset::new(
        (0..30_i32)
            .map(|i| {
                let g = i % 3;
                let height = 150.0 + f64::from((i * 37) % 40) + f64::from(g * 5);
                let weight = 45.0 + 0.6 * (height - 150.0) + f64::from((i * 13) % 9);
                Record::new()
                    .with("height", height)
                    .with("weight", weight)
                    .with("group", groups[usize::try_from(g).unwrap_or_default()])
            })
            .collect(),
    )
}

fn countries() -> Dataset {
    Dataset::new(
        [
            ("Norway", "Europe", 67.0, 83.2, 5.4),
            ("Germany", "Europe", 48.0, 81.0, 83.2),
            ("Japan", "Asia", 34.0, 84.5, 125.7),
            ("India", "Asia", 2.4, 70.8, 1408.0),
            ("Brazil", "Americas", 8.9, 75.9, 214.3),
            ("Canada", "Americas", 52.0, 82.3, 38.2),
            ("Nigeria", "Africa", 2.1, 55.2, 213.4),
        ]
        .into_iter()
        .map(|(country, continent, gdp, life, population)| {
            Record::new()
                .with("country", country)
                .with("continent", continent)
                .with("gdp", gdp)
                .with("life", life)
                .with("population", population)
        })
        .collect(),
    )
}

fn stock() -> Dataset {
    let mut close = 100.0;
    let records = (0..20_i32)
        .map(|i| {
            let open = close;
            let drift = f64::from((i * 7) % 11) - 5.0;
            close = open + drift;
            let high = open.max(close) + f64::from(i % 4) + 0.5;
            let low = open.min(close) - f64::from((i + 2) % 3) - 0.5;
            let day = days_from_civil(2024, 1, 1) + i64::from(i);
            Record::new()
                .with("date", Value::Date(day * MS_PER_DAY))
                .with("open", open)
                .with("high", high)
                .with("low", low)
                .with("close", close)
                .with("volume", f64::from(1_000_000 + (i * 137_911) % 900_000))
        })
        .collect();
    Dataset::new(records)
}

fn players() -> Dataset {
    Dataset::new(
        [
            ("Ana", [80.0, 65.0, 90.0, 70.0, 55.0]),
            ("Ben", [60.0, 85.0, 70.0, 75.0, 80.0]),
            ("Chloe", [75.0, 70.0, 60.0, 95.0, 65.0]),
        ]
        .into_iter()
        .map(|(name, skills)| {
            ["speed", "strength", "agility", "stamina", "accuracy"]
                .into_iter()
                .zip(skills)
                .fold(Record::new().with("player", name), |r, (k, v)| r.with(k, v))
        })
        .collect(),
    )
}
