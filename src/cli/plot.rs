//! Chart rendering
//!
//! Reports hand plain series to a `Presenter`; nothing in the analyses
//! knows how (or whether) they are drawn.

use log::info;
use std::path::{Path as FsPath, PathBuf};
use svg::{
    node::{
        element::{Line, Rectangle, Text},
        Text as TextNode,
    },
    Document,
};

use crate::lib::error::Error;

/// Sink for the series produced by reports
pub trait Presenter {
    /// Distribution of values over equal-width bins
    fn histogram(&mut self, title: &str, values: &[u64]) -> Result<(), Error>;
    /// Quartiles and extrema of values
    fn boxplot(&mut self, title: &str, values: &[u64]) -> Result<(), Error>;
    /// One bar per label
    fn bar_chart(&mut self, title: &str, labels: &[String], values: &[u64]) -> Result<(), Error>;
}

/// Discards every chart
#[derive(Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn histogram(&mut self, _: &str, _: &[u64]) -> Result<(), Error> {
        Ok(())
    }

    fn boxplot(&mut self, _: &str, _: &[u64]) -> Result<(), Error> {
        Ok(())
    }

    fn bar_chart(&mut self, _: &str, _: &[String], _: &[u64]) -> Result<(), Error> {
        Ok(())
    }
}

/// Writes each chart as `<slug of title>.svg` in a directory
#[derive(Debug)]
pub struct SvgPresenter {
    dir: PathBuf,
}

impl SvgPresenter {
    pub fn new<P: AsRef<FsPath>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn save(&self, title: &str, document: &Document) -> Result<(), Error> {
        std::fs::create_dir_all(&self.dir)?;
        let file = self.dir.join(format!("{}.svg", slug(title)));
        svg::save(&file, document)?;
        info!("chart written to {}", file.display());
        Ok(())
    }
}

impl Presenter for SvgPresenter {
    fn histogram(&mut self, title: &str, values: &[u64]) -> Result<(), Error> {
        let drawer = RangeDrawer {
            bars: bins(values, HISTOGRAM_BINS)
                .into_iter()
                .map(|b| ((b.start, b.end), b.count as f64))
                .collect(),
            labels: Vec::new(),
        };
        self.save(title, &drawer.render(title))
    }

    fn boxplot(&mut self, title: &str, values: &[u64]) -> Result<(), Error> {
        match BoxDrawer::from(values) {
            Some(drawer) => self.save(title, &drawer.render(title)),
            None => Err(Error::EmptyInput),
        }
    }

    fn bar_chart(&mut self, title: &str, labels: &[String], values: &[u64]) -> Result<(), Error> {
        let drawer = RangeDrawer {
            bars: values
                .iter()
                .enumerate()
                .map(|(i, v)| ((i as f64 + 0.1, i as f64 + 0.9), *v as f64))
                .collect(),
            labels: labels.to_vec(),
        };
        self.save(title, &drawer.render(title))
    }
}

pub const HISTOGRAM_BINS: usize = 10;

/// `[start, end)` holding `count` values, the last bin also holds its end
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Split the range of `values` into `count` equal-width bins
///
/// A degenerate range `[v, v]` is widened to `[v - 0.5, v + 0.5]`.
pub fn bins(values: &[u64], count: usize) -> Vec<Bin> {
    if values.is_empty() || count == 0 {
        return Vec::new();
    }
    let (mut lo, mut hi) = values.iter().fold((f64::MAX, f64::MIN), |(lo, hi), v| {
        (lo.min(*v as f64), hi.max(*v as f64))
    });
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let step = (hi - lo) / count as f64;
    let mut out = (0..count)
        .map(|i| Bin {
            start: lo + step * i as f64,
            end: lo + step * (i + 1) as f64,
            count: 0,
        })
        .collect::<Vec<_>>();
    for v in values {
        let idx = (((*v as f64 - lo) / step) as usize).min(count - 1);
        out[idx].count += 1;
    }
    out
}

/// Linear interpolation between closest ranks of a sorted slice
pub fn quantile(sorted: &[u64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] as f64 + frac * (sorted[hi] as f64 - sorted[lo] as f64)
}

/// Lowercase alphanumeric words joined by dashes
pub fn slug(title: &str) -> String {
    title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

const FWIDTH: f64 = 1000.0;
const FHEIGHT: f64 = 700.0;
const MARGIN: f64 = 60.0;
const STROKE_WIDTH: f64 = 2.0;

/// Maps data coordinates onto the drawing area
struct Frame {
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
}

impl Frame {
    fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        let xmax = if xmax > xmin { xmax } else { xmin + 1.0 };
        let ymax = if ymax > ymin { ymax } else { ymin + 1.0 };
        Self { xmin, xmax, ymin, ymax }
    }

    fn x(&self, x: f64) -> f64 {
        (x - self.xmin) / (self.xmax - self.xmin) * FWIDTH
    }

    fn y(&self, y: f64) -> f64 {
        (self.ymax - y) / (self.ymax - self.ymin) * FHEIGHT
    }

    fn document(&self, title: &str) -> Document {
        let yaxis = Line::new()
            .set("x1", 0.0)
            .set("x2", 0.0)
            .set("y1", 0.0)
            .set("y2", FHEIGHT)
            .set("stroke", "black")
            .set("stroke-width", STROKE_WIDTH);
        let xaxis = Line::new()
            .set("x1", 0.0)
            .set("x2", FWIDTH)
            .set("y1", FHEIGHT)
            .set("y2", FHEIGHT)
            .set("stroke", "black")
            .set("stroke-width", STROKE_WIDTH);
        Document::new()
            .set(
                "viewBox",
                (-MARGIN, -MARGIN, FWIDTH + 2.0 * MARGIN, FHEIGHT + 2.0 * MARGIN),
            )
            .add(label(FWIDTH / 2.0, -MARGIN / 2.0, title))
            .add(label(-MARGIN / 2.0, 0.0, &format!("{}", self.ymax)))
            .add(label(-MARGIN / 2.0, FHEIGHT, &format!("{}", self.ymin)))
            .add(yaxis)
            .add(xaxis)
    }
}

fn label(x: f64, y: f64, text: &str) -> Text {
    Text::new()
        .set("x", x)
        .set("y", y)
        .set("text-anchor", "middle")
        .set("font-size", 16)
        .add(TextNode::new(text))
}

/// Bars spanning an horizontal range, with optional labels underneath
#[derive(Debug)]
struct RangeDrawer {
    bars: Vec<((f64, f64), f64)>,
    labels: Vec<String>,
}

impl RangeDrawer {
    fn render(&self, title: &str) -> Document {
        let (xmin, xmax, ymax) = self.bars.iter().fold(
            (f64::MAX, f64::MIN, 0.0_f64),
            |(xmin, xmax, ymax), ((start, end), h)| {
                (xmin.min(*start), xmax.max(*end), ymax.max(*h))
            },
        );
        let xmin = if self.labels.is_empty() { xmin } else { 0.0 };
        let xmax = if self.labels.is_empty() {
            xmax
        } else {
            self.labels.len() as f64
        };
        let frame = Frame::new(xmin, xmax, 0.0, ymax);
        let mut doc = frame.document(title);
        for (i, ((start, end), h)) in self.bars.iter().enumerate() {
            let rect = Rectangle::new()
                .set("x", frame.x(*start))
                .set("y", frame.y(*h))
                .set("width", frame.x(*end) - frame.x(*start))
                .set("height", FHEIGHT - frame.y(*h))
                .set("fill", COLORS[i % COLORS.len()])
                .set("stroke", "black");
            doc = doc.add(rect);
            if let Some(text) = self.labels.get(i) {
                doc = doc.add(label(frame.x((start + end) / 2.0), FHEIGHT + MARGIN / 2.0, text));
            }
        }
        doc
    }
}

/// Horizontal box and whiskers
#[derive(Debug, PartialEq)]
struct BoxDrawer {
    min: f64,
    q1: f64,
    median: f64,
    q3: f64,
    max: f64,
}

impl BoxDrawer {
    fn from(values: &[u64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_unstable();
        Some(Self {
            min: sorted[0] as f64,
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            max: sorted[sorted.len() - 1] as f64,
        })
    }

    fn render(&self, title: &str) -> Document {
        // values along x, the box is centered vertically
        let frame = Frame::new(self.min, self.max, 0.0, 1.0);
        let mid = frame.y(0.5);
        let top = frame.y(0.7);
        let bottom = frame.y(0.3);
        let vline = |x: f64, y1: f64, y2: f64| {
            Line::new()
                .set("x1", frame.x(x))
                .set("x2", frame.x(x))
                .set("y1", y1)
                .set("y2", y2)
                .set("stroke", "black")
                .set("stroke-width", STROKE_WIDTH)
        };
        let hline = |x1: f64, x2: f64| {
            Line::new()
                .set("x1", frame.x(x1))
                .set("x2", frame.x(x2))
                .set("y1", mid)
                .set("y2", mid)
                .set("stroke", "black")
                .set("stroke-width", STROKE_WIDTH)
        };
        let rect = Rectangle::new()
            .set("x", frame.x(self.q1))
            .set("y", top)
            .set("width", frame.x(self.q3) - frame.x(self.q1))
            .set("height", bottom - top)
            .set("fill", "none")
            .set("stroke", "black")
            .set("stroke-width", STROKE_WIDTH);
        frame
            .document(title)
            .add(hline(self.min, self.q1))
            .add(hline(self.q3, self.max))
            .add(vline(self.min, frame.y(0.6), frame.y(0.4)))
            .add(vline(self.max, frame.y(0.6), frame.y(0.4)))
            .add(rect)
            .add(vline(self.median, top, bottom).set("stroke", COLORS[0]))
            .add(label(frame.x(self.min), FHEIGHT + MARGIN / 2.0, &format!("{}", self.min)))
            .add(label(frame.x(self.max), FHEIGHT + MARGIN / 2.0, &format!("{}", self.max)))
    }
}

const COLORS: &[&str] = &[
    "red",
    "green",
    "blue",
    "yellow",
    "orange",
    "purple",
    "cyan",
];
