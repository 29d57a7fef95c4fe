use std::fmt;

use crate::lib::aggregate::{BranchTotals, Summary};

/// Box-drawn text table: one label column followed by value columns
pub struct Table {
    header: Vec<String>,
    lines: Vec<(String, Vec<String>)>,
}

struct BoxFmt {
    width: usize,
    text: String,
}

struct ColFmt {
    width: usize,
    label: BoxFmt,
    boxes: Vec<BoxFmt>,
}

struct GridFmt {
    labels: ColFmt,
    columns: Vec<ColFmt>,
}

impl Table {
    pub fn with_columns<S: ToString>(header: &[S]) -> Self {
        Self {
            header: header.iter().map(|s| s.to_string()).collect(),
            lines: Vec::new(),
        }
    }

    pub fn push_line<S: ToString>(&mut self, label: S, cells: Vec<String>) {
        self.lines.push((label.to_string(), cells));
    }

    fn to_formatter(&self) -> GridFmt {
        let cols = self
            .header
            .iter()
            .map(|h| ColFmt::with_label(BoxFmt::from(h.clone())))
            .collect::<Vec<_>>();
        let mut grid = GridFmt::with_columns(cols);
        for (label, cells) in &self.lines {
            grid.push_line(
                BoxFmt::from(label.clone()),
                cells.iter().map(|c| BoxFmt::from(c.clone())).collect(),
            );
        }
        grid
    }
}

impl From<&BranchTotals> for Table {
    fn from(totals: &BranchTotals) -> Self {
        let mut table = Self::with_columns(&["Total"]);
        for (branch, total) in totals.iter() {
            table.push_line(branch, vec![total.to_string()]);
        }
        table.push_line("", vec![totals.total().to_string()]);
        table
    }
}

impl From<&Summary> for Table {
    fn from(summary: &Summary) -> Self {
        let mut table = Self::with_columns(&["LKR"]);
        table.push_line("Average", vec![format!("{:.2}", summary.mean)]);
        table.push_line("Maximum", vec![summary.max.to_string()]);
        table.push_line("Minimum", vec![summary.min.to_string()]);
        table.push_line("Median", vec![format!("{:.2}", summary.median)]);
        table
    }
}

impl BoxFmt {
    fn from(text: String) -> Self {
        let width = text.chars().count();
        Self { text, width }
    }
}

impl ColFmt {
    fn with_label(label: BoxFmt) -> Self {
        Self {
            width: label.width,
            label,
            boxes: Vec::new(),
        }
    }

    fn push(&mut self, b: BoxFmt) {
        self.width = self.width.max(b.width);
        self.boxes.push(b);
    }
}

impl GridFmt {
    fn with_columns(columns: Vec<ColFmt>) -> Self {
        Self {
            labels: ColFmt::with_label(BoxFmt::from(String::new())),
            columns,
        }
    }

    fn push_line(&mut self, label: BoxFmt, boxes: Vec<BoxFmt>) {
        self.labels.push(label);
        for (i, b) in boxes.into_iter().enumerate() {
            if let Some(c) = self.columns.get_mut(i) {
                c.push(b);
            }
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_formatter())
    }
}

impl fmt::Display for GridFmt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // upper border
        write!(f, "{}", ULCORNER)?;
        self.labels.hline(f)?;
        for c in &self.columns {
            write!(f, "{}", LOJOIN)?;
            c.hline(f)?;
        }
        writeln!(f, "{}", URCORNER)?;
        // title line
        write!(f, "{}", VLINE)?;
        self.labels.write_label(f)?;
        for c in &self.columns {
            write!(f, "{}", VLINE)?;
            c.write_label(f)?;
        }
        writeln!(f, "{}", VLINE)?;
        // separator
        write!(f, "{}", RTJOIN)?;
        self.labels.hline(f)?;
        for c in &self.columns {
            write!(f, "{}", CROSS)?;
            c.hline(f)?;
        }
        writeln!(f, "{}", LTJOIN)?;

        // main block
        for idx in 0..self.labels.len() {
            write!(f, "{}", VLINE)?;
            self.labels.write_item(f, idx, false)?;
            for c in &self.columns {
                write!(f, "{}", VLINE)?;
                c.write_item(f, idx, true)?;
            }
            writeln!(f, "{}", VLINE)?;
        }
        // lower border
        write!(f, "{}", DLCORNER)?;
        self.labels.hline(f)?;
        for c in &self.columns {
            write!(f, "{}", HIJOIN)?;
            c.hline(f)?;
        }
        writeln!(f, "{}", DRCORNER)?;
        Ok(())
    }
}

impl ColFmt {
    fn write_label(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.label.write(f, self.width, true)
    }

    fn write_item(&self, f: &mut fmt::Formatter, idx: usize, right: bool) -> fmt::Result {
        match self.boxes.get(idx) {
            Some(b) => b.write(f, self.width, right),
            None => BoxFmt::from(String::new()).write(f, self.width, right),
        }
    }

    fn len(&self) -> usize {
        self.boxes.len()
    }

    fn hline(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", HLINE.repeat(self.width + 2))
    }
}

const HLINE: &str = "─";
const VLINE: &str = "│";
const ULCORNER: &str = "┌";
const URCORNER: &str = "┐";
const DLCORNER: &str = "└";
const DRCORNER: &str = "┘";
const LTJOIN: &str = "┤";
const RTJOIN: &str = "├";
const HIJOIN: &str = "┴";
const LOJOIN: &str = "┬";
const CROSS: &str = "┼";

impl BoxFmt {
    fn write(&self, f: &mut fmt::Formatter, width: usize, right: bool) -> fmt::Result {
        let pad = " ".repeat(width.saturating_sub(self.width));
        if right {
            write!(f, " {}{} ", pad, self.text)
        } else {
            write!(f, " {}{} ", self.text, pad)
        }
    }
}
