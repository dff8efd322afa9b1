use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use plotters::prelude::*;

use super::canvas::Canvas;
use super::render::{backend_error, draw_figure};
use super::RenderError;

const PANEL_SIZE: (u32, u32) = (480, 360);
const SINGLE_SIZE: (u32, u32) = (800, 600);

/// A named grid of canvases that renders to one image.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    name: String,
    rows: usize,
    cols: usize,
    panels: Vec<Canvas>,
}

impl Figure {
    /// A figure holding exactly one canvas.
    pub fn single(name: impl Into<String>, canvas: Canvas) -> Self {
        Self {
            name: name.into(),
            rows: 1,
            cols: 1,
            panels: vec![canvas],
        }
    }

    /// An empty `rows × cols` grid; panels fill it row by row.
    pub fn grid(name: impl Into<String>, rows: usize, cols: usize) -> Self {
        Self {
            name: name.into(),
            rows: rows.max(1),
            cols: cols.max(1),
            panels: Vec::new(),
        }
    }

    /// Places `canvas` in the next free cell.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::TooManyPanels` if every cell is taken.
    pub fn with_panel(mut self, canvas: Canvas) -> Result<Self, RenderError> {
        let cells = self.rows * self.cols;
        if self.panels.len() >= cells {
            return Err(RenderError::TooManyPanels {
                cells,
                panels: self.panels.len() + 1,
            });
        }
        self.panels.push(canvas);
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layout(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn panels(&self) -> &[Canvas] {
        &self.panels
    }

    /// Image size in pixels.
    pub fn size(&self) -> (u32, u32) {
        if self.rows * self.cols == 1 {
            return SINGLE_SIZE;
        }
        (
            PANEL_SIZE.0 * self.cols as u32,
            PANEL_SIZE.1 * self.rows as u32,
        )
    }

    /// Renders the figure as an SVG document.
    pub fn render_svg(&self) -> Result<String, RenderError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, self.size()).into_drawing_area();
            draw_figure(&root, self)?;
            root.present().map_err(backend_error)?;
        }
        Ok(svg)
    }

    /// Renders the figure into an SVG file at `path`.
    pub fn save_svg(&self, path: &Path) -> Result<(), RenderError> {
        let root = SVGBackend::new(path, self.size()).into_drawing_area();
        draw_figure(&root, self)?;
        root.present().map_err(backend_error)?;
        Ok(())
    }
}

/// The figures produced by one run, in creation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gallery {
    figures: Vec<Figure>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a figure; later figures never draw over earlier ones.
    pub fn push(&mut self, figure: Figure) {
        self.figures.push(figure);
    }

    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    pub fn len(&self) -> usize {
        self.figures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    /// Appends every figure of `other` after the figures already held.
    pub fn extend(&mut self, other: Gallery) {
        self.figures.extend(other.figures);
    }

    /// Writes every figure to `out_dir` as `NN-name.svg` and returns the paths.
    pub fn show(&self, out_dir: &Path) -> Result<Vec<PathBuf>, RenderError> {
        fs::create_dir_all(out_dir)?;
        let mut written = Vec::with_capacity(self.figures.len());
        for (i, figure) in self.figures.iter().enumerate() {
            let path = out_dir.join(format!("{:02}-{}.svg", i + 1, figure.name()));
            figure.save_svg(&path)?;
            info!("wrote figure {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}
