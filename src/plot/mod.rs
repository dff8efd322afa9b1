//! Figures built from explicit canvas handles.
//!
//! Drawing operations take a [`Canvas`] by value and hand it back with the
//! new overlay appended, so independent figures never share state. Nothing is
//! drawn until a [`Figure`] is rendered; a [`Gallery`] collects the figures of
//! one run and writes them all out at the end.

mod canvas;
mod figure;
mod render;

use thiserror::Error;

pub use canvas::{Canvas, Marker, PALETTE, Series, SeriesStyle, sloping_line};
pub use figure::{Figure, Gallery};
pub use plotters::style::RGBColor;

/// Errors that can occur while composing or rendering figures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// x and y sequences of one overlay must have the same length
    #[error("cannot plot {xs} x-values against {ys} y-values")]
    LengthMismatch { xs: usize, ys: usize },
    /// A grid figure was given more canvases than it has cells
    #[error("figure has {cells} cells but got {panels} panels")]
    TooManyPanels { cells: usize, panels: usize },
    /// The drawing backend reported a failure
    #[error("drawing backend error: {0}")]
    Backend(String),
    /// Creating the output directory or file failed
    #[error("i/o error ({kind}): {message}")]
    Io {
        kind: std::io::ErrorKind,
        message: String,
    },
}

impl From<std::io::Error> for RenderError {
    fn from(e: std::io::Error) -> Self {
        RenderError::Io {
            kind: e.kind(),
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error_keeps_its_kind() {
        let err = RenderError::from(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        assert_eq!(
            err,
            RenderError::Io {
                kind: io::ErrorKind::PermissionDenied,
                message: "read-only".to_string()
            }
        );
        assert!(err.to_string().contains("permission denied"));
    }
}
