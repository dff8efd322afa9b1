use ml4ms::plot::{Canvas, Figure, Gallery, Marker, PALETTE, RenderError, SeriesStyle, sloping_line};
use ml4ms::{ErrorKind, Exercise, ExerciseConfig};
use ndarray::array;

#[test]
fn independent_figures_keep_their_own_overlays() {
    let x = array![0.0, 1.0, 2.0, 3.0];
    let y = array![0.1, 0.9, 2.2, 2.8];

    let first = Canvas::new("first")
        .scatter(x.view(), y.view(), Marker::Circle, PALETTE[0])
        .unwrap();
    let second = Canvas::new("second");
    let first = sloping_line(first, x.view(), 0.94, 0.09).unwrap();

    let mut gallery = Gallery::new();
    gallery.push(Figure::single("first", first));
    gallery.push(Figure::single("second", second));

    let first = &gallery.figures()[0].panels()[0];
    assert_eq!(first.series().len(), 2);
    assert!(matches!(first.series()[1].style, SeriesStyle::Line { dashed: true, .. }));
    assert!(gallery.figures()[1].panels()[0].series().is_empty());
}

#[test]
fn mismatched_overlay_is_a_render_error() {
    let err = Canvas::new("bad")
        .scatter(array![1.0].view(), array![1.0, 2.0].view(), Marker::Cross, PALETTE[0])
        .unwrap_err();
    assert_eq!(err, RenderError::LengthMismatch { xs: 1, ys: 2 });
    assert_eq!(ml4ms::Ml4msError::from(err).kind(), ErrorKind::Render);
}

#[test]
fn all_exercises_render_and_show() {
    let dir = std::env::temp_dir().join(format!("ml4ms-all-{}", std::process::id()));
    let config = ExerciseConfig {
        exercise: Exercise::All,
        seed: Some(5),
        out_dir: dir.clone(),
        ..ExerciseConfig::default()
    };
    let gallery = ml4ms::run(&config).unwrap();
    assert_eq!(gallery.len(), 4);

    let paths = gallery.show(&config.out_dir).unwrap();
    assert_eq!(paths.len(), 4);
    assert!(paths[3].ends_with("04-predicted-vs-actual.svg"));
    for path in &paths {
        let svg = std::fs::read_to_string(path).unwrap();
        assert!(svg.contains("<svg"));
    }
    std::fs::remove_dir_all(&dir).unwrap();
}
