use nichart::data::figure::{Fill, RenderKind};
use nichart::{
    ComposeRequest, Dataset, FigureComposer, FigureError, Overlay, OverlayScope,
    OverlaySelection, TraceStyle,
};

fn user_data() -> Dataset {
    Dataset::from_numeric(&[
        ("Age", &[70.0, 60.0, 80.0, 65.0, 75.0]),
        ("MUSE_GM", &[141.0, 121.0, 161.0, 131.0, 151.0]),
    ])
    .unwrap()
}

fn reference_data() -> Dataset {
    Dataset::from_numeric(&[
        ("Age", &[60.0, 70.0, 80.0]),
        ("centile_25", &[100.0, 110.0, 120.0]),
        ("centile_75", &[140.0, 150.0, 160.0]),
    ])
    .unwrap()
}

fn request<'a>(
    primary: Option<&'a Dataset>,
    reference: Option<&'a Dataset>,
    style: TraceStyle,
    overlays: &'a [OverlaySelection],
) -> ComposeRequest<'a> {
    ComposeRequest {
        primary,
        reference,
        style,
        overlays,
        x: "Age",
        y: "MUSE_GM",
    }
}

#[test]
fn dots_plots_one_marker_per_row() {
    let ds = user_data();
    let fig = FigureComposer::default()
        .compose(&request(Some(&ds), None, TraceStyle::Dots, &[]))
        .unwrap();
    assert_eq!(fig.layers.len(), 1);
    assert_eq!(fig.layers[0].kind, RenderKind::Markers);
    assert_eq!(fig.layers[0].len(), ds.len());
    assert_eq!(fig.layout.x_title.as_deref(), Some("Age"));
    assert_eq!(fig.layout.y_title.as_deref(), Some("MUSE_GM"));
}

#[test]
fn bar_style_runs_left_to_right() {
    let ds = user_data();
    let fig = FigureComposer::default()
        .compose(&request(Some(&ds), None, TraceStyle::Bar, &[]))
        .unwrap();
    let layer = &fig.layers[0];
    assert_eq!(layer.kind, RenderKind::LinesMarkers);
    assert_eq!(layer.x, vec![60.0, 65.0, 70.0, 75.0, 80.0]);
}

#[test]
fn linreg_recovers_exact_line() {
    let ds = user_data();
    let overlays = [OverlaySelection::with_default_scope(Overlay::LinReg)];
    let fig = FigureComposer::default()
        .compose(&request(Some(&ds), None, TraceStyle::Dots, &overlays))
        .unwrap();
    assert_eq!(fig.layers.len(), 2);
    let fit = &fig.layers[1];
    assert_eq!(fit.name, "linregfit");
    // Rows are unsorted by age; the fitted line still runs left to right.
    assert_eq!(fit.x, vec![60.0, 65.0, 70.0, 75.0, 80.0]);
    assert!(fit.x.windows(2).all(|w| w[0] <= w[1]));
    for [x, y] in fit.points() {
        assert!((y - (2.0 * x + 1.0)).abs() < 1e-9, "x={x} y={y}");
    }
}

#[test]
fn lowess_curve_is_sorted_by_x() {
    let ds = Dataset::from_numeric(&[
        ("Age", &[72.0, 61.0, 79.0, 64.0, 68.0, 75.0, 62.0, 70.0]),
        ("MUSE_GM", &[3.0, 1.0, 8.0, 1.5, 2.0, 5.0, 1.2, 2.5]),
    ])
    .unwrap();
    let overlays = [OverlaySelection::with_default_scope(Overlay::Lowess)];
    let fig = FigureComposer::default()
        .compose(&request(Some(&ds), None, TraceStyle::Dots, &overlays))
        .unwrap();
    let curve = &fig.layers[1];
    assert_eq!(curve.name, "lowessfit");
    assert_eq!(curve.len(), ds.len());
    assert!(curve.x.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn percentile_adds_one_line_per_centile_column() {
    let ds = user_data();
    let reference = reference_data();
    let overlays = [OverlaySelection::with_default_scope(Overlay::Percentile)];
    let fig = FigureComposer::default()
        .compose(&request(Some(&ds), Some(&reference), TraceStyle::Dots, &overlays))
        .unwrap();
    assert_eq!(fig.layers.len(), 3);
    let names: Vec<&str> = fig.layers[1..].iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["centile_25", "centile_75"]);
    assert!(fig.layers[1..].iter().all(|l| l.show_legend));
    assert_eq!(fig.layers[2].fill, Fill::ToNextY);
}

#[test]
fn overlays_render_in_selection_order() {
    let ds = user_data();
    let reference = reference_data();
    let overlays = [
        OverlaySelection::with_default_scope(Overlay::Lowess),
        OverlaySelection::with_default_scope(Overlay::Percentile),
        OverlaySelection::with_default_scope(Overlay::LinReg),
    ];
    let fig = FigureComposer::default()
        .compose(&request(Some(&ds), Some(&reference), TraceStyle::Dots, &overlays))
        .unwrap();
    let names: Vec<&str> = fig.layers.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(
        names,
        ["datapoint", "lowessfit", "centile_25", "centile_75", "linregfit"]
    );
}

#[test]
fn no_primary_gives_empty_figure() {
    let overlays = [OverlaySelection::with_default_scope(Overlay::LinReg)];
    let fig = FigureComposer::default()
        .compose(&request(None, None, TraceStyle::Dots, &overlays))
        .unwrap();
    assert!(fig.is_empty());
    assert!(fig.layout.x_title.is_none());
}

#[test]
fn missing_reference_skips_only_that_overlay() {
    let ds = user_data();
    let overlays = [
        OverlaySelection::with_default_scope(Overlay::Percentile),
        OverlaySelection::with_default_scope(Overlay::LinReg),
    ];
    let fig = FigureComposer::default()
        .compose(&request(Some(&ds), None, TraceStyle::Dots, &overlays))
        .unwrap();
    assert_eq!(fig.layers.len(), 2);
    assert_eq!(fig.layers[1].name, "linregfit");
    assert_eq!(
        fig.skipped,
        vec![FigureError::MissingReferenceDataset {
            overlay: "percentile".to_string()
        }]
    );
}

#[test]
fn reference_scoped_lowess_reads_the_reference() {
    let ds = user_data();
    let reference = Dataset::from_numeric(&[
        ("Age", &[60.0, 70.0, 80.0, 90.0]),
        ("MUSE_GM", &[10.0, 20.0, 30.0, 40.0]),
    ])
    .unwrap();
    let overlays = [OverlaySelection::new(Overlay::Lowess, OverlayScope::Reference)];
    let fig = FigureComposer::default()
        .compose(&request(Some(&ds), Some(&reference), TraceStyle::Dots, &overlays))
        .unwrap();
    assert_eq!(fig.layers[1].len(), reference.len());
}

#[test]
fn missing_primary_column_is_an_error() {
    let ds = user_data();
    let req = ComposeRequest {
        y: "MUSE_WM",
        ..request(Some(&ds), None, TraceStyle::Dots, &[])
    };
    assert_eq!(
        FigureComposer::default().compose(&req),
        Err(FigureError::MissingColumn("MUSE_WM".to_string()))
    );
}

#[test]
fn composition_is_deterministic() {
    let ds = user_data();
    let reference = reference_data();
    let overlays = [
        OverlaySelection::with_default_scope(Overlay::Percentile),
        OverlaySelection::with_default_scope(Overlay::Lowess),
    ];
    let composer = FigureComposer::default();
    let req = request(Some(&ds), Some(&reference), TraceStyle::Bar, &overlays);
    assert_eq!(composer.compose(&req).unwrap(), composer.compose(&req).unwrap());
}

#[test]
fn unknown_ids_are_rejected() {
    let ds = user_data();
    let composer = FigureComposer::default();
    assert_eq!(
        composer.compose_by_ids(Some(&ds), None, "candles", &[], "Age", "MUSE_GM"),
        Err(FigureError::UnknownTraceStyle("candles".to_string()))
    );
    assert_eq!(
        composer.compose_by_ids(Some(&ds), None, "dots", &["linreg", "spline"], "Age", "MUSE_GM"),
        Err(FigureError::UnknownOverlay("spline".to_string()))
    );
    let fig = composer
        .compose_by_ids(Some(&ds), None, "bar", &["linreg"], "Age", "MUSE_GM")
        .unwrap();
    assert_eq!(fig.layers.len(), 2);
}

#[test]
fn figure_exports_as_json() {
    let ds = user_data();
    let fig = FigureComposer::default()
        .compose(&request(Some(&ds), None, TraceStyle::Dots, &[]))
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&fig.to_json().unwrap()).unwrap();
    assert_eq!(json["layers"][0]["name"], "datapoint");
    assert_eq!(json["layers"][0]["kind"], "markers");
    assert_eq!(json["layout"]["range_slider"], false);
    assert!(json.get("skipped").is_none());
}

#[test]
fn failing_overlay_keeps_layers_before_and_after_it() {
    let ds = user_data();
    // The centile table has no MUSE_GM column to smooth.
    let reference = reference_data();
    let overlays = [
        OverlaySelection::with_default_scope(Overlay::LinReg),
        OverlaySelection::new(Overlay::Lowess, OverlayScope::Reference),
        OverlaySelection::with_default_scope(Overlay::Percentile),
    ];
    let fig = FigureComposer::default()
        .compose(&request(Some(&ds), Some(&reference), TraceStyle::Dots, &overlays))
        .unwrap();
    let names: Vec<&str> = fig.layers.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["datapoint", "linregfit", "centile_25", "centile_75"]);
    assert_eq!(
        fig.skipped,
        vec![FigureError::MissingColumn("MUSE_GM".to_string())]
    );
}
