use nichart::data::figure::RenderKind;
use nichart::{
    Dashboard, DashboardConfig, DashboardEvent, DatasetRole, IngestError, Overlay,
    OverlayScope, OverlaySelection, PanelId, StoreError, TraceStyle,
};

const USER_CSV: &str = "\
,ID,Age,MUSE_GM,MUSE_WM
0,s1,70,141,40
1,s2,60,121,38
2,s3,80,161,NA
3,s4,65,131,41
";

const REFERENCE_CSV: &str = "\
Age,centile_25,centile_50,centile_75
60,100,120,140
70,110,130,150
80,120,140,160
";

fn loaded_dashboard() -> Dashboard {
    let mut dash = Dashboard::new(DashboardConfig::default());
    dash.ingest_csv_str(DatasetRole::User, "study", USER_CSV).unwrap();
    dash.ingest_csv_str(DatasetRole::Reference, "centiles", REFERENCE_CSV)
        .unwrap();
    dash
}

#[test]
fn new_dashboard_shows_one_empty_panel() {
    let dash = Dashboard::new(DashboardConfig::default());
    assert_eq!(dash.visible_panels(), vec![PanelId(0)]);
    assert!(dash.figure(PanelId(0)).unwrap().is_empty());
}

#[test]
fn first_upload_is_adopted_and_plotted() {
    let dash = loaded_dashboard();
    let cfg = dash.panel_config(PanelId(0)).unwrap();
    assert_eq!(cfg.user_key.as_deref(), Some("study"));
    assert_eq!(cfg.reference_key.as_deref(), Some("centiles"));

    // Every non-ROI column is an x candidate, text ones included.
    let choices = dash.choices(PanelId(0));
    assert_eq!(choices.x, vec!["ID", "Age"]);
    assert_eq!(choices.y, vec!["MUSE_GM", "MUSE_WM"]);
}

#[test]
fn selecting_variables_recomposes_the_panel() {
    let mut dash = loaded_dashboard();
    let changed = dash.handle(DashboardEvent::SetXVar {
        panel: PanelId(0),
        name: "Age".to_string(),
    });
    assert_eq!(changed, vec![PanelId(0)]);
    let fig = dash.figure(PanelId(0)).unwrap();
    assert_eq!(fig.layers.len(), 1);
    assert_eq!(fig.layers[0].len(), 4);

    dash.handle(DashboardEvent::SetYVar {
        panel: PanelId(0),
        name: "MUSE_WM".to_string(),
    });
    // The NA row is dropped.
    assert_eq!(dash.figure(PanelId(0)).unwrap().layers[0].len(), 3);
}

#[test]
fn overlays_follow_toggle_order() {
    let mut dash = loaded_dashboard();
    let panel = PanelId(0);
    dash.handle(DashboardEvent::SetXVar {
        panel,
        name: "Age".to_string(),
    });
    for selection in [
        OverlaySelection::new(Overlay::LinReg, OverlayScope::Dataset),
        OverlaySelection::new(Overlay::Percentile, OverlayScope::Reference),
    ] {
        dash.handle(DashboardEvent::ToggleOverlay { panel, selection });
    }
    let names: Vec<String> = dash
        .figure(panel)
        .unwrap()
        .layers
        .iter()
        .map(|l| l.name.clone())
        .collect();
    assert_eq!(
        names,
        ["datapoint", "linregfit", "centile_25", "centile_50", "centile_75"]
    );

    // Toggling again removes it.
    dash.handle(DashboardEvent::ToggleOverlay {
        panel,
        selection: OverlaySelection::new(Overlay::LinReg, OverlayScope::Dataset),
    });
    assert_eq!(dash.figure(panel).unwrap().layers.len(), 4);
}

#[test]
fn missing_column_renders_empty_figure() {
    let mut dash = loaded_dashboard();
    dash.handle(DashboardEvent::SetXVar {
        panel: PanelId(0),
        name: "Sex".to_string(),
    });
    assert!(dash.figure(PanelId(0)).unwrap().is_empty());
}

#[test]
fn hidden_panels_keep_their_configuration() {
    let mut dash = loaded_dashboard();
    let hidden = PanelId(1);
    let changed = dash.handle(DashboardEvent::SetTraceStyle {
        panel: hidden,
        style: TraceStyle::Bar,
    });
    assert!(changed.is_empty());

    assert_eq!(dash.handle(DashboardEvent::AddPanel), vec![hidden]);
    dash.handle(DashboardEvent::SetXVar {
        panel: hidden,
        name: "Age".to_string(),
    });
    let fig = dash.figure(hidden).unwrap();
    assert_eq!(fig.layers[0].kind, RenderKind::LinesMarkers);

    dash.handle(DashboardEvent::RemovePanel(hidden));
    assert_eq!(dash.visible_panels(), vec![PanelId(0)]);
    assert_eq!(dash.panel_config(hidden).unwrap().style, TraceStyle::Bar);
}

#[test]
fn add_panel_beyond_capacity_changes_nothing() {
    let mut dash = Dashboard::new(DashboardConfig {
        panel_count: 2,
        ..DashboardConfig::default()
    });
    assert_eq!(dash.handle(DashboardEvent::AddPanel), vec![PanelId(1)]);
    assert!(dash.handle(DashboardEvent::AddPanel).is_empty());
    assert_eq!(dash.visible_panels(), vec![PanelId(0), PanelId(1)]);
}

#[test]
fn duplicate_upload_keeps_the_first_dataset() {
    let mut dash = loaded_dashboard();
    let err = dash
        .ingest_csv_str(DatasetRole::User, "study", ",Age,MUSE_GM\n0,1,2\n")
        .unwrap_err();
    assert!(matches!(
        err,
        IngestError::Store(StoreError::DuplicateKey(ref k)) if k == "study"
    ));
    let ds = dash.store(DatasetRole::User).get("study").unwrap();
    assert_eq!(ds.len(), 4);
}

#[test]
fn later_uploads_do_not_steal_the_selection() {
    let mut dash = loaded_dashboard();
    dash.ingest_csv_str(DatasetRole::User, "second", ",Age,MUSE_GM\n0,1,2\n")
        .unwrap();
    assert_eq!(
        dash.store(DatasetRole::User).list_keys(),
        ["study".to_string(), "second".to_string()]
    );
    let cfg = dash.panel_config(PanelId(0)).unwrap();
    assert_eq!(cfg.user_key.as_deref(), Some("study"));
}

#[test]
fn switching_dataset_clears_unknown_variables() {
    let mut dash = loaded_dashboard();
    let panel = PanelId(0);
    dash.ingest_csv_str(DatasetRole::User, "other", ",Age,MUSE_Hippo\n0,60,3.1\n1,70,2.9\n")
        .unwrap();
    dash.handle(DashboardEvent::SetXVar {
        panel,
        name: "Age".to_string(),
    });
    dash.handle(DashboardEvent::SetYVar {
        panel,
        name: "MUSE_WM".to_string(),
    });
    dash.handle(DashboardEvent::SelectDataset {
        panel,
        role: DatasetRole::User,
        key: "other".to_string(),
    });
    let cfg = dash.panel_config(panel).unwrap();
    assert_eq!(cfg.x_var.as_deref(), Some("Age"));
    assert_eq!(cfg.y_var, None);
    let fig = dash.figure(panel).unwrap();
    assert_eq!(fig.layout.y_title.as_deref(), Some("MUSE_Hippo"));
    assert_eq!(fig.layers[0].len(), 2);
}

#[test]
fn selecting_an_unknown_key_is_ignored() {
    let mut dash = loaded_dashboard();
    let changed = dash.handle(DashboardEvent::SelectDataset {
        panel: PanelId(0),
        role: DatasetRole::Reference,
        key: "missing".to_string(),
    });
    assert!(changed.is_empty());
    assert_eq!(
        dash.panel_config(PanelId(0)).unwrap().reference_key.as_deref(),
        Some("centiles")
    );
}

#[test]
fn malformed_upload_leaves_stores_untouched() {
    let mut dash = Dashboard::new(DashboardConfig::default());
    let err = dash
        .ingest_csv_str(DatasetRole::Reference, "broken", "Age,centile_50\n60\n")
        .unwrap_err();
    assert!(matches!(err, IngestError::Dataset(_)));
    assert!(dash.store(DatasetRole::Reference).is_empty());
}

#[test]
fn upload_without_index_keeps_every_column() {
    let mut dash = Dashboard::new(DashboardConfig::default());
    dash.ingest_csv_str(DatasetRole::User, "up", "Age,MUSE_GM\n60,1\n70,2\n")
        .unwrap();
    let ds = dash.store(DatasetRole::User).get("up").unwrap();
    let names: Vec<&str> = ds.column_names().collect();
    assert_eq!(names, ["Age", "MUSE_GM"]);

    let fig = dash.figure(PanelId(0)).unwrap();
    assert_eq!(fig.layers.len(), 1);
    assert_eq!(fig.layers[0].len(), 2);
    assert_eq!(fig.layout.x_title.as_deref(), Some("Age"));
}

#[test]
fn startup_user_files_drop_their_index_column() {
    let path = std::env::temp_dir().join(format!("nichart_{}_preload.csv", std::process::id()));
    std::fs::write(&path, "row,Age,MUSE_GM\n0,60,1\n1,70,2\n").unwrap();

    let mut dash = Dashboard::new(DashboardConfig::default());
    let key = dash.preload_csv_path(DatasetRole::User, &path).unwrap();
    let mut plain = Dashboard::new(DashboardConfig::default());
    plain.ingest_csv_path(DatasetRole::User, &path).unwrap();
    let _ = std::fs::remove_file(&path);

    let preloaded: Vec<&str> = dash
        .store(DatasetRole::User)
        .get(&key)
        .unwrap()
        .column_names()
        .collect();
    assert_eq!(preloaded, ["Age", "MUSE_GM"]);
    let uploaded: Vec<&str> = plain
        .store(DatasetRole::User)
        .get(&key)
        .unwrap()
        .column_names()
        .collect();
    assert_eq!(uploaded, ["row", "Age", "MUSE_GM"]);
}
