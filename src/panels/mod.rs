pub mod figure_plot;
pub mod plot_panel_ui;
pub mod sidebar_ui;

pub use figure_plot::show_figure;
pub use plot_panel_ui::PlotPanelUi;
pub use sidebar_ui::SidebarUi;
