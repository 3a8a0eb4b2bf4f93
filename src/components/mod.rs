pub mod summary_panel;
