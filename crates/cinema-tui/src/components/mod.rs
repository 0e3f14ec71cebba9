pub mod catalog_list;
pub mod watch_panel;
