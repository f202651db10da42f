pub mod detail_modal;
pub mod group_picker;
pub mod stats_bar;
pub mod word_grid;
