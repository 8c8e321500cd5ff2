pub mod bars;
pub mod filter_panel;
pub mod header;
