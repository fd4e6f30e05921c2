pub mod results;
pub mod stats_header;
pub mod time_bar;
pub mod typing_area;
