pub mod palette;
pub mod rating_band;
