/// Vertical stacking of member rasters.
pub mod composite;
