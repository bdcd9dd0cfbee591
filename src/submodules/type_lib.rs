use ndarray::Array2;

pub type NumericData = f64;

/// Scalar samples over the simulation grid.
pub type Field = Array2<NumericData>;
