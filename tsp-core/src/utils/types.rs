/// Alias to a scalar floating type.
pub type Float = f64;

/// A tolerance used to decide whether solver output is numerically integral.
pub const INTEGRALITY_TOLERANCE: Float = 1E-6;

/// A threshold used to interpret an assignment entry as a used edge.
pub const EDGE_THRESHOLD: Float = 0.5;

/// A logger function which receives a single message.
pub type InfoLogger = std::sync::Arc<dyn Fn(&str) + Send + Sync>;
