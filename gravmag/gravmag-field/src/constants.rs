//! Physical constants used by the anomaly assembly.
//!
//! Both values are deliberately pinned rather than derived, so any future
//! recalibration is a one-line, explicit change.

/// Gravitational constant, m³·kg⁻¹·s⁻².
///
/// This is the value used by the classical polyhedral-anomaly formulation,
/// kept verbatim for numerical compatibility with results computed against
/// it. It predates and deliberately does not match the current CODATA
/// recommendation (6.674e-11); do not "correct" it.
pub const GRAVITATIONAL_CONSTANT: f64 = 6.6732e-11;

/// Magnetic pre-scale μ₀/4π, T·m/A.
///
/// Applied to the magnetization vector so the assembled field components
/// come out in tesla.
pub const MAGNETIC_SCALE: f64 = 1e-7;
