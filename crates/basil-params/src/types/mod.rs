//! Concrete parameter variants

pub mod categorical;
pub mod continuous;
pub mod discrete;
pub mod fixed;
pub mod substance;

pub use categorical::Categorical;
pub use continuous::ContinuousNumerical;
pub use discrete::{DiscreteNumericalIrregular, DiscreteNumericalRegular};
pub use fixed::Fixed;
pub use substance::Substance;
