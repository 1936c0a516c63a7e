//! Concrete survey definitions used by the demos and tests.

pub mod battery;
pub mod contact;
pub mod heat_pump;

pub use battery::battery_survey;
pub use contact::contact_step;
pub use heat_pump::heat_pump_survey;
