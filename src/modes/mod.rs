pub mod autopilot;
pub mod headless;

pub use autopilot::AutopilotMode;
pub use headless::HeadlessMode;
