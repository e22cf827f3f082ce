//! Record-access gating: the gate state machine, notification sinks,
//! view projection and rendering, and the async check driver.

pub mod driver;
pub mod gate;
pub mod render;
pub mod sink;

pub use gate::{AccessGate, GateState, QueryEpoch};
pub use render::{FormSpec, Surface, TextSurface, ViewState};
pub use sink::{MemorySink, NotificationSink, TracingSink};
