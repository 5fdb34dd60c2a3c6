// Interaction layer - everything between the user and the reversal engine
//
// - state: serializable AppState and derived UI flags
// - interaction: reverse / copy / theme / clear actions and their policy
// - ports: capability traits for input, output, preferences, notifications, clipboard
// - notify: toast model and surfaces
// - scheduler: deferred callbacks with cancellation, driven by a Clock

pub mod error;
pub mod interaction;
pub mod notify;
pub mod ports;
pub mod scheduler;
pub mod state;

pub use interaction::{check_input, guarded_reverse, Interaction, InteractionSettings};
pub use notify::{ToastKind, Toasts};
pub use scheduler::{Clock, SystemClock};
pub use state::{AppState, CounterLevel};
