pub mod clock;
pub mod key_value;
pub mod notifier;
pub mod session;

pub use clock::{Clock, SystemClock};
pub use key_value::KeyValueStore;
pub use notifier::Notifier;
pub use session::SessionManager;
