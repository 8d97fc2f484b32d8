//! Guard decorators.
//!
//! A guard decides, before the wrapped function runs, whether it should run
//! at all. When it should not, the guard returns a substitute result instead
//! of failing:
//!
//! - [`LoginRequiredLayer`]: unauthenticated callers get a [`Redirect`]
//! - [`QuietHoursLayer`]: calls outside the allowed hours return `None`
//!
//! The deciding collaborators ([`Authenticator`], [`Redirect`], [`Clock`])
//! are supplied by the caller, which keeps both guards testable.

mod events;
mod login;
mod quiet_hours;

pub use events::{LoginEvent, QuietHoursEvent};
pub use login::{
    Authenticator, LoginRequired, LoginRequiredConfig, LoginRequiredConfigBuilder,
    LoginRequiredLayer, Redirect, RedirectTo,
};
pub use quiet_hours::{
    Clock, FixedClock, QuietHours, QuietHoursConfig, QuietHoursConfigBuilder, QuietHoursLayer,
    SystemClock,
};
