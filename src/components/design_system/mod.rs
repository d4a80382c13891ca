//! Design System Components for Leptos
//!
//! Small, reusable building blocks shared by the library views.

mod button;
mod loading;
mod modal;
mod status_pill;
mod text_field;


pub use button::{Button, ButtonVariant};
pub use loading::{LoadingPlaceholder, LoadingSpinner};
pub use modal::Modal;
pub use status_pill::StatusPill;
pub use text_field::TextField;
