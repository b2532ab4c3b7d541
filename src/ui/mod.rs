//! Terminal UI components: sidebar, detail pane and toasts.

pub mod detail;
pub mod layout;
pub mod sidebar;
pub mod toast;
pub mod toast_widget;

pub use detail::DetailPane;
pub use toast::{Toast, ToastManager, ToastType};
pub use toast_widget::ToastWidget;
