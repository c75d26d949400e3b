pub mod logo_preview;
pub mod toast;

pub use logo_preview::LogoPreview;
pub use toast::ToastContainer;
