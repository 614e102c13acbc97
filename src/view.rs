mod landing;
mod subscription_form;

pub use landing::landing_page;
pub use subscription_form::subscription_form;
