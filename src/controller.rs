pub mod landing;
pub mod subscriptions;
