//! Repository implementations, one module per table.

pub mod inquiry;
pub mod property;
pub mod property_image;

pub use inquiry::InquiryRepository;
pub use property::PropertyRepository;
pub use property_image::PropertyImageRepository;
