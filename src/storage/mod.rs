pub mod store;

pub use store::{PendingUpload, UploadStore, generate_filename};
