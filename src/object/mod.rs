pub mod blob;
pub mod record;

pub use blob::{blob_exists, blob_path, read_blob, write_blob};
pub use record::{read_record, record_exists, record_path, write_record};
