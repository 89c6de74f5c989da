mod record;

pub use record::CommitRecord;
