mod assemble;
mod chrome;
mod driver;
mod export;
mod extract;
mod navigator;
mod region;
mod run;

pub use assemble::OutputSchema;
pub use export::write_dataset_csv;
pub use extract::FieldExtractor;
pub use run::{manifest_dir, run};
