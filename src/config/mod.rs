pub mod settings;

pub use settings::PublicationConfig;
