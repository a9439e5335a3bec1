pub mod backends;
pub mod loader;

pub use backends::*;
pub use loader::{load_corpus, parse_corpus, LoadReport};

pub mod prelude {
    pub use super::backends::*;
    pub use super::loader::{load_corpus, LoadReport};
}
