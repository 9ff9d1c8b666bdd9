mod documentation;
pub mod tokens;


pub use documentation::Documentation;
pub use tokens::{FieldNameToken, MethodNameToken, StructToken};
