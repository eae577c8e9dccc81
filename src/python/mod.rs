pub mod decorators;
pub mod definitions;
pub mod parser;

pub use decorators::{classify_method, Decorator, MemberBucket};
pub use definitions::{ClassDef, ClassDefinitions, DefinitionExtractor, Definitions};
pub use parser::{ParsedModule, PythonParser};
