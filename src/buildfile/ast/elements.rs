//! Node type definitions

pub mod build_file;
pub mod declarations;
pub mod load;
pub mod rule;
pub mod values;

pub use build_file::BuildFile;
pub use declarations::{
    ExportsFilesDeclaration, PackageDeclaration, PackageGroupDeclaration, VariableDeclaration,
};
pub use load::{LoadStatement, RenamedSymbolLoad, SymbolLoad, SymbolLoadKind};
pub use rule::{Rule, RuleAttribute};
pub use values::{
    ArrayElement, ArrayOrIdentifier, ArrayType, Boolean, DictEntry, DictOrIdentifier, DictType,
    GlobNode, Identifier, Initializer, NumberLiteral, SelectStatement, StringLiteral,
    StringOrIdentifier,
};
