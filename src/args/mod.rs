//! Argument handling for command dispatch.
//!
//! Parsing happens twice per invocation:
//!
//! ```text
//! Raw args → coarse_parse → positionals → CommandMap::resolve
//!          → derive_schema(command) → refine → ParsedArgs (positionals = inputs)
//! ```
//!
//! Both passes are pure functions over the same raw tokens; no parser state is
//! shared between them.

mod parser;
mod schema;
mod value;

pub use parser::{coarse_parse, refine};
pub use schema::{derive_schema, OptionSchema, OptionSpec, OptionType};
pub use value::{ArgValue, ParsedArgs, POSITIONAL_KEY};
