mod parser;
mod pitch;
mod sequence;

pub use parser::parse;
pub use pitch::to_pitch;
pub use sequence::{NoteEvent, ParsedSequence};
