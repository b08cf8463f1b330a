//! # Block Parsing
//!
//! Turns the lines of one chapter file into chapters, slides and elements.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): each line becomes a [`LineClass`]
//!    holding only local facts. The classifier has no state.
//!
//! 2. **Block Construction** (`builder`): a [`BlockBuilder`] keeps the current
//!    [`ParserState`] and dispatches on (state, line class).
//!
//! ## Modules
//!
//! - **`kinds`**: one type per dialect construct, owning its line syntax
//! - **`classify`**: [`LineClassifier`] produces a [`LineClass`] per line
//! - **`state`**: the closed set of parser states
//! - **`containers`**: insertion target and list cursor
//! - **`builder`**: the state machine
//!
//! ## Key Invariants
//!
//! - Raw blocks (fenced code, script, equation, UML) recognise nothing but
//!   their end marker
//! - No inline parsing happens here; text is stored as written
//! - The first error aborts the file

pub mod builder;
pub mod classify;
pub mod containers;
pub mod kinds;
pub mod state;

pub use builder::{BlockBuilder, BuildOutput};
pub use classify::{LineClass, LineClassifier};
pub use containers::{InsertionTarget, ListCursor};
pub use state::ParserState;
