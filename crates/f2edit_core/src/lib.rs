//! Save-file model for the interactive Fallout 2 editor.
//!
//! [`SaveModel`] is the key/value surface the editor shell talks to;
//! [`fallout2::SaveFile`] implements it on top of a slot's `SAVE.DAT`.

pub mod error;
pub mod fallout2;
pub mod model;
mod reader;

pub use error::{CoreError, CoreErrorCode};
pub use model::{AttributeKind, SaveInfo, SaveModel};
