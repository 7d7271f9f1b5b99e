// ============================================================================
// MODELS - Estructuras compartidas con el backend
// ============================================================================

pub mod user;

pub use user::*;
