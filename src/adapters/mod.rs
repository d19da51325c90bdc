// Adapters layer: concrete implementations for the excluded collaborators
// (backend API record source, export bundle writer).

pub mod api;
pub mod export;
