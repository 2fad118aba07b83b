pub mod constants;
pub mod coordinates;
pub mod depth;
pub mod engine;
pub mod local_frame;
pub mod rovpos_errors;
pub mod svp;
