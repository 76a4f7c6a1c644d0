//! Surface assembly and closure
//!
//! Turns a lattice plus height field into a top surface, then closes it with
//! four skirts and a bottom cap. All pieces are independent
//! [`StructuredSurface`] values collected in a [`Scene`].

pub mod closure;
pub mod scene;
pub mod surface;

pub use closure::{ClosureBuilder, Side, BOTTOM_SURFACE};
pub use scene::{Scene, TriangleMesh};
pub use surface::{assemble_top_surface, StructuredSurface, TOP_SURFACE};
