mod polyhedra;
mod torus_knot;
mod wire;

pub use polyhedra::{dodecahedron, icosahedron, Shading};
pub use torus_knot::torus_knot;
pub use wire::wireframe_of;
