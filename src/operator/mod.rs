pub mod all;
pub mod any;
pub mod closure;
pub mod fresh;
pub mod onceo;

pub use all::{conj, lall};
pub use any::{conde, disj, lany};
pub use closure::defer;
pub use fresh::fresh;
pub use onceo::onceo;
