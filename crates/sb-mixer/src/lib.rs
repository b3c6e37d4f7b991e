//! sb-mixer: routes four separated stems into a 7.1.4 spatial bed

mod mixer;

pub use mixer::mix_to_714;
