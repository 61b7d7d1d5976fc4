mod distro_selector;

pub use distro_selector::DistroSelector;
