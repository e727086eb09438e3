pub mod set_cover;
