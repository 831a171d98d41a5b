pub mod graph3d;
