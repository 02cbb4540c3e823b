pub mod zoomit;
