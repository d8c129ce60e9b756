// Menu necessity generation, listing and export
pub mod necessity;
