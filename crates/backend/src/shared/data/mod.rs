pub mod db;
pub mod orders;
