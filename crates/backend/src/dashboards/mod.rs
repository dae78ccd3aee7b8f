pub mod d410_delivery_overview;
