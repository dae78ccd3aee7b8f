/// Default categorical palette for charts colored per category, cycled
/// when a chart has more categories than the palette has entries.
pub const CATEGORY_COLOR_PALETTE: [&str; 10] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

/// Color for the `index`-th category.
pub fn category_color(index: usize) -> &'static str {
    CATEGORY_COLOR_PALETTE[index % CATEGORY_COLOR_PALETTE.len()]
}
