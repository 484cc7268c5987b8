/// Path colors, handed out in order of the entity list and reused after running out.
pub const PALETTE: [&str; 7] = [
    "#FF6347", "#4682B4", "#32CD32", "#FFD700", "#6A5ACD", "#FF69B4", "#00CED1",
];

/// The color for the entity at this position in the loaded id list.
pub fn color_for(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_around() {
        assert_eq!(color_for(0), "#FF6347");
        assert_eq!(color_for(6), "#00CED1");
        assert_eq!(color_for(7), "#FF6347");
        assert_eq!(color_for(15), "#4682B4");
    }
}
