use crate::infra::Position;

/// Both destination coordinates are reduced modulo this value.
pub const DESTINATION_MODULUS: i32 = 12;

/// Final destination derived from the flag coordinates. The result does not
/// depend on the order of `flags`.
pub fn resolve_destination(flags: &[Position]) -> Position {
    let sum_x: i32 = flags.iter().map(|flag| flag.x).sum();
    let sum_y: i32 = flags.iter().map(|flag| flag.y).sum();

    Position::new(
        sum_x.rem_euclid(DESTINATION_MODULUS),
        sum_y.rem_euclid(DESTINATION_MODULUS),
    )
}
