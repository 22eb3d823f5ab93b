//! Pieces module - tetromino shapes
//!
//! Every kind owns four precomputed 4x4 occupancy masks, one per rotation
//! state. Rotation simply selects another mask: there is no wall kick table,
//! a rotation that collides is rejected.

use crate::types::PieceKind;

/// Occupancy of a 4x4 box, indexed `[row][column]`.
pub type Mask = [[bool; 4]; 4];

/// Four rotation states of one kind.
pub type RotationMasks = [Mask; 4];

const E: bool = false;
const X: bool = true;

const I_MASKS: RotationMasks = [
    [[E, E, E, E], [E, E, E, E], [X, X, X, X], [E, E, E, E]],
    [[E, X, E, E], [E, X, E, E], [E, X, E, E], [E, X, E, E]],
    [[E, E, E, E], [E, E, E, E], [X, X, X, X], [E, E, E, E]],
    [[E, X, E, E], [E, X, E, E], [E, X, E, E], [E, X, E, E]],
];

const O_MASKS: RotationMasks = [
    [[E, E, E, E], [E, X, X, E], [E, X, X, E], [E, E, E, E]],
    [[E, E, E, E], [E, X, X, E], [E, X, X, E], [E, E, E, E]],
    [[E, E, E, E], [E, X, X, E], [E, X, X, E], [E, E, E, E]],
    [[E, E, E, E], [E, X, X, E], [E, X, X, E], [E, E, E, E]],
];

const J_MASKS: RotationMasks = [
    [[E, E, E, E], [X, X, X, E], [E, E, X, E], [E, E, E, E]],
    [[E, X, E, E], [E, X, E, E], [X, X, E, E], [E, E, E, E]],
    [[X, E, E, E], [X, X, X, E], [E, E, E, E], [E, E, E, E]],
    [[E, X, X, E], [E, X, E, E], [E, X, E, E], [E, E, E, E]],
];

const L_MASKS: RotationMasks = [
    [[E, E, E, E], [X, X, X, E], [X, E, E, E], [E, E, E, E]],
    [[X, X, E, E], [E, X, E, E], [E, X, E, E], [E, E, E, E]],
    [[E, E, X, E], [X, X, X, E], [E, E, E, E], [E, E, E, E]],
    [[E, X, E, E], [E, X, E, E], [E, X, X, E], [E, E, E, E]],
];

const S_MASKS: RotationMasks = [
    [[E, E, E, E], [E, X, X, E], [X, X, E, E], [E, E, E, E]],
    [[X, E, E, E], [X, X, E, E], [E, X, E, E], [E, E, E, E]],
    [[E, E, E, E], [E, X, X, E], [X, X, E, E], [E, E, E, E]],
    [[X, E, E, E], [X, X, E, E], [E, X, E, E], [E, E, E, E]],
];

const T_MASKS: RotationMasks = [
    [[E, E, E, E], [X, X, X, E], [E, X, E, E], [E, E, E, E]],
    [[E, X, E, E], [X, X, E, E], [E, X, E, E], [E, E, E, E]],
    [[E, X, E, E], [X, X, X, E], [E, E, E, E], [E, E, E, E]],
    [[E, X, E, E], [E, X, X, E], [E, X, E, E], [E, E, E, E]],
];

const Z_MASKS: RotationMasks = [
    [[E, E, E, E], [X, X, E, E], [E, X, X, E], [E, E, E, E]],
    [[E, X, E, E], [X, X, E, E], [X, E, E, E], [E, E, E, E]],
    [[E, E, E, E], [X, X, E, E], [E, X, X, E], [E, E, E, E]],
    [[E, X, E, E], [X, X, E, E], [X, E, E, E], [E, E, E, E]],
];

/// All four rotation masks of a kind.
pub fn masks(kind: PieceKind) -> &'static RotationMasks {
    match kind {
        PieceKind::I => &I_MASKS,
        PieceKind::O => &O_MASKS,
        PieceKind::J => &J_MASKS,
        PieceKind::L => &L_MASKS,
        PieceKind::S => &S_MASKS,
        PieceKind::T => &T_MASKS,
        PieceKind::Z => &Z_MASKS,
    }
}

/// Get the mask for a piece kind and rotation (`rotation` is taken mod 4)
pub fn get_shape(kind: PieceKind, rotation: u8) -> &'static Mask {
    &masks(kind)[(rotation % 4) as usize]
}

/// Occupied `(dx, dy)` offsets of a kind in a rotation, row by row.
pub fn cells(kind: PieceKind, rotation: u8) -> impl Iterator<Item = (i16, i16)> {
    let mask = get_shape(kind, rotation);
    (0..4).flat_map(move |dy| {
        (0..4).filter_map(move |dx| mask[dy][dx].then_some((dx as i16, dy as i16)))
    })
}

/// Rotation index after a left (counter-clockwise) turn.
pub fn rotate_left(rotation: u8) -> u8 {
    (rotation + 3) % 4
}

/// Rotation index after a right (clockwise) turn.
pub fn rotate_right(rotation: u8) -> u8 {
    (rotation + 1) % 4
}
