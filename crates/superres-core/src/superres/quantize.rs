use crate::frame::Displacement;

/// Sub-pixel lattice cell a frame falls into, each component in `[s, 2s)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Phase {
    pub x: usize,
    pub y: usize,
}

/// Integer pixel pre-alignment offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoarseShift {
    pub x: i64,
    pub y: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuantizedDistance {
    pub phase: Phase,
    pub coarse_shift: CoarseShift,
}

/// Quantize a displacement for an upsampling factor `scale` (>= 1).
///
/// Both parts come from the same rounded value `round(d * s)`: the coarse
/// shift is its floor division by `s`, the phase its floor-mod plus `s`.
/// Floor semantics keep negative displacements inside `[s, 2s)` and make
/// `coarse * s + (phase - s) == round(d * s)` hold for every sign.
pub fn quantize(displacement: &Displacement, scale: usize) -> QuantizedDistance {
    debug_assert!(scale >= 1, "upsampling factor must be >= 1");
    let s = scale.max(1) as i64;

    let rounded_x = (displacement.dx * s as f64).round() as i64;
    let rounded_y = (displacement.dy * s as f64).round() as i64;

    let coarse_shift = CoarseShift {
        x: rounded_x.div_euclid(s),
        y: rounded_y.div_euclid(s),
    };
    let phase = Phase {
        x: (rounded_x.rem_euclid(s) + s) as usize,
        y: (rounded_y.rem_euclid(s) + s) as usize,
    };

    QuantizedDistance {
        phase,
        coarse_shift,
    }
}

pub fn quantize_all(displacements: &[Displacement], scale: usize) -> Vec<QuantizedDistance> {
    displacements.iter().map(|d| quantize(d, scale)).collect()
}
