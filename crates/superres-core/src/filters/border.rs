/// How samples outside the grid are produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Border {
    /// Mirror with the edge sample repeated: `cba|abcd|dcb`.
    Reflect,
    /// Repeat the edge sample: `aaa|abcd|ddd`.
    Replicate,
    /// Treat everything outside as zero.
    Zero,
}

impl Border {
    /// Map a possibly out-of-range coordinate onto `0..len`.
    ///
    /// Returns `None` for `Border::Zero` when `pos` is outside.
    pub fn resolve(self, pos: isize, len: usize) -> Option<usize> {
        let n = len as isize;
        if (0..n).contains(&pos) {
            return Some(pos as usize);
        }
        match self {
            Border::Zero => None,
            Border::Replicate => Some(pos.clamp(0, n - 1) as usize),
            Border::Reflect => Some(reflect(pos, n)),
        }
    }
}

fn reflect(mut pos: isize, n: isize) -> usize {
    if n == 1 {
        return 0;
    }
    // Offsets can exceed the grid for tiny frames, so fold until inside.
    loop {
        if pos < 0 {
            pos = -pos - 1;
        } else if pos >= n {
            pos = 2 * n - pos - 1;
        } else {
            return pos as usize;
        }
    }
}
