use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// Precomputed mapping from destination pixels to source pixels.
pub struct ScaleLut {
    xs: Vec<usize>,
    ys: Vec<usize>,
}

impl ScaleLut {
    pub fn empty() -> Self {
        Self {
            xs: Vec::new(),
            ys: Vec::new(),
        }
    }
}

pub fn build_scale_lut(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> ScaleLut {
    let sx = src_w as f32 / dst_w.max(1) as f32;
    let sy = src_h as f32 / dst_h.max(1) as f32;

    // Sample at destination pixel centers
    let xs = (0..dst_w)
        .map(|x| (((x as f32 + 0.5) * sx) as usize).min(src_w - 1))
        .collect();
    let ys = (0..dst_h)
        .map(|y| (((y as f32 + 0.5) * sy) as usize).min(src_h - 1))
        .collect();

    ScaleLut { xs, ys }
}

/// Nearest-neighbour stretch of the internal framebuffer onto the window
/// surface. Rows are processed in parallel for cache friendly writes;
/// the flat-shaded columns make anything fancier than nearest pointless.
pub fn blit_stretch(dst: &mut [u32], dw: usize, src: &[u32], sw: usize, lut: &ScaleLut) {
    dst.par_chunks_mut(dw).enumerate().for_each(|(y, dst_row)| {
        let row = lut.ys[y] * sw;
        for (x, px) in dst_row.iter_mut().enumerate() {
            *px = src[row + lut.xs[x]];
        }
    });
}
