use opencv::core::{self, Mat, Scalar};
use opencv::prelude::*;

use crate::shared::frame::Frame;

/// Copies a BGR [`Frame`] into an owned 8-bit, 3-channel OpenCV matrix.
///
/// OpenCV matrices are always continuous when allocated this way, so the
/// frame's tightly packed rows map one to one onto the matrix buffer.
pub fn frame_to_mat(frame: &Frame) -> opencv::Result<Mat> {
    let mut mat = Mat::new_rows_cols_with_default(
        frame.height() as i32,
        frame.width() as i32,
        core::CV_8UC3,
        Scalar::all(0.0),
    )?;
    mat.data_bytes_mut()?.copy_from_slice(frame.data());
    Ok(mat)
}
